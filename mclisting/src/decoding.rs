//! Turns the payload of a data line into the bytes it stands for.

mod literal;
mod words;

pub use literal::{decode_literal, LiteralError};
pub use words::decode_words;
