pub mod classifying;
pub mod conversion;
pub mod decoding;
pub mod extraction;
pub mod output;
