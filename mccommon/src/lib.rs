#![deny(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

pub const NUMBER_OF_ADDRESSES: usize = u16::MAX as usize + 1;

/// Width of an address or data word written as hex digits, without prefix.
pub const HEX_WORD_WIDTH: usize = 4;

mod fmt;

mod address;
pub use address::{Address, RESET_VECTOR};

pub mod memory;
pub use memory::MemoryImage;

pub mod symbols;
pub use symbols::{SymbolRecord, SymbolTable};

/// Parses exactly [`HEX_WORD_WIDTH`] hex digits into a word.
///
/// Signs, prefixes, and any other width are rejected, so `"+440"` or `"31400"` do not parse.
pub fn parse_hex_word(text: &str) -> Option<u16> {
    if text.len() != HEX_WORD_WIDTH || !text.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(text, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_word_width() {
        assert_eq!(parse_hex_word("3140"), Some(0x3140));
        assert_eq!(parse_hex_word("beEF"), Some(0xBEEF));
        assert_eq!(parse_hex_word("0000"), Some(0));

        for rejected in ["", "314", "31400", "+314", "0x31", "31g0", "mov", "31 4"] {
            assert_eq!(parse_hex_word(rejected), None, "'{}' should not parse", rejected);
        }
    }
}
