use mccommon::parse_hex_word;

/// Decodes whitespace separated four digit hex words, high byte first.
///
/// Decoding stops at the first token that is not exactly four hex digits; that token and
/// everything after it (usually the disassembled mnemonic) is ignored.
pub fn decode_words(payload: &str) -> Vec<u8> {
    payload
        .split_whitespace()
        .map_while(parse_hex_word)
        .flat_map(u16::to_be_bytes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_bytes() {
        assert_eq!(decode_words("3140"), [0x31, 0x40]);
        assert_eq!(decode_words("3140 0044"), [0x31, 0x40, 0x00, 0x44]);
        assert_eq!(decode_words("ABcd"), [0xAB, 0xCD]);
    }

    #[test]
    fn test_stops_at_mnemonic() {
        assert_eq!(
            decode_words("3140 0044      mov\t#0x4400, sp"),
            [0x31, 0x40, 0x00, 0x44]
        );
        assert_eq!(decode_words("b012 5844\tcall\t#0x4458"), [0xB0, 0x12, 0x58, 0x44]);
        // a too-wide token ends the line even when hex words follow
        assert_eq!(decode_words("1234 31400 5678"), [0x12, 0x34]);
        assert_eq!(decode_words("12 3456"), Vec::<u8>::new());
    }

    #[test]
    fn test_empty_payload() {
        assert!(decode_words("").is_empty());
        assert!(decode_words("ret").is_empty());
    }
}
