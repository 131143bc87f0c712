use crate::classifying::Fragment;
use std::str::CharIndices;

pub use error::LiteralError;

/// Decodes a double-quoted byte string literal into its raw bytes.
///
/// Any ASCII character other than `"` and `\` may appear unescaped and stands for itself.
/// Recognised escapes are `\\`, `\'`, `\"`, `\a`, `\b`, `\f`, `\n`, `\r`, `\t`, `\v`, `\xHH` and
/// one to three octal digits.
/// The closing quote has to end the payload.
pub fn decode_literal(payload: Fragment<'_>) -> Result<Vec<u8>, LiteralError> {
    let text = payload.text;
    let mut chars = text.char_indices();
    if !matches!(chars.next(), Some((_, '"'))) {
        return Err(LiteralError::not_quoted(payload.whole()));
    }

    let mut bytes = Vec::with_capacity(text.len());
    while let Some((index, character)) = chars.next() {
        match character {
            '"' => {
                let rest = &text[index + 1..];
                if !rest.is_empty() {
                    return Err(LiteralError::trailing_text(payload.span(index + 1, rest.len())));
                }
                return Ok(bytes);
            }
            '\\' => bytes.push(escape(payload, index, &mut chars)?),
            ascii if ascii.is_ascii() => bytes.push(ascii as u8),
            other => {
                return Err(LiteralError::unsupported_character(
                    other,
                    payload.span(index, other.len_utf8()),
                ))
            }
        }
    }

    Err(LiteralError::unterminated(payload.whole()))
}

/// Decodes the escape whose backslash sits at `start`.
fn escape(
    payload: Fragment<'_>,
    start: usize,
    chars: &mut CharIndices<'_>,
) -> Result<u8, LiteralError> {
    let text = payload.text;
    let (index, code) = chars
        .next()
        .ok_or_else(|| LiteralError::unterminated(payload.whole()))?;

    Ok(match code {
        '\\' => b'\\',
        '\'' => b'\'',
        '"' => b'"',
        'a' => 0x07,
        'b' => 0x08,
        'f' => 0x0C,
        'n' => b'\n',
        'r' => b'\r',
        't' => b'\t',
        'v' => 0x0B,
        'x' => {
            let digits = text
                .get(index + 1..index + 3)
                .filter(|digits| digits.bytes().all(|byte| byte.is_ascii_hexdigit()))
                .ok_or_else(|| LiteralError::invalid_hex_escape(payload.span(start, 2)))?;
            chars.nth(1);
            u8::from_str_radix(digits, 16)
                .map_err(|_| LiteralError::invalid_hex_escape(payload.span(start, 4)))?
        }
        '0'..='7' => {
            let length = text[index..]
                .bytes()
                .take(3)
                .take_while(|byte| (b'0'..=b'7').contains(byte))
                .count();
            if length > 1 {
                chars.nth(length - 2);
            }
            let at = payload.span(start, length + 1);
            u16::from_str_radix(&text[index..index + length], 8)
                .ok()
                .and_then(|value| u8::try_from(value).ok())
                .ok_or_else(|| LiteralError::octal_out_of_range(at))?
        }
        other => {
            return Err(LiteralError::unknown_escape(
                other,
                payload.span(start, 1 + other.len_utf8()),
            ))
        }
    })
}

mod error {
    use miette::{Diagnostic, SourceSpan};
    use thiserror::Error;

    #[derive(Debug, Error, Diagnostic)]
    pub enum LiteralError {
        #[error("String literals must start with a double quote")]
        #[diagnostic(code(mclisting::literal::not_quoted))]
        NotQuoted {
            #[label("here")]
            at: SourceSpan,
        },
        #[error("Unterminated string literal")]
        #[diagnostic(
            code(mclisting::literal::unterminated),
            help("add a quote to the end of the string literal")
        )]
        Unterminated {
            #[label("here")]
            at: SourceSpan,
        },
        #[error("Unexpected text after the string literal")]
        #[diagnostic(code(mclisting::literal::trailing_text))]
        TrailingText {
            #[label("here")]
            at: SourceSpan,
        },
        #[error("Unknown escape sequence '\\{}'", .escape)]
        #[diagnostic(code(mclisting::literal::unknown_escape))]
        UnknownEscape {
            escape: char,
            #[label("here")]
            at: SourceSpan,
        },
        #[error("Invalid hex escape")]
        #[diagnostic(
            code(mclisting::literal::invalid_hex_escape),
            help("hex escapes take exactly two hex digits, like '\\x0a'")
        )]
        InvalidHexEscape {
            #[label("here")]
            at: SourceSpan,
        },
        #[error("Octal escape does not fit in a byte")]
        #[diagnostic(
            code(mclisting::literal::octal_out_of_range),
            help("octal escapes go up to '\\377'")
        )]
        OctalOutOfRange {
            #[label("here")]
            at: SourceSpan,
        },
        #[error("Character {:?} cannot appear in a byte string", .character)]
        #[diagnostic(
            code(mclisting::literal::unsupported_character),
            help("only ASCII may appear unescaped, use '\\x' escapes for other bytes")
        )]
        UnsupportedCharacter {
            character: char,
            #[label("here")]
            at: SourceSpan,
        },
    }

    impl LiteralError {
        pub(super) fn not_quoted(at: SourceSpan) -> Self {
            Self::NotQuoted { at }
        }

        pub(super) fn unterminated(at: SourceSpan) -> Self {
            Self::Unterminated { at }
        }

        pub(super) fn trailing_text(at: SourceSpan) -> Self {
            Self::TrailingText { at }
        }

        pub(super) fn unknown_escape(escape: char, at: SourceSpan) -> Self {
            Self::UnknownEscape { escape, at }
        }

        pub(super) fn invalid_hex_escape(at: SourceSpan) -> Self {
            Self::InvalidHexEscape { at }
        }

        pub(super) fn octal_out_of_range(at: SourceSpan) -> Self {
            Self::OctalOutOfRange { at }
        }

        pub(super) fn unsupported_character(character: char, at: SourceSpan) -> Self {
            Self::UnsupportedCharacter { character, at }
        }
    }
}
