use mccommon::{Address, HEX_WORD_WIDTH};
use miette::SourceSpan;

pub use error::LineError;

/// A slice of a trimmed line, remembering where in the line it starts.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Fragment<'a> {
    /// The trimmed remainder of `line` from byte `from` onwards.
    fn trimmed(line: &'a str, from: usize) -> Self {
        let rest = &line[from..];
        let leading = rest.len() - rest.trim_start().len();
        Self {
            text: rest.trim(),
            offset: from + leading,
        }
    }

    /// A span of `length` bytes at `start` within this fragment, relative to the whole line.
    pub fn span(&self, start: usize, length: usize) -> SourceSpan {
        (self.offset + start, length).into()
    }

    pub fn whole(&self) -> SourceSpan {
        self.span(0, self.text.len())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Classified<'a> {
    /// `ADDR: 3140 0044 ...`
    Words {
        address: Address,
        payload: Fragment<'a>,
    },
    /// `ADDR: "..."`
    Literal {
        address: Address,
        payload: Fragment<'a>,
    },
    /// `ADDR <name>`, `ADDR name:` or `ADDR name`
    Symbol { address: Address, text: Fragment<'a> },
}

impl Classified<'_> {
    pub fn address(&self) -> Address {
        match self {
            Self::Words { address, .. }
            | Self::Literal { address, .. }
            | Self::Symbol { address, .. } => *address,
        }
    }
}

/// Classifies one trimmed, non-empty listing line by the character following its address.
pub fn classify(line: &str) -> Result<Classified<'_>, LineError> {
    let address = line
        .get(..HEX_WORD_WIDTH)
        .and_then(Address::from_hex)
        .ok_or_else(|| LineError::malformed_address(address_span(line)))?;

    match line[HEX_WORD_WIDTH..].chars().next() {
        None => Err(LineError::truncated((0, HEX_WORD_WIDTH).into())),
        Some(':') => {
            let payload = Fragment::trimmed(line, HEX_WORD_WIDTH + 1);
            Ok(if payload.text.starts_with('"') {
                Classified::Literal { address, payload }
            } else {
                Classified::Words { address, payload }
            })
        }
        Some(_) => Ok(Classified::Symbol {
            address,
            text: Fragment::trimmed(line, HEX_WORD_WIDTH),
        }),
    }
}

/// Covers at most the first four characters, without splitting a multibyte one.
fn address_span(line: &str) -> SourceSpan {
    let end = line
        .char_indices()
        .nth(HEX_WORD_WIDTH)
        .map_or(line.len(), |(index, _)| index);
    (0, end).into()
}

mod error {
    use crate::decoding::LiteralError;
    use mccommon::memory::OverflowError;
    use miette::{Diagnostic, SourceSpan};
    use thiserror::Error;

    #[derive(Debug, Error, Diagnostic)]
    pub enum LineError {
        #[error("Lines must start with a four digit hex address")]
        #[diagnostic(code(mclisting::malformed_address))]
        MalformedAddress {
            #[label("not an address")]
            at: SourceSpan,
        },
        #[error("Line ends right after its address")]
        #[diagnostic(
            code(mclisting::truncated_line),
            help("follow the address with ':' and data, or with a symbol name")
        )]
        TruncatedLine {
            #[label("nothing follows this")]
            at: SourceSpan,
        },
        #[error(transparent)]
        #[diagnostic(transparent)]
        InvalidStringLiteral(#[from] LiteralError),
        #[error("{}", .overflow)]
        #[diagnostic(
            code(mclisting::buffer_overflow),
            help("the address space ends at 0xffff and writes never wrap around")
        )]
        BufferOverflow {
            overflow: OverflowError,
            #[label("this data does not fit")]
            at: SourceSpan,
        },
    }

    impl LineError {
        pub(super) fn malformed_address(at: SourceSpan) -> Self {
            Self::MalformedAddress { at }
        }

        pub(super) fn truncated(at: SourceSpan) -> Self {
            Self::TruncatedLine { at }
        }

        pub(crate) fn buffer_overflow(overflow: OverflowError, at: SourceSpan) -> Self {
            Self::BufferOverflow { overflow, at }
        }
    }
}
