use crate::classifying::{classify, Classified, LineError};
use crate::decoding::{decode_literal, decode_words};
use crate::extraction::extract;
use log::{debug, info};
use mccommon::{Address, MemoryImage, SymbolRecord, SymbolTable};
use miette::SourceSpan;
use std::io::BufRead;

pub use error::ConversionError;

/// The finished products of a conversion, ready to be written out.
#[derive(Debug, Clone)]
pub struct Dump {
    pub image: MemoryImage,
    pub symbols: Vec<SymbolRecord>,
}

pub fn convert_reader(reader: impl BufRead) -> Result<Dump, ConversionError> {
    convert(reader.lines())
}

pub fn convert_str(listing: &str) -> Result<Dump, ConversionError> {
    convert(listing.lines().map(|line| Ok(line.to_owned())))
}

/// Runs every line through a [`Converter`], stopping at the first failure.
pub fn convert(
    lines: impl IntoIterator<Item = std::io::Result<String>>,
) -> Result<Dump, ConversionError> {
    let mut converter = Converter::new();
    for (index, line) in lines.into_iter().enumerate() {
        let line = line?;
        converter
            .feed(&line)
            .map_err(|error| ConversionError::line(index + 1, line.trim(), error))?;
    }
    Ok(converter.finish())
}

/// Accumulates a listing one line at a time, in order.
#[derive(Debug, Default)]
pub struct Converter {
    image: MemoryImage,
    symbols: SymbolTable,
    lines: usize,
    bytes: usize,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one raw line. Blank lines are skipped; spans in errors are relative to the
    /// trimmed line.
    pub fn feed(&mut self, line: &str) -> Result<(), LineError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        self.lines += 1;

        match classify(line)? {
            Classified::Words { address, payload } => {
                let bytes = decode_words(payload.text);
                debug!("{}: {} byte(s) of data", address, bytes.len());
                self.write(address, &bytes, payload.whole())
            }
            Classified::Literal { address, payload } => {
                let bytes = decode_literal(payload)?;
                debug!("{}: {} byte string", address, bytes.len());
                self.write(address, &bytes, payload.whole())
            }
            Classified::Symbol { address, text } => {
                let record = extract(address, text.text);
                debug!("{}: symbol '{}'", address, record.name());
                if let Some(earlier) = self.symbols.names_at(address).next() {
                    debug!("{}: '{}' shares its address with '{}'", address, record.name(), earlier);
                }
                self.symbols.append(record);
                Ok(())
            }
        }
    }

    fn write(
        &mut self,
        address: Address,
        bytes: &[u8],
        at: SourceSpan,
    ) -> Result<(), LineError> {
        self.image
            .write(address, bytes)
            .map_err(|overflow| LineError::buffer_overflow(overflow, at))?;
        self.bytes += bytes.len();
        Ok(())
    }

    pub fn image(&self) -> &MemoryImage {
        &self.image
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn finish(self) -> Dump {
        info!(
            "Converted {} line(s): {} byte(s) written, {} symbol(s)",
            self.lines,
            self.bytes,
            self.symbols.len()
        );
        Dump {
            image: self.image,
            symbols: self.symbols.finalize(),
        }
    }
}

mod error {
    use crate::classifying::LineError;
    use miette::{Diagnostic, NamedSource, Report};
    use thiserror::Error;

    #[derive(Debug, Error, Diagnostic)]
    pub enum ConversionError {
        #[error("Could not read the listing")]
        #[diagnostic(code(mclisting::read))]
        Read(#[from] std::io::Error),
        #[error("Line {} is invalid: {}", .number, .error)]
        #[diagnostic(code(mclisting::line))]
        Line {
            number: usize,
            text: String,
            #[source]
            error: LineError,
        },
    }

    impl ConversionError {
        pub(super) fn line(number: usize, text: &str, error: LineError) -> Self {
            Self::Line {
                number,
                text: text.to_owned(),
                error,
            }
        }

        /// A report showing the offending line, named `<source_name>:<line>`.
        pub fn into_report(self, source_name: &str) -> Report {
            match self {
                Self::Line {
                    number,
                    text,
                    error,
                } => Report::new(error)
                    .with_source_code(NamedSource::new(format!("{}:{}", source_name, number), text))
                    .wrap_err(format!("Line {} is invalid", number)),
                read => Report::new(read),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mccommon::NUMBER_OF_ADDRESSES;

    fn symbol(address: u16, name: &str) -> SymbolRecord {
        SymbolRecord::new(Address::new(address), name)
    }

    #[test]
    fn test_data_line() {
        let dump = convert_str("4400: 3140 0044").unwrap();
        assert_eq!(&dump.image.snapshot()[0x4400..0x4404], &[0x31, 0x40, 0x00, 0x44]);
        assert!(dump.symbols.is_empty());
    }

    #[test]
    fn test_symbol_lines() {
        let dump = convert_str("4400 <_start>\n4400 loop:").unwrap();
        assert_eq!(dump.symbols, [symbol(0x4400, "_start"), symbol(0x4400, "loop")]);
    }

    #[test]
    fn test_string_line() {
        let dump = convert_str("4400: \"Hi\"").unwrap();
        assert_eq!(&dump.image.snapshot()[0x4400..0x4402], b"Hi");
        assert_eq!(dump.image[Address::new(0x4402)], 0);
    }

    #[test]
    fn test_later_line_wins() {
        let dump = convert_str("4400: 1122\n4400: 3344").unwrap();
        assert_eq!(&dump.image.snapshot()[0x4400..0x4402], &[0x33, 0x44]);
    }

    #[test]
    fn test_symbols_only_image_is_zero() {
        let dump = convert_str("0010 b\n\n   \n0010 a\n4400 <main>\n").unwrap();
        assert_eq!(dump.image.snapshot().len(), NUMBER_OF_ADDRESSES);
        assert!(dump.image.snapshot().iter().all(|&byte| byte == 0));
        assert_eq!(
            dump.symbols,
            [symbol(0x10, "a"), symbol(0x10, "b"), symbol(0x4400, "main")]
        );
    }

    #[test]
    fn test_listing() {
        let listing = "\
            4400 <__init_stack>\n\
            4400:  3140 0044      mov\t#0x4400, sp\n\
            4404 <__low_level_init>\n\
            4404:  1542 5c01      mov\t&0x015c, r5\n\
            4408:  75f3           and.b\t#-0x1, r5\n\
            \n\
            4520: \"Access granted!\\n\"\n\
            fffe:  0044\n";
        let dump = convert_str(listing).unwrap();
        let image = dump.image.snapshot();
        assert_eq!(
            &image[0x4400..0x440A],
            &[0x31, 0x40, 0x00, 0x44, 0x15, 0x42, 0x5c, 0x01, 0x75, 0xf3]
        );
        assert_eq!(&image[0x4520..0x4530], b"Access granted!\n");
        assert_eq!(dump.image.reset_vector(), Address::new(0x4400));
        assert_eq!(
            dump.symbols,
            [symbol(0x4400, "__init_stack"), symbol(0x4404, "__low_level_init")]
        );
    }

    #[test]
    fn test_overflow_aborts() {
        let error = convert_str("4400 main\nffff: 1234").unwrap_err();
        match error {
            ConversionError::Line {
                number: 2,
                text,
                error: LineError::BufferOverflow { overflow, at },
            } => {
                assert_eq!(text, "ffff: 1234");
                assert_eq!(overflow.start, Address::MAX);
                assert_eq!(overflow.length, 2);
                assert_eq!(at, SourceSpan::from((6, 4)));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(convert_str("fffe: 1234").is_ok());
        assert!(convert_str("ffff: \"\"").is_ok());
    }

    #[test]
    fn test_first_error_wins() {
        let error = convert_str("4400: 3140\n  zz00 main\n4400: \"open").unwrap_err();
        assert!(matches!(
            error,
            ConversionError::Line {
                number: 2,
                error: LineError::MalformedAddress { .. },
                ..
            }
        ));

        let error = convert_str("4400: \"open").unwrap_err();
        assert!(matches!(
            error,
            ConversionError::Line {
                number: 1,
                error: LineError::InvalidStringLiteral(_),
                ..
            }
        ));
    }

    #[test]
    fn test_line_report() {
        let report = convert_str("4400 main\n44z0: 3140")
            .unwrap_err()
            .into_report("level.asm");
        assert_eq!(report.to_string(), "Line 2 is invalid");
        assert!(report
            .chain()
            .any(|cause| cause.to_string() == "Lines must start with a four digit hex address"));
    }

    #[test]
    fn test_read_error() {
        let lines = vec![
            Ok("4400 main".to_owned()),
            Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "not utf-8")),
        ];
        assert!(matches!(convert(lines), Err(ConversionError::Read(_))));
    }

    #[test]
    fn test_reader_input() {
        let dump = convert_reader(&b"4400: 3140\r\n4400 <start>\r\n"[..]).unwrap();
        assert_eq!(&dump.image.snapshot()[0x4400..0x4402], &[0x31, 0x40]);
        assert_eq!(dump.symbols, [symbol(0x4400, "start")]);
    }

    #[test]
    fn test_converter_state() {
        let mut converter = Converter::new();
        converter.feed("4400 main").unwrap();
        converter.feed("4400 <start>").unwrap();
        converter.feed("").unwrap();
        assert_eq!(converter.symbols().len(), 2);
        assert_eq!(converter.image()[Address::new(0x4400)], 0);
    }
}
