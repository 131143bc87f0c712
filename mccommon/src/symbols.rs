use crate::Address;
use getset::{CopyGetters, Getters};
use std::fmt::{Display, Formatter};
use std::io::Write;

/// A named location. Ordering is by address first, then by name.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Getters, CopyGetters)]
pub struct SymbolRecord {
    #[getset(get_copy = "pub")]
    address: Address,
    #[getset(get = "pub")]
    name: String,
}

impl SymbolRecord {
    pub fn new(address: Address, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
        }
    }
}

/// Formats as one line of a `.symbols` file, without the line break.
impl Display for SymbolRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:04x} {}", self.address, self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    records: Vec<SymbolRecord>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: SymbolRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names recorded for `address`, in insertion order.
    pub fn names_at(&self, address: Address) -> impl Iterator<Item = &str> + '_ {
        self.records
            .iter()
            .filter(move |record| record.address == address)
            .map(|record| record.name.as_str())
    }

    /// Every record, sorted by address and then by name. Duplicates are kept.
    pub fn finalize(mut self) -> Vec<SymbolRecord> {
        self.records.sort();
        self.records
    }
}

pub fn write_symbols(records: &[SymbolRecord], mut writer: impl Write) -> std::io::Result<()> {
    for record in records {
        writeln!(writer, "{}", record)?;
    }
    Ok(())
}
