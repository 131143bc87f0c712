use crate::fmt::impl_fmt;
use crate::parse_hex_word;
use std::fmt::{Display, Formatter};

/// Where the CPU fetches its entry point from.
pub const RESET_VECTOR: Address = Address::new(0xFFFE);

#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Address(u16);

impl Address {
    pub const MAX: Self = Self(u16::MAX);
    pub const ZERO: Self = Self(0);

    pub const fn new(at: u16) -> Self {
        Self(at)
    }

    /// Reads an address written as exactly four hex digits (`"4400"`).
    pub fn from_hex(digits: &str) -> Option<Self> {
        parse_hex_word(digits).map(Self)
    }

    pub fn wrapping_add(self, offset: u16) -> Self {
        Self(self.0.wrapping_add(offset))
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl From<u16> for Address {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Address> for u16 {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl From<Address> for usize {
    fn from(value: Address) -> Self {
        value.0.into()
    }
}

impl_fmt! {
    (Address, u16),
    std::fmt::LowerHex,
    std::fmt::UpperHex,
    std::fmt::Octal,
    std::fmt::Binary
}
