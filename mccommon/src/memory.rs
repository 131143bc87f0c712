//! The flat 64 KiB image a listing is reconstructed into.

use crate::{Address, NUMBER_OF_ADDRESSES, RESET_VECTOR};
use log::warn;
use miette::Diagnostic;
use std::io::Write;
use std::ops::Index;
use std::path::Path;
use tap::Conv;
use thiserror::Error;

/// Every address holds one byte; the image is always exactly [`NUMBER_OF_ADDRESSES`] long.
#[derive(Debug, Clone)]
pub struct MemoryImage {
    data: Box<[u8]>,
    written: Box<[bool]>,
}

impl MemoryImage {
    pub fn new() -> Self {
        Self {
            data: vec![0; NUMBER_OF_ADDRESSES].into_boxed_slice(),
            written: vec![false; NUMBER_OF_ADDRESSES].into_boxed_slice(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file_contents = std::fs::read(path)?;
        Self::from_bytes(file_contents)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LoadError> {
        if bytes.len() == NUMBER_OF_ADDRESSES {
            Ok(Self {
                data: bytes.into_boxed_slice(),
                written: vec![false; NUMBER_OF_ADDRESSES].into_boxed_slice(),
            })
        } else {
            Err(LoadError::WrongSize {
                size: bytes.len(),
                expected: NUMBER_OF_ADDRESSES,
            })
        }
    }

    /// Copies `bytes` into the image starting at `start`.
    ///
    /// The range must end at or before the end of the address space; nothing wraps around and
    /// nothing is truncated, a range that does not fit leaves the image untouched. Bytes set by an
    /// earlier write are replaced.
    pub fn write(&mut self, start: Address, bytes: &[u8]) -> Result<(), OverflowError> {
        let from = start.conv::<usize>();
        let to = from + bytes.len();
        if to > NUMBER_OF_ADDRESSES {
            return Err(OverflowError {
                start,
                length: bytes.len(),
            });
        }

        let overwritten = self.written[from..to].iter().filter(|&&written| written).count();
        if overwritten > 0 {
            warn!(
                "{} byte(s) starting at {} already written, later write wins",
                overwritten, start
            );
        }

        self.data[from..to].copy_from_slice(bytes);
        self.written[from..to].fill(true);
        Ok(())
    }

    pub fn snapshot(&self) -> &[u8] {
        &self.data
    }

    /// Reads a little-endian word; the second byte of `0xffff` comes from `0x0000`.
    pub fn word(&self, at: Address) -> u16 {
        u16::from_le_bytes([self[at], self[at.wrapping_add(1)]])
    }

    pub fn reset_vector(&self) -> Address {
        Address::new(self.word(RESET_VECTOR))
    }

    pub fn save(&self, mut writer: impl Write) -> std::io::Result<()> {
        writer.write_all(&self.data)
    }
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Address> for MemoryImage {
    type Output = u8;

    fn index(&self, index: Address) -> &Self::Output {
        &self.data[index.conv::<usize>()]
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Error, Diagnostic)]
#[error("{} byte(s) written at {} run past the end of memory", .length, .start)]
#[diagnostic(
    code(mccommon::memory::overflow),
    help("the address space ends at 0xffff and writes never wrap around")
)]
pub struct OverflowError {
    pub start: Address,
    pub length: usize,
}

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("Memory image is {} bytes, expected {}", .size, .expected)]
    #[diagnostic(code(mccommon::memory::wrong_size))]
    WrongSize { size: usize, expected: usize },
    #[error("Could not read memory image")]
    #[diagnostic(code(mccommon::memory::io))]
    IO(#[from] std::io::Error),
}
