// lets the derive's absolute paths resolve inside this crate too
extern crate self as disk_serialize;

mod numbers;

pub use disk_serialize_macros::DiskDe;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
    NA,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskDeErr {
    #[error("truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },
}

impl DiskDeErr {
    /// shifts the byte counts of an error raised on `input[offset..]` so they
    /// describe the whole input instead
    pub fn at_offset(self, offset: usize) -> Self {
        match self {
            DiskDeErr::TruncatedInput { needed, available } => DiskDeErr::TruncatedInput {
                needed: needed + offset,
                available: available + offset,
            },
        }
    }
}

pub trait DiskDeserialize {
    /// the deserialize function takes in endianness, a slice of data, and returns the parsed self
    /// and number of bytes read
    /// it will error if the slice is shorter than the record
    fn deserialize(endianness: Endianness, input: &[u8]) -> Result<(Self, usize), DiskDeErr>
    where
        Self: Sized;
}
