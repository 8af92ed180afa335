use disk_serialize::DiskDeErr;
use thiserror::Error;

/// Failures of the pure decoders.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErr {
    #[error("truncated input: needed {needed}, {available} available")]
    TruncatedInput { needed: usize, available: usize },
    #[error("high surrogate {unit:#06X} at code unit {index} has no low surrogate after it")]
    MalformedInput { index: usize, unit: u16 },
}

impl From<DiskDeErr> for DecodeErr {
    fn from(value: DiskDeErr) -> Self {
        match value {
            DiskDeErr::TruncatedInput { needed, available } => {
                DecodeErr::TruncatedInput { needed, available }
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum GptErr {
    #[error(transparent)]
    Decode(#[from] DecodeErr),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad GPT signature {0:02X?}, expected \"EFI PART\"")]
    BadSignature([u8; 8]),
    #[error("unsupported partition entry size {0}")]
    BadEntrySize(u32),
    #[error("header declares {0} partition entries")]
    TooManyEntries(u32),
    #[error("partition array LBA {0} is past any addressable byte")]
    BadArrayStart(u64),
}
