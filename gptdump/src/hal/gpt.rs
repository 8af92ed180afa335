use alloc::string::String;
use alloc::vec::Vec;

use disk_serialize::{DiskDe, DiskDeserialize, Endianness};

use crate::err::{DecodeErr, GptErr};
use crate::utils::guid::Guid;
use crate::utils::utf16::utf16_to_utf8;

pub const SECTOR_SIZE: usize = 512;
/// the header record occupies a whole sector
pub const GPT_HEADER_SECTOR: usize = SECTOR_SIZE;
/// bytes of the header sector that carry fields
pub const GPT_HEADER_LEN: usize = 92;
pub const GPT_ENTRY_SIZE: usize = 128;
pub const GPT_NAME_UNITS: usize = 36;
pub const GPT_SIGNATURE: [u8; 8] = *b"EFI PART";

#[derive(DiskDe, Debug, PartialEq, Eq, Clone, Copy)]
pub struct GptHeader {
    pub sig: [u8; 8],
    pub revision: u32,
    pub size: u32,
    pub header_crc32: u32,
    pub reserved: u32,
    pub loc: u64,
    pub backup_loc: u64,
    pub first_usable_block: u64,
    pub last_usable_block: u64,
    pub guid: Guid,
    pub array_start: u64,
    pub entry_num: u32,
    pub entry_size: u32,
    pub array_crc32: u32,
}

impl GptHeader {
    pub fn has_signature(&self) -> bool {
        self.sig == GPT_SIGNATURE
    }

    pub fn check_signature(&self) -> Result<(), GptErr> {
        if self.has_signature() {
            Ok(())
        } else {
            Err(GptErr::BadSignature(self.sig))
        }
    }

    /// the signature as text, up to the first NUL
    pub fn signature(&self) -> String {
        let end = self.sig.iter().position(|&b| b == 0).unwrap_or(self.sig.len());
        String::from_utf8_lossy(&self.sig[..end]).into_owned()
    }
}

/// Decodes the primary header from its 512-byte sector. Only the first
/// 92 bytes carry fields, the rest is padding and is not kept.
pub fn decode_header(bytes: &[u8]) -> Result<GptHeader, DecodeErr> {
    if bytes.len() < GPT_HEADER_SECTOR {
        return Err(DecodeErr::TruncatedInput {
            needed: GPT_HEADER_SECTOR,
            available: bytes.len(),
        });
    }

    let (header, _) = GptHeader::deserialize(Endianness::Little, &bytes[..GPT_HEADER_LEN])?;
    Ok(header)
}

#[derive(DiskDe, Debug, PartialEq, Eq, Clone)]
pub struct GuidPartitionEntry {
    pub type_guid: Guid,
    pub unique_guid: Guid,
    pub start_lba: u64,
    pub end_lba: u64,
    pub flags: u64,
    pub name: [u16; GPT_NAME_UNITS],
}

impl GuidPartitionEntry {
    /// A slot whose bounds add up to zero marks the end of the table. The sum
    /// wraps, so `start = x, end = 2^64 - x` counts as null too.
    pub fn is_null(&self) -> bool {
        self.start_lba.wrapping_add(self.end_lba) == 0
    }

    /// All 36 name units as UTF-8, zero padding included.
    pub fn name_bytes(&self) -> Result<Vec<u8>, DecodeErr> {
        utf16_to_utf8(&self.name, GPT_NAME_UNITS)
    }

    /// The name cut at the first zero byte, for printing.
    pub fn display_name(&self) -> Result<String, DecodeErr> {
        let bytes = self.name_bytes()?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    /// Like `display_name`, but a name cut off inside a surrogate pair keeps
    /// the units before it and ends in U+FFFD.
    pub fn display_name_lossy(&self) -> String {
        match self.display_name() {
            Ok(name) => name,
            Err(DecodeErr::MalformedInput { index, .. }) => {
                let bytes = utf16_to_utf8(&self.name, index).unwrap_or_default();
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                let mut name = String::from_utf8_lossy(&bytes[..end]).into_owned();
                if end == bytes.len() {
                    name.push(char::REPLACEMENT_CHARACTER);
                }
                name
            }
            Err(DecodeErr::TruncatedInput { .. }) => String::new(),
        }
    }
}

/// Decodes one 128-byte slot of the partition array. Whether the slot ends
/// the table is left to the caller, see [`GuidPartitionEntry::is_null`].
pub fn decode_entry(bytes: &[u8]) -> Result<GuidPartitionEntry, DecodeErr> {
    if bytes.len() < GPT_ENTRY_SIZE {
        return Err(DecodeErr::TruncatedInput {
            needed: GPT_ENTRY_SIZE,
            available: bytes.len(),
        });
    }

    let (entry, _) =
        GuidPartitionEntry::deserialize(Endianness::Little, &bytes[..GPT_ENTRY_SIZE])?;
    Ok(entry)
}
