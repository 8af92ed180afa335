use core::fmt;

use disk_serialize::{DiskDeErr, DiskDeserialize, Endianness};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// byte order of the canonical text form: the first three groups are stored
/// little endian, the last two as-is
const CANONICAL_ORDER: [usize; 16] = [3, 2, 1, 0, 5, 4, 7, 6, 8, 9, 10, 11, 12, 13, 14, 15];

/// A GUID as it sits on disk, the 16 bytes untouched.
#[derive(PartialEq, Eq, Clone, Copy, Default, Hash, PartialOrd, Ord)]
pub struct Guid {
    pub bytes: [u8; 16],
}

impl Guid {
    pub const fn from_buf(buf: [u8; 16]) -> Self {
        Guid { bytes: buf }
    }

    pub fn to_buf(&self) -> [u8; 16] {
        self.bytes
    }

    pub fn canonical(&self) -> CanonicalGuid {
        format_guid(&self.bytes)
    }

    /// Parses `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX`, either case, back into
    /// the on-disk byte order.
    pub fn from_str(val: &str) -> Option<Self> {
        let text = val.as_bytes();
        if text.len() != 36 {
            return None;
        }

        let mut bytes = [0u8; 16];
        let mut pos = 0;
        for (idx, &disk_idx) in CANONICAL_ORDER.iter().enumerate() {
            if matches!(idx, 4 | 6 | 8 | 10) {
                if text[pos] != b'-' {
                    return None;
                }
                pos += 1;
            }

            let high = hex_value(text[pos])?;
            let low = hex_value(text[pos + 1])?;
            bytes[disk_idx] = high << 4 | low;
            pos += 2;
        }

        Some(Guid { bytes })
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

impl DiskDeserialize for Guid {
    /// copied verbatim, the mixed endianness is only resolved when formatting
    fn deserialize(_endianness: Endianness, input: &[u8]) -> Result<(Self, usize), DiskDeErr> {
        let (bytes, size) = <[u8; 16]>::deserialize(Endianness::NA, input)?;
        Ok((Guid { bytes }, size))
    }
}

impl From<Guid> for uuid::Uuid {
    fn from(guid: Guid) -> Self {
        uuid::Uuid::from_bytes_le(guid.bytes)
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({})", self.canonical())
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical().as_str())
    }
}

/// A stack-allocated GUID string (36 bytes for hyphenated format)
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CanonicalGuid {
    bytes: [u8; 36],
}

impl CanonicalGuid {
    pub fn as_str(&self) -> &str {
        // Safety: only ASCII hex digits and hyphens are ever written
        unsafe { core::str::from_utf8_unchecked(&self.bytes) }
    }
}

impl fmt::Display for CanonicalGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CanonicalGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl PartialEq<&str> for CanonicalGuid {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Renders an on-disk GUID as uppercase `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX`.
pub fn format_guid(guid: &[u8; 16]) -> CanonicalGuid {
    let mut bytes = [0u8; 36];

    let mut i = 0;
    for (idx, &disk_idx) in CANONICAL_ORDER.iter().enumerate() {
        // Add hyphens at positions 8, 13, 18, 23
        if matches!(idx, 4 | 6 | 8 | 10) {
            bytes[i] = b'-';
            i += 1;
        }

        let byte = guid[disk_idx];
        bytes[i] = HEX[(byte >> 4) as usize];
        bytes[i + 1] = HEX[(byte & 0x0f) as usize];
        i += 2;
    }

    CanonicalGuid { bytes }
}
