use std::io::{Read, Seek, SeekFrom};

use alloc::vec;
use alloc::vec::Vec;
use terminal::log;

use crate::err::{DecodeErr, GptErr};
use crate::hal::gpt::{
    GPT_ENTRY_SIZE, GPT_HEADER_SECTOR, GptHeader, GuidPartitionEntry, SECTOR_SIZE, decode_entry,
    decode_header,
};

/// slots read when the header's own counts are not trusted
pub const FIXED_ENTRY_COUNT: usize = 128;
/// upper bounds on the header's counts in [`EntryLimit::Declared`] mode
pub const MAX_DECLARED_ENTRIES: u32 = 65536;
pub const MAX_DECLARED_ENTRY_SIZE: usize = 4096;

const HEADER_OFFSET: u64 = SECTOR_SIZE as u64;
const FIXED_ARRAY_OFFSET: u64 = HEADER_OFFSET + GPT_HEADER_SECTOR as u64;

/// How the partition array is located and sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryLimit {
    /// 128 slots of 128 bytes right after the header sector, whatever the
    /// header says
    #[default]
    Fixed,
    /// `array_start`, `entry_num` and `entry_size` from the header
    Declared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GptTable {
    pub header: GptHeader,
    /// the slots before the first null entry, in disk order
    pub entries: Vec<GuidPartitionEntry>,
}

/// where the array sits and how its slots are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArrayLayout {
    offset: u64,
    count: usize,
    stride: usize,
}

pub struct GptReader<R> {
    source: R,
    limit: EntryLimit,
}

impl<R: Read + Seek> GptReader<R> {
    pub fn new(source: R, limit: EntryLimit) -> Self {
        GptReader { source, limit }
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    pub fn read_header(&mut self) -> Result<GptHeader, GptErr> {
        log!("Reading GPT header at byte offset {}", HEADER_OFFSET);
        let buf = self.read_at(HEADER_OFFSET, GPT_HEADER_SECTOR)?;
        let header = decode_header(&buf)?;

        log!(
            "GPT header: revision={:#x}, array_start={}, entry_num={}, entry_size={}",
            header.revision,
            header.array_start,
            header.entry_num,
            header.entry_size
        );
        Ok(header)
    }

    pub fn read_entries(&mut self, header: &GptHeader) -> Result<Vec<GuidPartitionEntry>, GptErr> {
        let layout = self.layout(header)?;
        log!(
            "Reading {} partition slots of {} bytes at byte offset {}",
            layout.count,
            layout.stride,
            layout.offset
        );

        self.source.seek(SeekFrom::Start(layout.offset))?;

        let mut entries = vec![];
        let mut slot = Vec::with_capacity(layout.stride);
        // bytes of the array read so far
        let mut read = 0;
        for index in 0..layout.count {
            let start = index * layout.stride;

            slot.clear();
            (&mut self.source)
                .take(layout.stride as u64)
                .read_to_end(&mut slot)?;
            read += slot.len();

            // a slot we need that the image does not fully hold
            if read < start + GPT_ENTRY_SIZE {
                log!("Image ends inside partition slot {}", index);
                return Err(DecodeErr::TruncatedInput {
                    needed: start + GPT_ENTRY_SIZE,
                    available: read,
                }
                .into());
            }

            let entry = decode_entry(&slot)?;
            if entry.is_null() {
                log!("Null entry at index={}, stopping", index);
                return Ok(entries);
            }

            entries.push(entry);
        }

        log!("All {} partition slots are in use", layout.count);
        Ok(entries)
    }

    pub fn read_table(&mut self) -> Result<GptTable, GptErr> {
        let header = self.read_header()?;
        let entries = self.read_entries(&header)?;
        Ok(GptTable { header, entries })
    }

    fn layout(&self, header: &GptHeader) -> Result<ArrayLayout, GptErr> {
        match self.limit {
            EntryLimit::Fixed => Ok(ArrayLayout {
                offset: FIXED_ARRAY_OFFSET,
                count: FIXED_ENTRY_COUNT,
                stride: GPT_ENTRY_SIZE,
            }),
            EntryLimit::Declared => {
                let stride = header.entry_size as usize;
                if stride < GPT_ENTRY_SIZE
                    || stride > MAX_DECLARED_ENTRY_SIZE
                    || stride % GPT_ENTRY_SIZE != 0
                    || !(stride / GPT_ENTRY_SIZE).is_power_of_two()
                {
                    log!("Rejecting declared entry size {}", header.entry_size);
                    return Err(GptErr::BadEntrySize(header.entry_size));
                }

                if header.entry_num > MAX_DECLARED_ENTRIES {
                    log!("Rejecting declared entry count {}", header.entry_num);
                    return Err(GptErr::TooManyEntries(header.entry_num));
                }

                let offset = header
                    .array_start
                    .checked_mul(SECTOR_SIZE as u64)
                    .ok_or(GptErr::BadArrayStart(header.array_start))?;

                Ok(ArrayLayout {
                    offset,
                    count: header.entry_num as usize,
                    stride,
                })
            }
        }
    }

    /// Reads up to `len` bytes at `offset`, fewer when the source ends first.
    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, GptErr> {
        self.source.seek(SeekFrom::Start(offset))?;

        let mut buf = vec![];
        (&mut self.source).take(len as u64).read_to_end(&mut buf)?;

        if buf.len() < len {
            log!(
                "Short read at byte offset {}: {} of {} bytes",
                offset,
                buf.len(),
                len
            );
        }

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    /// counts the bytes handed out by `read`
    struct Counting {
        inner: Cursor<Vec<u8>>,
        bytes_read: usize,
    }

    impl Read for Counting {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.bytes_read += n;
            Ok(n)
        }
    }

    impl Seek for Counting {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    fn declared_image(entry_num: u32, entry_size: u32, len: usize) -> Vec<u8> {
        let mut img = vec![0u8; len];
        img[512..520].copy_from_slice(b"EFI PART");
        img[512 + 72..512 + 80].copy_from_slice(&2u64.to_le_bytes());
        img[512 + 80..512 + 84].copy_from_slice(&entry_num.to_le_bytes());
        img[512 + 84..512 + 88].copy_from_slice(&entry_size.to_le_bytes());
        img
    }

    #[test]
    fn declared_array_is_read_up_to_the_null_entry() {
        // 65536 slots of 4096 bytes declared, slot 1 is null
        let mut img = declared_image(MAX_DECLARED_ENTRIES, 4096, 1024 + 3 * 4096);
        img[1024 + 32] = 1;

        let mut reader = GptReader::new(
            Counting {
                inner: Cursor::new(img),
                bytes_read: 0,
            },
            EntryLimit::Declared,
        );
        let table = reader.read_table().unwrap();
        assert_eq!(table.entries.len(), 1);

        // header sector plus two slots
        assert_eq!(reader.into_inner().bytes_read, 512 + 2 * 4096);
    }

    #[test]
    fn short_slot_padding_is_reported_at_the_next_slot() {
        // the second slot only holds its 128 meaningful bytes
        let mut img = declared_image(4, 256, 1024 + 256 + 128);
        img[1024 + 32] = 1;
        img[1024 + 256 + 32] = 1;

        let mut reader = GptReader::new(Cursor::new(img), EntryLimit::Declared);
        assert!(matches!(
            reader.read_table(),
            Err(GptErr::Decode(DecodeErr::TruncatedInput {
                needed: 640,
                available: 384
            }))
        ));
    }

    #[test]
    fn image_without_header_sector_is_truncated() {
        let mut reader = GptReader::new(Cursor::new(vec![0u8; 700]), EntryLimit::Fixed);
        assert!(matches!(
            reader.read_header(),
            Err(GptErr::Decode(DecodeErr::TruncatedInput {
                needed: 512,
                available: 188
            }))
        ));
    }

    #[test]
    fn fixed_layout_ignores_header_counts() {
        let reader = GptReader::new(Cursor::new(Vec::<u8>::new()), EntryLimit::Fixed);
        let header = GptHeader {
            sig: *b"EFI PART",
            revision: 0x0001_0000,
            size: 92,
            header_crc32: 0,
            reserved: 0,
            loc: 1,
            backup_loc: 0,
            first_usable_block: 0,
            last_usable_block: 0,
            guid: Default::default(),
            array_start: 40,
            entry_num: 4,
            entry_size: 256,
            array_crc32: 0,
        };

        assert_eq!(
            reader.layout(&header).unwrap(),
            ArrayLayout {
                offset: 1024,
                count: 128,
                stride: 128
            }
        );

        let reader = GptReader::new(Cursor::new(Vec::<u8>::new()), EntryLimit::Declared);
        assert_eq!(
            reader.layout(&header).unwrap(),
            ArrayLayout {
                offset: 40 * 512,
                count: 4,
                stride: 256
            }
        );
    }
}
