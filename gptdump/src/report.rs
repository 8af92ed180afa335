use core::fmt;

use crate::hal::gpt::{GptHeader, GuidPartitionEntry};
use crate::hal::reader::GptTable;

/// Text rendering of a decoded table, one block for the header and one per
/// partition.
pub struct Report<'a> {
    table: &'a GptTable,
}

impl<'a> Report<'a> {
    pub fn new(table: &'a GptTable) -> Self {
        Report { table }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.table.header)?;

        write!(f, "\nPartitions:\n\n")?;
        for entry in self.table.entries.iter() {
            write_entry(f, entry)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

fn write_header(f: &mut fmt::Formatter<'_>, h: &GptHeader) -> fmt::Result {
    writeln!(f, "Signature: {}; Revision: {}", h.signature(), h.revision)?;
    writeln!(f, "GUID: {}", h.guid)?;
    writeln!(f, "Current LBA: {}; Backup LBA: {}", h.loc, h.backup_loc)?;
    writeln!(
        f,
        "First usable LBA: {}; Last usable LBA: {}",
        h.first_usable_block, h.last_usable_block
    )?;
    writeln!(
        f,
        "Starting LBA of partition array: {}; Entries: {}; Entry size: {}",
        h.array_start, h.entry_num, h.entry_size
    )
}

fn write_entry(f: &mut fmt::Formatter<'_>, p: &GuidPartitionEntry) -> fmt::Result {
    writeln!(f, "Partition \"{}\"", p.display_name_lossy())?;
    writeln!(f, "GUID type: {}", p.type_guid)?;
    writeln!(f, "GUID: {}", p.unique_guid)?;
    writeln!(f, "First LBA: {}; Last LBA: {}", p.start_lba, p.end_lba)?;
    writeln!(f, "Flags: {:016X}", p.flags)
}
