extern crate alloc;

pub mod args;
pub mod err;
pub mod hal;
pub mod report;
pub mod utils;

pub use err::{DecodeErr, GptErr};
pub use hal::gpt::{GptHeader, GuidPartitionEntry, decode_entry, decode_header};
pub use hal::reader::{EntryLimit, GptReader, GptTable};
pub use report::Report;
pub use utils::guid::{CanonicalGuid, Guid, format_guid};
pub use utils::utf16::utf16_to_utf8;
