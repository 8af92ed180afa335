pub mod guid;
pub mod utf16;
