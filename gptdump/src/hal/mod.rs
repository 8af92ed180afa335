pub mod gpt;
pub mod reader;
