pub mod sink;

pub use sink::{Sink, capture, disable, enable_stderr, is_enabled, take_captured};
