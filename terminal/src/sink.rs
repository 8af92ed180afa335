use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use std::io::Write;

use spin::Mutex;

/// Where `log!` output goes.
#[derive(Debug, Default)]
pub enum Sink {
    #[default]
    Off,
    Stderr,
    /// kept in memory until `take_captured`
    Buffer(String),
}

impl fmt::Write for Sink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self {
            Sink::Off => Ok(()),
            Sink::Stderr => std::io::stderr()
                .lock()
                .write_all(s.as_bytes())
                .map_err(|_| fmt::Error),
            Sink::Buffer(buf) => {
                buf.push_str(s);
                Ok(())
            }
        }
    }
}

pub static LOG_SINK: Mutex<Sink> = Mutex::new(Sink::Off);

// checked before taking the lock so disabled logging costs one load
static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn set_sink(sink: Sink) {
    let enabled = !matches!(sink, Sink::Off);
    *LOG_SINK.lock() = sink;
    ENABLED.store(enabled, Ordering::SeqCst);
}

pub fn enable_stderr() {
    set_sink(Sink::Stderr);
}

pub fn capture() {
    set_sink(Sink::Buffer(String::new()));
}

pub fn disable() {
    set_sink(Sink::Off);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::SeqCst)
}

/// Drains the capture buffer. Empty when the sink is not capturing.
pub fn take_captured() -> String {
    match &mut *LOG_SINK.lock() {
        Sink::Buffer(buf) => core::mem::take(buf),
        _ => String::new(),
    }
}

#[doc(hidden)]
pub fn _log_print(args: fmt::Arguments) {
    use core::fmt::Write;

    if !is_enabled() {
        return;
    }

    // stderr write errors are dropped
    let _ = LOG_SINK.lock().write_fmt(args);
}

#[macro_export]
macro_rules! log_print {
    ($($arg:tt)*) => ($crate::sink::_log_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => ($crate::log_print!("{} - line {}, {}\n", file!(), line!(),  format_args!($($arg)*)));
}
