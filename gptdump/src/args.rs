use alloc::string::{String, ToString};
use terminal::log;
use thiserror::Error;

use crate::hal::reader::EntryLimit;

pub const USAGE: &str =
    "usage: gptdump <image> [entries=fixed|declared] [strict=true|false] [verbose=true|false]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgsRes {
    pub path: String,
    pub entries: EntryLimit,
    /// refuse headers without the "EFI PART" signature
    pub strict: bool,
    pub verbose: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgsErr {
    #[error("no image path given")]
    MissingPath,
    #[error("unexpected argument {0:?}, the image path is already set")]
    ExtraPath(String),
    #[error("bad value {value:?} for {key}")]
    BadValue { key: String, value: String },
}

fn parse_bool(key: &str, val: &str) -> Result<bool, ArgsErr> {
    match val {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ArgsErr::BadValue {
            key: key.to_string(),
            value: val.to_string(),
        }),
    }
}

fn parse_entries(val: &str) -> Result<EntryLimit, ArgsErr> {
    match val {
        "fixed" => Ok(EntryLimit::Fixed),
        "declared" => Ok(EntryLimit::Declared),
        _ => Err(ArgsErr::BadValue {
            key: "entries".to_string(),
            value: val.to_string(),
        }),
    }
}

/// Looks only for `verbose`, so logging can be switched on before the full
/// parse logs anything. The last valid value wins, as in [`parse_args`].
pub fn wants_verbose(args: &[String]) -> bool {
    args.iter()
        .filter_map(|arg| arg.split_once('='))
        .filter(|(key, _)| *key == "verbose")
        .filter_map(|(key, val)| parse_bool(key, val).ok())
        .last()
        .unwrap_or(false)
}

/// Parses everything after the program name. The one argument without a `=`
/// is the image path, the rest are `key=value` options.
pub fn parse_args<I>(args: I) -> Result<ArgsRes, ArgsErr>
where
    I: IntoIterator<Item = String>,
{
    let mut res = ArgsRes::default();
    let mut path: Option<String> = None;

    for arg in args {
        let Some((key, val)) = arg.split_once('=') else {
            if path.is_some() {
                return Err(ArgsErr::ExtraPath(arg));
            }
            path = Some(arg);
            continue;
        };

        log!("Received arg: {:?}={:?}", key, val);

        match key {
            "entries" => res.entries = parse_entries(val)?,
            "strict" => res.strict = parse_bool(key, val)?,
            "verbose" => res.verbose = parse_bool(key, val)?,
            _ => log!("Ignoring unknown arg {:?}", key),
        }
    }

    res.path = path.ok_or(ArgsErr::MissingPath)?;
    Ok(res)
}
