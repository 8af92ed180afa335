use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Write};
use std::process::ExitCode;

use gptdump::GptReader;
use gptdump::Report;
use gptdump::args::{ArgsRes, USAGE, parse_args, wants_verbose};
use terminal::log;

fn run(args: &ArgsRes) -> Result<(), Box<dyn Error>> {
    let file = File::open(&args.path)
        .map_err(|e| format!("{} is not a readable file: {}", args.path, e))?;

    let mut reader = GptReader::new(BufReader::new(file), args.entries);
    let table = reader.read_table()?;

    if args.strict {
        table.header.check_signature()?;
    }

    log!("Decoded {} partition entries", table.entries.len());

    let mut out = std::io::stdout().lock();
    write!(out, "{}", Report::new(&table))?;
    out.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    if wants_verbose(&argv) {
        terminal::enable_stderr();
    }

    let args = match parse_args(argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gptdump: {}", e);
            ExitCode::FAILURE
        }
    }
}
