//! Thin CLI front-end: reads a source file, parses it, runs it through
//! [`restrictedpy::transform`], and prints diagnostics to stderr. No
//! `clap`: like the teacher's CLI, this takes a bare positional argument
//! via `std::env::args()` rather than pulling in an argument-parsing
//! crate for one flag and one positional.

use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;

use restrictedpy::Dialect;

fn usage() -> ! {
    eprintln!("usage: restrictedpy <file.py> [--dialect=legacy2|modern3-4|modern3-5-plus]");
    std::process::exit(2);
}

fn run(path: &Path, dialect: Dialect) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("restrictedpy: couldn't read {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let parsed = match ruff_python_parser::parse_module(&source) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("restrictedpy: syntax error in {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let module = parsed.into_syntax();
    let (_rewritten, diagnostics) = restrictedpy::transform(module, &source, dialect);

    for warning in diagnostics.warnings() {
        eprintln!("warning: {warning}");
    }
    for error in diagnostics.errors() {
        eprintln!("error: {error}");
    }

    if diagnostics.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    let mut path = None;
    let mut dialect = Dialect::default();

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--dialect=") {
            dialect = Dialect::from_str(value).unwrap_or_else(|_| {
                eprintln!("restrictedpy: unknown dialect \"{value}\"");
                std::process::exit(2);
            });
        } else if path.is_none() {
            path = Some(arg);
        } else {
            usage();
        }
    }

    let Some(path) = path else { usage() };
    run(Path::new(&path), dialect)
}
