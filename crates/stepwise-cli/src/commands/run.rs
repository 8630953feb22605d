//! Run command - execute a program to completion

use super::load_program;
use anyhow::{Context, Result};
use log::debug;
use std::io::{self, BufWriter, Write};
use stepwise_runtime::{FatalError, Interpreter, Program, RunStats};

/// Effective run settings after config and flags are merged
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub trace: bool,
    pub stats: bool,
}

/// Run a program file, printing its output to stdout
///
/// A fatal runtime error is printed to stdout as `<line>: <message>` after
/// whatever the program printed before it, and reported as a failure.
pub fn run(file_path: &str, options: RunOptions) -> Result<()> {
    debug!("run {} with {:?}", file_path, options);
    let program = load_program(file_path)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = execute(&program, &mut out);
    out.flush().context("Failed to write program output")?;

    match result {
        Ok(stats) => {
            if options.stats {
                eprintln!("{}", stats);
            }
            Ok(())
        }
        Err(err) => {
            writeln!(out, "{}", err).context("Failed to write program output")?;
            out.flush().context("Failed to write program output")?;
            Err(anyhow::anyhow!("Program terminated at line {}", err.line))
        }
    }
}

/// Execute `program`, writing its output to `out`
pub fn execute<W: Write>(program: &Program, out: W) -> Result<RunStats, FatalError> {
    Interpreter::new(program, out).run()
}
