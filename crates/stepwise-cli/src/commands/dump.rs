//! Dump command - print a program listing

use super::load_program;
use anyhow::Result;

/// Print the rendered program, or its normalized JSON form
pub fn run(file_path: &str, json: bool) -> Result<()> {
    let program = load_program(file_path)?;
    if json {
        println!("{}", program.to_json()?);
    } else {
        print!("{}", program.render());
    }
    Ok(())
}
