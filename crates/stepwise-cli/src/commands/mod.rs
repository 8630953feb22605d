pub mod check;
pub mod dump;
pub mod run;

use anyhow::{Context, Result};
use std::fs;
use stepwise_runtime::Program;

/// Read and validate a program JSON file
pub fn load_program(file_path: &str) -> Result<Program> {
    let json = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read program file: {}", file_path))?;
    Program::from_json(&json).with_context(|| format!("Failed to load program: {}", file_path))
}
