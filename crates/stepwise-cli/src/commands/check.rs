//! Check command - validate a program without executing it

use super::load_program;
use anyhow::Result;

/// Load and validate a program file, printing `ok` on success
pub fn run(file_path: &str, json: bool) -> Result<()> {
    let program = load_program(file_path)?;

    if json {
        let summary = serde_json::json!({
            "ok": true,
            "file": file_path,
            "statements": program.statements().len(),
            "call_sites": program.call_site_count(),
            "ast_version": stepwise_runtime::AST_VERSION,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("ok");
    }
    Ok(())
}
