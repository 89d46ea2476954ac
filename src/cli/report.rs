//! Printable reports for the `lint` and `dump` commands

use crate::lint::{self, LintResult};
use crate::types::Script;

/// Lint a script and print every finding; returns the result for exit codes
pub fn print_lint(script: &Script) -> LintResult {
    let result = lint::lint(script);

    for issue in &result.issues {
        println!("{}", issue);
    }
    println!(
        "{} error(s), {} warning(s), {} info",
        result.error_count, result.warning_count, result.info_count
    );

    result
}

/// Print the script back as pretty JSON, one step per array entry
pub fn print_dump(script: &Script) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(script)?);
    Ok(())
}
