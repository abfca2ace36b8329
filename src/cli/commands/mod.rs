pub mod config;
pub mod export;
pub mod generate;
pub mod normalize;
pub mod render;

use std::io::Read;
use std::path::Path;

/// Serialize a value as pretty-printed JSON and print it to stdout.
fn print_json(value: &impl serde::Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("failed to serialize JSON output")
    );
}

/// Resolve command input from an inline argument, a file, or stdin.
fn read_input(inline: Option<String>, file: Option<&Path>) -> Result<String, String> {
    if let Some(text) = inline {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("Failed to read stdin: {e}"))?;
    Ok(buf)
}
