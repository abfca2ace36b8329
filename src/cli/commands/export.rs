use super::print_json;
use crate::cli::OutputFormat;
use crate::export::{live_editor_url, write_mmd};
use colored::Colorize;
use std::path::Path;

pub fn run(file: &Path, output: Option<&Path>, format: OutputFormat) -> Result<(), String> {
    let markup = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;

    let url = live_editor_url(&markup);

    let mut saved_to = None;
    if let Some(path) = output {
        write_mmd(path, &markup).map_err(|e| e.to_string())?;
        saved_to = Some(path.to_path_buf());
    }

    if format == OutputFormat::Json {
        print_json(&serde_json::json!({
            "liveLink": url,
            "savedTo": saved_to,
        }));
    } else {
        if let Some(path) = saved_to {
            println!("{} Saved markup to {}", "✓".green(), path.display());
        }
        println!("Edit online: {}", url.cyan());
    }

    Ok(())
}
