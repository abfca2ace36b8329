use super::{print_json, read_input};
use crate::cli::OutputFormat;
use crate::normalize::{detect_kind, normalize_with, NormalizeError, NormalizeOptions};
use std::path::Path;

pub fn run(file: Option<&Path>, graph_compat: bool, format: OutputFormat) -> Result<(), String> {
    let raw = read_input(None, file)?;

    let options = NormalizeOptions { graph_compat };
    let markup = match normalize_with(&raw, &options) {
        Ok(markup) => markup,
        Err(NormalizeError::NoDiagramFound { .. }) => {
            return Err("No diagram declaration found in the input".to_owned());
        }
    };

    if format == OutputFormat::Json {
        print_json(&serde_json::json!({
            "markup": markup,
            "kind": detect_kind(&markup),
        }));
    } else {
        println!("{markup}");
    }

    Ok(())
}
