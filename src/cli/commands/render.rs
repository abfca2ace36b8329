use super::generate::render_error_message;
use super::print_json;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::render::RenderFormat;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub fn run(
    file: &Path,
    output: Option<&Path>,
    image_format: RenderFormat,
    endpoint: Option<String>,
    format: OutputFormat,
) -> Result<(), String> {
    let config = Config::load().map_err(|e| e.to_string())?;
    let endpoint = endpoint.unwrap_or(config.renderer_url);

    let markup = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;

    let out_path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => file.with_extension(image_format.as_str()),
    };

    let bytes = crate::render::render(&markup, image_format, &endpoint)
        .map_err(|e| render_error_message(e, &markup))?;
    std::fs::write(&out_path, &bytes).map_err(|e| e.to_string())?;

    if format == OutputFormat::Json {
        print_json(&serde_json::json!({
            "output": out_path,
            "format": image_format,
            "bytes": bytes.len(),
        }));
    } else {
        println!(
            "{} Rendered {} to {} ({} bytes)",
            "✓".green(),
            file.display(),
            out_path.display(),
            bytes.len()
        );
    }

    Ok(())
}
