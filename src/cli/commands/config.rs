use super::print_json;
use crate::cli::OutputFormat;
use crate::config::{config_path, Config};
use colored::Colorize;

pub fn run(init: bool, format: OutputFormat) -> Result<(), String> {
    let path = config_path();

    if init {
        let exists = path.as_deref().is_some_and(std::path::Path::exists);
        if exists {
            return Err("Config file already exists; edit it instead".to_owned());
        }
        let written = Config::default().save().map_err(|e| e.to_string())?;
        if format == OutputFormat::Text {
            println!("{} Wrote default config to {}", "✓".green(), written.display());
        }
    }

    let config = Config::load().map_err(|e| e.to_string())?;

    if format == OutputFormat::Json {
        print_json(&serde_json::json!({
            "path": path,
            "config": config,
        }));
        return Ok(());
    }

    match &path {
        Some(p) if p.exists() => println!("Config file: {}", p.display()),
        Some(p) => println!(
            "Config file: {} {}",
            p.display(),
            "(not present, using defaults)".dimmed()
        ),
        None => println!("No config directory on this platform; using defaults"),
    }
    println!();
    println!("  model:          {}", config.model.cyan());
    println!(
        "  custom command: {}",
        config.custom_command.as_deref().unwrap_or("(none)")
    );
    println!("  renderer url:   {}", config.renderer_url);
    println!("  render format:  {}", config.render_format);
    println!("  graph compat:   {}", config.graph_compat);

    Ok(())
}
