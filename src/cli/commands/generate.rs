use super::{print_json, read_input};
use crate::ai::check_claude_available;
use crate::ai::diagram::generate_diagram;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::AppError;
use crate::export::{live_editor_url, write_mmd};
use crate::normalize::DiagramKind;
use colored::Colorize;
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn run(
    description: Option<String>,
    file: Option<&Path>,
    kind: DiagramKind,
    model: Option<String>,
    custom_command: Option<String>,
    render_to: Option<&Path>,
    output: Option<&Path>,
    live_link: bool,
    show_raw: bool,
    graph_compat: bool,
    format: OutputFormat,
) -> Result<(), String> {
    let mut config = Config::load().map_err(|e| e.to_string())?;

    // CLI flags win over the config file
    if let Some(model) = model {
        config.model = model;
    }
    if custom_command.is_some() {
        config.custom_command = custom_command;
    }
    if graph_compat {
        config.graph_compat = true;
    }

    if config.custom_command.is_none() && !check_claude_available() {
        return Err(
            "Claude CLI not found. Please install: npm install -g @anthropic-ai/claude-code"
                .to_owned(),
        );
    }

    let description = read_input(description, file)?;
    if description.trim().is_empty() {
        return Err("Empty description. Pass one as an argument, via --file, or on stdin.".to_owned());
    }

    if format == OutputFormat::Text {
        println!(
            "Generating {} diagram with {}...",
            kind.keyword().cyan(),
            config.model
        );
    }

    let result = match generate_diagram(&description, kind, &config) {
        Ok(result) => result,
        Err(AppError::NoDiagramFound { raw }) => {
            if show_raw && format == OutputFormat::Text {
                eprintln!();
                eprintln!("{}", "Raw model response:".bold());
                eprintln!("{raw}");
            }
            let hint = if show_raw {
                ""
            } else {
                " (re-run with --show-raw to see the response)"
            };
            return Err(format!(
                "The response contained no diagram declaration{hint}"
            ));
        }
        Err(e) => return Err(e.to_string()),
    };

    let mut saved_to = None;
    if let Some(path) = output {
        write_mmd(path, &result.markup).map_err(|e| e.to_string())?;
        saved_to = Some(path.to_path_buf());
    }

    let mut rendered_to = None;
    if let Some(path) = render_to {
        let bytes = crate::render::render(&result.markup, config.render_format, &config.renderer_url)
            .map_err(|e| render_error_message(e, &result.markup))?;
        std::fs::write(path, bytes).map_err(|e| e.to_string())?;
        rendered_to = Some(path.to_path_buf());
    }

    let link = live_link.then(|| live_editor_url(&result.markup));

    if format == OutputFormat::Json {
        print_json(&serde_json::json!({
            "markup": result.markup,
            "kind": result.kind,
            "raw": show_raw.then_some(&result.raw),
            "savedTo": saved_to,
            "renderedTo": rendered_to,
            "liveLink": link,
        }));
        return Ok(());
    }

    if show_raw {
        println!();
        println!("{}", "Raw model response:".bold());
        println!("{}", result.raw);
    }

    println!();
    println!("{}", result.markup);
    println!();
    if let Some(path) = saved_to {
        println!("{} Saved markup to {}", "✓".green(), path.display());
    }
    if let Some(path) = rendered_to {
        println!("{} Rendered image to {}", "✓".green(), path.display());
    }
    if let Some(url) = link {
        println!("Edit online: {}", url.cyan());
    }

    Ok(())
}

/// Format a render failure so the offending markup travels with it.
pub(super) fn render_error_message(err: crate::render::RenderError, markup: &str) -> String {
    format!("{err}\n\nOffending markup:\n{markup}")
}
