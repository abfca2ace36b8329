use super::prompt::build_diagram_prompt;
use crate::ai::{ensure_backend_available, run_backend};
use crate::config::Config;
use crate::error::AppError;
use crate::normalize::{detect_kind, normalize_with, DiagramKind, NormalizeOptions};
use serde::Serialize;

/// Result of diagram generation: the normalized markup plus the raw
/// backend response for diagnostics.
#[derive(Debug, Serialize)]
pub struct DiagramResult {
    pub markup: String,
    pub kind: Option<DiagramKind>,
    #[serde(skip)]
    pub raw: String,
}

/// Generate a Mermaid diagram for the given description.
///
/// Builds the prompt, runs the backend once (no retries), and normalizes
/// the response. Backend failures surface as [`AppError::Upstream`]; a
/// response with no diagram declaration surfaces as
/// [`AppError::NoDiagramFound`] with the cleaned response text attached.
pub fn generate_diagram(
    description: &str,
    kind: DiagramKind,
    config: &Config,
) -> Result<DiagramResult, AppError> {
    ensure_backend_available(config.custom_command.as_deref())?;

    let prompt = build_diagram_prompt(description, kind);
    let raw = run_backend(&prompt, &config.model, config.custom_command.as_deref())?;

    let options = NormalizeOptions {
        graph_compat: config.graph_compat,
    };
    let markup = normalize_with(&raw, &options)?;
    let kind = detect_kind(&markup);

    Ok(DiagramResult { markup, kind, raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_command(cmd: &str) -> Config {
        Config {
            custom_command: Some(cmd.to_owned()),
            ..Config::default()
        }
    }

    #[test]
    fn test_generate_normalizes_backend_output() {
        if cfg!(target_os = "windows") {
            return;
        }
        // `cat` echoes the prompt back; the prompt itself contains no
        // diagram declaration, so use a command that emits markup instead.
        let config = config_with_command("printf ```mermaid\\nflowchart\\tTD\\nA\\t-->|Yes|\\tB\\n```");
        let result = generate_diagram("two nodes", DiagramKind::Flowchart, &config).unwrap();
        assert!(result.markup.starts_with("flowchart\tTD"));
        assert!(result.markup.contains("A\t-- Yes -->\tB"));
        assert_eq!(result.kind, Some(DiagramKind::Flowchart));
        assert!(result.raw.contains("```mermaid"));
    }

    #[test]
    fn test_generate_surfaces_no_diagram_found() {
        if cfg!(target_os = "windows") {
            return;
        }
        let config = config_with_command("echo I cannot help with that.");
        let result = generate_diagram("whatever", DiagramKind::Flowchart, &config);
        match result {
            Err(AppError::NoDiagramFound { raw }) => {
                assert!(raw.contains("I cannot help"));
            }
            other => panic!("expected NoDiagramFound, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_surfaces_backend_failure() {
        let config = config_with_command("definitely-not-a-real-binary-xyz");
        let result = generate_diagram("whatever", DiagramKind::Flowchart, &config);
        assert!(matches!(result, Err(AppError::Upstream { .. })));
    }
}
