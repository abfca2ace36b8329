//! Response normalizer — turns a raw model response into valid Mermaid markup.
//!
//! Generative models wrap their output in markdown fences, prepend prose
//! ("Here is your diagram:"), and misspell edge arrows. The normalizer is a
//! pure, synchronous pipeline of rewrite rules (see [`rules`]) followed by
//! header extraction. Every step is idempotent: re-normalizing already
//! normalized markup never changes it.
//!
//! When no diagram declaration can be found the normalizer fails with
//! [`NormalizeError::NoDiagramFound`] carrying the cleaned-up text, so the
//! caller can show the model's prose to the user instead of sending garbage
//! to a renderer.

pub mod rules;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

use self::rules::REWRITE_RULES;

#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The response contains no recognized diagram declaration.
    ///
    /// `raw` is the response after rewrite rules ran, suitable for showing
    /// to the user as-is.
    #[error("no diagram declaration found in response")]
    NoDiagramFound { raw: String },
}

/// The diagram kinds the normalizer recognizes (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagramKind {
    Flowchart,
    Graph,
    Sequence,
    Class,
    State,
    EntityRelationship,
    Gantt,
}

impl DiagramKind {
    /// The declaration keyword that opens a diagram of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Graph => "graph",
            Self::Sequence => "sequenceDiagram",
            Self::Class => "classDiagram",
            Self::State => "stateDiagram",
            Self::EntityRelationship => "erDiagram",
            Self::Gantt => "gantt",
        }
    }

    /// The full declaration line a generated diagram of this kind should
    /// open with (keyword plus layout direction where one applies).
    pub fn declaration(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart TD",
            Self::Graph => "graph TD",
            Self::Sequence => "sequenceDiagram",
            Self::Class => "classDiagram",
            Self::State => "stateDiagram-v2",
            Self::EntityRelationship => "erDiagram",
            Self::Gantt => "gantt",
        }
    }
}

impl std::str::FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flowchart" => Ok(Self::Flowchart),
            "graph" => Ok(Self::Graph),
            "sequence" => Ok(Self::Sequence),
            "class" => Ok(Self::Class),
            "state" => Ok(Self::State),
            "er" | "entity-relationship" => Ok(Self::EntityRelationship),
            "gantt" => Ok(Self::Gantt),
            other => Err(format!(
                "unknown diagram kind '{other}' (expected flowchart, graph, sequence, class, state, er, or gantt)"
            )),
        }
    }
}

/// Options controlling optional normalization behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Rewrite a `flowchart <dir>` header to `graph <dir>`.
    ///
    /// Compatibility shim for renderers that predate the `flowchart`
    /// keyword. The two declarations are interchangeable for the markup
    /// the generator produces.
    pub graph_compat: bool,
}

/// First occurrence of a diagram declaration, anywhere in the text.
///
/// Flow and graph declarations only count together with a layout direction
/// (the full two-token phrase) to reduce false positives on the bare words
/// "flowchart"/"graph" in surrounding prose. A keyword inside an edge label
/// ahead of the real header can still match; that limitation is accepted.
static DIAGRAM_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:flowchart|graph)[ \t]+(?:TD|TB|LR|RL|BT)\b|sequenceDiagram\b|classDiagram\b|stateDiagram(?:-v2)?\b|erDiagram\b|gantt\b)",
    )
    .unwrap()
});

/// A `flowchart <dir>` header at the very start of normalized markup.
static FLOWCHART_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\Aflowchart([ \t]+(?:TD|TB|LR|RL|BT)\b)").unwrap());

/// Normalize a raw model response into Mermaid markup, default options.
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    normalize_with(raw, &NormalizeOptions::default())
}

/// Normalize a raw model response into Mermaid markup.
///
/// Applies the ordered rewrite rules, then discards anything before the
/// first recognized diagram declaration. Fails with
/// [`NormalizeError::NoDiagramFound`] when no declaration is present
/// (including for empty input).
pub fn normalize_with(raw: &str, options: &NormalizeOptions) -> Result<String, NormalizeError> {
    let mut text = raw.to_owned();
    for rule in REWRITE_RULES {
        let rewritten = (rule.apply)(&text);
        if rewritten != text {
            log::debug!("[normalize] rule '{}' rewrote response", rule.name);
            text = rewritten;
        }
    }

    let Some(m) = DIAGRAM_HEADER.find(&text) else {
        return Err(NormalizeError::NoDiagramFound { raw: text });
    };

    if m.start() > 0 {
        log::debug!(
            "[normalize] discarding {} bytes of preamble before declaration",
            m.start()
        );
        text = text[m.start()..].to_owned();
    }

    if options.graph_compat {
        text = FLOWCHART_HEADER.replace(&text, "graph$1").into_owned();
    }

    Ok(text)
}

/// Identify the kind of an (already normalized) piece of markup from its
/// leading declaration.
pub fn detect_kind(markup: &str) -> Option<DiagramKind> {
    let header = markup.trim_start().lines().next()?.trim();
    let first_token = header.split_whitespace().next()?;

    let kind = match first_token.to_ascii_lowercase().as_str() {
        "flowchart" => DiagramKind::Flowchart,
        "graph" => DiagramKind::Graph,
        "sequencediagram" => DiagramKind::Sequence,
        "classdiagram" => DiagramKind::Class,
        "statediagram" | "statediagram-v2" => DiagramKind::State,
        "erdiagram" => DiagramKind::EntityRelationship,
        "gantt" => DiagramKind::Gantt,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_through_well_formed_markup() {
        let input = "flowchart TD\nA[Start] --> B[End]";
        assert_eq!(normalize(input).unwrap(), input);
    }

    #[test]
    fn test_strips_fence_wrapper() {
        let input = "```mermaid\nflowchart TD\nA-->B\n```";
        assert_eq!(normalize(input).unwrap(), "flowchart TD\nA-->B");
    }

    #[test]
    fn test_discards_preamble_prose() {
        let input = "Here is your diagram:\n\nflowchart TD\nA-->B";
        assert_eq!(normalize(input).unwrap(), "flowchart TD\nA-->B");
    }

    #[test]
    fn test_discards_preamble_and_fences_together() {
        let input = "Sure! Here you go:\n\n```mermaid\nflowchart TD\nA -->|Yes| B\n```\n\nLet me know if you need changes.";
        // The closing fence is not at the string end, so it survives fence
        // stripping, but the header extraction drops everything before the
        // declaration and the labeled edge is still rewritten.
        let result = normalize(input).unwrap();
        assert!(result.starts_with("flowchart TD"));
        assert!(result.contains("A -- Yes --> B"));
    }

    #[test]
    fn test_canonicalizes_all_arrow_variants() {
        for input in ["flowchart TD\nA -- > B", "flowchart TD\nA ==> B", "flowchart TD\nA ----> B"] {
            assert_eq!(normalize(input).unwrap(), "flowchart TD\nA --> B");
        }
    }

    #[test]
    fn test_rewrites_labeled_edges() {
        let input = "flowchart TD\nA -->|Yes| B";
        assert_eq!(normalize(input).unwrap(), "flowchart TD\nA -- Yes --> B");
    }

    #[test]
    fn test_header_match_is_case_insensitive() {
        let result = normalize("Some intro.\nFLOWCHART TD\nA-->B").unwrap();
        assert!(result.starts_with("FLOWCHART TD"));
    }

    #[test]
    fn test_no_declaration_is_an_error() {
        match normalize("The cat sat.") {
            Err(NormalizeError::NoDiagramFound { raw }) => assert_eq!(raw, "The cat sat."),
            other => panic!("expected NoDiagramFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_follows_the_same_policy() {
        assert!(matches!(
            normalize(""),
            Err(NormalizeError::NoDiagramFound { .. })
        ));
    }

    #[test]
    fn test_bare_flowchart_word_in_prose_does_not_match() {
        // "flowchart" without a direction token is not a declaration
        let result = normalize("I could not draw a flowchart for this.");
        assert!(matches!(
            result,
            Err(NormalizeError::NoDiagramFound { .. })
        ));
    }

    #[test]
    fn test_recognizes_every_declaration_kind() {
        for header in [
            "flowchart TD",
            "graph LR",
            "sequenceDiagram",
            "classDiagram",
            "stateDiagram-v2",
            "stateDiagram",
            "erDiagram",
            "gantt",
        ] {
            let input = format!("preamble text\n{header}\nbody");
            let result = normalize(&input).unwrap();
            assert!(
                result.starts_with(header),
                "expected {header:?} to be recognized, got {result:?}"
            );
        }
    }

    #[test]
    fn test_idempotence_of_full_pipeline() {
        let inputs = [
            "```mermaid\nflowchart TD\nA -- > B\nB ==>|ok| C\n```",
            "Here you go:\n\nflowchart LR\nA -->|Yes| B\nA ----> C",
            "flowchart TD\nA -->|> check| B",
            "sequenceDiagram\nAlice-->>Bob: hi",
            "flowchart TD\nA[Start] --> B{Choice}\nB -- Yes --> C",
        ];
        for input in inputs {
            let once = normalize(input).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice, "pipeline not idempotent on {input:?}");
        }
    }

    #[test]
    fn test_graph_compat_rewrites_flowchart_header() {
        let options = NormalizeOptions { graph_compat: true };
        let result = normalize_with("flowchart TD\nA-->B", &options).unwrap();
        assert_eq!(result, "graph TD\nA-->B");
    }

    #[test]
    fn test_graph_compat_leaves_other_kinds_alone() {
        let options = NormalizeOptions { graph_compat: true };
        let result = normalize_with("sequenceDiagram\nA->>B: hi", &options).unwrap();
        assert_eq!(result, "sequenceDiagram\nA->>B: hi");
    }

    #[test]
    fn test_graph_compat_is_idempotent() {
        let options = NormalizeOptions { graph_compat: true };
        let once = normalize_with("flowchart TD\nA-->B", &options).unwrap();
        let twice = normalize_with(&once, &options).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(
            detect_kind("flowchart TD\nA-->B"),
            Some(DiagramKind::Flowchart)
        );
        assert_eq!(detect_kind("graph LR\nA-->B"), Some(DiagramKind::Graph));
        assert_eq!(
            detect_kind("sequenceDiagram\nA->>B: hi"),
            Some(DiagramKind::Sequence)
        );
        assert_eq!(
            detect_kind("stateDiagram-v2\n[*] --> Idle"),
            Some(DiagramKind::State)
        );
        assert_eq!(detect_kind("erDiagram"), Some(DiagramKind::EntityRelationship));
        assert_eq!(detect_kind("gantt\ntitle X"), Some(DiagramKind::Gantt));
        assert_eq!(detect_kind("not a diagram"), None);
        assert_eq!(detect_kind(""), None);
    }

    #[test]
    fn test_keyword_round_trip() {
        assert_eq!(DiagramKind::Flowchart.keyword(), "flowchart");
        assert_eq!(DiagramKind::EntityRelationship.keyword(), "erDiagram");
    }
}
