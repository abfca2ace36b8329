//! Rewrite rules for cleaning up model-produced Mermaid markup.
//!
//! Each rule is a named, independent, idempotent string transformation.
//! The normalizer applies them in the order given by [`REWRITE_RULES`];
//! none of them depend on another rule having run first, but the order
//! matters for arrow handling (thick/long arrows must be canonical before
//! pipe labels are inlined).

use regex::Regex;
use std::sync::LazyLock;

/// A single rewrite step in the normalization pipeline.
pub(crate) struct Rule {
    pub(crate) name: &'static str,
    pub(crate) apply: fn(&str) -> String,
}

/// Ordered rewrite rules applied before header extraction.
pub(crate) const REWRITE_RULES: &[Rule] = &[
    Rule {
        name: "trim",
        apply: trim,
    },
    Rule {
        name: "strip_fences",
        apply: strip_fences,
    },
    Rule {
        name: "canonical_arrows",
        apply: canonical_arrows,
    },
    Rule {
        name: "inline_edge_labels",
        apply: inline_edge_labels,
    },
];

/// Opening fence at the start of the (already trimmed) response, with an
/// optional `mermaid` language tag. Matched at the string boundary, not
/// line-anchored — models sometimes glue the fence to the first line.
static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\A```(?:mermaid)?[ \t]*\r?\n?").unwrap());

/// Closing fence at the end of the response.
static CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n?[ \t]*```\z").unwrap());

/// Arrow spellings models produce instead of `-->`: two hyphens separated
/// from the head by whitespace (`-- >`), thick arrows (`==>`), and runs of
/// three or more hyphens (`---->`). Whitespace between the shaft and the
/// head is tolerated in every variant.
static NONCANONICAL_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:-{2,}[ \t]+|-{3,}[ \t]*|={2,}[ \t]*)>").unwrap()
});

/// A pipe-delimited label trailing a canonical arrow: `-->|label|`.
static PIPE_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-->[ \t]*\|([^|\n]*)\|").unwrap());

fn trim(input: &str) -> String {
    input.trim().to_owned()
}

/// Remove a markdown code fence wrapping the response, if present.
fn strip_fences(input: &str) -> String {
    let without_open = OPENING_FENCE.replace(input, "");
    let without_close = CLOSING_FENCE.replace(&without_open, "");
    without_close.trim().to_owned()
}

/// Rewrite all arrow spelling variants to the canonical `-->`.
///
/// Canonical arrows match the pattern trivially and are replaced with
/// themselves, so re-application is a no-op. Sequence-diagram arrows like
/// `-->>` keep their second head because only the leading `-->` is matched.
fn canonical_arrows(input: &str) -> String {
    NONCANONICAL_ARROW.replace_all(input, "-->").into_owned()
}

/// Rewrite `-->|label|` to the inline form `-- label -->`.
///
/// The label text between the pipes is preserved verbatim apart from
/// boundary whitespace. An empty label collapses to a plain arrow. A label
/// whose text starts with `>` keeps the pipe form: inlining it would place
/// `-- >` at the label boundary, which reads as a spaced arrow head and
/// would be rewritten (corrupting the label) on the next pass.
fn inline_edge_labels(input: &str) -> String {
    PIPE_LABEL
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let label = caps[1].trim();
            if label.is_empty() {
                "-->".to_owned()
            } else if label.starts_with('>') {
                caps[0].to_owned()
            } else {
                format!("-- {label} -->")
            }
        })
        .into_owned()
}
