//! Flowgen — generate Mermaid diagrams from plain-text descriptions.
//!
//! This crate provides:
//! - Response normalization for model output (`normalize`) — the core:
//!   fence stripping, arrow canonicalization, edge-label rewriting, and
//!   declaration extraction, as ordered idempotent rules
//! - Generative backend invocation via the Claude CLI (`ai`)
//! - Rendering through a Kroki-compatible HTTP service (`render`)
//! - Shareable links and `.mmd` export (`export`)
//! - Explicit process configuration (`config`)
//!
//! Feature flags:
//! - `cli`: Command-line interface

// Core modules (always compiled)
pub mod ai;
pub mod config;
pub mod error;
pub mod export;
pub mod normalize;
pub mod render;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use ai::diagram::{generate_diagram, DiagramResult};
pub use config::Config;
pub use error::AppError;
pub use normalize::{normalize, normalize_with, DiagramKind, NormalizeError, NormalizeOptions};
pub use render::{render, RenderFormat};
