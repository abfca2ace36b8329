use serde::Serialize;
use thiserror::Error;

/// Unified error type for the flowgen pipeline.
///
/// Each variant maps to one stage of the request: the generative backend,
/// normalization, rendering, or local plumbing. The enum serializes with a
/// `type` tag so JSON-mode consumers can branch on the failure class.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum AppError {
    /// The backend could not produce a response (missing CLI, command
    /// failure, empty output). Never retried automatically.
    #[error("Backend error: {message}")]
    Upstream { message: String },

    /// The response contained no recognized diagram declaration. Carries
    /// the cleaned-up response text so callers can show it to the user.
    #[error("No diagram found in response")]
    NoDiagramFound { raw: String },

    /// The rendering service rejected the markup. Carries the offending
    /// markup so the user can diagnose what the normalizer let through.
    #[error("Render error: {message}")]
    Render { message: String, markup: String },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl AppError {
    /// Create an Upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a Render error carrying the offending markup
    pub fn render(message: impl Into<String>, markup: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
            markup: markup.into(),
        }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (user can retry or take action)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Backend and render failures may be transient
            // A fresh generation can produce a valid diagram
            // IO issues may be transient
            Self::Upstream { .. }
            | Self::NoDiagramFound { .. }
            | Self::Render { .. }
            | Self::Io { .. } => true,
            // A broken config file won't fix itself on retry
            Self::Config { .. } => false,
        }
    }
}

impl From<crate::ai::BackendError> for AppError {
    fn from(err: crate::ai::BackendError) -> Self {
        AppError::upstream(err.to_string())
    }
}

impl From<crate::normalize::NormalizeError> for AppError {
    fn from(err: crate::normalize::NormalizeError) -> Self {
        match err {
            crate::normalize::NormalizeError::NoDiagramFound { raw } => {
                AppError::NoDiagramFound { raw }
            }
        }
    }
}

impl From<crate::render::RenderError> for AppError {
    fn from(err: crate::render::RenderError) -> Self {
        let markup = match &err {
            crate::render::RenderError::Service { markup, .. } => markup.clone(),
            crate::render::RenderError::Http(_) => String::new(),
        };
        AppError::render(err.to_string(), markup)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::io(err.to_string())
    }
}

// Convert to String for CLI command errors
impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}
