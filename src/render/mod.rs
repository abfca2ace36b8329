//! Rendering via a Kroki-compatible HTTP service.
//!
//! The markup is POSTed as plain text to `<endpoint>/mermaid/<format>` and
//! the image bytes come back in the response body. The service is the
//! ultimate validator of normalizer output: markup the normalizer let
//! through but the grammar rejects comes back as a `Service` error with
//! the offending markup attached.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Request timeout for the rendering service.
const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered but rejected the markup (or itself failed).
    #[error("Render service returned status {status}: {body}")]
    Service {
        status: u16,
        body: String,
        markup: String,
    },
}

/// Image formats the rendering service can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Png,
    Svg,
}

impl RenderFormat {
    /// The URL path segment and file extension for this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unknown render format '{other}' (expected png or svg)")),
        }
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render Mermaid markup to image bytes via the given Kroki-compatible
/// endpoint. Blocking; one request, no retries.
pub fn render(markup: &str, format: RenderFormat, endpoint: &str) -> Result<Vec<u8>, RenderError> {
    let url = format!(
        "{}/mermaid/{}",
        endpoint.trim_end_matches('/'),
        format.as_str()
    );
    log::debug!("[render] POST {url} ({} bytes of markup)", markup.len());

    let client = reqwest::blocking::Client::builder()
        .timeout(RENDER_TIMEOUT)
        .build()?;
    let response = client
        .post(&url)
        .header(reqwest::header::CONTENT_TYPE, "text/plain")
        .body(markup.to_owned())
        .send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(RenderError::Service {
            status: status.as_u16(),
            body: body.trim().to_owned(),
            markup: markup.to_owned(),
        });
    }

    Ok(response.bytes()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_format_parsing() {
        assert_eq!("png".parse::<RenderFormat>().unwrap(), RenderFormat::Png);
        assert_eq!("SVG".parse::<RenderFormat>().unwrap(), RenderFormat::Svg);
        assert!("gif".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_render_format_display() {
        assert_eq!(RenderFormat::Png.to_string(), "png");
        assert_eq!(RenderFormat::Svg.to_string(), "svg");
    }

    #[test]
    fn test_service_error_carries_markup() {
        let err = RenderError::Service {
            status: 400,
            body: "syntax error".to_owned(),
            markup: "flowchart TD\nA--".to_owned(),
        };
        assert!(err.to_string().contains("400"));
        match err {
            RenderError::Service { markup, .. } => assert!(markup.contains("A--")),
            RenderError::Http(_) => panic!("wrong variant"),
        }
    }
}
