//! Export helpers: shareable editor links and `.mmd` files.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::fs;
use std::io;
use std::path::Path;

/// Base URL for the Mermaid Live Editor.
const LIVE_EDITOR_BASE: &str = "https://mermaid.live/edit";

/// Build a Mermaid Live Editor link for the given markup.
pub fn live_editor_url(markup: &str) -> String {
    let encoded = BASE64.encode(markup.as_bytes());
    format!("{LIVE_EDITOR_BASE}#pako={encoded}")
}

/// Write markup to a `.mmd` file.
pub fn write_mmd(path: &Path, markup: &str) -> io::Result<()> {
    // Make sure the file ends with a newline; some editors care.
    if markup.ends_with('\n') {
        fs::write(path, markup)
    } else {
        fs::write(path, format!("{markup}\n"))
    }
}
