//! Result actions
//!
//! Copy-to-clipboard and save-to-file over the extracted text, plus the
//! shared guard that refuses both when the session only holds a
//! sentinel. Clipboard access goes through `copypasta`; the save path
//! derives its suggested name from the source image.

use std::path::Path;

use anyhow::{Context, Result};
use copypasta::{ClipboardContext, ClipboardProvider};

use crate::session::ExtractSession;

/// Suggested name when none can be derived from the source file
pub const DEFAULT_DOWNLOAD_NAME: &str = "extracted_text.txt";
const DOWNLOAD_SUFFIX: &str = "_extracted.txt";

/// Text eligible for copy/download, or `None` when the session holds
/// nothing or only a sentinel.
pub fn exportable_text(session: &ExtractSession) -> Option<&str> {
    session
        .has_usable_text()
        .then(|| session.extracted.as_str())
}

/// Write `text` to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut ctx =
        ClipboardContext::new().map_err(|e| anyhow::anyhow!("clipboard unavailable: {e}"))?;
    ctx.set_contents(text.to_owned())
        .map_err(|e| anyhow::anyhow!("clipboard write failed: {e}"))?;
    Ok(())
}

/// Suggested save name: source base name before the first dot plus a
/// fixed suffix, falling back to a default when no base name exists.
pub fn derive_download_name(source_name: &str) -> String {
    match source_name.split('.').next() {
        Some(base) if !base.is_empty() => format!("{base}{DOWNLOAD_SUFFIX}"),
        _ => DEFAULT_DOWNLOAD_NAME.to_string(),
    }
}

/// Save the extracted text as a UTF-8 plain-text file.
pub fn write_text_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))
}
