//! PDF text-layer extraction

use crate::error::{EngineError, Result};
use std::path::Path;

/// Extract the text layer from a PDF file.
///
/// A scanned PDF that opens but yields no text is reported as
/// `UnsupportedFormat`, never as empty text, so callers can tell "no text
/// layer" apart from a genuinely empty document.
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| EngineError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })?;

    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        tracing::warn!(path = ?path, "pdf extraction failed: {e}");
        EngineError::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    })?;

    if text.trim().is_empty() {
        return Err(EngineError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    Ok(text)
}
