//! Document text extraction
//!
//! One responsibility: bytes in, a single normalized text blob out. The
//! loader dispatches on file extension (PDF text layer, Markdown read) and
//! normalizes whitespace so the parser always sees the same shape of text.

pub mod pdf;

use crate::corpus::Document;
use crate::error::{EngineError, Result};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Compute a stable fingerprint for normalized text
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fetches raw document text.
///
/// Injectable so tests can substitute an instrumented implementation and
/// count how often a document is actually loaded.
pub trait DocumentLoader: Send + Sync {
    /// Load and normalize the full text of a document
    fn load(&self, document: &Document) -> Result<String>;
}

/// Default loader: reads from the filesystem, dispatching on extension
pub struct FileLoader;

impl DocumentLoader for FileLoader {
    fn load(&self, document: &Document) -> Result<String> {
        let ext = document
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let raw = match ext.as_str() {
            "pdf" => pdf::extract_text(&document.path)?,
            "md" | "markdown" | "txt" => read_text(&document.path)?,
            _ => {
                return Err(EngineError::UnsupportedFormat {
                    path: document.path.clone(),
                })
            }
        };

        tracing::debug!(id = %document.id, chars = raw.len(), "loaded document text");

        Ok(normalize(&raw))
    }
}

/// Read a Markdown or plain-text file
fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| EngineError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Normalize extracted text.
///
/// Line endings become `\n`, control characters other than newline and tab
/// are stripped, and runs of three or more newlines collapse to two. Internal
/// line content is left verbatim.
pub fn normalize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                cleaned.push('\n');
            }
            '\n' | '\t' => cleaned.push(ch),
            c if c.is_control() => {}
            c => cleaned.push(c),
        }
    }

    let mut collapsed = String::with_capacity(cleaned.len());
    let mut newlines = 0usize;
    for ch in cleaned.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                collapsed.push(ch);
            }
        } else {
            newlines = 0;
            collapsed.push(ch);
        }
    }

    collapsed
}
