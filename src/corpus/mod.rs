//! Document discovery
//!
//! A corpus is a directory of SOP files (PDF or Markdown). Discovery walks the
//! directory once, assigns each file a stable id (the filename stem), and
//! keeps the documents in filename order. Content is never read here; the
//! loader fetches text lazily on first access.

mod config;

pub use config::{CorpusConfig, CONFIG_FILE};

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One source file containing zero or more sections
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Stable identifier (filename without extension)
    pub id: String,
    /// Filename including extension
    pub filename: String,
    /// Absolute or corpus-relative path to the source file
    pub path: PathBuf,
}

/// A directory of SOP documents with stable ordering
pub struct Corpus {
    root: PathBuf,
    config: CorpusConfig,
    documents: Vec<Document>,
}

impl Corpus {
    /// Open a corpus rooted at the given directory.
    ///
    /// A missing directory yields an empty corpus rather than an error, so a
    /// client can render "no documents" the same way it renders an empty one.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let config = CorpusConfig::load_or_default(&root)?;
        let documents = discover(&root, &config);

        tracing::debug!(count = documents.len(), root = ?root, "corpus opened");

        Ok(Self {
            root,
            config,
            documents,
        })
    }

    /// Corpus root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Corpus configuration
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// All discovered documents, filename ascending
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by id
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }
}

/// Walk the corpus directory and collect document records
fn discover(root: &Path, config: &CorpusConfig) -> Vec<Document> {
    let mut documents = Vec::new();

    if !root.exists() {
        tracing::warn!(root = ?root, "corpus directory does not exist");
        return documents;
    }

    for entry in walkdir::WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            e.depth() == 0 || !name.starts_with('.')
        })
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().to_string();
        if !config.is_document(&filename) {
            continue;
        }

        let id = entry
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| filename.clone());

        documents.push(Document {
            id,
            filename,
            path: entry.path().to_path_buf(),
        });
    }

    documents.sort_by(|a, b| a.filename.cmp(&b.filename));

    // Two files with the same stem in different subdirectories would shadow
    // each other; keep the first in filename order and say so.
    let mut seen = std::collections::HashSet::new();
    documents.retain(|d| {
        let fresh = seen.insert(d.id.clone());
        if !fresh {
            tracing::warn!(id = %d.id, path = ?d.path, "duplicate document id, skipping");
        }
        fresh
    });

    documents
}
