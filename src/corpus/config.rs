//! Corpus configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the optional per-corpus configuration file
pub const CONFIG_FILE: &str = "sopdex.toml";

/// Configuration for a directory of SOP documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Filename patterns for documents to ingest
    #[serde(default = "default_document_patterns")]
    pub document_patterns: Vec<String>,

    /// Filename patterns to skip
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Character budget for search result previews
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_document_patterns() -> Vec<String> {
    vec![
        "*.pdf".to_string(),
        "*.md".to_string(),
        "*.markdown".to_string(),
    ]
}

fn default_ignore_patterns() -> Vec<String> {
    // Windows download metadata copied alongside the real PDFs
    vec!["*Zone.Identifier*".to_string()]
}

fn default_preview_chars() -> usize {
    150
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            document_patterns: default_document_patterns(),
            ignore_patterns: default_ignore_patterns(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl CorpusConfig {
    /// Load configuration from the corpus directory or return defaults
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: CorpusConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration into the corpus directory
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_path = root.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Check if a filename names an ingestable document
    pub fn is_document(&self, filename: &str) -> bool {
        !self.should_ignore(filename)
            && self
                .document_patterns
                .iter()
                .any(|pattern| pattern_matches(pattern, filename))
    }

    /// Check if a filename should be skipped
    pub fn should_ignore(&self, filename: &str) -> bool {
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, filename))
    }
}

/// Filename glob matching (supports a single `*`)
fn pattern_matches(pattern: &str, filename: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    match parts.as_slice() {
        [exact] => filename == *exact,
        [prefix, suffix] => {
            filename.len() >= prefix.len() + suffix.len()
                && filename.starts_with(prefix)
                && filename.ends_with(suffix)
        }
        [prefix, middle, suffix] => {
            filename.len() >= prefix.len() + suffix.len()
                && filename.starts_with(prefix)
                && filename.ends_with(suffix)
                && filename[prefix.len()..filename.len() - suffix.len()].contains(middle)
        }
        _ => false,
    }
}
