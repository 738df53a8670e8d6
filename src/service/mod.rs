//! Retrieval operations over the corpus
//!
//! The public face of the engine: list documents, list a document's sections,
//! fetch one section, and search across every document. Results are plain
//! data for the calling client to render; absence is always a distinguishable
//! not-found condition, never a generic failure.

use crate::corpus::{Corpus, Document};
use crate::error::{EngineError, Result};
use crate::extract::{DocumentLoader, FileLoader};
use crate::index::{RefreshOutcome, SectionIndex};
use crate::parse::Section;
use serde::Serialize;
use std::sync::Arc;

/// One row of a section listing
#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    /// Dotted section number
    pub number: String,
    /// Number and heading joined
    pub full_heading: String,
}

/// A ranked search result; derived per query, never persisted
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Id of the matching document
    pub document_id: String,
    /// Filename of the matching document
    pub filename: String,
    /// Number of the matching section
    pub section_number: String,
    /// Full heading of the matching section
    pub full_heading: String,
    /// Opening characters of the section content
    pub content_preview: String,
    /// Weighted occurrence count (heading hits count double)
    pub score: u32,
}

/// Serves sections and search results from a corpus of SOP documents
pub struct RetrievalService {
    corpus: Corpus,
    index: SectionIndex,
    preview_chars: usize,
}

impl RetrievalService {
    /// Build a service over a corpus with the default filesystem loader
    pub fn new(corpus: Corpus) -> Self {
        Self::with_loader(corpus, Arc::new(FileLoader))
    }

    /// Build a service with an injected loader and a fresh cache
    pub fn with_loader(corpus: Corpus, loader: Arc<dyn DocumentLoader>) -> Self {
        let preview_chars = corpus.config().preview_chars;
        Self {
            corpus,
            index: SectionIndex::new(loader),
            preview_chars,
        }
    }

    /// All documents in the corpus, filename ascending
    pub fn list_documents(&self) -> &[Document] {
        self.corpus.documents()
    }

    fn document(&self, document_id: &str) -> Result<&Document> {
        self.corpus
            .get(document_id)
            .ok_or_else(|| EngineError::DocumentNotFound {
                id: document_id.to_string(),
            })
    }

    /// Ordered section listing for one document.
    ///
    /// An empty listing means the document has no recognizable headings,
    /// which is distinct from the document not existing.
    pub fn list_sections(&self, document_id: &str) -> Result<Vec<SectionSummary>> {
        let document = self.document(document_id)?;
        let sections = self.index.get_sections(document)?;

        Ok(sections
            .iter()
            .map(|s| SectionSummary {
                number: s.number.clone(),
                full_heading: s.full_heading.clone(),
            })
            .collect())
    }

    /// Fetch one section by number, suggestions populated
    pub fn get_section(&self, document_id: &str, number: &str) -> Result<Section> {
        let document = self.document(document_id)?;
        self.index.get_section(document, number)
    }

    /// Case-insensitive substring search across every document's sections.
    ///
    /// Occurrences in the full heading score 2, occurrences in the content
    /// score 1; hits are ordered by score, ties broken by document order then
    /// section order. An empty result is success; an empty query is not.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(EngineError::InvalidQuery);
        }

        let mut hits = Vec::new();

        for document in self.corpus.documents() {
            let sections = match self.index.get_sections(document) {
                Ok(sections) => sections,
                Err(e) => {
                    tracing::warn!(id = %document.id, "skipping document in search: {e}");
                    continue;
                }
            };

            for section in sections.iter() {
                let heading_hits = count_occurrences(&section.full_heading.to_lowercase(), &needle);
                let content_hits = count_occurrences(&section.content.to_lowercase(), &needle);
                let score = 2 * heading_hits + content_hits;

                if score > 0 {
                    hits.push(SearchHit {
                        document_id: document.id.clone(),
                        filename: document.filename.clone(),
                        section_number: section.number.clone(),
                        full_heading: section.full_heading.clone(),
                        content_preview: preview(&section.content, self.preview_chars),
                        score,
                    });
                }
            }
        }

        // Stable sort keeps document order then section order within a score
        hits.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(query = %needle, hits = hits.len(), "search complete");

        Ok(hits)
    }

    /// Drop one document's cached parse; the next read re-parses
    pub fn invalidate(&self, document_id: &str) -> Result<()> {
        let document = self.document(document_id)?;
        self.index.invalidate(&document.id);
        Ok(())
    }

    /// Re-extract one document now, reporting whether its text changed
    pub fn refresh(&self, document_id: &str) -> Result<RefreshOutcome> {
        let document = self.document(document_id)?;
        self.index.refresh(document)
    }
}

fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    haystack.match_indices(needle).count() as u32
}

/// First `max_chars` characters of the content, cut on a char boundary
fn preview(content: &str, max_chars: usize) -> String {
    content.chars().take(max_chars).collect()
}
