//! In-memory section cache
//!
//! PDF re-extraction is expensive and the corpus changes rarely relative to
//! read volume, so each document is parsed once and the result is cached
//! until explicitly invalidated or the process exits. The cache is volatile
//! by design; there is nothing to migrate or recover on restart.
//!
//! Concurrency: one mutex guards the slot map and is held only to look up or
//! create a document's slot. A second, per-slot mutex is held across
//! load+parse, so concurrent first readers of the same document block on the
//! slot and receive the single in-flight result, while unrelated documents
//! are never serialized against each other.

use crate::corpus::Document;
use crate::error::{EngineError, Result};
use crate::extract::{content_hash, DocumentLoader};
use crate::parse::{self, Section};
use crate::suggest;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Result of an explicit refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Source text changed; the cached sections were replaced
    Updated,
    /// Source text is identical to the cached parse
    Unchanged,
}

/// One document's parse, held by the cache and shared with readers
#[derive(Debug)]
pub struct ParsedDocument {
    /// Fingerprint of the normalized source text
    pub fingerprint: String,
    /// Ordered sections with suggestions populated
    pub sections: Arc<Vec<Section>>,
}

#[derive(Default)]
struct Slot {
    parsed: Mutex<Option<Arc<ParsedDocument>>>,
}

/// Per-document cache mapping document ids to parsed section lists
pub struct SectionIndex {
    loader: Arc<dyn DocumentLoader>,
    slots: Mutex<HashMap<String, Arc<Slot>>>,
}

impl SectionIndex {
    /// Create an empty index over the given loader
    pub fn new(loader: Arc<dyn DocumentLoader>) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, document_id: &str) -> Arc<Slot> {
        let mut slots = self.slots.lock().unwrap();
        slots
            .entry(document_id.to_string())
            .or_insert_with(|| Arc::new(Slot::default()))
            .clone()
    }

    /// Get a document's parse, loading on first access.
    ///
    /// Repeated calls return the same `Arc` until invalidation; a failed load
    /// leaves the slot empty so the next reader retries.
    pub fn get(&self, document: &Document) -> Result<Arc<ParsedDocument>> {
        let slot = self.slot(&document.id);
        let mut parsed = slot.parsed.lock().unwrap();

        if let Some(cached) = parsed.as_ref() {
            tracing::debug!(id = %document.id, "section cache hit");
            return Ok(cached.clone());
        }

        let fresh = Arc::new(self.load_and_parse(document)?);
        *parsed = Some(fresh.clone());
        Ok(fresh)
    }

    /// Ordered sections of a document, cached
    pub fn get_sections(&self, document: &Document) -> Result<Arc<Vec<Section>>> {
        Ok(self.get(document)?.sections.clone())
    }

    /// Fetch one section by exact string match on its number
    pub fn get_section(&self, document: &Document, number: &str) -> Result<Section> {
        let parsed = self.get(document)?;
        parsed
            .sections
            .iter()
            .find(|s| s.number == number)
            .cloned()
            .ok_or_else(|| EngineError::SectionNotFound {
                id: document.id.clone(),
                number: number.to_string(),
            })
    }

    /// Drop a document's cached parse; the next read re-parses
    pub fn invalidate(&self, document_id: &str) {
        let slot = self.slot(document_id);
        *slot.parsed.lock().unwrap() = None;
        tracing::debug!(id = %document_id, "section cache invalidated");
    }

    /// Re-extract now and atomically replace the cached parse, reporting
    /// whether the source text actually changed
    pub fn refresh(&self, document: &Document) -> Result<RefreshOutcome> {
        let slot = self.slot(&document.id);
        let mut parsed = slot.parsed.lock().unwrap();

        let previous = parsed.as_ref().map(|p| p.fingerprint.clone());
        let fresh = Arc::new(self.load_and_parse(document)?);

        let outcome = if previous.as_deref() == Some(fresh.fingerprint.as_str()) {
            RefreshOutcome::Unchanged
        } else {
            RefreshOutcome::Updated
        };

        *parsed = Some(fresh);
        Ok(outcome)
    }

    fn load_and_parse(&self, document: &Document) -> Result<ParsedDocument> {
        tracing::debug!(id = %document.id, "loading and parsing document");

        let text = self.loader.load(document)?;
        let fingerprint = content_hash(&text);

        let mut sections = parse::parse(&document.id, &text);
        for section in &mut sections {
            let scope = format!("{} {}", section.full_heading, section.content);
            section.suggested_calculators = suggest::suggest(&scope);
        }

        Ok(ParsedDocument {
            fingerprint,
            sections: Arc::new(sections),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Loader returning canned text and counting invocations
    struct CountingLoader {
        text: String,
        loads: AtomicUsize,
    }

    impl CountingLoader {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                loads: AtomicUsize::new(0),
            }
        }

        fn load_count(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    impl DocumentLoader for CountingLoader {
        fn load(&self, _document: &Document) -> Result<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    fn doc(id: &str) -> Document {
        Document {
            id: id.to_string(),
            filename: format!("{id}.md"),
            path: PathBuf::from(format!("{id}.md")),
        }
    }

    #[test]
    fn test_repeated_reads_parse_once() {
        let loader = Arc::new(CountingLoader::new("1. Purpose\nbody\n"));
        let index = SectionIndex::new(loader.clone());
        let document = doc("sop");

        let first = index.get_sections(&document).unwrap();
        let second = index.get_sections(&document).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn test_invalidate_forces_reparse() {
        let loader = Arc::new(CountingLoader::new("1. Purpose\nbody\n"));
        let index = SectionIndex::new(loader.clone());
        let document = doc("sop");

        index.get_sections(&document).unwrap();
        index.invalidate(&document.id);
        index.get_sections(&document).unwrap();

        assert_eq!(loader.load_count(), 2);
    }

    #[test]
    fn test_get_section_by_exact_number() {
        let loader = Arc::new(CountingLoader::new("2.1 Reagents\nGibson mix\n"));
        let index = SectionIndex::new(loader);
        let document = doc("sop");

        let section = index.get_section(&document, "2.1").unwrap();
        assert_eq!(section.full_heading, "2.1 Reagents");

        let err = index.get_section(&document, "2").unwrap_err();
        assert!(matches!(err, EngineError::SectionNotFound { .. }));
    }

    #[test]
    fn test_suggestions_are_populated_at_index_time() {
        let loader = Arc::new(CountingLoader::new("3.1 Gibson Assembly\nCombine.\n"));
        let index = SectionIndex::new(loader);

        let section = index.get_section(&doc("gibson"), "3.1").unwrap();
        assert!(section
            .suggested_calculators
            .contains(&crate::suggest::CalculatorTag::Gibson));
    }

    #[test]
    fn test_refresh_reports_unchanged_then_updated() {
        let loader = Arc::new(CountingLoader::new("1. Purpose\nbody\n"));
        let index = SectionIndex::new(loader.clone());
        let document = doc("sop");

        index.get_sections(&document).unwrap();
        assert_eq!(
            index.refresh(&document).unwrap(),
            RefreshOutcome::Unchanged
        );

        // A cold cache always reports an update
        index.invalidate(&document.id);
        assert_eq!(index.refresh(&document).unwrap(), RefreshOutcome::Updated);
        assert_eq!(loader.load_count(), 3);
    }

    #[test]
    fn test_failed_load_is_retried() {
        struct FlakyLoader {
            calls: AtomicUsize,
        }

        impl DocumentLoader for FlakyLoader {
            fn load(&self, document: &Document) -> Result<String> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(EngineError::SourceUnavailable {
                        path: document.path.clone(),
                        source: std::io::Error::new(std::io::ErrorKind::Other, "transient"),
                    })
                } else {
                    Ok("1. Purpose\nbody\n".to_string())
                }
            }
        }

        let index = SectionIndex::new(Arc::new(FlakyLoader {
            calls: AtomicUsize::new(0),
        }));
        let document = doc("sop");

        assert!(index.get_sections(&document).is_err());
        assert_eq!(index.get_sections(&document).unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_first_reads_load_once() {
        let loader = Arc::new(CountingLoader::new("1. Purpose\nshared body\n"));
        let index = SectionIndex::new(loader.clone());
        let document = doc("sop");

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let index = &index;
                    let document = &document;
                    scope.spawn(move || index.get_sections(document).unwrap())
                })
                .collect();

            let lists: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            for list in &lists {
                assert_eq!(list.len(), 1);
                assert_eq!(list[0].content, "shared body");
            }
        });

        assert_eq!(loader.load_count(), 1);
    }
}
