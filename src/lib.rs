//! sopdex - SOP section parsing and retrieval engine
//!
//! This library ingests loosely structured protocol documents (PDF or
//! Markdown), decomposes them into a hierarchy of numbered sections, and
//! serves individual sections, calculator suggestions, and free-text search
//! to a calling client.

pub mod cli;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod index;
pub mod parse;
pub mod service;
pub mod suggest;

/// Re-export commonly used types
pub use corpus::{Corpus, Document};
pub use error::EngineError;
pub use index::SectionIndex;
pub use parse::Section;
pub use service::{RetrievalService, SearchHit};
pub use suggest::CalculatorTag;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "sopdex";
