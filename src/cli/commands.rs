//! Command implementations

use crate::corpus::{Corpus, Document};
use crate::index::RefreshOutcome;
use crate::parse;
use crate::service::RetrievalService;
use super::{GetArgs, ListArgs, OutputFormat, ParseArgs, RefreshArgs, SearchArgs, SectionsArgs};
use anyhow::{Context, Result};
use std::path::Path;

/// Open the corpus rooted at `path` and build the retrieval service
fn open_service(path: &Path) -> Result<RetrievalService> {
    let corpus =
        Corpus::open(path).with_context(|| format!("Failed to open corpus at {:?}", path))?;
    Ok(RetrievalService::new(corpus))
}

/// List the documents discovered in the corpus
pub fn list(path: &Path, args: &ListArgs, format: OutputFormat) -> Result<()> {
    let service = open_service(path)?;
    let documents = service.list_documents();

    match format {
        OutputFormat::Json => print_json(&documents)?,
        OutputFormat::Text => {
            if documents.is_empty() {
                println!("No documents found in {:?}", path);
                return Ok(());
            }

            println!("Documents ({}):", documents.len());
            for document in documents {
                if args.detailed {
                    println!("  {}  ({})  {:?}", document.id, document.filename, document.path);
                } else {
                    println!("  {}  ({})", document.id, document.filename);
                }
            }
        }
    }

    Ok(())
}

/// List the numbered sections of one document
pub fn sections(path: &Path, args: &SectionsArgs, format: OutputFormat) -> Result<()> {
    let service = open_service(path)?;
    let summaries = service.list_sections(&args.document)?;

    match format {
        OutputFormat::Json => print_json(&summaries)?,
        OutputFormat::Text => {
            if summaries.is_empty() {
                println!("No sections recognized in '{}'", args.document);
                return Ok(());
            }

            println!("Sections of '{}':", args.document);
            for summary in &summaries {
                let depth = summary.number.split('.').count();
                let indent = "  ".repeat(depth.saturating_sub(1));
                println!("  {}{}", indent, summary.full_heading);
            }
        }
    }

    Ok(())
}

/// Fetch a single section by number
pub fn get(path: &Path, args: &GetArgs, format: OutputFormat) -> Result<()> {
    let service = open_service(path)?;
    let section = service.get_section(&args.document, &args.number)?;

    match format {
        OutputFormat::Json => print_json(&section)?,
        OutputFormat::Text => {
            println!("{}", section.full_heading);
            println!("{}", "=".repeat(section.full_heading.len()));
            println!();

            if section.content.is_empty() {
                println!("(no content under this heading)");
            } else {
                println!("{}", section.content);
            }

            if !section.suggested_calculators.is_empty() {
                let names: Vec<String> = section
                    .suggested_calculators
                    .iter()
                    .map(|tag| tag.to_string())
                    .collect();
                println!();
                println!("Suggested calculators: {}", names.join(", "));
            }
        }
    }

    Ok(())
}

/// Search every document's sections
pub fn search(path: &Path, args: &SearchArgs, format: OutputFormat) -> Result<()> {
    let service = open_service(path)?;
    let mut hits = service.search(&args.query)?;

    if let Some(limit) = args.limit {
        hits.truncate(limit);
    }

    match format {
        OutputFormat::Json => print_json(&hits)?,
        OutputFormat::Text => {
            if hits.is_empty() {
                println!("No sections match '{}'", args.query);
                return Ok(());
            }

            println!("Hits for '{}' ({}):", args.query, hits.len());
            for hit in &hits {
                println!(
                    "  [{}] {} - {}",
                    hit.score, hit.document_id, hit.full_heading
                );
                if !hit.content_preview.is_empty() {
                    println!("      {}", hit.content_preview.replace('\n', " "));
                }
            }
        }
    }

    Ok(())
}

/// Re-extract one document, or the whole corpus, replacing cached parses
pub fn refresh(path: &Path, args: &RefreshArgs, format: OutputFormat) -> Result<()> {
    let service = open_service(path)?;

    let mut refreshed = Vec::new();
    match &args.document {
        Some(id) => {
            // A named document that does not exist is a hard failure
            refreshed.push((id.clone(), service.refresh(id)?));
        }
        None => {
            let targets: Vec<Document> = service.list_documents().to_vec();
            for document in &targets {
                match service.refresh(&document.id) {
                    Ok(outcome) => refreshed.push((document.id.clone(), outcome)),
                    Err(e) => eprintln!("Warning: failed to refresh '{}': {e}", document.id),
                }
            }
        }
    }

    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = refreshed
                .iter()
                .map(|(id, outcome)| {
                    serde_json::json!({
                        "document_id": id,
                        "updated": matches!(outcome, RefreshOutcome::Updated),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
        OutputFormat::Text => {
            for (id, outcome) in &refreshed {
                let label = match outcome {
                    RefreshOutcome::Updated => "updated",
                    RefreshOutcome::Unchanged => "unchanged",
                };
                println!("  {id}: {label}");
            }
            println!("✓ Refreshed {} document(s)", refreshed.len());
        }
    }

    Ok(())
}

/// Parse an arbitrary file and dump its section structure
pub fn parse_file(args: &ParseArgs, format: OutputFormat) -> Result<()> {
    use crate::extract::{DocumentLoader, FileLoader};

    let file = Path::new(&args.file);
    let document = Document {
        id: file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| args.file.clone()),
        filename: file
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| args.file.clone()),
        path: file.to_path_buf(),
    };

    let text = FileLoader.load(&document)?;
    let sections = parse::parse(&document.id, &text);

    match format {
        OutputFormat::Json => print_json(&sections)?,
        OutputFormat::Text => {
            println!("Section structure of {:?}", file);
            println!("{} section(s) recognized", sections.len());
            println!();

            for section in &sections {
                let depth = section.number.split('.').count();
                let indent = "  ".repeat(depth.saturating_sub(1));
                println!(
                    "  {}{}  [{} chars]",
                    indent,
                    section.full_heading,
                    section.content.len()
                );
            }
        }
    }

    Ok(())
}

/// Print any serializable payload as pretty JSON
fn print_json<T: serde::Serialize>(payload: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(payload)?;
    println!("{}", json);
    Ok(())
}
