// Tabular draft setup import.
//
// Layout: the first row is a header. Column 0 holds participant names (its
// header is just a label); every other non-blank header names a category and
// the cells beneath it are that category's items. The participant and item
// columns are independent, so a sheet with 8 participants and 14 teams per
// conference simply has blank participant cells in the lower rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::draft::setup::{Category, DraftSetup};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    /// A data row that could not be decoded. `row` is 1-based and counts
    /// the header.
    #[error("row {row} could not be read: {source}")]
    MalformedRow { row: usize, source: csv::Error },

    #[error("file must have a header row and at least one data row")]
    MissingRows,

    #[error("no participants found in the first column")]
    NoParticipants,

    #[error("no categories found in the header row")]
    NoCategories,
}

/// Load a draft setup from a CSV file.
pub fn load_setup(path: &Path) -> Result<DraftSetup, ImportError> {
    let path_text = path.display().to_string();
    let file = File::open(path).map_err(|e| ImportError::Io {
        path: path_text.clone(),
        source: e,
    })?;
    let setup = load_setup_from_reader(file).map_err(|e| match e {
        ImportError::Csv { source, .. } => ImportError::Csv {
            path: path_text.clone(),
            source,
        },
        other => other,
    })?;
    debug!(
        "Imported {} participants and {} categories from {}",
        setup.participants.len(),
        setup.categories.len(),
        path_text
    );
    Ok(setup)
}

/// Parse a draft setup from any CSV reader.
///
/// Cells are trimmed. Blank participant cells are skipped, blank item cells
/// are skipped, and an item repeated within a column is kept once in
/// first-seen order.
pub fn load_setup_from_reader<R: Read>(rdr: R) -> Result<DraftSetup, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut records = reader.records();

    let header = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => {
            return Err(ImportError::Csv {
                path: "<reader>".into(),
                source: e,
            })
        }
        None => return Err(ImportError::MissingRows),
    };

    // (column index, category) for every non-blank header after column 0.
    let mut columns: Vec<(usize, Category)> = header
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, name)| !name.is_empty())
        .map(|(idx, name)| (idx, Category::new(name, Vec::<String>::new())))
        .collect();

    let mut participants = Vec::new();
    let mut data_rows = 0usize;

    for (offset, result) in records.enumerate() {
        let record = result.map_err(|source| {
            let row = offset + 2;
            warn!("Rejecting import: row {} is malformed: {}", row, source);
            ImportError::MalformedRow { row, source }
        })?;
        data_rows += 1;

        if let Some(name) = record.get(0).filter(|n| !n.is_empty()) {
            participants.push(name.to_string());
        }

        for (idx, category) in columns.iter_mut() {
            let Some(cell) = record.get(*idx).filter(|c| !c.is_empty()) else {
                continue;
            };
            if !category.contains(cell) {
                category.items.push(cell.to_string());
            }
        }
    }

    if data_rows == 0 {
        return Err(ImportError::MissingRows);
    }
    if participants.is_empty() {
        return Err(ImportError::NoParticipants);
    }
    if columns.is_empty() {
        return Err(ImportError::NoCategories);
    }

    Ok(DraftSetup::new(
        participants,
        columns.into_iter().map(|(_, category)| category).collect(),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
