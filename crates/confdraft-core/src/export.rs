// CSV export of the results matrix and the per-category pick detail.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Labels;
use crate::draft::session::DraftSession;

pub const RESULTS_FILE: &str = "draft_results.csv";
pub const PICK_DETAILS_FILE: &str = "pick_details.csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Paths written by [`export_to_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub results: PathBuf,
    pub pick_details: PathBuf,
}

/// Write the results table: `Pick #, Participant, <categories...>`, one row
/// per participant in pick order. Missing picks are empty cells.
pub fn write_results<W: Write>(writer: W, session: &DraftSession) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Pick #".to_string(), "Participant".to_string()];
    header.extend(session.state().category_order().iter().cloned());
    wtr.write_record(&header)?;

    for row in session.results_matrix() {
        let mut record = vec![row.rank.to_string(), row.participant.clone()];
        record.extend(row.cells.into_iter().map(|c| c.item.unwrap_or_default()));
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| ExportError::Io {
        path: "<writer>".into(),
        source: e,
    })?;
    Ok(())
}

/// Write the pick detail table: `<category label>, Pick #, Participant,
/// <item label>`, enumerated category by category in rotated turn order.
pub fn write_pick_detail<W: Write>(
    writer: W,
    session: &DraftSession,
    labels: &Labels,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        labels.category.as_str(),
        "Pick #",
        "Participant",
        labels.item.as_str(),
    ])?;

    for row in session.pick_detail() {
        wtr.write_record([
            row.category.clone(),
            row.pick_number().to_string(),
            row.participant.clone(),
            row.item.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush().map_err(|e| ExportError::Io {
        path: "<writer>".into(),
        source: e,
    })?;
    Ok(())
}

/// Write both tables into `dir`, creating it if needed.
pub fn export_to_dir(
    dir: &Path,
    session: &DraftSession,
    labels: &Labels,
) -> Result<ExportPaths, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let results = dir.join(RESULTS_FILE);
    write_results(create(&results)?, session)?;

    let pick_details = dir.join(PICK_DETAILS_FILE);
    write_pick_detail(create(&pick_details)?, session, labels)?;

    info!(
        "Exported draft to {} and {}",
        results.display(),
        pick_details.display()
    );
    Ok(ExportPaths {
        results,
        pick_details,
    })
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::setup::{Category, DraftSetup};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn session() -> DraftSession {
        let mut session = DraftSession::new();
        session
            .start_with_orders(
                DraftSetup::new(
                    names(&["Matt", "Joe"]),
                    vec![
                        Category::new("SEC", ["Georgia", "Alabama"]),
                        Category::new("Big Ten", ["Ohio State", "Michigan"]),
                    ],
                ),
                names(&["Joe", "Matt"]),
                names(&["Big Ten", "SEC"]),
            )
            .unwrap();
        session
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), ExportError>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn results_table_layout() {
        let mut session = session();
        session.submit_pick("Michigan").unwrap();
        session.submit_pick("Ohio State").unwrap();
        session.submit_pick("Alabama").unwrap();
        session.submit_pick("Georgia").unwrap();

        let text = render(|buf| write_results(buf, &session));
        assert_eq!(
            text,
            "Pick #,Participant,Big Ten,SEC\n1,Joe,Michigan,Georgia\n2,Matt,Ohio State,Alabama\n"
        );
    }

    #[test]
    fn pick_detail_layout_uses_labels_and_rotation() {
        let mut session = session();
        session.submit_pick("Ohio State").unwrap();

        let text = render(|buf| write_pick_detail(buf, &session, &Labels::default()));
        assert_eq!(
            text,
            "Conference,Pick #,Participant,Team\n\
             Big Ten,1,Joe,Ohio State\n\
             Big Ten,2,Matt,\n\
             SEC,1,Matt,\n\
             SEC,2,Joe,\n"
        );
    }

    #[test]
    fn export_to_dir_writes_both_files() {
        let dir = std::env::temp_dir().join("confdraft_export_test");
        let _ = std::fs::remove_dir_all(&dir);

        let session = session();
        let labels = Labels {
            category: "Group".into(),
            item: "Item".into(),
        };
        let paths = export_to_dir(&dir, &session, &labels).unwrap();
        assert_eq!(paths.results, dir.join(RESULTS_FILE));

        let detail = std::fs::read_to_string(&paths.pick_details).unwrap();
        assert!(detail.starts_with("Group,Pick #,Participant,Item\n"));
        let results = std::fs::read_to_string(&paths.results).unwrap();
        assert!(results.contains("1,Joe,,\n"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
