//! Append-only CSV ledger of processed candidates

use crate::config::LedgerConfig;
use crate::error::Result;
use crate::output::record::{CandidateRecord, FIELDS_ORDER};
use log::info;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Candidate ledger stored as a CSV file
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header row when the file is new
    pub fn append(&self, record: &CandidateRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(FIELDS_ORDER)?;
        }
        writer.write_record(record.to_row())?;
        writer.flush()?;

        info!("Appended candidate to ledger: {}", self.path.display());
        Ok(())
    }
}

/// Write a standalone CSV export of the given records
pub fn export_records(path: &Path, records: &[CandidateRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(FIELDS_ORDER)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(name: &str) -> CandidateRecord {
        CandidateRecord {
            name: name.to_string(),
            nationality: "Irish".to_string(),
            qualification: "BSc".to_string(),
            experience: "2 years 11 months".to_string(),
            ..CandidateRecord::default()
        }
    }

    #[test]
    fn append_writes_header_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("records").join("candidates.csv"));

        ledger.append(&sample_record("Jane Doe")).unwrap();
        ledger.append(&sample_record("John Smith")).unwrap();

        let content = fs::read_to_string(ledger.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name,Nationality,Qualification,Experience"));
        assert!(lines[1].contains("Jane Doe"));
        assert!(lines[2].contains("John Smith"));
    }

    #[test]
    fn export_writes_all_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let records = vec![sample_record("Jane Doe"), sample_record("John Smith")];
        export_records(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split(',').count(), FIELDS_ORDER.len());
    }
}
