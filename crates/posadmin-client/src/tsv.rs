//! Error report returned by the backend when a TSV import is rejected.
//!
//! The body is itself TSV: a header row followed by one row per invalid
//! input record, carrying the original columns plus a row number and an
//! error message.

use std::path::Path;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvErrorReport {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TsvErrorReport {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, one per rejected input record
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Value of `column` in every row, e.g. the error messages
    pub fn column(&self, column: &str) -> Vec<&str> {
        let Some(index) = self
            .headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
        else {
            return Vec::new();
        };
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| crate::Error::Io(e.into_error()))
    }

    /// Write the report as a downloadable `.tsv` file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}
