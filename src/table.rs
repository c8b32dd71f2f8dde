//! In-memory tabular data backed by CSV files.
//!
//! Cells are kept as text. Numeric interpretation happens where a column is
//! consumed (see `pipeline::aggregate`), so a drifted file only fails once a
//! caller asks for a column that is not there.

use crate::error::{PipelineError, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }

    /// Iterate over one column's cells in row order
    pub fn column<'a>(&'a self, name: &str) -> Result<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(move |row| row.get(idx).map(String::as_str).unwrap_or("")))
    }

    pub fn rename_columns<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> String,
    {
        for column in &mut self.columns {
            *column = rename(column);
        }
    }

    /// Remove the named columns. Every name must be present.
    pub fn drop_columns(&mut self, names: &[&str]) -> Result<()> {
        let mut indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>>>()?;
        indices.sort_unstable();
        indices.dedup();

        for idx in indices.into_iter().rev() {
            self.columns.remove(idx);
            for row in &mut self.rows {
                if idx < row.len() {
                    row.remove(idx);
                }
            }
        }
        Ok(())
    }

    /// Keep rows for which `keep` returns true, preserving order
    pub fn retain_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[String]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let columns = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = Table::new(columns);
        for record in reader.records() {
            let record = record?;
            table.rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(table)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read_csv(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.display(), rows = table.len(), "Read table");
        Ok(table)
    }

    /// Write the table as CSV, replacing any existing file
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fs::File::create(path)?;
        self.to_writer(file)?;
        debug!(path = %path.display(), rows = self.len(), "Wrote table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["A".into(), "B".into(), "C".into()]);
        table.push_row(vec!["1".into(), "2".into(), "3".into()]);
        table.push_row(vec!["4".into(), "5".into(), "6".into()]);
        table
    }

    #[test]
    fn test_drop_columns_removes_cells() {
        let mut table = sample();
        table.drop_columns(&["C", "A"]).unwrap();
        assert_eq!(table.columns, vec!["B".to_string()]);
        assert_eq!(table.rows, vec![vec!["2".to_string()], vec!["5".to_string()]]);
    }

    #[test]
    fn test_drop_missing_column_fails_without_changes() {
        let mut table = sample();
        let err = table.drop_columns(&["A", "Z"]).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(ref c) if c == "Z"));
        assert_eq!(table, sample());
    }

    #[test]
    fn test_quoted_cells_survive_csv() {
        let mut table = Table::new(vec!["Name".into(), "Ingredients".into()]);
        table.push_row(vec!["Pad, Thai".into(), r#"["rice \"noodles\"","egg"]"#.into()]);

        let mut buf = Vec::new();
        table.to_writer(&mut buf).unwrap();
        let back = Table::from_reader(buf.as_slice()).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_column_iterates_cells() {
        let table = sample();
        let cells: Vec<&str> = table.column("B").unwrap().collect();
        assert_eq!(cells, vec!["2", "5"]);
        assert!(table.column("missing").is_err());
    }
}
