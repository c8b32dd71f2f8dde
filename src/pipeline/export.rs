use crate::error::Result;
use crate::metrics::IngestMetrics;
use crate::pipeline::processing::normalize::to_table;
use crate::table::Table;
use crate::types::{NormalizedRecipe, SourceKind};
use std::path::Path;
use tracing::info;

/// Write `table` to `path`, replacing whatever was there
pub fn export(table: &Table, path: &Path) -> Result<()> {
    table.write_csv(path)?;
    info!(path = %path.display(), rows = table.len(), "Exported table");
    Ok(())
}

/// Read a persisted table back as-is. Columns are not checked here; a
/// drifted file fails later when a consumer asks for a missing column.
pub fn import(path: &Path) -> Result<Table> {
    Table::read_csv(path)
}

/// Lay out and export normalized recipes for one source
pub fn export_recipes(recipes: &[NormalizedRecipe], kind: SourceKind, path: &Path) -> Result<Table> {
    let table = to_table(recipes, kind)?;
    export(&table, path)?;
    IngestMetrics::record_rows_exported(kind.name(), table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use tempfile::tempdir;

    fn table(rows: &[[&str; 3]]) -> Table {
        let mut table = Table::new(vec!["Cuisine".into(), "Name".into(), "Calories (KCal)".into()]);
        for row in rows {
            table.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        table
    }

    #[test]
    fn test_export_overwrites_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("recipedb.csv");

        export(&table(&[["Thai", "Larb", "210"], ["US", "Burger", "700"]]), &path).unwrap();
        let smaller = table(&[["French", "Ratatouille", "150"]]);
        export(&smaller, &path).unwrap();

        assert_eq!(import(&path).unwrap(), smaller);
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = import(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
