//! Static nutrient-per-food reference table.

use crate::constants::{EXCLUDED_REFERENCE_COLUMNS, REFERENCE_NAMESPACE_PREFIX};
use crate::error::Result;
use crate::table::Table;
use std::path::Path;
use tracing::{info, instrument};

/// Load the reference CSV, strip the `Data.` namespace from column names and
/// drop the excluded columns. Every excluded column must be present.
#[instrument]
pub fn load_reference(path: &Path) -> Result<Table> {
    let mut table = Table::read_csv(path)?;
    clean_reference(&mut table)?;
    info!(
        rows = table.len(),
        columns = table.columns.len(),
        "Loaded nutrition reference"
    );
    Ok(table)
}

pub fn clean_reference(table: &mut Table) -> Result<()> {
    table.rename_columns(|column| column.replace(REFERENCE_NAMESPACE_PREFIX, ""));
    table.drop_columns(&EXCLUDED_REFERENCE_COLUMNS)
}
