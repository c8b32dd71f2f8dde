//! Reads recipe rows out of a rendered RecipeDB search results page.
//!
//! This is the only place that knows how the result table is laid out: the
//! first cell holds the recipe anchor and the `td.roundOff` cells carry
//! calories, protein and fat in that order.

use crate::error::{PipelineError, Result};
use crate::types::ScrapedRow;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static NUTRITION_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td.roundOff").unwrap());

const CALORIES_CELL: usize = 0;
const PROTEIN_CELL: usize = 1;
const FAT_CELL: usize = 2;

/// Parse every data row on the page. Rows without a `td` (headers) are
/// skipped; a data row missing its anchor or nutrition cells is an error.
pub fn parse_result_rows(html: &str, cuisine: &str, base_url: &str) -> Result<Vec<ScrapedRow>> {
    let document = Html::parse_document(html);
    let mut rows = Vec::new();

    for (index, row) in document.select(&ROW_SELECTOR).enumerate() {
        let Some(first_cell) = row.select(&CELL_SELECTOR).next() else {
            continue;
        };
        rows.push(parse_row(index, &row, &first_cell, cuisine, base_url)?);
    }

    debug!(cuisine, rows = rows.len(), "Parsed result page");
    Ok(rows)
}

fn parse_row(
    index: usize,
    row: &ElementRef,
    first_cell: &ElementRef,
    cuisine: &str,
    base_url: &str,
) -> Result<ScrapedRow> {
    let anchor = first_cell.select(&ANCHOR_SELECTOR).next().ok_or_else(|| {
        PipelineError::StructuralMismatch(format!("row {} has no recipe link", index))
    })?;
    let href = anchor.value().attr("href").ok_or_else(|| {
        PipelineError::StructuralMismatch(format!("row {} recipe link has no href", index))
    })?;
    let name = element_text(&anchor);

    let nutrition: Vec<String> = row.select(&NUTRITION_SELECTOR).map(|c| element_text(&c)).collect();
    if nutrition.len() <= FAT_CELL {
        return Err(PipelineError::StructuralMismatch(format!(
            "row {} has {} nutrition cells, expected at least {}",
            index,
            nutrition.len(),
            FAT_CELL + 1
        )));
    }

    Ok(ScrapedRow {
        cuisine: cuisine.to_string(),
        name,
        link: format!("{}{}", base_url, href),
        calories: nutrition[CALORIES_CELL].clone(),
        protein: nutrition[PROTEIN_CELL].clone(),
        fat: nutrition[FAT_CELL].clone(),
    })
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
