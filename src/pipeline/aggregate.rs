//! Cuisine filtering and per-cuisine statistics over a normalized table.
//!
//! Nothing here is cached: every call recomputes from the table it is given.

use crate::constants::CUISINE_COLUMN;
use crate::error::Result;
use crate::pipeline::processing::normalize::normalizers::NormalizerUtils;
use crate::table::Table;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Mean of each requested column for one cuisine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub cuisine: String,
    /// Rows in this cuisine's group
    pub count: usize,
    /// `None` when no row of the group has a numeric value for that column
    pub means: Vec<(String, Option<f64>)>,
}

impl AggregateRow {
    pub fn mean(&self, column: &str) -> Option<f64> {
        self.means
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, mean)| *mean)
    }
}

/// Five-number summary of one column for one cuisine (box and violin plots)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub cuisine: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Rows whose cuisine is in `selected`, in their original order.
/// An empty selection means no filter.
pub fn filter(table: &Table, selected: &[String]) -> Result<Table> {
    if selected.is_empty() {
        return Ok(table.clone());
    }
    let idx = table.column_index(CUISINE_COLUMN)?;
    let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
    Ok(table.retain_rows(|row| row.get(idx).is_some_and(|c| wanted.contains(c.as_str()))))
}

/// Group by cuisine and average each requested column, ordered by cuisine.
/// Cells that are not numbers are left out of that column's mean only.
pub fn aggregate(table: &Table, columns: &[&str]) -> Result<Vec<AggregateRow>> {
    let cuisine_idx = table.column_index(CUISINE_COLUMN)?;
    let column_idx = columns
        .iter()
        .map(|c| table.column_index(c))
        .collect::<Result<Vec<_>>>()?;

    // per cuisine: row count, then (sum, numeric count) per column
    let mut groups: BTreeMap<&str, (usize, Vec<(f64, usize)>)> = BTreeMap::new();
    for row in &table.rows {
        let cuisine = row.get(cuisine_idx).map(String::as_str).unwrap_or("");
        let (count, sums) = groups
            .entry(cuisine)
            .or_insert_with(|| (0, vec![(0.0, 0); columns.len()]));
        *count += 1;
        for (slot, &idx) in sums.iter_mut().zip(&column_idx) {
            if let Some(value) = row.get(idx).and_then(|cell| NormalizerUtils::coerce_number(cell)) {
                slot.0 += value;
                slot.1 += 1;
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|(cuisine, (count, sums))| AggregateRow {
            cuisine: cuisine.to_string(),
            count,
            means: columns
                .iter()
                .zip(sums)
                .map(|(column, (sum, n))| (column.to_string(), (n > 0).then(|| sum / n as f64)))
                .collect(),
        })
        .collect())
}

/// Per-cuisine spread of one column, ordered by cuisine. Cuisines with no
/// numeric value in the column are omitted.
pub fn distribution(table: &Table, column: &str) -> Result<Vec<Distribution>> {
    let cuisine_idx = table.column_index(CUISINE_COLUMN)?;
    let idx = table.column_index(column)?;

    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in &table.rows {
        let cuisine = row.get(cuisine_idx).map(String::as_str).unwrap_or("");
        if let Some(value) = row.get(idx).and_then(|cell| NormalizerUtils::coerce_number(cell)) {
            groups.entry(cuisine).or_default().push(value);
        }
    }

    Ok(groups
        .into_iter()
        .map(|(cuisine, mut values)| {
            values.sort_by(f64::total_cmp);
            Distribution {
                cuisine: cuisine.to_string(),
                count: values.len(),
                min: values[0],
                q1: quantile(&values, 0.25),
                median: quantile(&values, 0.5),
                q3: quantile(&values, 0.75),
                max: values[values.len() - 1],
            }
        })
        .collect())
}

/// Linear-interpolated quantile of sorted, non-empty values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

/// Cuisines in order of first appearance
pub fn distinct_cuisines(table: &Table) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    Ok(table
        .column(CUISINE_COLUMN)?
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    fn table(rows: &[(&str, &str, &str)]) -> Table {
        let mut table = Table::new(vec!["Name".into(), "Cuisine".into(), "Calories".into()]);
        for (name, cuisine, calories) in rows {
            table.push_row(vec![name.to_string(), cuisine.to_string(), calories.to_string()]);
        }
        table
    }

    fn sample() -> Table {
        table(&[
            ("a", "Italian", "200"),
            ("b", "Thai", "300"),
            ("c", "Italian", "400"),
            ("d", "French", "x"),
        ])
    }

    #[test]
    fn test_empty_selection_is_no_filter() {
        let t = sample();
        assert_eq!(filter(&t, &[]).unwrap(), t);
    }

    #[test]
    fn test_filter_keeps_order() {
        let filtered = filter(&sample(), &["Italian".to_string(), "French".to_string()]).unwrap();
        let names: Vec<&str> = filtered.column("Name").unwrap().collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_filter_unknown_cuisine_is_empty() {
        let filtered = filter(&sample(), &["Korean".to_string()]).unwrap();
        assert!(filtered.is_empty());
        assert!(aggregate(&filtered, &["Calories"]).unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_means() {
        let t = table(&[("a", "Italian", "200"), ("b", "Italian", "400"), ("c", "Thai", "300")]);
        let rows = aggregate(&t, &["Calories"]).unwrap();
        assert_eq!(
            rows,
            vec![
                AggregateRow {
                    cuisine: "Italian".into(),
                    count: 2,
                    means: vec![("Calories".into(), Some(300.0))],
                },
                AggregateRow {
                    cuisine: "Thai".into(),
                    count: 1,
                    means: vec![("Calories".into(), Some(300.0))],
                },
            ]
        );
    }

    #[test]
    fn test_non_numeric_cells_excluded_from_mean_only() {
        let t = table(&[("a", "US", "100"), ("b", "US", "oops"), ("c", "US", "")]);
        let rows = aggregate(&t, &["Calories"]).unwrap();
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].mean("Calories"), Some(100.0));

        let rows = aggregate(&sample(), &["Calories"]).unwrap();
        let french = rows.iter().find(|r| r.cuisine == "French").unwrap();
        assert_eq!(french.mean("Calories"), None);
    }

    #[test]
    fn test_group_sizes_sum_to_row_count() {
        let t = sample();
        let rows = aggregate(&t, &["Calories"]).unwrap();
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), t.len());
        let cuisines: Vec<&str> = rows.iter().map(|r| r.cuisine.as_str()).collect();
        assert_eq!(cuisines, vec!["French", "Italian", "Thai"]);
    }

    #[test]
    fn test_missing_column_surfaces_at_aggregation() {
        let err = aggregate(&sample(), &["Fiber (g)"]).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(ref c) if c == "Fiber (g)"));
    }

    #[test]
    fn test_distribution() {
        let t = table(&[
            ("a", "Thai", "10"),
            ("b", "Thai", "20"),
            ("c", "Thai", "30"),
            ("d", "Thai", "40"),
            ("e", "Thai", "50"),
            ("f", "US", "n/a"),
        ]);
        let dist = distribution(&t, "Calories").unwrap();
        assert_eq!(dist.len(), 1);
        assert_eq!(dist[0].count, 5);
        assert_eq!((dist[0].min, dist[0].q1, dist[0].median, dist[0].q3, dist[0].max), (10.0, 20.0, 30.0, 40.0, 50.0));
    }

    #[test]
    fn test_distinct_cuisines_first_appearance() {
        assert_eq!(distinct_cuisines(&sample()).unwrap(), vec!["Italian", "Thai", "French"]);
    }
}
