//! Aggregation Module
//! Pure grouped counts, sums, rankings and extremes over the station table.
//!
//! Every function takes the DataFrame as an explicit parameter and returns a
//! plain result value; nothing here prints or mutates the input. Ties in the
//! descending orderings keep the first-encounter order of the key in the
//! table (stable sort over encounter-ordered groups; implementation-defined).

use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Extremes requested on an empty table")]
    EmptyTable,
}

/// Largest and smallest group of a grouped count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyExtremes {
    pub max_key: String,
    pub max_count: usize,
    pub min_key: String,
    pub min_count: usize,
}

/// Row count and measure total for one key value.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub count: usize,
    pub total_measure: f64,
}

fn key_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, AggregateError> {
    df.column(name)
        .map_err(|_| AggregateError::ColumnNotFound(name.to_string()))
}

fn key_at(column: &Column, idx: usize) -> Option<String> {
    let value = column.get(idx).ok()?;
    if value.is_null() {
        return None;
    }
    // get_str keeps quote characters that belong to the value; the Display
    // form wraps strings in quotes and stripping those would also strip
    // legitimate ones.
    match value.get_str() {
        Some(s) => Some(s.to_string()),
        None => Some(value.to_string()),
    }
}

/// Shared counting loop: rows per distinct value of `column`, descending,
/// ties in encounter order, null keys and `skip` matches left out.
fn grouped_counts(
    column: &Column,
    height: usize,
    skip: impl Fn(&str) -> bool,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for i in 0..height {
        let Some(value) = key_at(column, i) else {
            continue;
        };
        if skip(&value) {
            continue;
        }
        match counts.get_mut(&value) {
            Some(count) => *count += 1,
            None => {
                counts.insert(value.clone(), 1);
                order.push(value);
            }
        }
    }

    let mut pairs: Vec<(String, usize)> = order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect();
    // Stable sort: equal counts stay in encounter order.
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

/// Count rows per distinct value of `key`, sorted descending by count.
/// Null key values are skipped.
pub fn count_by_key(df: &DataFrame, key: &str) -> Result<Vec<(String, usize)>, AggregateError> {
    let column = key_column(df, key)?;
    Ok(grouped_counts(column, df.height(), |_| false))
}

/// Most- and least-populated group of `key`.
///
/// With a single group (or all groups equal) max and min refer to the same
/// entry; callers must not assume they differ.
pub fn summarize_extremes(df: &DataFrame, key: &str) -> Result<KeyExtremes, AggregateError> {
    let counts = count_by_key(df, key)?;
    let first = counts.first().ok_or(AggregateError::EmptyTable)?;
    let last = counts.last().ok_or(AggregateError::EmptyTable)?;
    Ok(KeyExtremes {
        max_key: first.0.clone(),
        max_count: first.1,
        min_key: last.0.clone(),
        min_count: last.1,
    })
}

/// Top group of `key` after dropping rows whose key value is in `excluded`.
///
/// Returns `None` when every row was excluded; that is an expected outcome,
/// not an error.
pub fn top_entity_excluding(
    df: &DataFrame,
    key: &str,
    excluded: &HashSet<String>,
) -> Result<Option<(String, usize)>, AggregateError> {
    let column = key_column(df, key)?;
    let counts = grouped_counts(column, df.height(), |value| excluded.contains(value));
    Ok(counts.into_iter().next())
}

/// Row count and `measure` total for rows where `key == value`.
///
/// An empty filter result yields `{count: 0, total_measure: 0.0}`. Null
/// measure values count the row but contribute nothing to the total.
pub fn summarize_entity(
    df: &DataFrame,
    key: &str,
    value: &str,
    measure: &str,
) -> Result<EntitySummary, AggregateError> {
    let key_col = key_column(df, key)?;
    let measure_col = key_column(df, measure)?.cast(&DataType::Float64)?;
    let measure_ca = measure_col.f64()?;

    let mut count = 0usize;
    let mut total = 0.0f64;
    for i in 0..df.height() {
        match key_at(key_col, i) {
            Some(v) if v == value => {
                count += 1;
                if let Some(m) = measure_ca.get(i) {
                    total += m;
                }
            }
            _ => {}
        }
    }

    Ok(EntitySummary {
        count,
        total_measure: total,
    })
}

/// Sum `sum_col` per distinct value of `group`, sorted descending, first `n`
/// entries (fewer when fewer groups exist).
pub fn top_n_by_sum(
    df: &DataFrame,
    group: &str,
    sum_col: &str,
    n: usize,
) -> Result<Vec<(String, f64)>, AggregateError> {
    let group_col = key_column(df, group)?;
    let value_col = key_column(df, sum_col)?.cast(&DataType::Float64)?;
    let value_ca = value_col.f64()?;

    let mut sums: HashMap<String, f64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for i in 0..df.height() {
        let Some(key) = key_at(group_col, i) else {
            continue;
        };
        let value = value_ca.get(i).unwrap_or(0.0);
        match sums.get_mut(&key) {
            Some(sum) => *sum += value,
            None => {
                sums.insert(key.clone(), value);
                order.push(key);
            }
        }
    }

    let mut pairs: Vec<(String, f64)> = order
        .into_iter()
        .map(|key| {
            let sum = sums[&key];
            (key, sum)
        })
        .collect();
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    pairs.truncate(n);
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(values: Vec<&str>) -> DataFrame {
        DataFrame::new(vec![Column::new(
            "Bundesland".into(),
            values.into_iter().map(String::from).collect::<Vec<_>>(),
        )])
        .unwrap()
    }

    #[test]
    fn count_by_key_sorts_descending() {
        let df = states(vec!["Bayern", "Bayern", "Berlin"]);
        let counts = count_by_key(&df, "Bundesland").unwrap();
        assert_eq!(
            counts,
            vec![("Bayern".to_string(), 2), ("Berlin".to_string(), 1)]
        );
    }

    #[test]
    fn counts_sum_to_row_count() {
        let df = states(vec!["Bayern", "Berlin", "Bayern", "Hessen", "Berlin"]);
        let counts = count_by_key(&df, "Bundesland").unwrap();
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, df.height());
    }

    #[test]
    fn ties_keep_encounter_order() {
        let df = states(vec!["Hessen", "Bayern", "Bayern", "Hessen"]);
        let counts = count_by_key(&df, "Bundesland").unwrap();
        assert_eq!(counts[0].0, "Hessen");
        assert_eq!(counts[1].0, "Bayern");
    }

    #[test]
    fn null_keys_are_skipped_but_empty_strings_are_not() {
        let df = DataFrame::new(vec![Column::new(
            "Bundesland".into(),
            vec![Some("Bayern"), None, Some("Bayern"), Some("")],
        )])
        .unwrap();
        let counts = count_by_key(&df, "Bundesland").unwrap();
        // The null row vanishes; the empty string is an ordinary key.
        assert_eq!(
            counts,
            vec![("Bayern".to_string(), 2), (String::new(), 1)]
        );
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, df.height() - 1);
    }

    #[test]
    fn quoted_key_values_keep_their_quotes() {
        let df = DataFrame::new(vec![Column::new(
            "Bundesland".into(),
            vec!["\"Bayern\"", "\"Bayern\""],
        )])
        .unwrap();
        let counts = count_by_key(&df, "Bundesland").unwrap();
        assert_eq!(counts, vec![("\"Bayern\"".to_string(), 2)]);
    }

    #[test]
    fn unknown_column_is_reported() {
        let df = states(vec!["Bayern"]);
        let err = count_by_key(&df, "Land").unwrap_err();
        assert!(matches!(err, AggregateError::ColumnNotFound(col) if col == "Land"));
    }

    #[test]
    fn extremes_match_worked_example() {
        let df = states(vec!["Bayern", "Bayern", "Berlin"]);
        let extremes = summarize_extremes(&df, "Bundesland").unwrap();
        assert_eq!(
            extremes,
            KeyExtremes {
                max_key: "Bayern".to_string(),
                max_count: 2,
                min_key: "Berlin".to_string(),
                min_count: 1,
            }
        );
    }

    #[test]
    fn extremes_on_single_row_collapse() {
        let df = states(vec!["Bayern"]);
        let extremes = summarize_extremes(&df, "Bundesland").unwrap();
        assert_eq!(extremes.max_key, extremes.min_key);
        assert_eq!(extremes.max_count, 1);
        assert_eq!(extremes.min_count, 1);
    }

    #[test]
    fn extremes_on_empty_table_fail() {
        let df = states(vec![]);
        let err = summarize_extremes(&df, "Bundesland").unwrap_err();
        assert!(matches!(err, AggregateError::EmptyTable));
    }

    #[test]
    fn all_null_keys_count_as_empty_table() {
        let df = DataFrame::new(vec![Column::new(
            "Bundesland".into(),
            vec![None::<&str>, None, None],
        )])
        .unwrap();
        let err = summarize_extremes(&df, "Bundesland").unwrap_err();
        assert!(matches!(err, AggregateError::EmptyTable));
    }

    #[test]
    fn excluded_top_uses_the_same_tie_rule_as_counting() {
        let df = states(vec!["Hessen", "Bayern", "Bayern", "Hessen"]);
        let top = top_entity_excluding(&df, "Bundesland", &HashSet::new()).unwrap();
        // Equal counts: the first-encountered key wins, as in count_by_key.
        assert_eq!(top, Some(("Hessen".to_string(), 2)));
    }

    #[test]
    fn excluding_everything_returns_none() {
        let df = states(vec!["Bayern", "Berlin"]);
        let excluded: HashSet<String> =
            ["Bayern", "Berlin"].iter().map(|s| s.to_string()).collect();
        let top = top_entity_excluding(&df, "Bundesland", &excluded).unwrap();
        assert_eq!(top, None);
    }

    #[test]
    fn exclusion_is_exact_match() {
        let df = states(vec!["München", "München", "Munich", "Berlin", "Berlin", "Berlin"]);
        let excluded: HashSet<String> = ["Berlin", "München"].iter().map(|s| s.to_string()).collect();
        let top = top_entity_excluding(&df, "Bundesland", &excluded).unwrap();
        // "Munich" is a different spelling, not merged with "München".
        assert_eq!(top, Some(("Munich".to_string(), 1)));
    }

    fn cities_with_power() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "Ort".into(),
                vec!["Amberg", "Berlin", "Amberg"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "InstallierteLadeleistungNLL".into(),
                vec![22.0, 50.0, 150.0],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn entity_summary_counts_and_sums() {
        let summary =
            summarize_entity(&cities_with_power(), "Ort", "Amberg", "InstallierteLadeleistungNLL")
                .unwrap();
        assert_eq!(
            summary,
            EntitySummary {
                count: 2,
                total_measure: 172.0,
            }
        );
    }

    #[test]
    fn null_measure_rows_are_counted_with_zero_contribution() {
        let df = DataFrame::new(vec![
            Column::new(
                "Ort".into(),
                vec!["Amberg", "Amberg", "Berlin"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "InstallierteLadeleistungNLL".into(),
                vec![Some(22.0), None, Some(50.0)],
            ),
        ])
        .unwrap();
        let summary =
            summarize_entity(&df, "Ort", "Amberg", "InstallierteLadeleistungNLL").unwrap();
        assert_eq!(
            summary,
            EntitySummary {
                count: 2,
                total_measure: 22.0,
            }
        );
    }

    #[test]
    fn entity_summary_of_absent_value_is_zero() {
        let summary = summarize_entity(
            &cities_with_power(),
            "Ort",
            "Hamburg",
            "InstallierteLadeleistungNLL",
        )
        .unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_measure, 0.0);
    }

    #[test]
    fn top_n_ranks_by_sum() {
        let df = DataFrame::new(vec![
            Column::new(
                "Betreiber".into(),
                vec!["EnBW", "Ionity", "EnBW", "Tesla"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ),
            Column::new("AnzahlLadepunkteNLL".into(), vec![4i64, 8, 2, 6]),
        ])
        .unwrap();
        let top = top_n_by_sum(&df, "Betreiber", "AnzahlLadepunkteNLL", 2).unwrap();
        assert_eq!(
            top,
            vec![("Ionity".to_string(), 8.0), ("Tesla".to_string(), 6.0)]
        );
    }

    #[test]
    fn top_n_larger_than_group_count_is_not_padded() {
        let df = DataFrame::new(vec![
            Column::new(
                "Betreiber".into(),
                vec!["EnBW", "Tesla"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ),
            Column::new("AnzahlLadepunkteNLL".into(), vec![4i64, 6]),
        ])
        .unwrap();
        let top = top_n_by_sum(&df, "Betreiber", "AnzahlLadepunkteNLL", 5).unwrap();
        assert_eq!(top.len(), 2);
    }
}
