//! Console presenter: turns aggregation results into the summary lines.
//!
//! Formatting only. Counts stay integers; power keeps the precision the
//! input provided. The summed operator quantity is charge points, not
//! stations, and the labels say so.

use crate::stats::{EntitySummary, KeyExtremes};

pub fn format_state_counts(counts: &[(String, usize)]) -> String {
    let mut out = String::from("Charging stations per state:\n");
    for (state, count) in counts {
        out.push_str(&format!("{state}: {count}\n"));
    }
    out
}

pub fn format_extremes(extremes: &KeyExtremes) -> String {
    format!(
        "State with most charging stations: {} ({} stations)\n\
         State with least charging stations: {} ({} stations)",
        extremes.max_key, extremes.max_count, extremes.min_key, extremes.min_count
    )
}

pub fn format_top_city(top: Option<&(String, usize)>, excluded: &[String]) -> String {
    let exclusion = excluded.join(", ");
    match top {
        Some((city, count)) => format!(
            "City with most charging stations (excluding {exclusion}): {city} ({count} stations)"
        ),
        None => format!("No city left after excluding {exclusion}"),
    }
}

pub fn format_city_summary(city: &str, summary: &EntitySummary) -> String {
    format!(
        "{city} total stations: {}\n{city} total installed charging power (kW): {}",
        summary.count, summary.total_measure
    )
}

pub fn format_operator_ranking(ranking: &[(String, f64)]) -> String {
    let mut out = format!(
        "Top {} Charging Station Operators in Germany:\n",
        ranking.len()
    );
    for (rank, (operator, points)) in ranking.iter().enumerate() {
        out.push_str(&format!("{}. {operator}: {points} charge points\n", rank + 1));
    }
    out
}

pub fn print(text: &str) {
    println!("{text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_lines_carry_exact_counts() {
        let extremes = KeyExtremes {
            max_key: "Bayern".to_string(),
            max_count: 2,
            min_key: "Berlin".to_string(),
            min_count: 1,
        };
        let text = format_extremes(&extremes);
        assert!(text.contains("State with most charging stations: Bayern (2 stations)"));
        assert!(text.contains("State with least charging stations: Berlin (1 stations)"));
    }

    #[test]
    fn top_city_reports_the_exclusion_list() {
        let top = ("Amberg".to_string(), 7);
        let excluded = vec!["Berlin".to_string(), "Hamburg".to_string()];
        let text = format_top_city(Some(&top), &excluded);
        assert_eq!(
            text,
            "City with most charging stations (excluding Berlin, Hamburg): Amberg (7 stations)"
        );
    }

    #[test]
    fn all_excluded_has_its_own_message() {
        let excluded = vec!["Berlin".to_string()];
        let text = format_top_city(None, &excluded);
        assert_eq!(text, "No city left after excluding Berlin");
    }

    #[test]
    fn city_summary_keeps_input_precision() {
        let summary = EntitySummary {
            count: 3,
            total_measure: 193.5,
        };
        let text = format_city_summary("Amberg", &summary);
        assert!(text.contains("Amberg total stations: 3"));
        assert!(text.contains("Amberg total installed charging power (kW): 193.5"));
    }

    #[test]
    fn operator_ranking_counts_charge_points_not_stations() {
        let ranking = vec![
            ("EnBW".to_string(), 420.0),
            ("Ionity".to_string(), 128.0),
        ];
        let text = format_operator_ranking(&ranking);
        assert!(text.contains("1. EnBW: 420 charge points"));
        assert!(text.contains("2. Ionity: 128 charge points"));
        assert!(!text.contains("stations"));
    }
}
