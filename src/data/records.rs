//! Row extraction for the interactive city map.

use polars::prelude::*;

use super::schema;
use super::LoaderError;

/// One charging station row, reduced to what the point map needs.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMarker {
    pub operator: String,
    pub power_kw: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Extract one marker per row whose city equals `city` (exact match).
///
/// Rows without usable coordinates are skipped; a missing operator or power
/// value is kept with a placeholder / zero so the marker still renders.
pub fn city_markers(df: &DataFrame, city: &str) -> Result<Vec<StationMarker>, LoaderError> {
    let city_col = column(df, schema::CITY)?;
    let operator_col = column(df, schema::OPERATOR)?;
    let power = numeric(df, schema::POWER_KW)?;
    let latitude = numeric(df, schema::LATITUDE)?;
    let longitude = numeric(df, schema::LONGITUDE)?;

    let power_ca = power.f64()?;
    let latitude_ca = latitude.f64()?;
    let longitude_ca = longitude.f64()?;

    let mut markers = Vec::new();
    for i in 0..df.height() {
        match str_at(city_col, i) {
            Some(value) if value == city => {}
            _ => continue,
        }
        let (Some(lat), Some(lon)) = (latitude_ca.get(i), longitude_ca.get(i)) else {
            continue;
        };

        let operator = str_at(operator_col, i).unwrap_or_else(|| String::from("unknown"));

        markers.push(StationMarker {
            operator,
            power_kw: power_ca.get(i).unwrap_or(0.0),
            latitude: lat,
            longitude: lon,
        });
    }

    Ok(markers)
}

// Same accessor as the aggregation side: get_str keeps quote characters
// that belong to the value itself.
fn str_at(column: &Column, idx: usize) -> Option<String> {
    let value = column.get(idx).ok()?;
    if value.is_null() {
        return None;
    }
    match value.get_str() {
        Some(s) => Some(s.to_string()),
        None => Some(value.to_string()),
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoaderError> {
    df.column(name)
        .map_err(|_| LoaderError::ColumnNotFound(name.to_string()))
}

fn numeric(df: &DataFrame, name: &str) -> Result<Column, LoaderError> {
    Ok(column(df, name)?.cast(&DataType::Float64)?)
}
