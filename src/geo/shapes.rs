//! Region shape source (GeoJSON Bundesländer boundaries).
//!
//! The `name` property of each feature must match the `Bundesland` vocabulary
//! of the register; a mismatched spelling silently ends up as a zero-count
//! region in the choropleth.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// deutschlandGeoJSON federal state boundaries, highest resolution.
pub const DEFAULT_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/isellsoap/deutschlandGeoJSON/master/2_bundeslaender/1_sehr_hoch.geo.json";

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Failed to fetch region shapes: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Failed to read region shapes from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse region shapes: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One named region with its outer boundary rings in [lon, lat] order.
/// Islands contribute extra rings; holes are dropped (none matter at state
/// level).
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub rings: Vec<Vec<[f64; 2]>>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: Properties,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Properties {
    name: String,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

impl Geometry {
    fn outer_rings(self) -> Vec<Vec<[f64; 2]>> {
        match self {
            Geometry::Polygon { coordinates } => coordinates.into_iter().take(1).collect(),
            Geometry::MultiPolygon { coordinates } => coordinates
                .into_iter()
                .filter_map(|polygon| polygon.into_iter().next())
                .collect(),
        }
    }
}

/// Load region shapes from a local file path or an HTTP(S) URL.
pub fn load_regions(source: &str) -> Result<Vec<Region>, GeoError> {
    let body = if Path::new(source).exists() {
        fs::read_to_string(source).map_err(|source_err| GeoError::Read {
            path: source.to_string(),
            source: source_err,
        })?
    } else {
        reqwest::blocking::get(source)?.error_for_status()?.text()?
    };
    parse_regions(&body)
}

fn parse_regions(geojson: &str) -> Result<Vec<Region>, GeoError> {
    let collection: FeatureCollection = serde_json::from_str(geojson)?;
    Ok(collection
        .features
        .into_iter()
        .map(|feature| Region {
            name: feature.properties.name,
            rings: feature.geometry.outer_rings(),
        })
        .collect())
}
