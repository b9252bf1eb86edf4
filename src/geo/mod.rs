//! Geo module - region shapes and the count/region join

mod join;
mod shapes;

pub use join::{join_counts_to_regions, RegionCount};
pub use shapes::{load_regions, GeoError, Region, DEFAULT_GEOJSON_URL};
