//! Data module - station register loading and row extraction

mod loader;
mod records;
pub mod schema;

pub use loader::{LoaderError, StationLoader};
pub use records::{city_markers, StationMarker};
