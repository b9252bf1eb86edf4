//! Column contract of the federal charging station register export.
//!
//! Column names are matched exactly; a renamed column upstream fails the
//! load with [`LoaderError::ColumnNotFound`](super::LoaderError).

/// Federal state name ("Bundesland").
pub const STATE: &str = "Bundesland";
/// City name.
pub const CITY: &str = "Ort";
/// Station operator.
pub const OPERATOR: &str = "Betreiber";
/// Installed charging power in kW.
pub const POWER_KW: &str = "InstallierteLadeleistungNLL";
/// Number of charge points at the station.
pub const CHARGE_POINTS: &str = "AnzahlLadepunkteNLL";
/// Latitude in decimal degrees.
pub const LATITUDE: &str = "Breitengrad";
/// Longitude in decimal degrees.
pub const LONGITUDE: &str = "Laengengrad";

/// Every column the pipeline depends on.
pub const REQUIRED: [&str; 7] = [
    STATE,
    CITY,
    OPERATOR,
    POWER_KW,
    CHARGE_POINTS,
    LATITUDE,
    LONGITUDE,
];
