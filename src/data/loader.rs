//! Station Register Loader Module
//! Reads the `;`-delimited register CSV into a Polars DataFrame.

use polars::prelude::*;
use thiserror::Error;

use super::schema;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Required column not found: {0}")]
    ColumnNotFound(String),
}

/// Loads the charging station register with Polars.
pub struct StationLoader;

impl StationLoader {
    /// Load the register CSV (`;` separator, UTF-8) and check the column
    /// contract. The returned DataFrame is read-only for the rest of the run.
    pub fn load_csv(file_path: &str) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_separator(b';')
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        Self::check_required_columns(&df)?;
        Ok(df)
    }

    fn check_required_columns(df: &DataFrame) -> Result<(), LoaderError> {
        let names = df.get_column_names();
        for required in schema::REQUIRED {
            if !names.iter().any(|name| name.as_str() == required) {
                return Err(LoaderError::ColumnNotFound(required.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const HEADER: &str = "Bundesland;Ort;Betreiber;InstallierteLadeleistungNLL;AnzahlLadepunkteNLL;Breitengrad;Laengengrad";

    #[test]
    fn loads_semicolon_separated_register() {
        let file = write_csv(&format!(
            "{HEADER}\nBayern;Amberg;Stadtwerke Amberg;22;2;49.44;11.85\nBerlin;Berlin;Vattenfall;50;4;52.52;13.40\n"
        ));
        let df = StationLoader::load_csv(file.path().to_str().unwrap()).unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("Bundesland").is_ok());
    }

    #[test]
    fn rejects_missing_required_column() {
        let file = write_csv("Bundesland;Ort\nBayern;Amberg\n");
        let err = StationLoader::load_csv(file.path().to_str().unwrap()).unwrap_err();
        match err {
            LoaderError::ColumnNotFound(col) => assert_eq!(col, "Betreiber"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
