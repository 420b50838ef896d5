//! CSV Data Loader Module
//! Handles manifest loading and typed record extraction using Polars.

use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::data::record::PassengerRecord;

/// Columns the loader requires; anything else in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "PassengerId",
    "Survived",
    "Pclass",
    "Name",
    "Sex",
    "Age",
    "SibSp",
    "Parch",
    "Fare",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Missing value in column {column} at row {row}")]
    MissingValue { column: &'static str, row: usize },
    #[error("Invalid value in column {column} at row {row}")]
    InvalidValue { column: &'static str, row: usize },
    #[error("No data loaded")]
    NoData,
}

/// Handles manifest loading with Polars and extraction into typed records.
///
/// The manifest is read once; the records are immutable for the rest of
/// the run.
pub struct DataLoader {
    df: Option<DataFrame>,
    records: Vec<PassengerRecord>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            records: Vec::new(),
            file_path: None,
        }
    }

    /// Load a manifest CSV and extract passenger records.
    ///
    /// A missing file, malformed CSV, missing required column, or unusable
    /// cell is fatal; there is no partial load.
    pub fn load_csv(&mut self, file_path: &str) -> Result<&[PassengerRecord], LoaderError> {
        self.file_path = Some(PathBuf::from(file_path));

        // Lazy scan for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }

        self.set_dataframe(df)?;
        debug!(rows = self.records.len(), path = file_path, "manifest loaded");
        Ok(&self.records)
    }

    /// Set the DataFrame directly (in-memory sources) and re-extract records.
    pub fn set_dataframe(&mut self, df: DataFrame) -> Result<(), LoaderError> {
        self.records = records_from_dataframe(&df)?;
        self.df = Some(df);
        Ok(())
    }

    /// Typed records from the last successful load.
    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    /// Number of passengers in the loaded manifest.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// The raw DataFrame behind the records.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Path of the loaded file.
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

/// Extract typed passenger records from a manifest DataFrame.
///
/// Age may be null (it stays `None` on the record); every other required
/// cell must hold a usable value.
pub fn records_from_dataframe(df: &DataFrame) -> Result<Vec<PassengerRecord>, LoaderError> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(LoaderError::MissingColumn(required.to_string()));
        }
    }

    let ids = df.column("PassengerId")?.cast(&DataType::Int64)?;
    let ids = ids.i64()?;
    let survived = df.column("Survived")?.cast(&DataType::Int64)?;
    let survived = survived.i64()?;
    let classes = df.column("Pclass")?.cast(&DataType::Int32)?;
    let classes = classes.i32()?;
    let names = df.column("Name")?.cast(&DataType::String)?;
    let names = names.str()?;
    let sexes = df.column("Sex")?.cast(&DataType::String)?;
    let sexes = sexes.str()?;
    let ages = df.column("Age")?.cast(&DataType::Float64)?;
    let ages = ages.f64()?;
    let sibsps = df.column("SibSp")?.cast(&DataType::Int64)?;
    let sibsps = sibsps.i64()?;
    let parches = df.column("Parch")?.cast(&DataType::Int64)?;
    let parches = parches.i64()?;
    let fares = df.column("Fare")?.cast(&DataType::Float64)?;
    let fares = fares.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let fare = fares
            .get(row)
            .ok_or(LoaderError::MissingValue { column: "Fare", row })?;
        if fare.is_nan() || fare < 0.0 {
            return Err(LoaderError::InvalidValue { column: "Fare", row });
        }

        records.push(PassengerRecord {
            id: ids.get(row).ok_or(LoaderError::MissingValue {
                column: "PassengerId",
                row,
            })?,
            survived: survived.get(row).ok_or(LoaderError::MissingValue {
                column: "Survived",
                row,
            })? != 0,
            class: classes.get(row).ok_or(LoaderError::MissingValue {
                column: "Pclass",
                row,
            })?,
            name: names
                .get(row)
                .ok_or(LoaderError::MissingValue { column: "Name", row })?
                .to_string(),
            sex: sexes
                .get(row)
                .ok_or(LoaderError::MissingValue { column: "Sex", row })?
                .to_string(),
            age: ages.get(row),
            sibsp: to_count(sibsps.get(row), "SibSp", row)?,
            parch: to_count(parches.get(row), "Parch", row)?,
            fare,
        });
    }

    Ok(records)
}

/// Non-negative aboard-count cell (SibSp/Parch).
fn to_count(value: Option<i64>, column: &'static str, row: usize) -> Result<u32, LoaderError> {
    let value = value.ok_or(LoaderError::MissingValue { column, row })?;
    u32::try_from(value).map_err(|_| LoaderError::InvalidValue { column, row })
}
