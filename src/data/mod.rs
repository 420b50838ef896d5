//! Data module - manifest loading and typed passenger records

mod loader;
mod record;

pub use loader::{records_from_dataframe, DataLoader, LoaderError, REQUIRED_COLUMNS};
pub use record::{AgeBand, PassengerRecord, Sex};
