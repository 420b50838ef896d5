//! Titanic passenger manifest analysis.
//!
//! Loads the manifest CSV into typed records, computes three aggregate
//! tables (survival by class/sex/age band, fares by family size and class,
//! surname frequency), and maps the first two onto chart specifications
//! that can be exported as JSON or rendered to PNG.

pub mod charts;
pub mod data;
pub mod stats;
