//! Stats module - survival, family fare, and surname aggregates

mod demographics;
mod families;
mod names;

pub use demographics::{DemographicBucket, DemographicsAggregator, CLASS_DOMAIN};
pub use families::{FamilyAggregator, FamilyBucket};
pub use names::{NameCounter, SurnameCount};
