//! Surname Frequency Module
//! Extracts surnames from full passenger names and counts occurrences.

use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::data::PassengerRecord;

/// Occurrence count for one surname.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurnameCount {
    pub surname: String,
    pub count: u32,
}

/// Counts surname frequency across the manifest.
pub struct NameCounter;

impl NameCounter {
    /// Count surnames, sorted by count descending.
    ///
    /// Ties keep first-encountered order.
    pub fn count(records: &[PassengerRecord]) -> Vec<SurnameCount> {
        let mut counts: Vec<SurnameCount> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in records {
            let surname = record.surname();
            match index.get(surname) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(surname.to_string(), counts.len());
                    counts.push(SurnameCount {
                        surname: surname.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // Stable sort keeps first-encountered order within equal counts
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    /// Project counts into a DataFrame for tabular display.
    pub fn to_dataframe(counts: &[SurnameCount]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                "last_name".into(),
                counts.iter().map(|c| c.surname.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                "count".into(),
                counts.iter().map(|c| c.count).collect::<Vec<_>>(),
            ),
        ])
    }
}
