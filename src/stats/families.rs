//! Family Aggregation Module
//! Groups passengers by family size and class and computes fare statistics.

use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::data::PassengerRecord;

/// Fare statistics for one observed (family_size, class) combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyBucket {
    pub family_size: u32,
    pub class: i32,
    pub passenger_count: u32,
    pub avg_fare: f64,
    pub min_fare: f64,
    pub max_fare: f64,
}

struct FareAccumulator {
    count: u32,
    sum: f64,
    min: f64,
    max: f64,
}

impl FareAccumulator {
    fn new(fare: f64) -> Self {
        Self {
            count: 1,
            sum: fare,
            min: fare,
            max: fare,
        }
    }

    fn push(&mut self, fare: f64) {
        self.count += 1;
        self.sum += fare;
        self.min = self.min.min(fare);
        self.max = self.max.max(fare);
    }
}

/// Computes the family-size x class fare table.
pub struct FamilyAggregator;

impl FamilyAggregator {
    /// Group records by (family_size, class) and compute fare statistics.
    ///
    /// Unlike the demographics table there is no zero-filling and no class
    /// domain restriction: only observed combinations appear, keyed on the
    /// raw class value. Output is sorted by class, then family size.
    pub fn aggregate(records: &[PassengerRecord]) -> Vec<FamilyBucket> {
        let mut groups: BTreeMap<(i32, u32), FareAccumulator> = BTreeMap::new();
        for record in records {
            let key = (record.class, record.family_size());
            match groups.get_mut(&key) {
                Some(acc) => acc.push(record.fare),
                None => {
                    groups.insert(key, FareAccumulator::new(record.fare));
                }
            }
        }

        let buckets: Vec<FamilyBucket> = groups
            .into_iter()
            .map(|((class, family_size), acc)| FamilyBucket {
                family_size,
                class,
                passenger_count: acc.count,
                avg_fare: acc.sum / f64::from(acc.count),
                min_fare: acc.min,
                max_fare: acc.max,
            })
            .collect();

        debug!(groups = buckets.len(), "family fares aggregated");
        buckets
    }

    /// Project buckets into a DataFrame for tabular display.
    pub fn to_dataframe(buckets: &[FamilyBucket]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                "family_size".into(),
                buckets.iter().map(|b| b.family_size).collect::<Vec<_>>(),
            ),
            Column::new(
                "Pclass".into(),
                buckets.iter().map(|b| b.class).collect::<Vec<_>>(),
            ),
            Column::new(
                "n_passengers".into(),
                buckets.iter().map(|b| b.passenger_count).collect::<Vec<_>>(),
            ),
            Column::new(
                "avg_fare".into(),
                buckets.iter().map(|b| b.avg_fare).collect::<Vec<_>>(),
            ),
            Column::new(
                "min_fare".into(),
                buckets.iter().map(|b| b.min_fare).collect::<Vec<_>>(),
            ),
            Column::new(
                "max_fare".into(),
                buckets.iter().map(|b| b.max_fare).collect::<Vec<_>>(),
            ),
        ])
    }
}
