//! Demographics Aggregation Module
//! Buckets passengers by class, sex, and age band and computes survival rates.

use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::data::{AgeBand, PassengerRecord, Sex};

/// Passenger classes the demographics aggregate recognizes.
pub const CLASS_DOMAIN: [i32; 3] = [1, 2, 3];

/// One cell of the class x sex x age-band cross-product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicBucket {
    pub class: i32,
    pub sex: Sex,
    pub age_band: AgeBand,
    pub passenger_count: u32,
    pub survivor_count: u32,
    pub survival_rate: f64,
}

/// Computes the zero-filled survival table over class x sex x age band.
pub struct DemographicsAggregator;

impl DemographicsAggregator {
    /// Aggregate records into exactly 24 buckets (3 classes x 2 sexes x 4 bands).
    ///
    /// Records with an unrecognized sex or class are logged and excluded;
    /// records without a usable age are excluded silently. Empty buckets keep
    /// a survival rate of 0.0.
    pub fn aggregate(records: &[PassengerRecord]) -> Vec<DemographicBucket> {
        let mut buckets: Vec<DemographicBucket> = Vec::with_capacity(24);
        for class in CLASS_DOMAIN {
            for sex in Sex::ALL {
                for age_band in AgeBand::ALL {
                    buckets.push(DemographicBucket {
                        class,
                        sex,
                        age_band,
                        passenger_count: 0,
                        survivor_count: 0,
                        survival_rate: 0.0,
                    });
                }
            }
        }

        let mut excluded = 0usize;
        for record in records {
            let Some(sex) = Sex::parse(&record.sex) else {
                warn!(
                    passenger = record.id,
                    sex = %record.sex,
                    "unrecognized sex, excluded from demographics"
                );
                excluded += 1;
                continue;
            };
            if !CLASS_DOMAIN.contains(&record.class) {
                warn!(
                    passenger = record.id,
                    class = record.class,
                    "class outside 1-3, excluded from demographics"
                );
                excluded += 1;
                continue;
            }
            let Some(age_band) = record.age_band() else {
                excluded += 1;
                continue;
            };

            let bucket = &mut buckets[bucket_index(record.class, sex, age_band)];
            bucket.passenger_count += 1;
            if record.survived {
                bucket.survivor_count += 1;
            }
        }

        for bucket in &mut buckets {
            bucket.survival_rate = survival_rate(bucket.survivor_count, bucket.passenger_count);
        }

        debug!(excluded, "demographics aggregated");
        buckets
    }

    /// Project buckets into a DataFrame for tabular display.
    pub fn to_dataframe(buckets: &[DemographicBucket]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                "Pclass".into(),
                buckets.iter().map(|b| b.class).collect::<Vec<_>>(),
            ),
            Column::new(
                "Sex".into(),
                buckets.iter().map(|b| b.sex.label()).collect::<Vec<_>>(),
            ),
            Column::new(
                "age_group".into(),
                buckets.iter().map(|b| b.age_band.label()).collect::<Vec<_>>(),
            ),
            Column::new(
                "n_passengers".into(),
                buckets.iter().map(|b| b.passenger_count).collect::<Vec<_>>(),
            ),
            Column::new(
                "n_survivors".into(),
                buckets.iter().map(|b| b.survivor_count).collect::<Vec<_>>(),
            ),
            Column::new(
                "survival_rate".into(),
                buckets.iter().map(|b| b.survival_rate).collect::<Vec<_>>(),
            ),
        ])
    }
}

/// Buckets are laid out class-major, then sex, then age band.
fn bucket_index(class: i32, sex: Sex, age_band: AgeBand) -> usize {
    (class as usize - 1) * 8 + sex as usize * 4 + age_band as usize
}

fn survival_rate(survivors: u32, passengers: u32) -> f64 {
    if passengers == 0 {
        return 0.0;
    }
    round2(f64::from(survivors) / f64::from(passengers))
}

/// Round to two decimals, halves away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(class: i32, sex: &str, age: Option<f64>, survived: bool) -> PassengerRecord {
        PassengerRecord {
            id: 1,
            survived,
            class,
            name: "Braund, Mr. Owen Harris".to_string(),
            sex: sex.to_string(),
            age,
            sibsp: 0,
            parch: 0,
            fare: 7.25,
        }
    }

    fn bucketed_total(buckets: &[DemographicBucket]) -> u32 {
        buckets.iter().map(|b| b.passenger_count).sum()
    }

    #[test]
    fn test_empty_input_yields_full_cross_product() {
        let buckets = DemographicsAggregator::aggregate(&[]);
        assert_eq!(buckets.len(), 24);
        for bucket in &buckets {
            assert_eq!(bucket.passenger_count, 0);
            assert_eq!(bucket.survivor_count, 0);
            assert_eq!(bucket.survival_rate, 0.0);
        }
    }

    #[test]
    fn test_output_ordered_by_class_sex_band() {
        let buckets = DemographicsAggregator::aggregate(&[]);
        let keys: Vec<(i32, Sex, AgeBand)> =
            buckets.iter().map(|b| (b.class, b.sex, b.age_band)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys[0], (1, Sex::Male, AgeBand::Child));
        assert_eq!(keys[23], (3, Sex::Female, AgeBand::Senior));
    }

    #[test]
    fn test_first_class_female_bands() {
        let records = vec![
            record(1, "female", Some(5.0), true),
            record(1, "female", Some(15.0), false),
            record(1, "female", Some(65.0), true),
        ];
        let buckets = DemographicsAggregator::aggregate(&records);
        assert_eq!(buckets.len(), 24);

        let find = |band: AgeBand| {
            buckets
                .iter()
                .find(|b| b.class == 1 && b.sex == Sex::Female && b.age_band == band)
                .unwrap()
        };
        let child = find(AgeBand::Child);
        assert_eq!(child.passenger_count, 1);
        assert_eq!(child.survival_rate, 1.0);
        let teen = find(AgeBand::Teen);
        assert_eq!(teen.passenger_count, 1);
        assert_eq!(teen.survival_rate, 0.0);
        let senior = find(AgeBand::Senior);
        assert_eq!(senior.passenger_count, 1);
        assert_eq!(senior.survival_rate, 1.0);

        let occupied = buckets.iter().filter(|b| b.passenger_count > 0).count();
        assert_eq!(occupied, 3);
    }

    #[test]
    fn test_survival_rate_rounds_to_two_decimals() {
        let mut records = vec![record(2, "male", Some(30.0), true)];
        records.extend((0..2).map(|_| record(2, "male", Some(30.0), false)));
        let buckets = DemographicsAggregator::aggregate(&records);
        let adult = buckets
            .iter()
            .find(|b| b.class == 2 && b.sex == Sex::Male && b.age_band == AgeBand::Adult)
            .unwrap();
        assert_eq!(adult.passenger_count, 3);
        assert_eq!(adult.survivor_count, 1);
        assert_eq!(adult.survival_rate, 0.33);
    }

    #[test]
    fn test_round2_halves_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(1.0 / 3.0), 0.33);
    }

    #[test]
    fn test_unrecognized_sex_is_excluded() {
        let records = vec![
            record(1, "unknown", Some(30.0), true),
            record(1, "FEMALE ", Some(30.0), true),
        ];
        let buckets = DemographicsAggregator::aggregate(&records);
        assert_eq!(bucketed_total(&buckets), 1);
    }

    #[test]
    fn test_out_of_domain_class_is_excluded() {
        let buckets = DemographicsAggregator::aggregate(&[record(4, "male", Some(30.0), true)]);
        assert_eq!(bucketed_total(&buckets), 0);
    }

    #[test]
    fn test_missing_age_is_excluded() {
        let records = vec![
            record(3, "male", None, false),
            record(3, "male", Some(28.0), false),
        ];
        let buckets = DemographicsAggregator::aggregate(&records);
        assert_eq!(bucketed_total(&buckets), 1);
    }

    #[test]
    fn test_dataframe_projection() {
        let buckets = DemographicsAggregator::aggregate(&[record(1, "female", Some(5.0), true)]);
        let df = DemographicsAggregator::to_dataframe(&buckets).unwrap();
        assert_eq!(df.height(), 24);
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>(),
            vec![
                "Pclass",
                "Sex",
                "age_group",
                "n_passengers",
                "n_survivors",
                "survival_rate"
            ]
        );
    }
}
