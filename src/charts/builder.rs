//! Chart Specification Module
//! Maps aggregate tables onto serializable chart descriptions.

use serde::Serialize;

use crate::data::{AgeBand, Sex};
use crate::stats::{DemographicBucket, FamilyBucket, CLASS_DOMAIN};

/// Faceted grouped-bar chart of survival rates.
///
/// One panel per class; within a panel, bars are grouped by age band and
/// colored by sex. Pure presentation data, independent of any backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub y_range: (f64, f64),
    pub panels: Vec<ClassPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPanel {
    pub class: i32,
    pub caption: String,
    pub bars: Vec<SurvivalBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalBar {
    pub age_band: AgeBand,
    pub sex: Sex,
    pub survival_rate: f64,
    /// Rate preformatted to two decimals, drawn on the bar.
    pub label: String,
}

/// Scatter chart of average fare by family size.
///
/// Point size encodes passenger count, color encodes class; min/max fare
/// ride along as hover data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub points: Vec<FamilyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyPoint {
    pub family_size: u32,
    pub class: i32,
    pub avg_fare: f64,
    pub passenger_count: u32,
    pub min_fare: f64,
    pub max_fare: f64,
}

/// Builds chart specifications from aggregate tables.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Survival-rate chart: one panel per class, eight bars per panel.
    ///
    /// Bars are laid out age-band major with a male/female pair per band,
    /// in aggregate order. A missing bucket renders as a zero bar.
    pub fn survival_chart(buckets: &[DemographicBucket]) -> SurvivalChartSpec {
        let mut panels = Vec::with_capacity(CLASS_DOMAIN.len());
        for class in CLASS_DOMAIN {
            let mut bars = Vec::with_capacity(Sex::ALL.len() * AgeBand::ALL.len());
            for age_band in AgeBand::ALL {
                for sex in Sex::ALL {
                    let rate = buckets
                        .iter()
                        .find(|b| b.class == class && b.sex == sex && b.age_band == age_band)
                        .map(|b| b.survival_rate)
                        .unwrap_or(0.0);
                    bars.push(SurvivalBar {
                        age_band,
                        sex,
                        survival_rate: rate,
                        label: format!("{:.2}", rate),
                    });
                }
            }
            panels.push(ClassPanel {
                class,
                caption: format!("Class {class}"),
                bars,
            });
        }

        SurvivalChartSpec {
            title: "Titanic Survival Rate by Class, Sex, and Age Group".to_string(),
            x_label: "Age Group".to_string(),
            y_label: "Survival Rate".to_string(),
            legend_title: "Gender".to_string(),
            y_range: (0.0, 1.0),
            panels,
        }
    }

    /// Fare scatter chart: one point per observed (family_size, class) group.
    pub fn family_chart(buckets: &[FamilyBucket]) -> FamilyChartSpec {
        let points = buckets
            .iter()
            .map(|b| FamilyPoint {
                family_size: b.family_size,
                class: b.class,
                avg_fare: b.avg_fare,
                passenger_count: b.passenger_count,
                min_fare: b.min_fare,
                max_fare: b.max_fare,
            })
            .collect();

        FamilyChartSpec {
            title: "Average Ticket Fare by Family Size and Passenger Class".to_string(),
            x_label: "Family Size".to_string(),
            y_label: "Average Fare".to_string(),
            legend_title: "Passenger Class".to_string(),
            points,
        }
    }
}
