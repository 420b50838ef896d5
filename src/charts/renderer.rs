//! Static Chart Renderer
//! Renders chart specifications to PNG images with plotters.
//!
//! Layout, survival chart:
//! 1. Title centered across the full bitmap
//! 2. Three side-by-side panels, one per class, captioned "Class {n}"
//! 3. Grouped bars per age band, male/female pair, value label above each bar
//! 4. Shared sex legend on the rightmost panel
//!
//! The family chart is a single bubble scatter, one series per class.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

use crate::charts::builder::{FamilyChartSpec, SurvivalChartSpec};
use crate::data::{AgeBand, Sex};

/// Default bitmap sizes (width, height).
pub const SURVIVAL_CHART_SIZE: (u32, u32) = (1200, 500);
pub const FAMILY_CHART_SIZE: (u32, u32) = (900, 600);

// Sex palette
const MALE_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue
const FEMALE_COLOR: RGBColor = RGBColor(231, 76, 60); // Red

// Class palette, with a fallback for out-of-domain classes
const CLASS_COLORS: [RGBColor; 3] = [
    RGBColor(52, 152, 219),  // Blue
    RGBColor(243, 156, 18),  // Orange
    RGBColor(46, 204, 113),  // Green
];
const FALLBACK_COLOR: RGBColor = RGBColor(96, 125, 139); // Blue Grey

/// Headroom above the y range so value labels clear the tallest bar.
const LABEL_HEADROOM: f64 = 0.12;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart rendering failed: {0}")]
    Backend(String),
}

/// Renders chart specifications as static PNG images.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the faceted survival-rate bar chart to `path`.
    pub fn render_survival_chart(
        spec: &SurvivalChartSpec,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(backend_err)?;
        let root = root
            .titled(spec.title.as_str(), ("sans-serif", 22))
            .map_err(backend_err)?;

        if spec.panels.is_empty() {
            return root.present().map_err(backend_err);
        }

        let (y_min, y_max) = spec.y_range;
        let panel_areas = root.split_evenly((1, spec.panels.len()));
        let last = spec.panels.len() - 1;

        for (i, (panel, area)) in spec.panels.iter().zip(panel_areas.iter()).enumerate() {
            let mut chart = ChartBuilder::on(area)
                .caption(panel.caption.as_str(), ("sans-serif", 16))
                .margin(10)
                .x_label_area_size(36)
                .y_label_area_size(44)
                .build_cartesian_2d(-0.6f64..3.6f64, y_min..y_max + LABEL_HEADROOM)
                .map_err(backend_err)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(4)
                .x_label_formatter(&band_tick_label)
                .x_desc(spec.x_label.as_str())
                .y_desc(spec.y_label.as_str())
                .label_style(("sans-serif", 12))
                .draw()
                .map_err(backend_err)?;

            for &sex in Sex::ALL.iter() {
                let color = sex_color(sex);
                let bars = panel.bars.iter().filter(move |bar| bar.sex == sex).map(move |bar| {
                    let (x0, x1) = bar_span(bar.age_band, bar.sex);
                    Rectangle::new([(x0, 0.0), (x1, bar.survival_rate)], color.filled())
                });
                let series = chart.draw_series(bars).map_err(backend_err)?;
                // One shared legend, drawn on the rightmost panel
                if i == last {
                    series.label(sex.label()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 4), (x + 10, y + 4)], color.filled())
                    });
                }
            }

            let label_style = TextStyle::from(("sans-serif", 11))
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            let labels = panel.bars.iter().map(|bar| {
                let (x0, x1) = bar_span(bar.age_band, bar.sex);
                Text::new(
                    bar.label.clone(),
                    ((x0 + x1) / 2.0, bar.survival_rate + 0.015),
                    label_style.clone(),
                )
            });
            chart.draw_series(labels).map_err(backend_err)?;

            if i == last {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(&WHITE.mix(0.85))
                    .border_style(&BLACK)
                    .label_font(("sans-serif", 12))
                    .draw()
                    .map_err(backend_err)?;
            }
        }

        root.present().map_err(backend_err)
    }

    /// Render the family-fare bubble scatter to `path`.
    pub fn render_family_chart(
        spec: &FamilyChartSpec,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(backend_err)?;
        let root = root
            .titled(spec.title.as_str(), ("sans-serif", 22))
            .map_err(backend_err)?;

        let x_max = spec
            .points
            .iter()
            .map(|p| f64::from(p.family_size))
            .fold(1.0, f64::max)
            + 1.0;
        let y_max = spec
            .points
            .iter()
            .map(|p| p.avg_fare)
            .fold(0.0, f64::max)
            .max(1.0)
            * 1.15;

        let mut chart = ChartBuilder::on(&root)
            .margin(14)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d(0.0f64..x_max, 0.0f64..y_max)
            .map_err(backend_err)?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(backend_err)?;

        let mut classes: Vec<i32> = spec.points.iter().map(|p| p.class).collect();
        classes.sort_unstable();
        classes.dedup();

        for &class in &classes {
            let color = class_color(class);
            let points = spec.points.iter().filter(move |p| p.class == class).map(move |p| {
                Circle::new(
                    (f64::from(p.family_size), p.avg_fare),
                    point_radius(p.passenger_count),
                    color.mix(0.75).filled(),
                )
            });
            chart
                .draw_series(points)
                .map_err(backend_err)?
                .label(format!("Class {class}"))
                .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
        }

        if !classes.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.85))
                .border_style(&BLACK)
                .label_font(("sans-serif", 12))
                .draw()
                .map_err(backend_err)?;
        }

        root.present().map_err(backend_err)
    }
}

/// Age bands sit on integer slots 0..=3; each bar takes a 0.36-wide half.
fn bar_span(age_band: AgeBand, sex: Sex) -> (f64, f64) {
    let slot = age_band as usize as f64;
    match sex {
        Sex::Male => (slot - 0.40, slot - 0.04),
        Sex::Female => (slot + 0.04, slot + 0.40),
    }
}

/// Label integer ticks with band names; suppress everything else.
fn band_tick_label(x: &f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    AgeBand::ALL
        .get(nearest as usize)
        .map(|band| band.label().to_string())
        .unwrap_or_default()
}

fn sex_color(sex: Sex) -> RGBColor {
    match sex {
        Sex::Male => MALE_COLOR,
        Sex::Female => FEMALE_COLOR,
    }
}

fn class_color(class: i32) -> RGBColor {
    match class {
        1..=3 => CLASS_COLORS[class as usize - 1],
        _ => FALLBACK_COLOR,
    }
}

/// Bubble radius grows with the square root of the passenger count.
fn point_radius(count: u32) -> i32 {
    (3 + (f64::from(count).sqrt() * 2.0) as i32).min(20)
}

fn backend_err<E: std::error::Error>(err: E) -> ChartError {
    ChartError::Backend(err.to_string())
}
