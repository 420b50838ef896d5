//! Charts module - chart specifications and static rendering

mod builder;
mod renderer;

pub use builder::{
    ChartBuilder, ClassPanel, FamilyChartSpec, FamilyPoint, SurvivalBar, SurvivalChartSpec,
};
pub use renderer::{ChartError, StaticChartRenderer, FAMILY_CHART_SIZE, SURVIVAL_CHART_SIZE};
