use ros_report_sdk::{ColorScale, SystemState, SystemsPerState};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub state: SystemState,
    pub label: &'static str,
    pub count: u64,
    pub percentage: f64,
    pub color_index: usize,
}

impl BreakdownRow {
    pub fn legend_value(&self) -> String {
        format!("{} ({}% of total)", self.count, format_percentage(self.percentage))
    }
}

/// One row per state in taxonomy order. Percentages are passed through untouched.
pub fn compose_breakdown(states: &SystemsPerState, scale: &ColorScale) -> Vec<BreakdownRow> {
    states
        .iter()
        .enumerate()
        .map(|(position, (state, share))| BreakdownRow {
            state,
            label: state.display_label(),
            count: share.count,
            percentage: share.percentage,
            color_index: scale.index_for(position),
        })
        .collect()
}

/// Prints `40` for `40.0` and `33.3` for `33.3`.
pub fn format_percentage(value: f64) -> String {
    format!("{value}")
}
