use ros_report_sdk::{InstanceTypeRow, InstanceTypesHighlights};
use serde::Serialize;

use crate::narrative::{HISTORY_WINDOW_DAYS, STALE_AFTER_DAYS};

pub const INSTANCE_TABLE_COLUMNS: [&str; 3] = ["Instance type", "Description", "# of systems"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceTablePlan {
    pub id: &'static str,
    pub heading: String,
    pub description: String,
    pub rows: Vec<InstanceTypeRow>,
}

/// Plans the current, suggested and historical tables, in that order. Rows keep upstream order.
pub fn plan_instance_tables(
    highlights: &InstanceTypesHighlights,
    stale_count: u64,
) -> Vec<InstanceTablePlan> {
    let mut historical_description = format!(
        "In the last {HISTORY_WINDOW_DAYS} days we suggested you these instances # of times."
    );
    if stale_count > 0 {
        historical_description.push(' ');
        historical_description.push_str(&stale_suffix());
    }

    vec![
        InstanceTablePlan {
            id: "current_instance_types",
            heading: "Most used current instance types".to_string(),
            description:
                "We have identified these instance types based on the data from the fresh systems."
                    .to_string(),
            rows: highlights.current.clone(),
        },
        InstanceTablePlan {
            id: "suggested_instance_types",
            heading: "Most suggested instance types".to_string(),
            description:
                "We are suggesting these instance types based on the data from the fresh systems."
                    .to_string(),
            rows: highlights.suggested.clone(),
        },
        InstanceTablePlan {
            id: "historical_instance_types",
            heading: format!("Most suggested instance types ({HISTORY_WINDOW_DAYS} days)"),
            description: historical_description,
            rows: highlights.historical.clone(),
        },
    ]
}

pub fn stale_suffix() -> String {
    format!(
        "Some of the instances are now identified as stale (more than {STALE_AFTER_DAYS} days not reporting data)."
    )
}
