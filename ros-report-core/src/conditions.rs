use ros_report_sdk::{ColorScale, ConditionCounts, Conditions, ResourceKind, SubCondition};
use serde::Serialize;

/// Labeled count for pie/donut series and legends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: &'static str,
    pub value: u64,
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionRow {
    pub condition: SubCondition,
    pub label: &'static str,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionGroup {
    pub resource: ResourceKind,
    pub resource_label: &'static str,
    pub color_index: usize,
    pub under_pressure: u64,
    pub undersized: u64,
    pub oversized: u64,
    /// Non-zero sub-conditions only.
    pub rows: Vec<ConditionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionBreakdown {
    pub total: u64,
    pub series: Vec<SeriesPoint>,
    pub groups: Vec<ConditionGroup>,
}

pub fn compose_conditions(
    conditions: &Conditions,
    conditions_count: u64,
    scale: &ColorScale,
) -> ConditionBreakdown {
    let series = ResourceKind::ALL
        .iter()
        .map(|resource| SeriesPoint {
            label: resource.display_label(),
            value: conditions.get(*resource).count,
            color_index: scale.index_for(resource.position()),
        })
        .collect();

    let groups = ResourceKind::ALL
        .iter()
        .map(|resource| compose_group(*resource, conditions.get(*resource), scale))
        .collect();

    ConditionBreakdown {
        total: conditions_count,
        series,
        groups,
    }
}

fn compose_group(
    resource: ResourceKind,
    counts: &ConditionCounts,
    scale: &ColorScale,
) -> ConditionGroup {
    ConditionGroup {
        resource,
        resource_label: resource.display_label(),
        color_index: scale.index_for(resource.position()),
        under_pressure: counts.under_pressure,
        undersized: counts.undersized,
        oversized: counts.oversized,
        rows: visible_rows(counts),
    }
}

fn tagged_rows(counts: &ConditionCounts) -> impl Iterator<Item = ConditionRow> + '_ {
    SubCondition::ALL.into_iter().map(move |condition| ConditionRow {
        condition,
        label: condition.display_label(),
        value: counts.get(condition),
    })
}

fn visible_rows(counts: &ConditionCounts) -> Vec<ConditionRow> {
    tagged_rows(counts).filter(|row| row.value > 0).collect()
}
