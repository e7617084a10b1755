use anyhow::{Context as _, Result};
use log::debug;
use ros_report_sdk::{AnalyticsSnapshot, PaletteProvider, ThemeColor};
use serde::Serialize;

use crate::breakdown::{BreakdownRow, compose_breakdown};
use crate::conditions::{ConditionBreakdown, ConditionGroup, SeriesPoint, compose_conditions};
use crate::glossary::{CONDITION_DEFINITIONS, DescriptionEntry, STATE_DEFINITIONS};
use crate::instances::{InstanceTablePlan, plan_instance_tables};
use crate::narrative::{Narrative, compose_narrative};
use crate::text::Paragraph;

pub const REPORT_TITLE: &str = "Resource optimization service report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Summary,
    InstanceDetails,
    Glossary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPage {
    pub kind: PageKind,
    pub title: Option<String>,
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ReportSection {
    Narrative(NarrativeSection),
    ChartLegend(ChartLegendSection),
    TableGrid(TableGridSection),
    InstanceTable(InstanceTablePlan),
    DescriptionList(DescriptionListSection),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeSection {
    pub heading: Option<String>,
    pub paragraphs: Vec<Paragraph>,
    pub footnotes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Donut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub theme: ThemeColor,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub series: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendRow {
    pub label: String,
    pub value: String,
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub columns: Vec<String>,
    pub rows: Vec<LegendRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLegendSection {
    pub heading: String,
    pub preamble: Vec<Paragraph>,
    pub chart: Chart,
    pub legend: Legend,
    pub footnotes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableGridSection {
    pub heading: String,
    pub theme: ThemeColor,
    pub columns: Vec<ConditionGroup>,
    pub footnotes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionListSection {
    pub heading: String,
    pub entries: Vec<DescriptionEntry>,
}

/// Lays out the summary, instance-details and glossary pages, in that order.
pub fn assemble_pages(
    snapshot: &AnalyticsSnapshot,
    palettes: &dyn PaletteProvider,
) -> Result<Vec<ReportPage>> {
    let multi = palettes
        .color_scale(ThemeColor::MultiOrdered)
        .context("breakdown chart palette unavailable")?;
    let blue = palettes
        .color_scale(ThemeColor::Blue)
        .context("conditions chart palette unavailable")?;

    let breakdown = compose_breakdown(&snapshot.systems_per_state, &multi);
    let conditions = compose_conditions(
        &snapshot.conditions,
        snapshot.meta.conditions_count,
        &blue,
    );
    let narrative = compose_narrative(&snapshot.meta, snapshot.systems_per_state.optimized.count);
    let tables = plan_instance_tables(
        &snapshot.instance_types_highlights,
        snapshot.meta.stale_count,
    );

    debug!(
        "composed {} breakdown rows, {} condition groups, {} instance tables",
        breakdown.len(),
        conditions.groups.len(),
        tables.len()
    );

    Ok(vec![
        summary_page(&narrative, &breakdown, conditions),
        ReportPage {
            kind: PageKind::InstanceDetails,
            title: None,
            sections: tables.into_iter().map(ReportSection::InstanceTable).collect(),
        },
        glossary_page(),
    ])
}

fn summary_page(
    narrative: &Narrative,
    breakdown: &[BreakdownRow],
    conditions: ConditionBreakdown,
) -> ReportPage {
    let intro = NarrativeSection {
        heading: None,
        paragraphs: vec![Paragraph::from(
            "This executive summary highlights the performance for your registered systems included in the resource optimization service.",
        )],
        footnotes: Vec::new(),
    };

    let mut registered = NarrativeSection {
        heading: Some("Registered systems".to_string()),
        paragraphs: vec![narrative.registered.clone(), narrative.optimization.clone()],
        footnotes: Vec::new(),
    };
    if let Some(stale) = &narrative.stale {
        registered.paragraphs.push(stale.statement.clone());
        registered.footnotes.push(stale.footnote.clone());
    }

    let states = ChartLegendSection {
        heading: "Breakdown of registered systems".to_string(),
        preamble: narrative.psi.iter().cloned().collect(),
        chart: Chart {
            kind: ChartKind::Pie,
            theme: ThemeColor::MultiOrdered,
            title: None,
            subtitle: None,
            series: breakdown
                .iter()
                .map(|row| SeriesPoint {
                    label: row.label,
                    value: row.count,
                    color_index: row.color_index,
                })
                .collect(),
        },
        legend: Legend {
            columns: vec!["State".to_string(), "# of systems".to_string()],
            rows: breakdown
                .iter()
                .map(|row| LegendRow {
                    label: row.label.to_string(),
                    value: row.legend_value(),
                    color_index: row.color_index,
                })
                .collect(),
        },
        footnotes: vec!["Descriptions of states are on the last page of the report*".to_string()],
    };

    let performance = ChartLegendSection {
        heading: "System performance issues".to_string(),
        preamble: vec![narrative.performance.clone()],
        chart: Chart {
            kind: ChartKind::Donut,
            theme: ThemeColor::Blue,
            title: Some(conditions.total.to_string()),
            subtitle: Some("Conditions".to_string()),
            series: conditions.series.clone(),
        },
        legend: Legend {
            columns: vec!["Conditions".to_string(), "# of occurrences".to_string()],
            rows: conditions
                .series
                .iter()
                .map(|point| LegendRow {
                    label: point.label.to_string(),
                    value: point.value.to_string(),
                    color_index: point.color_index,
                })
                .collect(),
        },
        footnotes: Vec::new(),
    };

    let occurrences = TableGridSection {
        heading: "Breakdown of occurrences".to_string(),
        theme: ThemeColor::Blue,
        columns: conditions.groups,
        footnotes: vec![
            "Under pressure conditions are only reported for systems where Kernel Pressure Stall Information is enabled. Check the documentation for details.*".to_string(),
            "Descriptions of conditions are on the last page of the report*".to_string(),
        ],
    };

    ReportPage {
        kind: PageKind::Summary,
        title: Some(REPORT_TITLE.to_string()),
        sections: vec![
            ReportSection::Narrative(intro),
            ReportSection::Narrative(registered),
            ReportSection::ChartLegend(states),
            ReportSection::ChartLegend(performance),
            ReportSection::TableGrid(occurrences),
        ],
    }
}

fn glossary_page() -> ReportPage {
    ReportPage {
        kind: PageKind::Glossary,
        title: None,
        sections: vec![
            ReportSection::DescriptionList(DescriptionListSection {
                heading: "Description of states".to_string(),
                entries: STATE_DEFINITIONS.to_vec(),
            }),
            ReportSection::DescriptionList(DescriptionListSection {
                heading: "Description of conditions".to_string(),
                entries: CONDITION_DEFINITIONS.to_vec(),
            }),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TestPalettes, fixture};

    fn summary_sections(pages: &[ReportPage]) -> &[ReportSection] {
        &pages[0].sections
    }

    #[test]
    fn three_pages_in_fixed_order() {
        let pages = assemble_pages(&fixture(), &TestPalettes::default()).expect("pages");
        let kinds: Vec<PageKind> = pages.iter().map(|page| page.kind).collect();
        assert_eq!(
            kinds,
            [PageKind::Summary, PageKind::InstanceDetails, PageKind::Glossary]
        );
        assert_eq!(pages[0].title.as_deref(), Some(REPORT_TITLE));
    }

    #[test]
    fn summary_page_sections_are_ordered() {
        let pages = assemble_pages(&fixture(), &TestPalettes::default()).expect("pages");
        let sections = summary_sections(&pages);
        assert_eq!(sections.len(), 5);
        assert!(matches!(sections[0], ReportSection::Narrative(_)));
        assert!(matches!(sections[1], ReportSection::Narrative(_)));
        assert!(
            matches!(&sections[2], ReportSection::ChartLegend(s) if s.chart.kind == ChartKind::Pie)
        );
        assert!(
            matches!(&sections[3], ReportSection::ChartLegend(s) if s.chart.kind == ChartKind::Donut)
        );
        assert!(matches!(&sections[4], ReportSection::TableGrid(s) if s.columns.len() == 3));
    }

    #[test]
    fn stale_and_psi_caveats_follow_the_data() {
        let snapshot = fixture();
        let pages = assemble_pages(&snapshot, &TestPalettes::default()).expect("pages");
        let sections = summary_sections(&pages);

        let ReportSection::Narrative(registered) = &sections[1] else {
            panic!("expected narrative section");
        };
        assert_eq!(registered.paragraphs.len(), 3);
        assert_eq!(registered.footnotes.len(), 1);

        let ReportSection::ChartLegend(states) = &sections[2] else {
            panic!("expected chart section");
        };
        assert_eq!(states.preamble.len(), 1);

        let mut fresh = snapshot.clone();
        fresh.meta.stale_count = 0;
        fresh.meta.non_psi_count = 0;
        fresh.meta.psi_enabled_count = fresh.meta.total_count;
        let pages = assemble_pages(&fresh, &TestPalettes::default()).expect("pages");
        let sections = summary_sections(&pages);
        let ReportSection::Narrative(registered) = &sections[1] else {
            panic!("expected narrative section");
        };
        assert_eq!(registered.paragraphs.len(), 2);
        assert!(registered.footnotes.is_empty());
        let ReportSection::ChartLegend(states) = &sections[2] else {
            panic!("expected chart section");
        };
        assert!(states.preamble.is_empty());
    }

    #[test]
    fn legends_pair_labels_with_colors() {
        let pages =
            assemble_pages(&fixture(), &TestPalettes::with_sizes(4, 2)).expect("pages");
        let ReportSection::ChartLegend(states) = &summary_sections(&pages)[2] else {
            panic!("expected chart section");
        };
        assert_eq!(states.legend.rows[0].value, "48 (40% of total)");
        let indices: Vec<usize> = states.legend.rows.iter().map(|r| r.color_index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 0, 1]);

        let ReportSection::ChartLegend(performance) = &summary_sections(&pages)[3] else {
            panic!("expected chart section");
        };
        assert_eq!(performance.chart.title.as_deref(), Some("60"));
        assert_eq!(performance.legend.rows[2].label, "CPU");
        assert_eq!(performance.legend.rows[2].color_index, 0);
    }

    #[test]
    fn instance_page_holds_three_tables() {
        let pages = assemble_pages(&fixture(), &TestPalettes::default()).expect("pages");
        let ids: Vec<&str> = pages[1]
            .sections
            .iter()
            .filter_map(|section| match section {
                ReportSection::InstanceTable(plan) => Some(plan.id),
                _ => None,
            })
            .collect();
        assert_eq!(
            ids,
            [
                "current_instance_types",
                "suggested_instance_types",
                "historical_instance_types"
            ]
        );
    }

    #[test]
    fn glossary_page_is_static() {
        let pages = assemble_pages(&fixture(), &TestPalettes::default()).expect("pages");
        let sizes: Vec<usize> = pages[2]
            .sections
            .iter()
            .filter_map(|section| match section {
                ReportSection::DescriptionList(list) => Some(list.entries.len()),
                _ => None,
            })
            .collect();
        assert_eq!(sizes, [6, 3]);
    }

    #[test]
    fn missing_palette_is_an_error() {
        let error = assemble_pages(&fixture(), &TestPalettes::missing()).unwrap_err();
        assert!(error.to_string().contains("palette unavailable"));
    }
}
