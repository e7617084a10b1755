use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use ros_report_sdk::{AnalyticsSnapshot, PaletteProvider};
use serde::Serialize;

pub mod breakdown;
pub mod conditions;
pub mod glossary;
pub mod instances;
pub mod narrative;
pub mod pages;
pub mod pluralize;
mod render;
pub mod schema;
pub mod text;
pub mod validate;

pub use pages::{PageKind, REPORT_TITLE, ReportPage, ReportSection, assemble_pages};
pub use pluralize::{pluralize, pluralize_s};
pub use validate::{SnapshotIssue, ValidationPolicy, validate_snapshot};

pub use ros_report_sdk::{RegisteredPalettes, ThemeColor};

/// Knobs for a single composition pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Treat snapshot inconsistencies as errors instead of warnings.
    pub strict: bool,
    pub validation: ValidationPolicy,
    pub generated_at: Option<DateTime<Utc>>,
}

impl ReportOptions {
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.validation.percentage_tolerance;
        if !tolerance.is_finite() || !(0.0..=100.0).contains(&tolerance) {
            return Err(anyhow!(
                "percentage_tolerance must be between 0 and 100, got {}",
                tolerance
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    pub title: &'static str,
    pub generated_at: Option<String>,
    pub total_systems: u64,
    pub issues: Vec<SnapshotIssue>,
}

impl ReportMetadata {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub pages: Vec<ReportPage>,
}

impl Report {
    pub fn page(&self, kind: PageKind) -> Option<&ReportPage> {
        self.pages.iter().find(|page| page.kind == kind)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "metadata": self.metadata,
            "pages": self.pages,
        })
    }

    pub fn to_markdown(&self) -> Result<String> {
        render::render_markdown(self)
    }

    pub fn to_html(&self, palettes: &dyn PaletteProvider) -> Result<String> {
        render::render_html(self, palettes)
    }
}

/// Validates the snapshot, then builds the three report pages from it.
pub fn compose_report(
    snapshot: &AnalyticsSnapshot,
    palettes: &dyn PaletteProvider,
    options: &ReportOptions,
) -> Result<Report> {
    options.validate()?;

    let issues = validate_snapshot(snapshot, &options.validation);
    for issue in &issues {
        warn!("snapshot inconsistency: {}", issue);
    }
    if options.strict && !issues.is_empty() {
        let details: Vec<String> = issues.iter().map(ToString::to_string).collect();
        bail!(
            "snapshot failed validation ({} issues): {}",
            issues.len(),
            details.join("; ")
        );
    }

    let pages = assemble_pages(snapshot, palettes)?;
    debug!("assembled {} report pages", pages.len());

    Ok(Report {
        metadata: ReportMetadata {
            title: REPORT_TITLE,
            generated_at: options.generated_at.map(|dt| dt.to_rfc3339()),
            total_systems: snapshot.meta.total_count,
            issues,
        },
        pages,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use anyhow::{Result, anyhow};
    use ros_report_sdk::{AnalyticsSnapshot, ColorScale, PaletteProvider, ThemeColor};

    pub const FIXTURE: &str = include_str!("../../fixtures/executive-snapshot.json");

    pub fn fixture() -> AnalyticsSnapshot {
        AnalyticsSnapshot::from_json_str(FIXTURE).expect("fixture snapshot")
    }

    pub fn scale(size: usize) -> ColorScale {
        ColorScale::new((0..size).map(|i| format!("#{i:06x}"))).expect("non-empty scale")
    }

    /// Synthetic palettes of configurable length.
    pub struct TestPalettes {
        multi_ordered: Option<usize>,
        blue: Option<usize>,
    }

    impl TestPalettes {
        pub fn with_sizes(multi_ordered: usize, blue: usize) -> Self {
            Self {
                multi_ordered: Some(multi_ordered),
                blue: Some(blue),
            }
        }

        pub fn missing() -> Self {
            Self {
                multi_ordered: None,
                blue: None,
            }
        }
    }

    impl Default for TestPalettes {
        fn default() -> Self {
            Self::with_sizes(16, 5)
        }
    }

    impl PaletteProvider for TestPalettes {
        fn color_scale(&self, theme: ThemeColor) -> Result<ColorScale> {
            let size = match theme {
                ThemeColor::Blue => self.blue,
                ThemeColor::MultiOrdered => self.multi_ordered,
            };
            size.map(scale)
                .ok_or_else(|| anyhow!("no palette for theme {}", theme))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::ReportSection;
    use crate::test_support::fixture;
    use chrono::TimeZone;
    use ros_report_sdk::{AnalyticsSnapshot, StateShare};

    // Link the palette module so its themes register during tests.
    use mod_palettes as _;

    fn fleet(total: u64, optimized: u64, non_optimized: u64) -> AnalyticsSnapshot {
        let mut snapshot = fixture();
        let share = |count: u64| StateShare {
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        };
        snapshot.systems_per_state = Default::default();
        snapshot.systems_per_state.optimized = share(optimized);
        snapshot.systems_per_state.oversized = share(non_optimized);
        snapshot.meta.total_count = total;
        snapshot.meta.non_optimized_count = non_optimized;
        snapshot.meta.psi_enabled_count = total;
        snapshot.meta.non_psi_count = 0;
        snapshot.meta.stale_count = 0;
        snapshot
    }

    fn registered_text(report: &Report) -> Vec<String> {
        let summary = report.page(PageKind::Summary).expect("summary page");
        match &summary.sections[1] {
            ReportSection::Narrative(section) => section
                .paragraphs
                .iter()
                .map(|paragraph| paragraph.to_plain())
                .collect(),
            other => panic!("unexpected section {other:?}"),
        }
    }

    #[test]
    fn healthy_fleet_narrative_has_no_caveats() {
        let snapshot = fleet(100, 60, 40);
        let report =
            compose_report(&snapshot, &RegisteredPalettes, &ReportOptions::default()).expect("report");

        let text = registered_text(&report);
        assert_eq!(
            text,
            [
                "There are 100 registered systems in the resource optimization service.",
                "60 of 100 systems are identified as optimized, 40 of 100 systems as having a non-optimal state.",
            ]
        );

        let markdown = report.to_markdown().expect("markdown render");
        assert!(!markdown.contains("stale"));
        assert!(!markdown.contains("Pressure Stall Information enabled"));
        assert!(report.metadata.issues.is_empty());
    }

    #[test]
    fn single_system_uses_singular_forms() {
        let snapshot = fleet(1, 1, 0);
        let report =
            compose_report(&snapshot, &RegisteredPalettes, &ReportOptions::default()).expect("report");
        let text = registered_text(&report);
        assert!(text[0].starts_with("There is 1 registered system "));
        assert!(text[1].starts_with("1 of 1 system is identified as optimized"));
    }

    #[test]
    fn inconsistencies_are_recorded_unless_strict() {
        let mut snapshot = fixture();
        snapshot.meta.non_psi_count = 7;

        let report =
            compose_report(&snapshot, &RegisteredPalettes, &ReportOptions::default()).expect("report");
        assert!(report.metadata.has_issues());

        let strict = ReportOptions {
            strict: true,
            ..ReportOptions::default()
        };
        let error = compose_report(&snapshot, &RegisteredPalettes, &strict).unwrap_err();
        assert!(error.to_string().contains("snapshot failed validation"));
    }

    #[test]
    fn invalid_tolerance_is_rejected() {
        let options = ReportOptions {
            validation: ValidationPolicy {
                percentage_tolerance: f64::NAN,
            },
            ..ReportOptions::default()
        };
        assert!(compose_report(&fixture(), &RegisteredPalettes, &options).is_err());
    }

    #[test]
    fn metadata_carries_generation_time() {
        let generated_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single();
        let options = ReportOptions {
            generated_at,
            ..ReportOptions::default()
        };
        let report = compose_report(&fixture(), &RegisteredPalettes, &options).expect("report");
        assert_eq!(
            report.metadata.generated_at.as_deref(),
            Some("2024-03-01T12:00:00+00:00")
        );
        assert_eq!(report.metadata.total_systems, 120);
    }

    #[test]
    fn composition_is_deterministic() {
        let snapshot = fixture();
        let first = compose_report(&snapshot, &RegisteredPalettes, &ReportOptions::default())
            .expect("report");
        let second = compose_report(&snapshot, &RegisteredPalettes, &ReportOptions::default())
            .expect("report");
        assert_eq!(first.to_json_value(), second.to_json_value());
    }

    #[test]
    fn json_sections_are_tagged() {
        let report = compose_report(&fixture(), &RegisteredPalettes, &ReportOptions::default())
            .expect("report");
        let value = report.to_json_value();
        let kinds: Vec<&str> = value["pages"][0]["sections"]
            .as_array()
            .expect("sections")
            .iter()
            .filter_map(|section| section["kind"].as_str())
            .collect();
        assert_eq!(
            kinds,
            ["narrative", "narrative", "chart_legend", "chart_legend", "table_grid"]
        );
        assert_eq!(
            value["pages"][1]["sections"][2]["payload"]["id"],
            "historical_instance_types"
        );
        assert_eq!(value["metadata"]["title"], REPORT_TITLE);
    }

    #[test]
    fn markdown_render_contains_report_structure() {
        let report = compose_report(&fixture(), &RegisteredPalettes, &ReportOptions::default())
            .expect("report");
        let md = report.to_markdown().expect("markdown render");
        assert!(md.contains("# Resource optimization service report"));
        assert!(md.contains("There are **120 registered systems**"));
        assert!(md.contains("| State | # of systems |"));
        assert!(md.contains("| Optimized | 48 (40% of total) |"));
        assert!(md.contains("Most suggested instance types (45 days)"));
        assert!(md.contains("| t2.large | 2 CPUs, 8 GiB RAM | 40 |"));
        assert!(md.contains("Description of conditions"));
        assert!(md.contains(r"\*"));
    }

    #[test]
    fn html_render_contains_structure() {
        let report = compose_report(&fixture(), &RegisteredPalettes, &ReportOptions::default())
            .expect("report");
        let html = report.to_html(&RegisteredPalettes).expect("html render");
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Resource optimization service report"));
        assert_eq!(html.matches("class=\"page\"").count(), 3);
        assert!(html.contains("conic-gradient("));
        assert!(html.contains("#0066cc"));
        assert!(html.contains("<strong>120 registered systems</strong>"));
        assert!(html.contains("id=\"historical_instance_types\""));
    }
}
