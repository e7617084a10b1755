use anyhow::{Context as _, Result};
use askama::Template;
use ros_report_sdk::{ColorScale, PaletteProvider, ThemeColor};

use super::Report;
use crate::conditions::SeriesPoint;
use crate::glossary::DescriptionEntry;
use crate::instances::{INSTANCE_TABLE_COLUMNS, InstanceTablePlan};
use crate::pages::{
    ChartKind, ChartLegendSection, DescriptionListSection, NarrativeSection, ReportSection,
    TableGridSection,
};
use crate::text::Paragraph;

#[derive(Template)]
#[template(path = "report.md", escape = "none")]
struct MarkdownReport<'a> {
    report: &'a Report,
    pages: Vec<PageView>,
}

#[derive(Template)]
#[template(path = "report.html")]
struct HtmlReport<'a> {
    report: &'a Report,
    pages: Vec<PageView>,
}

pub fn render_markdown(report: &Report) -> Result<String> {
    let builder = ViewBuilder {
        target: Target::Markdown,
        swatches: None,
    };
    MarkdownReport {
        report,
        pages: builder.pages(report),
    }
    .render()
    .context("failed to render markdown report")
}

pub fn render_html(report: &Report, palettes: &dyn PaletteProvider) -> Result<String> {
    let swatches = Swatches {
        blue: palettes.color_scale(ThemeColor::Blue)?,
        multi_ordered: palettes.color_scale(ThemeColor::MultiOrdered)?,
    };
    let builder = ViewBuilder {
        target: Target::Html,
        swatches: Some(&swatches),
    };
    HtmlReport {
        report,
        pages: builder.pages(report),
    }
    .render()
    .context("failed to render html report")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Markdown,
    Html,
}

struct Swatches {
    blue: ColorScale,
    multi_ordered: ColorScale,
}

impl Swatches {
    fn color(&self, theme: ThemeColor, index: usize) -> String {
        let scale = match theme {
            ThemeColor::Blue => &self.blue,
            ThemeColor::MultiOrdered => &self.multi_ordered,
        };
        scale.color(index).to_string()
    }
}

#[derive(Debug)]
struct PageView {
    title: Option<String>,
    blocks: Vec<BlockView>,
}

#[derive(Debug, Default)]
struct BlockView {
    heading: Option<String>,
    paragraphs: Vec<Vec<SpanView>>,
    chart: Option<ChartView>,
    legend: Option<LegendView>,
    grid: Vec<GridColumnView>,
    table: Option<TableView>,
    entries: Vec<EntryView>,
    footnotes: Vec<String>,
    has_grid: bool,
    has_entries: bool,
    has_footnotes: bool,
}

impl BlockView {
    fn finalize(mut self) -> Self {
        self.has_grid = !self.grid.is_empty();
        self.has_entries = !self.entries.is_empty();
        self.has_footnotes = !self.footnotes.is_empty();
        self
    }
}

#[derive(Debug)]
struct SpanView {
    text: String,
    strong: bool,
}

#[derive(Debug)]
struct ChartView {
    kind: &'static str,
    title: Option<String>,
    subtitle: Option<String>,
    gradient: String,
    labels: Vec<String>,
}

#[derive(Debug)]
struct LegendView {
    columns: Vec<String>,
    rows: Vec<LegendRowView>,
}

#[derive(Debug)]
struct LegendRowView {
    label: String,
    value: String,
    color: String,
}

#[derive(Debug)]
struct GridColumnView {
    title: String,
    color: String,
    rows: Vec<KeyValue>,
    has_rows: bool,
}

#[derive(Debug)]
struct KeyValue {
    key: String,
    value: String,
}

#[derive(Debug)]
struct TableView {
    id: &'static str,
    description: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    has_rows: bool,
}

#[derive(Debug)]
struct EntryView {
    title: String,
    description: String,
    glyph: Option<&'static str>,
    icon_class: String,
}

struct ViewBuilder<'a> {
    target: Target,
    swatches: Option<&'a Swatches>,
}

impl ViewBuilder<'_> {
    fn pages(&self, report: &Report) -> Vec<PageView> {
        report
            .pages
            .iter()
            .map(|page| PageView {
                title: page.title.as_deref().map(|title| self.text(title)),
                blocks: page
                    .sections
                    .iter()
                    .map(|section| self.block(section).finalize())
                    .collect(),
            })
            .collect()
    }

    fn block(&self, section: &ReportSection) -> BlockView {
        match section {
            ReportSection::Narrative(narrative) => self.narrative(narrative),
            ReportSection::ChartLegend(chart) => self.chart_legend(chart),
            ReportSection::TableGrid(grid) => self.table_grid(grid),
            ReportSection::InstanceTable(plan) => self.instance_table(plan),
            ReportSection::DescriptionList(list) => self.description_list(list),
        }
    }

    fn narrative(&self, section: &NarrativeSection) -> BlockView {
        BlockView {
            heading: section.heading.as_deref().map(|heading| self.text(heading)),
            paragraphs: self.paragraphs(&section.paragraphs),
            footnotes: self.texts(&section.footnotes),
            ..BlockView::default()
        }
    }

    fn chart_legend(&self, section: &ChartLegendSection) -> BlockView {
        let theme = section.chart.theme;
        let kind = match section.chart.kind {
            ChartKind::Pie => "pie",
            ChartKind::Donut => "donut",
        };

        let chart = ChartView {
            kind,
            title: section.chart.title.clone(),
            subtitle: section.chart.subtitle.clone(),
            gradient: self.gradient(theme, &section.chart.series),
            labels: section
                .chart
                .series
                .iter()
                .map(|point| format!("{}: {}", point.label, point.value))
                .collect(),
        };

        let legend = LegendView {
            columns: self.texts(&section.legend.columns),
            rows: section
                .legend
                .rows
                .iter()
                .map(|row| LegendRowView {
                    label: self.cell(&row.label),
                    value: self.cell(&row.value),
                    color: self.color(theme, row.color_index),
                })
                .collect(),
        };

        BlockView {
            heading: Some(self.text(&section.heading)),
            paragraphs: self.paragraphs(&section.preamble),
            chart: Some(chart),
            legend: Some(legend),
            footnotes: self.texts(&section.footnotes),
            ..BlockView::default()
        }
    }

    fn table_grid(&self, section: &TableGridSection) -> BlockView {
        let grid = section
            .columns
            .iter()
            .map(|group| {
                let rows: Vec<KeyValue> = group
                    .rows
                    .iter()
                    .map(|row| KeyValue {
                        key: row.label.to_string(),
                        value: row.value.to_string(),
                    })
                    .collect();
                GridColumnView {
                    title: group.resource_label.to_string(),
                    color: self.color(section.theme, group.color_index),
                    has_rows: !rows.is_empty(),
                    rows,
                }
            })
            .collect();

        BlockView {
            heading: Some(self.text(&section.heading)),
            grid,
            footnotes: self.texts(&section.footnotes),
            ..BlockView::default()
        }
    }

    fn instance_table(&self, plan: &InstanceTablePlan) -> BlockView {
        let rows: Vec<Vec<String>> = plan
            .rows
            .iter()
            .map(|row| {
                vec![
                    self.cell(&row.instance_type),
                    self.cell(if row.desc.is_empty() { "-" } else { row.desc.as_str() }),
                    row.count.to_string(),
                ]
            })
            .collect();

        BlockView {
            heading: Some(self.text(&plan.heading)),
            table: Some(TableView {
                id: plan.id,
                description: self.text(&plan.description),
                headers: INSTANCE_TABLE_COLUMNS.iter().map(|h| h.to_string()).collect(),
                has_rows: !rows.is_empty(),
                rows,
            }),
            ..BlockView::default()
        }
    }

    fn description_list(&self, section: &DescriptionListSection) -> BlockView {
        BlockView {
            heading: Some(self.text(&section.heading)),
            entries: section.entries.iter().map(|entry| self.entry(entry)).collect(),
            ..BlockView::default()
        }
    }

    fn entry(&self, entry: &DescriptionEntry) -> EntryView {
        let (glyph, icon_class) = match entry.icon {
            Some((icon, tone)) => (
                Some(icon.glyph()),
                format!("icon icon-{} tone-{}", icon.as_str(), tone.as_str()),
            ),
            None => (None, String::new()),
        };
        EntryView {
            title: self.text(entry.title),
            description: self.text(entry.description),
            glyph,
            icon_class,
        }
    }

    fn paragraphs(&self, paragraphs: &[Paragraph]) -> Vec<Vec<SpanView>> {
        paragraphs
            .iter()
            .map(|paragraph| {
                paragraph
                    .fragments
                    .iter()
                    .map(|fragment| SpanView {
                        text: self.text(fragment.text()),
                        strong: fragment.is_strong(),
                    })
                    .collect()
            })
            .collect()
    }

    fn texts(&self, values: &[String]) -> Vec<String> {
        values.iter().map(|value| self.text(value)).collect()
    }

    fn text(&self, value: &str) -> String {
        match self.target {
            Target::Markdown => value.replace('*', r"\*"),
            Target::Html => value.to_string(),
        }
    }

    fn cell(&self, value: &str) -> String {
        match self.target {
            Target::Markdown => self.text(value).replace('|', r"\|"),
            Target::Html => value.to_string(),
        }
    }

    fn color(&self, theme: ThemeColor, index: usize) -> String {
        self.swatches
            .map(|swatches| swatches.color(theme, index))
            .unwrap_or_default()
    }

    /// CSS conic-gradient drawing the series as pie slices.
    fn gradient(&self, theme: ThemeColor, series: &[SeriesPoint]) -> String {
        let total: u64 = series.iter().map(|point| point.value).sum();
        if total == 0 || self.swatches.is_none() {
            return "conic-gradient(#d2d2d2 0deg 360deg)".to_string();
        }

        let mut start = 0.0_f64;
        let mut stops = Vec::with_capacity(series.len());
        for point in series.iter().filter(|point| point.value > 0) {
            let end = start + point.value as f64 / total as f64 * 360.0;
            stops.push(format!(
                "{} {:.2}deg {:.2}deg",
                self.color(theme, point.color_index),
                start,
                end
            ));
            start = end;
        }
        format!("conic-gradient({})", stops.join(", "))
    }
}
