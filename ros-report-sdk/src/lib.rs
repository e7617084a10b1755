use anyhow::{Result, anyhow, bail};
use serde::Serialize;
use std::fmt;

mod snapshot;

pub use snapshot::{
    AnalyticsSnapshot, ConditionCounts, Conditions, InstanceTypeRow, InstanceTypesHighlights,
    ResourceKind, SnapshotMeta, StateShare, SubCondition, SystemState, SystemsPerState,
};

/// Named chart themes a palette provider can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeColor {
    Blue,
    MultiOrdered,
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ThemeColor::Blue => "blue",
            ThemeColor::MultiOrdered => "multi_ordered",
        };
        f.write_str(value)
    }
}

/// Ordered, non-empty color sequence. Indices wrap around once the scale is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScale {
    colors: Vec<String>,
}

impl ColorScale {
    pub fn new<I, S>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            bail!("color scale must contain at least one color");
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn index_for(&self, position: usize) -> usize {
        position % self.colors.len()
    }

    pub fn color(&self, index: usize) -> &str {
        &self.colors[self.index_for(index)]
    }
}

/// Source of chart colors. The report core only asks for scales and keeps indices.
pub trait PaletteProvider {
    fn color_scale(&self, theme: ThemeColor) -> Result<ColorScale>;
}

/// Descriptor of a compile-time palette registry entry.
pub struct PaletteRegistration {
    pub theme: ThemeColor,
    pub colors: &'static [&'static str],
}

inventory::collect!(PaletteRegistration);

pub use inventory;

/// Helper macro to register a theme palette inside a module.
#[macro_export]
macro_rules! register_palette {
    ($theme:expr, $colors:expr) => {
        ::ros_report_sdk::inventory::submit! {
            ::ros_report_sdk::PaletteRegistration {
                theme: $theme,
                colors: $colors,
            }
        }
    };
}

pub fn iter_registered_palettes() -> impl Iterator<Item = &'static PaletteRegistration> {
    inventory::iter::<PaletteRegistration>.into_iter()
}

/// Palette provider backed by everything submitted through `register_palette!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegisteredPalettes;

impl PaletteProvider for RegisteredPalettes {
    fn color_scale(&self, theme: ThemeColor) -> Result<ColorScale> {
        let entry = iter_registered_palettes()
            .find(|entry| entry.theme == theme)
            .ok_or_else(|| anyhow!("no palette registered for theme {}", theme))?;
        ColorScale::new(entry.colors.iter().copied())
    }
}
