use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    CheckCircle,
    Tachometer,
    AngleDoubleDown,
    AngleDoubleUp,
    Automation,
    InProgress,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::CheckCircle => "check-circle",
            Icon::Tachometer => "tachometer",
            Icon::AngleDoubleDown => "angle-double-down",
            Icon::AngleDoubleUp => "angle-double-up",
            Icon::Automation => "automation",
            Icon::InProgress => "in-progress",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::CheckCircle => "✔",
            Icon::Tachometer => "◔",
            Icon::AngleDoubleDown => "⇊",
            Icon::AngleDoubleUp => "⇈",
            Icon::Automation => "⚙",
            Icon::InProgress => "↻",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Success,
    Danger,
    Warning,
    Info,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Success => "success",
            Tone::Danger => "danger",
            Tone::Warning => "warning",
            Tone::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DescriptionEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: Option<(Icon, Tone)>,
}

pub const STATE_DEFINITIONS: [DescriptionEntry; 6] = [
    DescriptionEntry {
        title: "Optimized",
        description: "Performing at an optimal level",
        icon: Some((Icon::CheckCircle, Tone::Success)),
    },
    DescriptionEntry {
        title: "Under pressure",
        description: "Peaking occasionally",
        icon: Some((Icon::Tachometer, Tone::Neutral)),
    },
    DescriptionEntry {
        title: "Undersized",
        description: "Using more than 80% of system resources",
        icon: Some((Icon::AngleDoubleDown, Tone::Danger)),
    },
    DescriptionEntry {
        title: "Oversized",
        description: "Using less than 20% of system resources",
        icon: Some((Icon::AngleDoubleUp, Tone::Warning)),
    },
    DescriptionEntry {
        title: "Idling",
        description: "Consuming less than 5% of resources",
        icon: Some((Icon::Automation, Tone::Neutral)),
    },
    DescriptionEntry {
        title: "Waiting for data",
        description: "Data has not been received or is being processed. Initial data processing takes up to 24 hours.",
        icon: Some((Icon::InProgress, Tone::Info)),
    },
];

pub const CONDITION_DEFINITIONS: [DescriptionEntry; 3] = [
    DescriptionEntry {
        title: "CPU pressure",
        description: "CPU registered peaks higher than 20% over several one-minute time periods",
        icon: None,
    },
    DescriptionEntry {
        title: "Disk I/O pressure",
        description: "Disk I/O registered peaks higher than 20% over several one-minute time periods",
        icon: None,
    },
    DescriptionEntry {
        title: "RAM pressure",
        description: "RAM registered peaks higher than 20% over several one-minute time periods",
        icon: None,
    },
];
