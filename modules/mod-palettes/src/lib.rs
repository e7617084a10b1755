use ros_report_sdk::{ThemeColor, register_palette};

/// Pie/donut scale of the blue chart theme.
pub const BLUE: &[&str] = &["#0066cc", "#8bc1f7", "#002f5d", "#519de9", "#004b95"];

/// Multi-colored ordered scale used for the state breakdown.
pub const MULTI_ORDERED: &[&str] = &[
    "#0066cc", "#4cb140", "#009596", "#5752d1", "#f4c145", "#ec7a08", "#7d1007", "#b8bbbe",
    "#8bc1f7", "#bde2b9", "#a2d9d9", "#b2b0ea", "#f9e0a2", "#f4b678", "#c9190b", "#f0f0f0",
];

register_palette!(ThemeColor::Blue, BLUE);
register_palette!(ThemeColor::MultiOrdered, MULTI_ORDERED);
