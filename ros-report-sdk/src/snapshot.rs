use serde::{Deserialize, Serialize};

/// Pre-aggregated analytics for the whole fleet, as delivered by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub conditions: Conditions,
    pub systems_per_state: SystemsPerState,
    pub instance_types_highlights: InstanceTypesHighlights,
    pub meta: SnapshotMeta,
}

impl AnalyticsSnapshot {
    pub fn from_json_str(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCounts {
    pub count: u64,
    pub under_pressure: u64,
    pub undersized: u64,
    pub oversized: u64,
}

impl ConditionCounts {
    pub fn get(&self, condition: SubCondition) -> u64 {
        match condition {
            SubCondition::UnderPressure => self.under_pressure,
            SubCondition::Undersized => self.undersized,
            SubCondition::Oversized => self.oversized,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    pub io: ConditionCounts,
    pub memory: ConditionCounts,
    pub cpu: ConditionCounts,
}

impl Conditions {
    pub fn get(&self, resource: ResourceKind) -> &ConditionCounts {
        match resource {
            ResourceKind::Io => &self.io,
            ResourceKind::Memory => &self.memory,
            ResourceKind::Cpu => &self.cpu,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StateShare {
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemsPerState {
    pub optimized: StateShare,
    pub under_pressure: StateShare,
    pub undersized: StateShare,
    pub oversized: StateShare,
    pub idling: StateShare,
    pub waiting_for_data: StateShare,
}

impl SystemsPerState {
    pub fn get(&self, state: SystemState) -> &StateShare {
        match state {
            SystemState::Optimized => &self.optimized,
            SystemState::UnderPressure => &self.under_pressure,
            SystemState::Undersized => &self.undersized,
            SystemState::Oversized => &self.oversized,
            SystemState::Idling => &self.idling,
            SystemState::WaitingForData => &self.waiting_for_data,
        }
    }

    /// Iterates shares in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = (SystemState, &StateShare)> {
        SystemState::ALL
            .into_iter()
            .map(move |state| (state, self.get(state)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTypeRow {
    #[serde(rename = "type")]
    pub instance_type: String,
    pub count: u64,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTypesHighlights {
    #[serde(default)]
    pub current: Vec<InstanceTypeRow>,
    #[serde(default)]
    pub suggested: Vec<InstanceTypeRow>,
    #[serde(default)]
    pub historical: Vec<InstanceTypeRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub conditions_count: u64,
    pub non_optimized_count: u64,
    pub non_psi_count: u64,
    pub psi_enabled_count: u64,
    pub total_count: u64,
    pub stale_count: u64,
}

/// Sizing states in the order every report lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemState {
    Optimized,
    UnderPressure,
    Undersized,
    Oversized,
    Idling,
    WaitingForData,
}

impl SystemState {
    pub const ALL: [SystemState; 6] = [
        SystemState::Optimized,
        SystemState::UnderPressure,
        SystemState::Undersized,
        SystemState::Oversized,
        SystemState::Idling,
        SystemState::WaitingForData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemState::Optimized => "optimized",
            SystemState::UnderPressure => "under_pressure",
            SystemState::Undersized => "undersized",
            SystemState::Oversized => "oversized",
            SystemState::Idling => "idling",
            SystemState::WaitingForData => "waiting_for_data",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            SystemState::Optimized => "Optimized",
            SystemState::UnderPressure => "Under pressure",
            SystemState::Undersized => "Undersized",
            SystemState::Oversized => "Oversized",
            SystemState::Idling => "Idling",
            SystemState::WaitingForData => "Waiting for data",
        }
    }
}

/// Monitored resources; the position in `ALL` is the resource's color slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Io,
    Memory,
    Cpu,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Io, ResourceKind::Memory, ResourceKind::Cpu];

    pub fn position(&self) -> usize {
        match self {
            ResourceKind::Io => 0,
            ResourceKind::Memory => 1,
            ResourceKind::Cpu => 2,
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            ResourceKind::Io => "Disk I/O",
            ResourceKind::Memory => "RAM",
            ResourceKind::Cpu => "CPU",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubCondition {
    UnderPressure,
    Undersized,
    Oversized,
}

impl SubCondition {
    pub const ALL: [SubCondition; 3] = [
        SubCondition::UnderPressure,
        SubCondition::Undersized,
        SubCondition::Oversized,
    ];

    pub fn display_label(&self) -> &'static str {
        match self {
            SubCondition::UnderPressure => "Under pressure",
            SubCondition::Undersized => "Undersized",
            SubCondition::Oversized => "Oversized",
        }
    }
}
