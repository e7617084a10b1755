use ros_report_sdk::{AnalyticsSnapshot, SystemState};
use serde::Serialize;
use thiserror::Error;

/// Inconsistencies found in an upstream snapshot. Rendering can proceed despite them.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum SnapshotIssue {
    #[error(
        "PSI counts do not reconcile: {psi_enabled} enabled + {non_psi} without PSI != {total} total"
    )]
    PsiMismatch {
        psi_enabled: u64,
        non_psi: u64,
        total: u64,
    },
    #[error("percentage for state {state} is out of range: {value}")]
    PercentageOutOfRange { state: &'static str, value: f64 },
    #[error("systems per state add up to {sum}, more than the {total} registered")]
    StateCountExceedsTotal { sum: u64, total: u64 },
    #[error("state percentages add up to {sum}, expected 100 (tolerance {tolerance})")]
    PercentageSum { sum: f64, tolerance: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationPolicy {
    pub percentage_tolerance: f64,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            percentage_tolerance: 0.5,
        }
    }
}

pub fn validate_snapshot(
    snapshot: &AnalyticsSnapshot,
    policy: &ValidationPolicy,
) -> Vec<SnapshotIssue> {
    let mut issues = Vec::new();
    let meta = &snapshot.meta;

    if meta.psi_enabled_count.checked_add(meta.non_psi_count) != Some(meta.total_count) {
        issues.push(SnapshotIssue::PsiMismatch {
            psi_enabled: meta.psi_enabled_count,
            non_psi: meta.non_psi_count,
            total: meta.total_count,
        });
    }

    for (state, share) in snapshot.systems_per_state.iter() {
        if !share.percentage.is_finite() || !(0.0..=100.0).contains(&share.percentage) {
            issues.push(SnapshotIssue::PercentageOutOfRange {
                state: state.as_str(),
                value: share.percentage,
            });
        }
    }

    let counted: u64 = SystemState::ALL
        .iter()
        .map(|state| snapshot.systems_per_state.get(*state).count)
        .fold(0u64, u64::saturating_add);
    if counted > meta.total_count {
        issues.push(SnapshotIssue::StateCountExceedsTotal {
            sum: counted,
            total: meta.total_count,
        });
    }

    if meta.total_count > 0 {
        let sum: f64 = snapshot
            .systems_per_state
            .iter()
            .map(|(_, share)| share.percentage)
            .sum();
        if (sum - 100.0).abs() > policy.percentage_tolerance {
            issues.push(SnapshotIssue::PercentageSum {
                sum,
                tolerance: policy.percentage_tolerance,
            });
        }
    }

    issues
}
