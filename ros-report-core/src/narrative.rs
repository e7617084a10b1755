//! Threshold-gated report sentences.
//!
//! Every verb and noun agrees with the count it describes, never with the fleet
//! total unless the total is what the clause is about.

use ros_report_sdk::SnapshotMeta;
use serde::Serialize;

use crate::pluralize::{pluralize, pluralize_s};
use crate::text::Paragraph;

pub const STALE_AFTER_DAYS: u32 = 7;
pub const HISTORY_WINDOW_DAYS: u32 = 45;

/// Verb and noun forms for one counted subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agreement {
    pub verb: String,
    pub noun: String,
}

pub fn agreement(count: u64) -> Agreement {
    Agreement {
        verb: pluralize(count, "is", Some("are")),
        noun: pluralize_s(count, "system"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaleCaveat {
    pub statement: Paragraph,
    pub footnote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub registered: Paragraph,
    pub optimization: Paragraph,
    pub stale: Option<StaleCaveat>,
    pub psi: Option<Paragraph>,
    pub performance: Paragraph,
}

pub fn compose_narrative(meta: &SnapshotMeta, optimized_count: u64) -> Narrative {
    Narrative {
        registered: registered_systems(meta.total_count),
        optimization: optimization_summary(meta, optimized_count),
        stale: stale_caveat(meta),
        psi: psi_caveat(meta),
        performance: performance_issues(meta.conditions_count),
    }
}

pub fn registered_systems(total: u64) -> Paragraph {
    let total_forms = agreement(total);
    Paragraph::new()
        .plain(format!("There {} ", total_forms.verb))
        .strong(format!("{total} registered {}", total_forms.noun))
        .plain(" in the resource optimization service.")
}

pub fn optimization_summary(meta: &SnapshotMeta, optimized_count: u64) -> Paragraph {
    let total = meta.total_count;
    let of_total = format!("of {total} {}", agreement(total).noun);

    Paragraph::new()
        .strong(optimized_count.to_string())
        .plain(format!(
            " {of_total} {} identified as ",
            agreement(optimized_count).verb
        ))
        .strong("optimized")
        .plain(", ")
        .strong(meta.non_optimized_count.to_string())
        .plain(format!(" {of_total} as having a "))
        .strong("non-optimal")
        .plain(" state.")
}

pub fn stale_caveat(meta: &SnapshotMeta) -> Option<StaleCaveat> {
    let stale = meta.stale_count;
    if stale == 0 {
        return None;
    }

    let total = meta.total_count;
    let statement = Paragraph::new()
        .strong(stale.to_string())
        .plain(format!(
            " of {total} {} {} ",
            agreement(total).noun,
            agreement(stale).verb
        ))
        .strong("stale*");

    Some(StaleCaveat {
        statement,
        footnote: format!(
            "Suggestions for stale systems might no longer apply due to systems not being refreshed in {STALE_AFTER_DAYS} days.*"
        ),
    })
}

pub fn psi_caveat(meta: &SnapshotMeta) -> Option<Paragraph> {
    let non_psi = meta.non_psi_count;
    if non_psi == 0 {
        return None;
    }

    let enabled = meta.psi_enabled_count;
    let total = meta.total_count;
    let text = format!(
        "{enabled} {} out of a total of {total} {} {} Kernel Pressure Stall Information enabled. \
         You could get better suggestions for {non_psi} {} if you enabled Pressure Stall Information. \
         Check the documentation on how to enable PSI on versions RHEL 8 and newer.",
        pluralize_s(enabled, "system"),
        pluralize_s(total, "system"),
        pluralize(enabled, "has", Some("have")),
        pluralize_s(non_psi, "system"),
    );

    Some(Paragraph::from(text.as_str()))
}

pub fn performance_issues(conditions_count: u64) -> Paragraph {
    Paragraph::new().plain(format!(
        "There {} {conditions_count} system performance {}.",
        agreement(conditions_count).verb,
        pluralize_s(conditions_count, "issue")
    ))
}
