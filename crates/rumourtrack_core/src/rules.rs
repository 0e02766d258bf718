//! Business rule evaluator.
//!
//! # Responsibility
//! - Hold the stateless decision rules applied by the session layer.
//! - Keep escalation, report gating and display policy in pure functions.
//!
//! # Invariants
//! - Functions here never touch stores or perform I/O.
//! - Panic escalation is one-way; no rule maps panic back to normal.
//!
//! # See also
//! - `crate::service::session_service` for where these rules are applied.

use crate::model::rumour::{Rumour, RumourStatus};

/// Default report count at which a rumour escalates to panic status.
pub const PANIC_THRESHOLD: usize = 2;

/// Display label for the normal status.
pub const STATUS_LABEL_NORMAL: &str = "Normal";
/// Display label for the panic status.
pub const STATUS_LABEL_PANIC: &str = "Panic";

/// Returns whether a rumour with `report_count` reports escalates to panic.
///
/// The threshold is passed in rather than read from a global so callers can
/// carry it in configuration.
pub fn should_trigger_panic(report_count: usize, panic_threshold: usize) -> bool {
    report_count >= panic_threshold
}

/// Returns whether a rumour may accept a new report.
///
/// A verified rumour is permanently closed to reports, and a reporter may
/// file against each rumour at most once.
pub fn can_accept_report(is_verified: bool, user_already_reported: bool) -> bool {
    if is_verified {
        return false;
    }
    if user_already_reported {
        return false;
    }
    true
}

/// Returns whether the acting user may record verification outcomes.
///
/// Role-only gate: nothing about the rumour itself widens or narrows it.
pub fn can_verify(is_inspector: bool) -> bool {
    is_inspector
}

/// Maps a stored status onto its display label.
///
/// Unknown stored values pass through unchanged so corrupt data stays
/// visible instead of masquerading as a known state.
pub fn status_display(status: &RumourStatus) -> &str {
    match status {
        RumourStatus::Normal => STATUS_LABEL_NORMAL,
        RumourStatus::Panic => STATUS_LABEL_PANIC,
        RumourStatus::Other(value) => value,
    }
}

/// Returns the rumours whose status equals `status`, preserving input order.
pub fn filter_by_status<'a>(rumours: &'a [Rumour], status: &RumourStatus) -> Vec<&'a Rumour> {
    rumours
        .iter()
        .filter(|rumour| rumour.status == *status)
        .collect()
}

/// Returns the rumours whose verification outcome equals `verified`,
/// preserving input order.
pub fn filter_by_verified(rumours: &[Rumour], verified: Option<bool>) -> Vec<&Rumour> {
    rumours
        .iter()
        .filter(|rumour| rumour.verified == verified)
        .collect()
}
