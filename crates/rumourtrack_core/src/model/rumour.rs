//! Rumour domain model.
//!
//! # Responsibility
//! - Define the canonical rumour record persisted to `rumours.json`.
//! - Provide status and verification helpers used by the rule layer.
//!
//! # Invariants
//! - `rumour_id` is stable and never reused for another rumour.
//! - A recorded verification outcome is never cleared.
//! - Unknown status strings survive a load/save cycle unchanged.
//!
//! # See also
//! - `crate::rules` for the decision logic built on these helpers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored string for the normal lifecycle status.
pub const STATUS_NORMAL: &str = "normal";
/// Stored string for the escalated lifecycle status.
pub const STATUS_PANIC: &str = "panic";

/// Lifecycle status of a rumour.
///
/// `Other` carries whatever a hand-edited or legacy file contained, so this
/// code never silently rewrites values it does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RumourStatus {
    /// Default lifecycle state for tracked rumours.
    Normal,
    /// Escalated state once enough reports accumulate.
    Panic,
    /// Unrecognized stored value, preserved verbatim.
    Other(String),
}

impl RumourStatus {
    /// Returns the stored string form of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => STATUS_NORMAL,
            Self::Panic => STATUS_PANIC,
            Self::Other(value) => value,
        }
    }
}

impl From<String> for RumourStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            STATUS_NORMAL => Self::Normal,
            STATUS_PANIC => Self::Panic,
            _ => Self::Other(value),
        }
    }
}

impl From<RumourStatus> for String {
    fn from(value: RumourStatus) -> Self {
        match value {
            RumourStatus::Other(text) => text,
            known => known.as_str().to_string(),
        }
    }
}

/// A trackable claim with credibility metadata and a lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rumour {
    /// Numeric identifier kept in string form to match the stored shape.
    pub rumour_id: String,
    /// Short human-readable claim text.
    pub title: String,
    /// Free-text origin of the claim (a person, site or outlet).
    pub source: String,
    /// Day the rumour entered the system.
    pub created_date: NaiveDate,
    /// Editorial credibility estimate; higher means more believable.
    pub credibility_score: i64,
    pub status: RumourStatus,
    /// Tri-state verification outcome: unset, confirmed true or confirmed false.
    pub verified: Option<bool>,
    /// Identifier of the inspector who recorded the outcome.
    pub verified_by: Option<String>,
    /// Day the outcome was recorded.
    pub verified_date: Option<NaiveDate>,
}

impl Rumour {
    /// Creates an unverified rumour in normal status.
    ///
    /// # Invariants
    /// - Verification fields are initialized to `None`.
    /// - `status` starts as `RumourStatus::Normal`.
    pub fn new(
        rumour_id: impl Into<String>,
        title: impl Into<String>,
        source: impl Into<String>,
        created_date: NaiveDate,
        credibility_score: i64,
    ) -> Self {
        Self {
            rumour_id: rumour_id.into(),
            title: title.into(),
            source: source.into(),
            created_date,
            credibility_score,
            status: RumourStatus::Normal,
            verified: None,
            verified_by: None,
            verified_date: None,
        }
    }

    /// Records the verification outcome along with who decided it and when.
    ///
    /// Leaves `status` untouched; escalation and verification are
    /// independent axes of a rumour's state.
    pub fn record_verification(
        &mut self,
        outcome: bool,
        verified_by: impl Into<String>,
        verified_date: NaiveDate,
    ) {
        self.verified = Some(outcome);
        self.verified_by = Some(verified_by.into());
        self.verified_date = Some(verified_date);
    }

    /// Returns whether an inspector has recorded any outcome.
    pub fn is_verified(&self) -> bool {
        self.verified.is_some()
    }

    /// Returns whether the rumour is in the escalated status.
    pub fn is_panic(&self) -> bool {
        self.status == RumourStatus::Panic
    }

    /// Returns whether the rumour is in the default status.
    ///
    /// False for unknown stored statuses; those are neither normal nor panic.
    pub fn is_normal(&self) -> bool {
        self.status == RumourStatus::Normal
    }
}
