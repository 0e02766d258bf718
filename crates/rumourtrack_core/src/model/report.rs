//! Report domain model.
//!
//! # Responsibility
//! - Define the report record persisted to `reports.json`.
//! - Enumerate the fixed set of report categories and their stored strings.
//!
//! # Invariants
//! - Reports are append-only; no mutation or deletion path exists.
//! - At most one report exists per (reporter, rumour) pair, enforced by the
//!   session layer on submission.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored string for the misinformation category.
pub const REPORT_TYPE_MISINFORMATION: &str = "misinformation";
/// Stored string for the incitement category.
pub const REPORT_TYPE_INCITEMENT: &str = "incitement";
/// Stored string for the distortion category.
pub const REPORT_TYPE_DISTORTION: &str = "distortion";

const SUPPORTED_REPORT_TYPES: &[&str] = &[
    REPORT_TYPE_MISINFORMATION,
    REPORT_TYPE_INCITEMENT,
    REPORT_TYPE_DISTORTION,
];

/// Category of a filed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// The rumour spreads outright false information.
    Misinformation,
    /// The rumour stirs readers up against a person or group.
    Incitement,
    /// The rumour bends real events out of shape.
    Distortion,
}

impl ReportType {
    /// Returns the stored string form of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Misinformation => REPORT_TYPE_MISINFORMATION,
            Self::Incitement => REPORT_TYPE_INCITEMENT,
            Self::Distortion => REPORT_TYPE_DISTORTION,
        }
    }
}

/// Returns the stored strings of every supported report category.
///
/// The order is stable and suitable for building selection widgets upstream.
pub fn supported_report_types() -> &'static [&'static str] {
    SUPPORTED_REPORT_TYPES
}

/// Parses one report category from presentation input.
///
/// Matching is exact on the stored lowercase strings after trimming
/// surrounding whitespace; anything else is rejected.
pub fn parse_report_type(value: &str) -> Option<ReportType> {
    match value.trim() {
        REPORT_TYPE_MISINFORMATION => Some(ReportType::Misinformation),
        REPORT_TYPE_INCITEMENT => Some(ReportType::Incitement),
        REPORT_TYPE_DISTORTION => Some(ReportType::Distortion),
        _ => None,
    }
}

/// A user-submitted flag against one rumour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Sequential identifier shaped `R` + zero-padded number (`R0001`).
    pub report_id: String,
    /// Identifier of the user who filed the report.
    pub reporter_id: String,
    /// Identifier of the rumour this report is filed against.
    pub rumour_id: String,
    /// Day the report was filed.
    pub report_date: NaiveDate,
    pub report_type: ReportType,
    /// Free-text detail supplied by the reporter; may be empty.
    pub description: String,
}

impl Report {
    /// Creates a report record with all fields supplied by the caller.
    pub fn new(
        report_id: impl Into<String>,
        reporter_id: impl Into<String>,
        rumour_id: impl Into<String>,
        report_date: NaiveDate,
        report_type: ReportType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            report_id: report_id.into(),
            reporter_id: reporter_id.into(),
            rumour_id: rumour_id.into(),
            report_date,
            report_type,
            description: description.into(),
        }
    }
}
