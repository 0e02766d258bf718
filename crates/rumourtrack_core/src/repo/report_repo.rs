//! Report repository over the flat-file store.
//!
//! # Responsibility
//! - Own the append-only report collection.
//! - Answer per-rumour report counts and duplicate-reporter probes.
//!
//! # Invariants
//! - Reports are append-only; no update or delete API exists.
//! - Generated ids are `R` plus a zero-padded sequence number (`R0001`).

use crate::model::report::{Report, ReportType};
use crate::repo::json_store::{JsonStore, Record, StoreResult};
use crate::repo::RepoResult;
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;
use std::path::PathBuf;

const REPORT_ID_PREFIX: &str = "R";
const REPORT_ID_WIDTH: usize = 4;

impl Record for Report {
    fn id(&self) -> &str {
        &self.report_id
    }
}

/// Flat-file report repository.
#[derive(Debug)]
pub struct ReportRepository {
    store: JsonStore<Report>,
}

impl ReportRepository {
    /// Loads the repository from its backing file.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Ok(Self {
            store: JsonStore::load(path)?,
        })
    }

    /// Returns all reports in file order (defensive copy).
    pub fn get_all(&self) -> Vec<Report> {
        self.store.get_all()
    }

    /// Returns how many reports are stored.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the number of reports filed against each rumour.
    ///
    /// Rumours nobody reported have no entry; callers default to zero.
    pub fn report_counts(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for report in self.store.records() {
            *counts.entry(report.rumour_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the report count for one rumour.
    pub fn count_for(&self, rumour_id: &str) -> usize {
        self.store
            .records()
            .iter()
            .filter(|report| report.rumour_id == rumour_id)
            .count()
    }

    /// Returns whether this reporter already filed against this rumour.
    pub fn has_report(&self, reporter_id: &str, rumour_id: &str) -> bool {
        self.store
            .records()
            .iter()
            .any(|report| report.reporter_id == reporter_id && report.rumour_id == rumour_id)
    }

    /// Appends a new report and persists the collection.
    pub fn add_report(
        &mut self,
        reporter_id: impl Into<String>,
        rumour_id: impl Into<String>,
        report_type: ReportType,
        description: impl Into<String>,
        report_date: NaiveDate,
    ) -> RepoResult<Report> {
        let report = Report::new(
            self.store.next_id(REPORT_ID_PREFIX, REPORT_ID_WIDTH)?,
            reporter_id,
            rumour_id,
            report_date,
            report_type,
            description,
        );
        self.store.append(report.clone())?;
        info!(
            "event=report_add module=repo status=ok report_id={} rumour_id={} report_type={}",
            report.report_id,
            report.rumour_id,
            report.report_type.as_str()
        );
        Ok(report)
    }
}
