//! Rumour repository over the flat-file store.
//!
//! # Responsibility
//! - Own the rumour collection and its status/verification mutations.
//! - Allocate new rumour ids above the seed-data floor.
//!
//! # Invariants
//! - New rumours start in normal status with verification unset.
//! - Generated ids are unpadded numeric strings strictly above the floor.
//! - Status and verification writes answer unknown ids with `NotFound`.

use crate::model::rumour::{Rumour, RumourStatus};
use crate::repo::json_store::{JsonStore, Record, StoreError, StoreResult};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;

/// Seed rumour ids sit at or below this value; generated ids start above it.
pub const RUMOUR_ID_FLOOR: u64 = 10_000_000;

impl Record for Rumour {
    fn id(&self) -> &str {
        &self.rumour_id
    }
}

/// Flat-file rumour repository.
#[derive(Debug)]
pub struct RumourRepository {
    store: JsonStore<Rumour>,
}

impl RumourRepository {
    /// Loads the repository from its backing file.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Ok(Self {
            store: JsonStore::load(path)?,
        })
    }

    /// Returns all rumours in file order (defensive copy).
    pub fn get_all(&self) -> Vec<Rumour> {
        self.store.get_all()
    }

    /// Returns the first rumour with the given id, if any.
    pub fn get_by_id(&self, rumour_id: &str) -> Option<Rumour> {
        self.store.get_by_id(rumour_id).cloned()
    }

    /// Returns how many rumours are stored.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Adds a new rumour and persists the collection.
    ///
    /// The record starts unverified in normal status with a freshly
    /// allocated id.
    pub fn add_rumour(
        &mut self,
        title: impl Into<String>,
        source: impl Into<String>,
        created_date: NaiveDate,
        credibility_score: i64,
    ) -> RepoResult<Rumour> {
        let rumour = Rumour::new(
            self.next_rumour_id()?,
            title,
            source,
            created_date,
            credibility_score,
        );
        self.store.append(rumour.clone())?;
        info!(
            "event=rumour_add module=repo status=ok rumour_id={}",
            rumour.rumour_id
        );
        Ok(rumour)
    }

    /// Sets the lifecycle status of one rumour and persists.
    pub fn update_status(&mut self, rumour_id: &str, status: RumourStatus) -> RepoResult<()> {
        let status_label = status.as_str().to_string();
        let updated = self.store.update(rumour_id, |rumour| rumour.status = status)?;
        if updated.is_none() {
            return Err(RepoError::not_found("rumour", rumour_id));
        }
        info!(
            "event=rumour_status module=repo status=ok rumour_id={rumour_id} new_status={status_label}"
        );
        Ok(())
    }

    /// Records a verification outcome and persists.
    ///
    /// Stamps `verified_by` and `verified_date` alongside the outcome. The
    /// lifecycle status is left untouched.
    pub fn update_verified(
        &mut self,
        rumour_id: &str,
        outcome: bool,
        verified_by: &str,
        verified_date: NaiveDate,
    ) -> RepoResult<Rumour> {
        let updated = self.store.update(rumour_id, |rumour| {
            rumour.record_verification(outcome, verified_by, verified_date)
        })?;
        match updated {
            Some(rumour) => {
                info!(
                    "event=rumour_verified module=repo status=ok rumour_id={rumour_id} outcome={outcome}"
                );
                Ok(rumour)
            }
            None => Err(RepoError::not_found("rumour", rumour_id)),
        }
    }

    /// Returns the next rumour id, above both the floor and every stored id.
    ///
    /// Non-numeric ids in the backing file are ignored by the scan. A stored
    /// id at the numeric ceiling exhausts the sequence and is an error.
    pub fn next_rumour_id(&self) -> RepoResult<String> {
        let max_assigned = self.store.max_id_suffix("").max(RUMOUR_ID_FLOOR);
        let next = max_assigned
            .checked_add(1)
            .ok_or_else(|| StoreError::IdsExhausted {
                path: self.store.path().to_path_buf(),
            })?;
        Ok(next.to_string())
    }
}
