//! Whole-file JSON array store.
//!
//! # Responsibility
//! - Load and rewrite one JSON array of records as a unit.
//! - Allocate sequential prefix-plus-number identifiers.
//!
//! # Invariants
//! - An absent backing file is an empty collection, not an error.
//! - Every successful mutation leaves the in-memory list equal to the file.
//! - Rewrites go through a sibling temp file and an atomic rename, so the
//!   backing file is never observable half-written.

use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

static ID_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid id suffix regex"));

pub type StoreResult<T> = Result<T, StoreError>;

/// File transport error for record persistence.
#[derive(Debug)]
pub enum StoreError {
    /// The backing file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The backing file exists but does not hold a valid record array.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A stored id already sits at the numeric ceiling, so no further id
    /// can be allocated.
    IdsExhausted { path: PathBuf },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot access store file `{}`: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "store file `{}` is malformed: {source}", path.display())
            }
            Self::IdsExhausted { path } => {
                write!(
                    f,
                    "store file `{}` has exhausted its id sequence",
                    path.display()
                )
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::IdsExhausted { .. } => None,
        }
    }
}

/// A record that can live in a [`JsonStore`].
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Returns the stable identifier of this record.
    fn id(&self) -> &str;
}

/// In-memory record collection backed by one JSON file.
///
/// The whole collection is held in memory; every mutation rewrites the whole
/// backing file before it becomes visible to readers.
#[derive(Debug)]
pub struct JsonStore<T: Record> {
    path: PathBuf,
    records: Vec<T>,
}

impl<T: Record> JsonStore<T> {
    /// Loads the store from its backing file.
    ///
    /// An absent file yields an empty collection. A present file that cannot
    /// be read or parsed is an error; callers treat that as fatal at startup
    /// rather than risk clobbering data they could not read.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let started_at = Instant::now();

        if !path.exists() {
            info!(
                "event=store_load module=repo status=ok file={} records=0 missing_file=true",
                path.display()
            );
            return Ok(Self {
                path,
                records: Vec::new(),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|source| {
            error!(
                "event=store_load module=repo status=error file={} error_code=store_read_failed error={source}",
                path.display()
            );
            StoreError::Io {
                path: path.clone(),
                source,
            }
        })?;

        let records: Vec<T> = serde_json::from_str(&raw).map_err(|source| {
            error!(
                "event=store_load module=repo status=error file={} error_code=store_parse_failed error={source}",
                path.display()
            );
            StoreError::Malformed {
                path: path.clone(),
                source,
            }
        })?;

        info!(
            "event=store_load module=repo status=ok file={} records={} duration_ms={}",
            path.display(),
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Self { path, records })
    }

    /// Returns a borrowed view of all records in file order.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Returns a defensive copy of all records in file order.
    pub fn get_all(&self) -> Vec<T> {
        self.records.clone()
    }

    /// Returns how many records the store holds.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the first record with the given id, if any.
    ///
    /// Linear scan. Duplicate ids in a hand-edited file are tolerated; the
    /// first occurrence wins.
    pub fn get_by_id(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Appends one record and rewrites the backing file.
    ///
    /// A failed write rolls the in-memory append back, keeping memory and
    /// disk consistent.
    pub fn append(&mut self, record: T) -> StoreResult<()> {
        self.records.push(record);
        if let Err(err) = self.persist() {
            self.records.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Applies `mutate` to the first record with the given id and rewrites
    /// the backing file.
    ///
    /// Returns `Ok(None)` when no record has that id. A failed write rolls
    /// the mutation back and returns the error. On success the updated record
    /// is returned.
    pub fn update(&mut self, id: &str, mutate: impl FnOnce(&mut T)) -> StoreResult<Option<T>> {
        let Some(index) = self.records.iter().position(|record| record.id() == id) else {
            return Ok(None);
        };
        let previous = self.records[index].clone();
        mutate(&mut self.records[index]);
        if let Err(err) = self.persist() {
            self.records[index] = previous;
            return Err(err);
        }
        Ok(Some(self.records[index].clone()))
    }

    /// Rewrites the whole backing file from the in-memory collection.
    ///
    /// The payload is pretty-printed JSON, written to a sibling temp file and
    /// renamed over the target.
    pub fn persist(&self) -> StoreResult<()> {
        let payload = serde_json::to_string_pretty(&self.records).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        write_atomic(&self.path, payload.as_bytes()).map_err(|source| {
            error!(
                "event=store_persist module=repo status=error file={} error_code=store_write_failed error={source}",
                self.path.display()
            );
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;
        info!(
            "event=store_persist module=repo status=ok file={} records={}",
            self.path.display(),
            self.records.len()
        );
        Ok(())
    }

    /// Returns the next identifier for the given prefix.
    ///
    /// Takes the largest numeric suffix among ids shaped `<prefix><digits>`
    /// and formats max-plus-one zero-padded to `width`. A `width` of zero
    /// disables padding. A suffix already at the numeric ceiling is
    /// [`StoreError::IdsExhausted`]; ids never wrap.
    pub fn next_id(&self, prefix: &str, width: usize) -> StoreResult<String> {
        let next = self
            .max_id_suffix(prefix)
            .checked_add(1)
            .ok_or_else(|| StoreError::IdsExhausted {
                path: self.path.clone(),
            })?;
        Ok(format!("{prefix}{next:0width$}"))
    }

    /// Returns the largest numeric suffix among ids with the given prefix.
    ///
    /// Ids that do not match `<prefix><digits>` are skipped; an empty store
    /// yields zero.
    pub fn max_id_suffix(&self, prefix: &str) -> u64 {
        self.records
            .iter()
            .filter_map(|record| record.id().strip_prefix(prefix))
            .filter(|suffix| ID_SUFFIX_RE.is_match(suffix))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes `content` to `target` through a sibling temp file plus rename.
///
/// The parent directory is created on demand so a fresh data directory does
/// not need manual setup. A failed rename removes the temp file.
fn write_atomic(target: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let temp_path = temp_sibling(target);
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }
    if let Err(err) = fs::rename(&temp_path, target) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    Ok(())
}

fn temp_sibling(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{file_name}.tmp"))
}
