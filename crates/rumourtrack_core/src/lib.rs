//! Core domain logic for the rumour tracker.
//! Business rules, persistence and session flows live here; presentation
//! layers stay thin and call through [`SessionService`].

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod rules;
pub mod service;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::report::{parse_report_type, supported_report_types, Report, ReportType};
pub use model::rumour::{Rumour, RumourStatus};
pub use model::user::{Role, User};
pub use repo::json_store::{JsonStore, Record, StoreError, StoreResult};
pub use repo::report_repo::ReportRepository;
pub use repo::rumour_repo::{RumourRepository, RUMOUR_ID_FLOOR};
pub use repo::user_repo::UserRepository;
pub use repo::{RepoError, RepoResult};
pub use rules::PANIC_THRESHOLD;
pub use service::session_service::{
    SessionError, SessionErrorKind, SessionResult, SessionService, SummaryBuckets,
};
