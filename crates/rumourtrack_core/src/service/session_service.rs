//! Session and coordination layer.
//!
//! # Responsibility
//! - Hold the current-user session state across screens.
//! - Route presentation actions through business rules onto the stores.
//!
//! # Invariants
//! - Every rejected action leaves all three stores unchanged.
//! - Rejections are values with a human-readable reason; nothing here panics.
//! - Panic escalation happens here and is never reverted.
//!
//! # See also
//! - `crate::rules` for the pure decision functions applied here.

use crate::config::AppConfig;
use crate::model::report::{parse_report_type, Report};
use crate::model::rumour::{Rumour, RumourStatus};
use crate::model::user::User;
use crate::repo::json_store::StoreError;
use crate::repo::report_repo::ReportRepository;
use crate::repo::rumour_repo::RumourRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::rules;
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Category of a session error.
///
/// The presentation layer picks how to surface a rejection (blocking dialog
/// versus inline warning) from the category rather than matching individual
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// A referenced user or rumour does not exist.
    NotFound,
    /// The acting user lacks the required role.
    PermissionDenied,
    /// The action conflicts with a business rule or has invalid input.
    RuleViolation,
    /// No user session is active.
    Unauthenticated,
    /// The underlying file store failed.
    Persistence,
}

/// Rejected session action, with a human-readable reason.
#[derive(Debug)]
pub enum SessionError {
    /// Action attempted with no active session.
    Unauthenticated,
    /// Login id does not resolve to a known user.
    UserNotFound(String),
    /// Target rumour id does not resolve.
    RumourNotFound(String),
    /// Acting user lacks the inspector role.
    NotAnInspector,
    /// The rumour already carries a verification outcome.
    AlreadyVerified(String),
    /// This reporter already filed against this rumour.
    DuplicateReport {
        reporter_id: String,
        rumour_id: String,
    },
    /// Report type input was empty.
    MissingReportType,
    /// Report type input is not one of the supported categories.
    UnsupportedReportType(String),
    /// Verification decision was not the literal `true` or `false`.
    InvalidDecision(String),
    /// Underlying persistence failed.
    Store(RepoError),
}

impl SessionError {
    /// Returns the category of this error.
    pub fn kind(&self) -> SessionErrorKind {
        match self {
            Self::Unauthenticated => SessionErrorKind::Unauthenticated,
            Self::UserNotFound(_) | Self::RumourNotFound(_) => SessionErrorKind::NotFound,
            Self::NotAnInspector => SessionErrorKind::PermissionDenied,
            Self::AlreadyVerified(_)
            | Self::DuplicateReport { .. }
            | Self::MissingReportType
            | Self::UnsupportedReportType(_)
            | Self::InvalidDecision(_) => SessionErrorKind::RuleViolation,
            Self::Store(_) => SessionErrorKind::Persistence,
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "please log in first"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::RumourNotFound(id) => write!(f, "rumour not found: {id}"),
            Self::NotAnInspector => write!(f, "only inspectors can verify rumours"),
            Self::AlreadyVerified(id) => {
                write!(f, "rumour {id} is already verified and closed to reports")
            }
            Self::DuplicateReport {
                reporter_id,
                rumour_id,
            } => write!(f, "user {reporter_id} already reported rumour {rumour_id}"),
            Self::MissingReportType => write!(f, "report type is required"),
            Self::UnsupportedReportType(value) => {
                write!(f, "unsupported report type: `{value}`")
            }
            Self::InvalidDecision(value) => {
                write!(
                    f,
                    "verification decision must be `true` or `false`, got `{value}`"
                )
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        match value {
            // Rumours are the only entity written through repositories.
            RepoError::NotFound { id, .. } => Self::RumourNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(RepoError::Store(value))
    }
}

/// Rumours grouped for the summary screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBuckets {
    /// Rumours currently in panic status, file order.
    pub panic: Vec<Rumour>,
    /// Rumours verified as true, file order.
    pub verified_true: Vec<Rumour>,
    /// Rumours verified as false, file order.
    pub verified_false: Vec<Rumour>,
}

/// Session facade consumed by the presentation layer.
///
/// Owns the three repositories and the current-user state. All mutating
/// actions are gated here; callers never touch repositories directly.
#[derive(Debug)]
pub struct SessionService {
    config: AppConfig,
    rumours: RumourRepository,
    reports: ReportRepository,
    users: UserRepository,
    current_user: Option<User>,
}

impl SessionService {
    /// Loads all three stores from the configured data directory.
    ///
    /// Any unreadable or malformed file is fatal; the session cannot start
    /// without its data.
    pub fn open(config: AppConfig) -> SessionResult<Self> {
        let rumours = RumourRepository::load(config.rumours_path())?;
        let reports = ReportRepository::load(config.reports_path())?;
        let users = UserRepository::load(config.users_path())?;
        info!(
            "event=session_open module=service status=ok rumours={} reports={} users={} panic_threshold={}",
            rumours.len(),
            reports.len(),
            users.len(),
            config.panic_threshold
        );
        Ok(Self {
            config,
            rumours,
            reports,
            users,
            current_user: None,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the logged-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Returns whether a user session is active.
    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Starts a session by trusted identifier lookup.
    ///
    /// An unknown id is rejected and leaves the session logged out. There is
    /// no credential check; callers sit behind a trusted selection screen.
    pub fn login(&mut self, user_id: &str) -> SessionResult<User> {
        let Some(user) = self.users.get_by_id(user_id) else {
            return reject(
                "login",
                "user_not_found",
                SessionError::UserNotFound(user_id.to_string()),
            );
        };
        info!(
            "event=login module=service status=ok user_id={} role={}",
            user.user_id,
            user.role.as_str()
        );
        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Ends the active session, if any. A no-op when logged out.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(
                "event=logout module=service status=ok user_id={}",
                user.user_id
            );
        }
    }

    /// Returns whether the logged-in user carries the inspector role.
    ///
    /// The role is re-read from the user store rather than the session
    /// snapshot; false when logged out.
    pub fn is_current_user_inspector(&self) -> bool {
        self.current_user
            .as_ref()
            .map_or(false, |user| self.users.is_inspector(&user.user_id))
    }

    /// Returns all rumours ordered for the list screen.
    ///
    /// Descending by report count, then by credibility score. The sort is
    /// stable, so ties keep file order.
    pub fn list_rumours(&self) -> Vec<Rumour> {
        let counts = self.reports.report_counts();
        let mut rumours = self.rumours.get_all();
        rumours.sort_by(|a, b| {
            let key_a = (
                counts.get(&a.rumour_id).copied().unwrap_or(0),
                a.credibility_score,
            );
            let key_b = (
                counts.get(&b.rumour_id).copied().unwrap_or(0),
                b.credibility_score,
            );
            key_b.cmp(&key_a)
        });
        rumours
    }

    /// Returns the rumour with the given id, if any.
    pub fn get_rumour(&self, rumour_id: &str) -> Option<Rumour> {
        self.rumours.get_by_id(rumour_id)
    }

    /// Returns the report count per rumour id.
    ///
    /// Rumours nobody reported have no entry; callers default to zero.
    pub fn report_counts_by_rumour(&self) -> BTreeMap<String, usize> {
        self.reports.report_counts()
    }

    /// Files a report against a rumour on behalf of the logged-in user.
    ///
    /// Checks run in a fixed order: active session, rumour existence,
    /// acceptance rules (a verified rumour outranks a duplicate in the
    /// reported reason), then report-type validity. On success the report is
    /// appended with today's date and the rumour escalates to panic once its
    /// report count reaches the configured threshold.
    pub fn submit_report(
        &mut self,
        rumour_id: &str,
        report_type: &str,
        description: &str,
    ) -> SessionResult<Report> {
        let Some(user) = self.current_user.clone() else {
            return reject(
                "submit_report",
                "unauthenticated",
                SessionError::Unauthenticated,
            );
        };
        let Some(rumour) = self.rumours.get_by_id(rumour_id) else {
            return reject(
                "submit_report",
                "rumour_not_found",
                SessionError::RumourNotFound(rumour_id.to_string()),
            );
        };

        let is_verified = rumour.is_verified();
        let already_reported = self.reports.has_report(&user.user_id, rumour_id);
        if !rules::can_accept_report(is_verified, already_reported) {
            return if is_verified {
                reject(
                    "submit_report",
                    "already_verified",
                    SessionError::AlreadyVerified(rumour_id.to_string()),
                )
            } else {
                reject(
                    "submit_report",
                    "duplicate_report",
                    SessionError::DuplicateReport {
                        reporter_id: user.user_id.clone(),
                        rumour_id: rumour_id.to_string(),
                    },
                )
            };
        }

        let trimmed_type = report_type.trim();
        if trimmed_type.is_empty() {
            return reject(
                "submit_report",
                "missing_report_type",
                SessionError::MissingReportType,
            );
        }
        let Some(report_type) = parse_report_type(trimmed_type) else {
            return reject(
                "submit_report",
                "unsupported_report_type",
                SessionError::UnsupportedReportType(trimmed_type.to_string()),
            );
        };

        let report = self.reports.add_report(
            user.user_id.as_str(),
            rumour_id,
            report_type,
            description,
            today(),
        )?;

        let report_count = self.reports.count_for(rumour_id);
        if rules::should_trigger_panic(report_count, self.config.panic_threshold)
            && !rumour.is_panic()
        {
            self.rumours
                .update_status(rumour_id, RumourStatus::Panic)?;
        }

        info!(
            "event=submit_report module=service status=ok report_id={} rumour_id={rumour_id} report_count={report_count}",
            report.report_id
        );
        Ok(report)
    }

    /// Records an inspector's verification outcome for a rumour.
    ///
    /// `decision` is the raw presentation value and must be the literal
    /// `true` or `false`. Sets the outcome plus `verified_by` and
    /// `verified_date` (today); the lifecycle status stays untouched.
    pub fn verify_rumour(&mut self, rumour_id: &str, decision: &str) -> SessionResult<Rumour> {
        let Some(user) = self.current_user.clone() else {
            return reject(
                "verify_rumour",
                "unauthenticated",
                SessionError::Unauthenticated,
            );
        };
        if !rules::can_verify(self.users.is_inspector(&user.user_id)) {
            return reject(
                "verify_rumour",
                "not_an_inspector",
                SessionError::NotAnInspector,
            );
        }
        let outcome = match decision.trim() {
            "true" => true,
            "false" => false,
            other => {
                return reject(
                    "verify_rumour",
                    "invalid_decision",
                    SessionError::InvalidDecision(other.to_string()),
                );
            }
        };

        let rumour = self
            .rumours
            .update_verified(rumour_id, outcome, &user.user_id, today())?;
        info!(
            "event=verify_rumour module=service status=ok rumour_id={rumour_id} outcome={outcome} inspector={}",
            user.user_id
        );
        Ok(rumour)
    }

    /// Returns the rumours grouped for the summary screen.
    pub fn summary_buckets(&self) -> SummaryBuckets {
        let rumours = self.rumours.get_all();
        SummaryBuckets {
            panic: cloned(rules::filter_by_status(&rumours, &RumourStatus::Panic)),
            verified_true: cloned(rules::filter_by_verified(&rumours, Some(true))),
            verified_false: cloned(rules::filter_by_verified(&rumours, Some(false))),
        }
    }
}

fn cloned(rumours: Vec<&Rumour>) -> Vec<Rumour> {
    rumours.into_iter().cloned().collect()
}

fn reject<T>(action: &str, reason: &str, err: SessionError) -> SessionResult<T> {
    warn!("event={action} module=service status=rejected reason={reason}");
    Err(err)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
