//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repositories and business rules behind session-level APIs.
//! - Keep the presentation layer decoupled from storage details.

pub mod session_service;
