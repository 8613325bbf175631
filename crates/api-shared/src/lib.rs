//! # API Shared
//!
//! Shared utilities and definitions for the Swasthya API.
//!
//! Contains:
//! - Wire request/response types (`messages` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `swasthya-run` binary.

pub mod health;
pub mod messages;

pub use health::HealthService;
pub use messages::*;
