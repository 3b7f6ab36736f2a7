//! # API Shared
//!
//! Shared utilities and definitions for the CareDesk API.
//!
//! Contains:
//! - JSON request/response types with OpenAPI schemas (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; kept free of core logic so other front-ends can reuse it.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
