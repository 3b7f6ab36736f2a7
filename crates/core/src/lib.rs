//! # CareDesk Core
//!
//! Core logic for the CareDesk demo backend.
//!
//! This crate contains pure data operations and flat-file persistence:
//! - the synthetic vitals engine (deterministic per-patient series, trailing-window
//!   summary and threshold alerts)
//! - the record store holding patients, notes and the emergency profile
//! - dashboard, emergency wallet and civic guidance services
//!
//! **No API concerns**: HTTP servers, routing and wire types belong in `api-rest` and
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod services;
pub mod store;
pub mod vitals;

pub use caredesk_types::{NonEmptyText, TextError};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use services::{DashboardService, NewPatient, ProfileUpdate, WalletService};
pub use store::{JsonFileStore, MemoryStore, RecordStore, Records};
