//! Services over the record store and the vitals engine.
//!
//! Each service is cheap to clone and shares the same [`Records`](crate::store::Records)
//! through an `Arc`. None of them know about HTTP.

pub mod civic;
pub mod dashboard;
pub mod wallet;

pub use civic::{lookup as lookup_steps, StepsAnswer};
pub use dashboard::{DashboardService, NewPatient};
pub use wallet::{ProfileUpdate, WalletService};
