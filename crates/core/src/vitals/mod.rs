//! Synthetic vitals engine.
//!
//! Data flows one way: patient identifier → [`Seed`] → [`SeriesGenerator`] → [`Series`]
//! → [`summarize`]/[`assess`]. Both stages are pure and construct their own state per
//! call, so they are safe to run concurrently across requests without locking.

mod channel;
mod generator;
mod seed;
mod series;
mod summary;

pub use channel::{round_one_decimal, Channel, Measurement, VitalsPoint};
pub use generator::{generate, point_count, SeriesGenerator};
pub use seed::Seed;
pub use series::{Series, TIMESTAMP_FORMAT};
pub use summary::{alerts, assess, summarize, trailing_window_len, Alert, Range, Summary, VitalsReport};
