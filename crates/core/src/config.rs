//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Request handling never reads process-wide environment variables, which keeps behaviour
//! consistent across threads and test harnesses.

use crate::constants::{DEFAULT_DATA_FILE, DEFAULT_STEP_MINUTES};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
    step_minutes: i64,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if `step_minutes` is not positive.
    pub fn new(data_file: PathBuf, step_minutes: i64) -> CoreResult<Self> {
        if step_minutes <= 0 {
            return Err(CoreError::InvalidArgument(format!(
                "step_minutes must be positive, got {step_minutes}"
            )));
        }

        Ok(Self {
            data_file,
            step_minutes,
        })
    }

    /// Path of the JSON file holding patients, notes and the emergency profile.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Sampling interval for generated vitals.
    pub fn step_minutes(&self) -> i64 {
        self.step_minutes
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

/// Resolve the record store path from an optional override value.
///
/// Blank values fall back to [`DEFAULT_DATA_FILE`] in the working directory.
pub fn data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

/// Parse the vitals sampling interval from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_STEP_MINUTES`].
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if the value is not an integer.
pub fn step_minutes_from_env_value(value: Option<String>) -> CoreResult<i64> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_STEP_MINUTES),
        Some(v) => v.parse::<i64>().map_err(|e| {
            CoreError::InvalidArgument(format!("CAREDESK_STEP_MINUTES is not an integer: {e}"))
        }),
    }
}
