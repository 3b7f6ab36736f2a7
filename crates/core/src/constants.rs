//! Constants used throughout the CareDesk core crate.

/// Version reported by the ping endpoint.
pub const APP_VERSION: &str = "1.1.0";

/// Default path of the JSON record store when no explicit file is configured.
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Suffix appended to the store path for the write-then-rename temporary file.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Default look-back window for generated vitals, in hours.
pub const DEFAULT_VITALS_HOURS: i64 = 48;

/// Sampling interval used by every current call site, in minutes.
pub const DEFAULT_STEP_MINUTES: i64 = 30;

/// Maximum attempts to allocate an unused patient id before giving up.
pub const PATIENT_ID_ATTEMPTS: usize = 5;

/// Reply used when no civic process matches the requested topic.
pub const NO_STEPS_FOUND: &str = "Sorry, no steps found for this topic yet.";

/// Longest look-back window the vitals generator accepts, in hours (one year).
pub const MAX_VITALS_HOURS: i64 = 24 * 365;

/// Longest sampling interval the vitals generator accepts, in minutes.
pub const MAX_STEP_MINUTES: i64 = MAX_VITALS_HOURS * 60;
