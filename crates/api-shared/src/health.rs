use crate::wire::PingRes;

/// Liveness check shared by the REST server and any future API front-end.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Reports the service as alive, with its version and the current UTC time.
    ///
    /// # Returns
    /// A `PingRes` with `ok = true`.
    pub fn check_health(version: &str) -> PingRes {
        PingRes {
            ok: true,
            version: version.to_string(),
            time: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_health_reports_version_and_utc_time() {
        let res = HealthService::check_health("1.1.0");
        assert!(res.ok);
        assert_eq!(res.version, "1.1.0");
        assert!(res.time.ends_with('Z'));
        assert_eq!(res.time.len(), "2025-01-01T00:00:00Z".len());
    }
}
