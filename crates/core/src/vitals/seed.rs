//! Identity-derived seeds for the synthetic vitals stream.

/// Seed for a patient's synthetic vitals.
///
/// Derived from the patient identifier so the same patient always sees the same baseline
/// and trajectory. Not cryptographic; different identifiers may collide.
///
/// A zero seed selects the entropy fallback: the generator is seeded from the current
/// time instead, so two calls no longer reproduce each other. This only happens for an
/// empty identifier or an explicit `Seed::new(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(u64);

impl Seed {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Sums the UTF-8 byte values of `identifier`.
    pub fn from_identifier(identifier: &str) -> Self {
        Self(identifier.bytes().map(u64::from).sum())
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// A seed taken from the current Unix time.
    pub fn entropy() -> Self {
        Self(chrono::Utc::now().timestamp().unsigned_abs())
    }

    /// True when this seed falls back to time-derived entropy.
    pub fn is_entropy(self) -> bool {
        self.0 == 0
    }

    /// The value the generator stream is actually seeded with.
    pub(crate) fn resolve(self) -> u64 {
        if self.is_entropy() {
            let now = Self::entropy().0;
            tracing::debug!("no identity seed supplied; seeding vitals from clock ({now})");
            now
        } else {
            self.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_identifier_sums_bytes() {
        // 'p' = 112, '0' = 48, '1' = 49
        assert_eq!(Seed::from_identifier("p001").value(), 112 + 48 + 48 + 49);
    }

    #[test]
    fn test_same_identifier_same_seed() {
        assert_eq!(Seed::from_identifier("p002"), Seed::from_identifier("p002"));
        assert_ne!(Seed::from_identifier("p002"), Seed::from_identifier("p003"));
    }

    #[test]
    fn test_empty_identifier_falls_back_to_entropy() {
        let seed = Seed::from_identifier("");
        assert!(seed.is_entropy());
        assert!(seed.resolve() > 0);
    }
}
