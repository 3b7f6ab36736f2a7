//! Emergency identity wallet.

use crate::store::{utc_now, EmergencyProfile, Records};
use crate::CoreResult;
use std::sync::Arc;

/// Partial update of the emergency profile. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub id: Option<String>,
    pub ice: Option<String>,
    pub medical_notes: Option<String>,
}

#[derive(Clone, Debug)]
pub struct WalletService {
    records: Arc<Records>,
}

impl WalletService {
    pub fn new(records: Arc<Records>) -> Self {
        Self { records }
    }

    pub fn profile(&self) -> CoreResult<EmergencyProfile> {
        self.records.read(|s| s.emergency_profile.clone())
    }

    /// Overwrites the supplied fields, stamps `updated_at` and persists the profile.
    pub fn update(&self, update: ProfileUpdate) -> CoreResult<EmergencyProfile> {
        let profile = self.records.update(|snapshot| {
            let profile = &mut snapshot.emergency_profile;
            for (field, value) in [
                (&mut profile.name, update.name),
                (&mut profile.id, update.id),
                (&mut profile.ice, update.ice),
                (&mut profile.medical_notes, update.medical_notes),
            ] {
                if let Some(value) = value {
                    *field = value;
                }
            }
            profile.updated_at = Some(utc_now());
            Ok(profile.clone())
        })?;

        tracing::info!("emergency profile updated");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_service() -> WalletService {
        WalletService::new(Arc::new(Records::open(MemoryStore::new()).unwrap()))
    }

    #[test]
    fn test_seeded_profile() {
        let profile = test_service().profile().unwrap();
        assert_eq!(profile.id, "AZ-ABC-123456");
        assert_eq!(profile.ice, "+1 480 555 1212");
        assert!(profile.updated_at.is_some());
    }

    #[test]
    fn test_update_only_touches_supplied_fields() {
        let service = test_service();
        let before = service.profile().unwrap();

        let after = service
            .update(ProfileUpdate {
                medical_notes: Some("Penicillin allergy.".into()),
                ice: Some(String::new()),
                ..ProfileUpdate::default()
            })
            .unwrap();

        assert_eq!(after.name, before.name);
        assert_eq!(after.id, before.id);
        assert_eq!(after.ice, "");
        assert_eq!(after.medical_notes, "Penicillin allergy.");
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(service.profile().unwrap(), after);
    }
}
