//! Clinical dashboard: patient list, bedside notes and per-patient vitals.

use crate::constants::{DEFAULT_VITALS_HOURS, PATIENT_ID_ATTEMPTS};
use crate::store::{utc_now, Note, Patient, Records, Snapshot};
use crate::vitals::{assess, Seed, Series, SeriesGenerator, VitalsReport};
use crate::{CoreConfig, CoreError, CoreResult, NonEmptyText};
use rand::Rng;
use std::sync::Arc;

const DEFAULT_STATUS: &str = "Stable";
const DEFAULT_RISK: i64 = 10;
const DEFAULT_NOTE_AUTHOR: &str = "system";

/// Fields accepted when admitting a patient. Only `name` and `bed` are required.
#[derive(Clone, Debug, Default)]
pub struct NewPatient {
    pub name: Option<String>,
    pub bed: Option<String>,
    pub age: Option<u32>,
    pub mrn: Option<String>,
    pub status: Option<String>,
    pub risk: Option<i64>,
}

/// Dashboard operations over the shared record store.
#[derive(Clone, Debug)]
pub struct DashboardService {
    cfg: Arc<CoreConfig>,
    records: Arc<Records>,
}

impl DashboardService {
    pub fn new(cfg: Arc<CoreConfig>, records: Arc<Records>) -> Self {
        Self { cfg, records }
    }

    /// All patients, in admission order.
    pub fn list_patients(&self) -> CoreResult<Vec<Patient>> {
        self.records.read(|s| s.patients.clone())
    }

    /// Admits a patient and creates an empty note list for them.
    ///
    /// Missing optional fields get demo defaults: a random `MRN-nnnn`, status `Stable`,
    /// risk 10. An age of 0 is treated as unknown and a risk of 0 as unset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if `name` or `bed` is missing or blank, or
    /// `CoreError::IdAllocation` if no free id is found.
    pub fn add_patient(&self, new: NewPatient) -> CoreResult<Patient> {
        let (Some(name), Some(bed)) = (
            NonEmptyText::from_optional(new.name),
            NonEmptyText::from_optional(new.bed),
        ) else {
            return Err(CoreError::InvalidInput("name and bed are required".into()));
        };

        let mut rng = rand::thread_rng();
        let mrn = NonEmptyText::from_optional(new.mrn)
            .map(NonEmptyText::into_string)
            .unwrap_or_else(|| format!("MRN-{}", rng.gen_range(1000..=9999)));
        let status = NonEmptyText::from_optional(new.status)
            .map(NonEmptyText::into_string)
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());

        let patient = self.records.update(|snapshot| {
            let id = allocate_patient_id(snapshot, || {
                format!("p{:06}", rng.gen_range(0..1_000_000))
            })?;

            let patient = Patient {
                id: id.clone(),
                name: name.into_string(),
                age: new.age.filter(|a| *a != 0),
                bed: bed.into_string(),
                mrn,
                status,
                risk: new.risk.filter(|r| *r != 0).unwrap_or(DEFAULT_RISK),
            };
            snapshot.patients.push(patient.clone());
            snapshot.notes.entry(id).or_default();
            Ok(patient)
        })?;

        tracing::info!("admitted patient {} to bed {}", patient.id, patient.bed);
        Ok(patient)
    }

    /// Notes recorded against `patient_id`; empty if there are none.
    pub fn notes(&self, patient_id: &str) -> CoreResult<Vec<Note>> {
        self.records
            .read(|s| s.notes.get(patient_id).cloned().unwrap_or_default())
    }

    /// Appends a note for `patient_id`.
    ///
    /// Notes are keyed by id only; the patient does not have to exist in the list.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if `text` is missing or blank.
    pub fn add_note(
        &self,
        patient_id: &str,
        text: Option<String>,
        author: Option<String>,
    ) -> CoreResult<Note> {
        let text = NonEmptyText::from_optional(text)
            .ok_or_else(|| CoreError::InvalidInput("text required".into()))?;
        let author = NonEmptyText::from_optional(author)
            .map(NonEmptyText::into_string)
            .unwrap_or_else(|| DEFAULT_NOTE_AUTHOR.to_string());

        let note = Note {
            text: text.into_string(),
            author,
            ts: utc_now(),
        };

        self.records.update(|snapshot| {
            snapshot
                .notes
                .entry(patient_id.to_string())
                .or_default()
                .push(note.clone());
            Ok(())
        })?;

        tracing::info!("recorded note for patient {patient_id} by {}", note.author);
        Ok(note)
    }

    /// Synthetic vitals for `patient_id` over the last `hours` (48 when `None`).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for a non-positive or oversized window.
    pub fn vitals(&self, patient_id: &str, hours: Option<i64>) -> CoreResult<Series> {
        self.generator().generate(
            hours.unwrap_or(DEFAULT_VITALS_HOURS),
            Seed::from_identifier(patient_id),
        )
    }

    /// Trailing-window summary and alerts over the standard 48h series.
    pub fn summary(&self, patient_id: &str) -> CoreResult<VitalsReport> {
        let series = self.vitals(patient_id, None)?;
        Ok(assess(&series))
    }

    fn generator(&self) -> SeriesGenerator {
        SeriesGenerator::new(self.cfg.step_minutes())
    }
}

/// Draws ids from `source` until one is unused, giving up after a few attempts.
fn allocate_patient_id(
    snapshot: &Snapshot,
    mut source: impl FnMut() -> String,
) -> CoreResult<String> {
    for _attempt in 0..PATIENT_ID_ATTEMPTS {
        let candidate = source();
        if snapshot.patient(&candidate).is_none() && !snapshot.notes.contains_key(&candidate) {
            return Ok(candidate);
        }
        tracing::warn!("patient id {candidate} already in use; retrying");
    }
    Err(CoreError::IdAllocation(PATIENT_ID_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use crate::vitals::Alert;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_service() -> DashboardService {
        let records = Records::open(MemoryStore::new()).expect("open should succeed");
        DashboardService::new(Arc::new(CoreConfig::default()), Arc::new(records))
    }

    fn admission(name: &str, bed: &str) -> NewPatient {
        NewPatient {
            name: Some(name.into()),
            bed: Some(bed.into()),
            ..NewPatient::default()
        }
    }

    #[test]
    fn test_seeded_patients_listed_in_order() {
        let ids: Vec<String> = test_service()
            .list_patients()
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["p001", "p002", "p003"]);
    }

    #[test]
    fn test_add_patient_applies_defaults() {
        let service = test_service();
        let patient = service
            .add_patient(admission("  Nadia R. ", " 5D-01 "))
            .expect("add_patient should succeed");

        assert_eq!(patient.name, "Nadia R.");
        assert_eq!(patient.bed, "5D-01");
        assert_eq!(patient.age, None);
        assert_eq!(patient.status, "Stable");
        assert_eq!(patient.risk, 10);
        assert!(patient.mrn.starts_with("MRN-"));
        let mrn_number: u32 = patient.mrn["MRN-".len()..].parse().unwrap();
        assert!((1000..=9999).contains(&mrn_number));

        assert!(patient.id.starts_with('p'));
        assert_eq!(patient.id.len(), 7);
        assert!(patient.id[1..].chars().all(|c| c.is_ascii_digit()));

        assert_eq!(service.list_patients().unwrap().len(), 4);
        assert!(service.notes(&patient.id).unwrap().is_empty());
    }

    #[test]
    fn test_add_patient_keeps_supplied_fields() {
        let service = test_service();
        let patient = service
            .add_patient(NewPatient {
                age: Some(81),
                mrn: Some("MRN-4242".into()),
                status: Some("Watch".into()),
                risk: Some(55),
                ..admission("Omar T.", "1A-09")
            })
            .unwrap();

        assert_eq!(patient.age, Some(81));
        assert_eq!(patient.mrn, "MRN-4242");
        assert_eq!(patient.status, "Watch");
        assert_eq!(patient.risk, 55);
    }

    #[test]
    fn test_zero_age_and_risk_fall_back() {
        let patient = test_service()
            .add_patient(NewPatient {
                age: Some(0),
                risk: Some(0),
                ..admission("Omar T.", "1A-09")
            })
            .unwrap();
        assert_eq!(patient.age, None);
        assert_eq!(patient.risk, 10);
    }

    #[test]
    fn test_add_patient_requires_name_and_bed() {
        let service = test_service();
        for new in [
            admission("", "3B-12"),
            admission("Amina E.", "   "),
            NewPatient::default(),
        ] {
            let err = service.add_patient(new).unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput(ref m) if m == "name and bed are required"));
        }
        assert_eq!(service.list_patients().unwrap().len(), 3);
    }

    #[test]
    fn test_allocate_patient_id_skips_taken_ids() {
        let snapshot = Snapshot::seed();
        let mut candidates = vec!["p002".to_string(), "p001".to_string(), "p123456".to_string()]
            .into_iter();
        let id = allocate_patient_id(&snapshot, || candidates.next().unwrap()).unwrap();
        assert_eq!(id, "p123456");
    }

    #[test]
    fn test_allocate_patient_id_gives_up() {
        let snapshot = Snapshot::seed();
        let err = allocate_patient_id(&snapshot, || "p001".to_string()).unwrap_err();
        assert!(matches!(err, CoreError::IdAllocation(5)));
    }

    #[test]
    fn test_add_note_trims_and_defaults_author() {
        let service = test_service();
        let note = service
            .add_note("p001", Some("  Taking fluids well. ".into()), Some("   ".into()))
            .unwrap();

        assert_eq!(note.text, "Taking fluids well.");
        assert_eq!(note.author, "system");
        assert_eq!(service.notes("p001").unwrap(), vec![note]);
    }

    #[test]
    fn test_add_note_requires_text() {
        let service = test_service();
        let err = service.add_note("p001", Some(" ".into()), None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref m) if m == "text required"));
        assert!(service.notes("p001").unwrap().is_empty());
    }

    #[test]
    fn test_notes_for_unknown_patient() {
        let service = test_service();
        assert!(service.notes("p999").unwrap().is_empty());

        service
            .add_note("p999", Some("Transferred in".into()), Some("Dr. Osei".into()))
            .unwrap();
        assert_eq!(service.notes("p999").unwrap().len(), 1);
    }

    #[test]
    fn test_notes_survive_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path: PathBuf = temp_dir.path().join("data.json");
        let cfg = Arc::new(CoreConfig::new(path.clone(), 30).unwrap());

        let records = Arc::new(Records::open(JsonFileStore::new(&path)).unwrap());
        DashboardService::new(cfg.clone(), records)
            .add_note("p002", Some("BP trending up".into()), None)
            .unwrap();

        let reopened = Arc::new(Records::open(JsonFileStore::new(&path)).unwrap());
        let notes = DashboardService::new(cfg, reopened).notes("p002").unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "BP trending up");
    }

    #[test]
    fn test_vitals_default_window_and_determinism() {
        let service = test_service();
        let first = service.vitals("p003", None).unwrap();
        let second = service.vitals("p003", None).unwrap();

        assert_eq!(first.len(), 96);
        // Timestamps depend on the clock; the readings must not.
        assert_eq!(
            first.points().collect::<Vec<_>>(),
            second.points().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_vitals_rejects_non_positive_hours() {
        let err = test_service().vitals("p001", Some(0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_summary_uses_standard_window() {
        let report = test_service().summary("p001").unwrap();
        assert_eq!(report.summary.latest.len(), 6);
        assert!(report.last_updated.is_some());
        for alert in &report.alerts {
            assert!(matches!(
                alert,
                Alert::LowSpo2 | Alert::Tachycardia | Alert::Fever | Alert::Hypertension
            ));
        }
    }
}
