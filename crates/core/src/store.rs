//! Flat-file record persistence.
//!
//! Patients, clinical notes and the emergency profile live together in one [`Snapshot`].
//! The whole snapshot is loaded at startup and rewritten after every mutation. Writes go
//! to `<file>.tmp` first and are renamed over the target, so readers of the file never
//! observe a half-written store.
//!
//! ```text
//! data.json
//! {
//!   "emergency_profile": { ... },
//!   "patients": [ ... ],
//!   "notes": { "p001": [ ... ] }
//! }
//! ```

use crate::constants::TEMP_FILE_SUFFIX;
use crate::{CoreError, CoreResult};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Current UTC time at second precision, as written into the store.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Identity card shown in the emergency wallet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    /// In-case-of-emergency contact.
    #[serde(default)]
    pub ice: String,
    #[serde(default)]
    pub medical_notes: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    pub bed: String,
    #[serde(default)]
    pub mrn: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub risk: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    pub author: String,
    pub ts: DateTime<Utc>,
}

/// Everything the record store persists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub emergency_profile: EmergencyProfile,
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub notes: BTreeMap<String, Vec<Note>>,
}

impl Snapshot {
    /// Demo records written on first start.
    pub fn seed() -> Self {
        let patient = |id: &str, name: &str, age, bed: &str, mrn: &str, status: &str, risk| Patient {
            id: id.into(),
            name: name.into(),
            age: Some(age),
            bed: bed.into(),
            mrn: mrn.into(),
            status: status.into(),
            risk,
        };

        let patients = vec![
            patient("p001", "Amina E.", 64, "3B-12", "MRN-1001", "Stable", 12),
            patient("p002", "Rahim K.", 72, "4A-03", "MRN-1002", "Watch", 38),
            patient("p003", "Leyla S.", 58, "2C-07", "MRN-1003", "Critical", 72),
        ];
        let notes = patients
            .iter()
            .map(|p| (p.id.clone(), Vec::new()))
            .collect();

        Self {
            emergency_profile: EmergencyProfile {
                name: "Demo User".into(),
                id: "AZ-ABC-123456".into(),
                ice: "+1 480 555 1212".into(),
                medical_notes: "No known allergies. Blood type O+.".into(),
                updated_at: Some(utc_now()),
            },
            patients,
            notes,
        }
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }
}

/// Backing storage for a [`Snapshot`].
///
/// Implementations must make `save` atomic: after it returns, `load` sees either the old
/// or the new snapshot, never a mix.
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    fn load(&self) -> CoreResult<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> CoreResult<()>;
}

/// Pretty-printed JSON file with write-then-rename replacement.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(TEMP_FILE_SUFFIX);
        PathBuf::from(name)
    }
}

impl RecordStore for JsonFileStore {
    /// Loads the store, writing the demo seed first if the file does not exist yet.
    fn load(&self) -> CoreResult<Snapshot> {
        if !self.path.exists() {
            tracing::info!("record store {} not found; seeding demo records", self.path.display());
            let snapshot = Snapshot::seed();
            self.save(&snapshot)?;
            return Ok(snapshot);
        }

        let contents = fs::read_to_string(&self.path).map_err(CoreError::StoreRead)?;
        serde_json::from_str(&contents).map_err(CoreError::Deserialization)
    }

    fn save(&self, snapshot: &Snapshot) -> CoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(CoreError::StoreWrite)?;
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(CoreError::Serialization)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(CoreError::StoreWrite)?;
        fs::rename(&tmp, &self.path).map_err(CoreError::StoreWrite)?;
        Ok(())
    }
}

/// Process-local store, used by tests and the CLI's ephemeral mode.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> CoreResult<Snapshot> {
        let mut saved = self.saved.lock().map_err(|_| CoreError::StorePoisoned)?;
        Ok(saved.get_or_insert_with(Snapshot::seed).clone())
    }

    fn save(&self, snapshot: &Snapshot) -> CoreResult<()> {
        let mut saved = self.saved.lock().map_err(|_| CoreError::StorePoisoned)?;
        *saved = Some(snapshot.clone());
        Ok(())
    }
}

/// The live snapshot plus the store it is persisted to.
///
/// Mutations run against a copy which is saved before it replaces the live snapshot, so a
/// failed write leaves memory and disk in agreement. The mutex makes this process the only
/// writer.
#[derive(Debug)]
pub struct Records {
    store: Box<dyn RecordStore>,
    snapshot: Mutex<Snapshot>,
}

impl Records {
    /// Loads the initial snapshot from `store`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the snapshot cannot be read or seeded.
    pub fn open(store: impl RecordStore + 'static) -> CoreResult<Self> {
        let snapshot = store.load()?;
        Ok(Self {
            store: Box::new(store),
            snapshot: Mutex::new(snapshot),
        })
    }

    pub fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> CoreResult<T> {
        let snapshot = self.snapshot.lock().map_err(|_| CoreError::StorePoisoned)?;
        Ok(f(&snapshot))
    }

    /// Applies `f` to a copy of the snapshot, persists it, then makes it live.
    pub fn update<T>(&self, f: impl FnOnce(&mut Snapshot) -> CoreResult<T>) -> CoreResult<T> {
        let mut snapshot = self.snapshot.lock().map_err(|_| CoreError::StorePoisoned)?;
        let mut next = snapshot.clone();
        let out = f(&mut next)?;
        self.store.save(&next)?;
        *snapshot = next;
        Ok(out)
    }
}
