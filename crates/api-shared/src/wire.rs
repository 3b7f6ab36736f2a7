//! Request and response bodies for the CareDesk JSON API.
//!
//! Field names are the public contract; existing web clients read these exact keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PingRes {
    pub ok: bool,
    pub version: String,
    pub time: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

// ---------- Civic guidance ----------

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StepsQuery {
    /// Free-text process name, e.g. `birth certificate`
    pub topic: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StepsRes {
    pub topic: String,
    pub steps: Vec<String>,
}

// ---------- Emergency wallet ----------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmergencyProfileRes {
    pub name: String,
    pub id: String,
    pub ice: String,
    pub medical_notes: String,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEmergencyReq {
    pub name: Option<String>,
    pub id: Option<String>,
    pub ice: Option<String>,
    pub medical_notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateEmergencyRes {
    pub ok: bool,
    pub profile: EmergencyProfileRes,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QrQuery {
    /// Text to encode
    pub text: Option<String>,
}

// ---------- Dashboard ----------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    pub bed: String,
    pub mrn: String,
    pub status: String,
    pub risk: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: Vec<PatientRes>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    pub name: Option<String>,
    pub bed: Option<String>,
    pub age: Option<u32>,
    pub mrn: Option<String>,
    pub status: Option<String>,
    pub risk: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientRes {
    pub ok: bool,
    pub patient: PatientRes,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NoteRes {
    pub text: String,
    pub author: String,
    pub ts: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListNotesRes {
    pub notes: Vec<NoteRes>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteReq {
    pub text: Option<String>,
    pub author: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRes {
    pub ok: bool,
    pub note: NoteRes,
}

// ---------- Vitals ----------

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VitalsQuery {
    /// Look-back window in hours (default 48)
    #[param(value_type = Option<i64>)]
    pub hours: Option<String>,
}

/// Column-wise vitals series; every column has one entry per timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalsSeriesRes {
    pub timestamps: Vec<String>,
    pub hr: Vec<i64>,
    pub spo2: Vec<i64>,
    pub rr: Vec<i64>,
    pub temp: Vec<f64>,
    pub bp_sys: Vec<i64>,
    pub bp_dia: Vec<i64>,
    pub last_updated: Option<String>,
}

/// A channel reading: integer for counts, one-decimal float for temperature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Int(i64),
    Float(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadingRange {
    pub min: Reading,
    pub max: Reading,
}

/// Latest readings, trailing-window ranges and deltas keyed by channel name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalsSummary {
    #[schema(value_type = Object)]
    pub latest: BTreeMap<String, Reading>,
    #[serde(rename = "range24h")]
    #[schema(value_type = Object)]
    pub range_24h: BTreeMap<String, ReadingRange>,
    #[schema(value_type = Object)]
    pub deltas: BTreeMap<String, Reading>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalsSummaryRes {
    pub summary: VitalsSummary,
    pub alerts: Vec<String>,
    pub last_updated: Option<String>,
}
