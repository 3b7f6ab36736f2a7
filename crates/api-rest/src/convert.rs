//! Conversions from core types to wire types.

use api_shared::{
    EmergencyProfileRes, NoteRes, PatientRes, Reading, ReadingRange, VitalsSeriesRes,
    VitalsSummary, VitalsSummaryRes,
};
use caredesk_core::store::{EmergencyProfile, Note, Patient};
use caredesk_core::vitals::{Measurement, Series, VitalsPoint, VitalsReport, TIMESTAMP_FORMAT};
use chrono::{DateTime, NaiveDateTime, Utc};

const UTC_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn utc_seconds(ts: DateTime<Utc>) -> String {
    ts.format(UTC_SECONDS_FORMAT).to_string()
}

fn minutes(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn reading(m: Measurement) -> Reading {
    match m {
        Measurement::Count(v) => Reading::Int(v),
        Measurement::Decimal(v) => Reading::Float(v),
    }
}

pub(crate) fn patient_res(p: Patient) -> PatientRes {
    PatientRes {
        id: p.id,
        name: p.name,
        age: p.age,
        bed: p.bed,
        mrn: p.mrn,
        status: p.status,
        risk: p.risk,
    }
}

pub(crate) fn note_res(n: Note) -> NoteRes {
    NoteRes {
        text: n.text,
        author: n.author,
        ts: utc_seconds(n.ts),
    }
}

pub(crate) fn profile_res(p: EmergencyProfile) -> EmergencyProfileRes {
    EmergencyProfileRes {
        name: p.name,
        id: p.id,
        ice: p.ice,
        medical_notes: p.medical_notes,
        updated_at: p.updated_at.map(utc_seconds),
    }
}

pub(crate) fn series_res(series: &Series) -> VitalsSeriesRes {
    let points: Vec<VitalsPoint> = series.points().collect();
    let column = |f: fn(&VitalsPoint) -> i64| points.iter().map(f).collect::<Vec<_>>();

    VitalsSeriesRes {
        timestamps: series.timestamps().iter().copied().map(minutes).collect(),
        hr: column(|p| p.hr),
        spo2: column(|p| p.spo2),
        rr: column(|p| p.rr),
        temp: points.iter().map(|p| p.temp).collect(),
        bp_sys: column(|p| p.bp_sys),
        bp_dia: column(|p| p.bp_dia),
        last_updated: series.last_updated().map(minutes),
    }
}

pub(crate) fn summary_res(report: VitalsReport) -> VitalsSummaryRes {
    let summary = report.summary;
    VitalsSummaryRes {
        summary: VitalsSummary {
            latest: summary
                .latest
                .into_iter()
                .map(|(c, m)| (c.name().to_string(), reading(m)))
                .collect(),
            range_24h: summary
                .range_24h
                .into_iter()
                .map(|(c, r)| {
                    (
                        c.name().to_string(),
                        ReadingRange {
                            min: reading(r.min),
                            max: reading(r.max),
                        },
                    )
                })
                .collect(),
            deltas: summary
                .deltas
                .into_iter()
                .map(|(c, m)| (c.name().to_string(), reading(m)))
                .collect(),
        },
        alerts: report
            .alerts
            .into_iter()
            .map(|a| a.label().to_string())
            .collect(),
        last_updated: report.last_updated.map(minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caredesk_core::vitals::{assess, Seed, SeriesGenerator};
    use chrono::NaiveDate;

    fn fixed_series(patient_id: &str) -> Series {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        SeriesGenerator::new(30)
            .generate_at(48, Seed::from_identifier(patient_id), now)
            .expect("generation should succeed")
    }

    #[test]
    fn test_series_res_matches_core_json() {
        for pid in ["p001", "p002", "p003"] {
            let series = fixed_series(pid);
            let core = serde_json::to_value(&series).unwrap();
            let wire = serde_json::to_value(series_res(&series)).unwrap();
            assert_eq!(core, wire, "{pid}");
        }
    }

    #[test]
    fn test_summary_res_matches_core_json() {
        for pid in ["p001", "p002", "p003"] {
            let report = assess(&fixed_series(pid));
            let core = serde_json::to_value(&report).unwrap();
            let wire = serde_json::to_value(summary_res(report)).unwrap();
            assert_eq!(core, wire, "{pid}");
        }
    }
}
