//! Rolling summary and threshold alerting over a generated series.
//!
//! The summary window is the trailing half of the series
//! (`max(1, floor(len * 24 / 48))` points). For the standard 48h series that is the last
//! 24 hours; for other windows it stays proportional rather than becoming an absolute
//! 24h cutoff.

use super::channel::{Channel, Measurement};
use super::series::{optional_minute_timestamp, Series};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

const SPO2_LOW_BELOW: f64 = 92.0;
const HR_TACHYCARDIA_ABOVE: f64 = 110.0;
const TEMP_FEVER_AT: f64 = 38.0;
const BP_SYS_HYPERTENSION_AT: f64 = 160.0;

/// Inclusive min/max of a channel over the summary window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Range {
    pub min: Measurement,
    pub max: Measurement,
}

/// Latest readings, window ranges and window deltas keyed by channel.
///
/// All maps are empty for an empty series.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub latest: BTreeMap<Channel, Measurement>,
    #[serde(rename = "range24h")]
    pub range_24h: BTreeMap<Channel, Range>,
    pub deltas: BTreeMap<Channel, Measurement>,
}

/// A threshold crossing on the latest reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alert {
    LowSpo2,
    Tachycardia,
    Fever,
    Hypertension,
}

impl Alert {
    pub fn label(self) -> &'static str {
        match self {
            Alert::LowSpo2 => "Low SpO₂",
            Alert::Tachycardia => "Tachycardia",
            Alert::Fever => "Fever",
            Alert::Hypertension => "Hypertension",
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Alert {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Summary, alerts and freshness of one patient's series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VitalsReport {
    pub summary: Summary,
    pub alerts: Vec<Alert>,
    #[serde(with = "optional_minute_timestamp")]
    pub last_updated: Option<NaiveDateTime>,
}

/// Number of trailing points covered by the summary window.
pub fn trailing_window_len(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (len * 24 / 48).max(1)
}

/// Summarises the trailing window of `series`.
pub fn summarize(series: &Series) -> Summary {
    if series.is_empty() {
        return Summary::default();
    }

    let window_start = series.len() - trailing_window_len(series.len());
    let mut summary = Summary::default();

    for channel in Channel::ALL {
        let window = series.values_from(channel, window_start);
        let (Some(first), Some(last)) = (window.first().copied(), window.last().copied()) else {
            continue;
        };

        let range = window.iter().skip(1).fold(
            Range {
                min: first,
                max: first,
            },
            |range, value| Range {
                min: if value.as_f64() < range.min.as_f64() {
                    *value
                } else {
                    range.min
                },
                max: if value.as_f64() > range.max.as_f64() {
                    *value
                } else {
                    range.max
                },
            },
        );

        summary.latest.insert(channel, last);
        summary.range_24h.insert(channel, range);
        summary.deltas.insert(channel, last.delta_from(first));
    }

    summary
}

/// Threshold alerts for the latest readings, in fixed check order.
///
/// A missing channel never triggers its alert.
pub fn alerts(latest: &BTreeMap<Channel, Measurement>) -> Vec<Alert> {
    let value = |channel: Channel, missing: f64| {
        latest
            .get(&channel)
            .map(|m| m.as_f64())
            .unwrap_or(missing)
    };

    let mut alerts = Vec::new();
    if value(Channel::Spo2, 100.0) < SPO2_LOW_BELOW {
        alerts.push(Alert::LowSpo2);
    }
    if value(Channel::Hr, 0.0) > HR_TACHYCARDIA_ABOVE {
        alerts.push(Alert::Tachycardia);
    }
    if value(Channel::Temp, 0.0) >= TEMP_FEVER_AT {
        alerts.push(Alert::Fever);
    }
    if value(Channel::BpSys, 0.0) >= BP_SYS_HYPERTENSION_AT {
        alerts.push(Alert::Hypertension);
    }
    alerts
}

/// Summarises `series` and evaluates alerts on its latest readings.
pub fn assess(series: &Series) -> VitalsReport {
    let summary = summarize(series);
    let alerts = alerts(&summary.latest);
    VitalsReport {
        summary,
        alerts,
        last_updated: series.last_updated(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::{Seed, SeriesGenerator, VitalsPoint};
    use chrono::{Duration, NaiveDate};

    fn nominal() -> VitalsPoint {
        VitalsPoint {
            hr: 75,
            spo2: 96,
            rr: 16,
            temp: 36.9,
            bp_sys: 118,
            bp_dia: 76,
        }
    }

    fn series_of(points: Vec<VitalsPoint>) -> Series {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Series::from_points(
            points
                .into_iter()
                .enumerate()
                .map(|(i, p)| (start + Duration::minutes(30 * i as i64), p)),
        )
    }

    fn latest_of(point: VitalsPoint) -> BTreeMap<Channel, Measurement> {
        Channel::ALL.into_iter().map(|c| (c, point.get(c))).collect()
    }

    #[test]
    fn test_window_is_trailing_half() {
        assert_eq!(trailing_window_len(96), 48);
        assert_eq!(trailing_window_len(48), 24);
        assert_eq!(trailing_window_len(3), 1);
        assert_eq!(trailing_window_len(2), 1);
        assert_eq!(trailing_window_len(1), 1);
        assert_eq!(trailing_window_len(0), 0);
    }

    #[test]
    fn test_empty_series_gives_empty_summary() {
        let summary = summarize(&Series::default());
        assert!(summary.latest.is_empty());
        assert!(summary.range_24h.is_empty());
        assert!(summary.deltas.is_empty());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"latest": {}, "range24h": {}, "deltas": {}})
        );
    }

    #[test]
    fn test_range_and_delta_cover_only_window() {
        let mut points = vec![nominal(); 6];
        // Outside the window (first half): must not affect ranges.
        points[0].hr = 140;
        points[2].hr = 41;
        // Window is points[3..6].
        points[3].hr = 80;
        points[4].hr = 70;
        points[5].hr = 77;
        points[3].temp = 37.4;
        points[5].temp = 36.8;

        let summary = summarize(&series_of(points));

        assert_eq!(summary.latest[&Channel::Hr], Measurement::Count(77));
        assert_eq!(
            summary.range_24h[&Channel::Hr],
            Range {
                min: Measurement::Count(70),
                max: Measurement::Count(80)
            }
        );
        assert_eq!(summary.deltas[&Channel::Hr], Measurement::Count(-3));
        assert_eq!(summary.deltas[&Channel::Temp], Measurement::Decimal(-0.6));
        assert_eq!(summary.deltas[&Channel::Spo2], Measurement::Count(0));
    }

    #[test]
    fn test_delta_matches_window_start_on_generated_series() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let series = SeriesGenerator::new(30)
            .generate_at(48, Seed::from_identifier("p002"), now)
            .unwrap();
        let summary = summarize(&series);

        let window_start = series.point(96 - 48).unwrap();
        let latest = series.point(95).unwrap();
        assert_eq!(
            summary.deltas[&Channel::Hr],
            Measurement::Count(latest.hr - window_start.hr)
        );
        assert_eq!(summary.latest[&Channel::BpDia], Measurement::Count(latest.bp_dia));
        assert_eq!(summary.latest.len(), 6);
    }

    #[test]
    fn test_low_spo2_alert() {
        let mut point = nominal();
        point.spo2 = 90;
        assert!(alerts(&latest_of(point)).contains(&Alert::LowSpo2));
    }

    #[test]
    fn test_tachycardia_only() {
        let mut point = nominal();
        point.hr = 115;
        point.spo2 = 96;
        assert_eq!(alerts(&latest_of(point)), vec![Alert::Tachycardia]);
    }

    #[test]
    fn test_fever_then_hypertension() {
        let mut point = nominal();
        point.temp = 38.2;
        point.bp_sys = 165;
        assert_eq!(
            alerts(&latest_of(point)),
            vec![Alert::Fever, Alert::Hypertension]
        );
    }

    #[test]
    fn test_nominal_reading_has_no_alerts() {
        assert!(alerts(&latest_of(nominal())).is_empty());
    }

    #[test]
    fn test_threshold_edges() {
        let mut point = nominal();
        point.spo2 = 92;
        point.hr = 110;
        point.temp = 38.0;
        point.bp_sys = 160;
        assert_eq!(
            alerts(&latest_of(point)),
            vec![Alert::Fever, Alert::Hypertension]
        );
    }

    #[test]
    fn test_missing_channels_never_alert() {
        assert!(alerts(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_report_wire_shape() {
        let mut last = nominal();
        last.spo2 = 90;
        let series = series_of(vec![nominal(), nominal(), nominal(), last]);
        let report = assess(&series);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["alerts"], serde_json::json!(["Low SpO₂"]));
        assert_eq!(json["last_updated"], "2025-01-01T01:30");
        assert_eq!(json["summary"]["latest"]["spo2"], 90);
        assert_eq!(json["summary"]["range24h"]["spo2"]["min"], 90);
        assert_eq!(json["summary"]["range24h"]["spo2"]["max"], 96);
        assert_eq!(json["summary"]["deltas"]["bp_sys"], 0);
    }
}
