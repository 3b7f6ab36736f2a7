//! Multi-channel vitals time series.
//!
//! A [`Series`] is stored column-wise, which is also its wire shape:
//! `{timestamps, hr, spo2, rr, temp, bp_sys, bp_dia, last_updated}`. Every column has the
//! same length as `timestamps`; construction only goes through [`Series::from_points`] so
//! the invariant cannot be broken from outside the module.

use super::channel::{Channel, Measurement, VitalsPoint};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Minute-precision ISO-8601 format used for every series timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(with = "minute_timestamps")]
    timestamps: Vec<NaiveDateTime>,
    hr: Vec<i64>,
    spo2: Vec<i64>,
    rr: Vec<i64>,
    temp: Vec<f64>,
    bp_sys: Vec<i64>,
    bp_dia: Vec<i64>,
    #[serde(with = "optional_minute_timestamp")]
    last_updated: Option<NaiveDateTime>,
}

impl Series {
    /// Builds a series from timestamped points, in the order given.
    pub fn from_points(points: impl IntoIterator<Item = (NaiveDateTime, VitalsPoint)>) -> Self {
        let mut series = Series::default();
        for (timestamp, point) in points {
            series.timestamps.push(timestamp);
            series.hr.push(point.hr);
            series.spo2.push(point.spo2);
            series.rr.push(point.rr);
            series.temp.push(point.temp);
            series.bp_sys.push(point.bp_sys);
            series.bp_dia.push(point.bp_dia);
        }
        series.last_updated = series.timestamps.last().copied();
        series
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Timestamp of the final point, `None` for an empty series.
    pub fn last_updated(&self) -> Option<NaiveDateTime> {
        self.last_updated
    }

    pub fn point(&self, index: usize) -> Option<VitalsPoint> {
        if index >= self.len() {
            return None;
        }
        Some(VitalsPoint {
            hr: self.hr[index],
            spo2: self.spo2[index],
            rr: self.rr[index],
            temp: self.temp[index],
            bp_sys: self.bp_sys[index],
            bp_dia: self.bp_dia[index],
        })
    }

    pub fn points(&self) -> impl Iterator<Item = VitalsPoint> + '_ {
        (0..self.len()).filter_map(|i| self.point(i))
    }

    /// Values of one channel from `start` to the end of the series.
    pub fn values_from(&self, channel: Channel, start: usize) -> Vec<Measurement> {
        let start = start.min(self.len());
        match channel {
            Channel::Hr => counts(&self.hr[start..]),
            Channel::Spo2 => counts(&self.spo2[start..]),
            Channel::Rr => counts(&self.rr[start..]),
            Channel::Temp => self.temp[start..]
                .iter()
                .map(|v| Measurement::Decimal(*v))
                .collect(),
            Channel::BpSys => counts(&self.bp_sys[start..]),
            Channel::BpDia => counts(&self.bp_dia[start..]),
        }
    }
}

fn counts(values: &[i64]) -> Vec<Measurement> {
    values.iter().map(|v| Measurement::Count(*v)).collect()
}

mod minute_timestamps {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamps: &[NaiveDateTime], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(timestamps.iter().map(|t| t.format(TIMESTAMP_FORMAT).to_string()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| {
                NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

pub(crate) mod optional_minute_timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match timestamp {
            Some(t) => serializer.serialize_str(&t.format(TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}
