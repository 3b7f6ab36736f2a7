//! Vital-sign channels and the values they carry.

use serde::{Deserialize, Serialize};

/// One named vital-sign measurement stream.
///
/// The declaration order is the wire order used for every keyed map in a summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Heart rate, beats per minute.
    Hr,
    /// Blood-oxygen saturation, percent.
    Spo2,
    /// Respiratory rate, breaths per minute.
    Rr,
    /// Body temperature, degrees Celsius to one decimal place.
    Temp,
    /// Systolic blood pressure, mmHg.
    BpSys,
    /// Diastolic blood pressure, mmHg.
    BpDia,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Hr,
        Channel::Spo2,
        Channel::Rr,
        Channel::Temp,
        Channel::BpSys,
        Channel::BpDia,
    ];

    /// Wire name of the channel.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Hr => "hr",
            Channel::Spo2 => "spo2",
            Channel::Rr => "rr",
            Channel::Temp => "temp",
            Channel::BpSys => "bp_sys",
            Channel::BpDia => "bp_dia",
        }
    }

    /// Standard deviation of per-point samples around the series baseline.
    pub fn stddev(self) -> f64 {
        match self {
            Channel::Hr => 4.0,
            Channel::Spo2 => 1.2,
            Channel::Rr => 2.0,
            Channel::Temp => 0.15,
            Channel::BpSys => 6.0,
            Channel::BpDia => 5.0,
        }
    }

    /// Inclusive physiological range every generated value is clamped into.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Channel::Hr => (40.0, 150.0),
            Channel::Spo2 => (85.0, 100.0),
            Channel::Rr => (6.0, 40.0),
            Channel::Temp => (34.0, 41.0),
            Channel::BpSys => (80.0, 200.0),
            Channel::BpDia => (40.0, 120.0),
        }
    }

    /// Temperature is the only channel reported with a decimal place.
    pub fn is_decimal(self) -> bool {
        matches!(self, Channel::Temp)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single channel value: an integer count or a one-decimal float.
///
/// Serialises as a bare JSON number so the wire shape matches the column arrays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Count(i64),
    Decimal(f64),
}

impl Measurement {
    pub fn as_f64(self) -> f64 {
        match self {
            Measurement::Count(v) => v as f64,
            Measurement::Decimal(v) => v,
        }
    }

    /// Net change from `start` to `self`.
    ///
    /// Counts subtract exactly; anything involving a decimal is rounded to one place.
    pub fn delta_from(self, start: Measurement) -> Measurement {
        match (self, start) {
            (Measurement::Count(end), Measurement::Count(start)) => Measurement::Count(end - start),
            (end, start) => Measurement::Decimal(round_one_decimal(end.as_f64() - start.as_f64())),
        }
    }
}

/// Rounds to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// All six channel values at one timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VitalsPoint {
    pub hr: i64,
    pub spo2: i64,
    pub rr: i64,
    pub temp: f64,
    pub bp_sys: i64,
    pub bp_dia: i64,
}

impl VitalsPoint {
    pub fn get(&self, channel: Channel) -> Measurement {
        match channel {
            Channel::Hr => Measurement::Count(self.hr),
            Channel::Spo2 => Measurement::Count(self.spo2),
            Channel::Rr => Measurement::Count(self.rr),
            Channel::Temp => Measurement::Decimal(self.temp),
            Channel::BpSys => Measurement::Count(self.bp_sys),
            Channel::BpDia => Measurement::Count(self.bp_dia),
        }
    }
}
