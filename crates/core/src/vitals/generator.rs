//! Deterministic synthetic vitals generation.
//!
//! One seeded stream feeds the whole series. Draw order is fixed: the six baselines
//! (hr, spo2, rr, temp, sys, dia), then for every point one gaussian draw per channel in
//! the same order. Any change to that order changes every series already shown to users.

use super::channel::{round_one_decimal, Channel, VitalsPoint};
use super::seed::Seed;
use super::series::Series;
use crate::constants::{MAX_VITALS_HOURS, MAX_STEP_MINUTES};
use crate::{CoreError, CoreResult};
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Minimum systolic/diastolic gap enforced on every generated point.
const PULSE_PRESSURE_FLOOR: i64 = 20;

/// Number of points for a window: `max(2, floor(hours * 60 / step_minutes))`.
pub fn point_count(hours: i64, step_minutes: i64) -> usize {
    let raw = hours.saturating_mul(60) / step_minutes.max(1);
    usize::try_from(raw).unwrap_or(0).max(2)
}

/// Per-series centre values, drawn once before any point.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Baseline {
    hr: f64,
    spo2: f64,
    rr: f64,
    temp: f64,
    bp_sys: f64,
    bp_dia: f64,
}

impl Baseline {
    fn draw(rng: &mut ChaCha8Rng) -> Self {
        let hr = rng.gen_range(68..=78) as f64;
        let spo2 = rng.gen_range(94..=97) as f64;
        let rr = rng.gen_range(14..=18) as f64;
        let temp = 36.8 + rng.gen::<f64>() * 0.4;
        let bp_sys = rng.gen_range(110..=125) as f64;
        let bp_dia = rng.gen_range(70..=82) as f64;
        Self {
            hr,
            spo2,
            rr,
            temp,
            bp_sys,
            bp_dia,
        }
    }
}

/// Produces synthetic vitals series at a fixed sampling interval.
#[derive(Clone, Copy, Debug)]
pub struct SeriesGenerator {
    step_minutes: i64,
}

impl SeriesGenerator {
    pub fn new(step_minutes: i64) -> Self {
        Self { step_minutes }
    }

    pub fn step_minutes(&self) -> i64 {
        self.step_minutes
    }

    /// Generates a series ending at the current local time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if `hours` or the step is not positive, or
    /// exceeds the supported window.
    pub fn generate(&self, hours: i64, seed: Seed) -> CoreResult<Series> {
        self.generate_at(hours, seed, Local::now().naive_local())
    }

    /// Generates a series ending at `now`.
    ///
    /// Timestamps run from `now - hours` in `step_minutes` increments, ascending.
    /// `now` is truncated to the minute so every timestamp equals its wire form.
    ///
    /// # Errors
    ///
    /// Same as [`SeriesGenerator::generate`].
    pub fn generate_at(&self, hours: i64, seed: Seed, now: NaiveDateTime) -> CoreResult<Series> {
        validate_window(hours, self.step_minutes)?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed.resolve());
        let points = point_count(hours, self.step_minutes);
        let now = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        let start = now - Duration::hours(hours);

        let baseline = Baseline::draw(&mut rng);
        tracing::debug!(points, ?baseline, "generating vitals series");

        let series = Series::from_points((0..points).map(|i| {
            let offset = Duration::minutes(self.step_minutes * i as i64);
            (start + offset, draw_point(&mut rng, &baseline))
        }));

        Ok(series)
    }
}

/// Validates the requested window without coercing it.
fn validate_window(hours: i64, step_minutes: i64) -> CoreResult<()> {
    if hours <= 0 {
        return Err(CoreError::InvalidArgument(format!(
            "hours must be positive, got {hours}"
        )));
    }
    if step_minutes <= 0 {
        return Err(CoreError::InvalidArgument(format!(
            "step_minutes must be positive, got {step_minutes}"
        )));
    }
    if hours > MAX_VITALS_HOURS {
        return Err(CoreError::InvalidArgument(format!(
            "hours must be at most {MAX_VITALS_HOURS}, got {hours}"
        )));
    }
    if step_minutes > MAX_STEP_MINUTES {
        return Err(CoreError::InvalidArgument(format!(
            "step_minutes must be at most {MAX_STEP_MINUTES}, got {step_minutes}"
        )));
    }
    Ok(())
}

fn gauss(rng: &mut ChaCha8Rng, mean: f64, channel: Channel) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + channel.stddev() * z
}

fn clamp(channel: Channel, value: f64) -> f64 {
    let (lo, hi) = channel.bounds();
    value.clamp(lo, hi)
}

fn clamped_count(rng: &mut ChaCha8Rng, mean: f64, channel: Channel) -> i64 {
    clamp(channel, gauss(rng, mean, channel).round()) as i64
}

fn draw_point(rng: &mut ChaCha8Rng, baseline: &Baseline) -> VitalsPoint {
    let hr = clamped_count(rng, baseline.hr, Channel::Hr);
    let spo2 = clamped_count(rng, baseline.spo2, Channel::Spo2);
    let rr = clamped_count(rng, baseline.rr, Channel::Rr);
    let temp = round_one_decimal(clamp(Channel::Temp, gauss(rng, baseline.temp, Channel::Temp)));
    let bp_sys = clamped_count(rng, baseline.bp_sys, Channel::BpSys);
    let mut bp_dia = clamped_count(rng, baseline.bp_dia, Channel::BpDia);

    if bp_dia > bp_sys - PULSE_PRESSURE_FLOOR {
        let (dia_floor, _) = Channel::BpDia.bounds();
        bp_dia = (bp_sys - PULSE_PRESSURE_FLOOR).max(dia_floor as i64);
    }

    VitalsPoint {
        hr,
        spo2,
        rr,
        temp,
        bp_sys,
        bp_dia,
    }
}

/// Generates a series ending now; see [`SeriesGenerator::generate`].
pub fn generate(hours: i64, step_minutes: i64, seed: Seed) -> CoreResult<Series> {
    SeriesGenerator::new(step_minutes).generate(hours, seed)
}
