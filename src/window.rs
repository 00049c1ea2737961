//! Fixed-length sliding windows of core samples
//!
//! Every [`CoreSeries`] is full from the moment it is created: the window is
//! pre-filled with zero readings carrying the core's initial thresholds, and each
//! push evicts exactly one sample. The [`CoreSet`] is fixed at startup; a core
//! that stops reporting keeps its series and receives zero readings until it
//! comes back.

use crate::error::{Error, Result};
use crate::hwmon::{CoreSample, SensorSnapshot};
use std::collections::VecDeque;

/// Y-axis ceiling used when every value in a window is zero
const DEFAULT_CEILING: f64 = 100.0;

/// Headroom above the critical threshold
const CEILING_FACTOR: f64 = 1.1;

/// Sliding window of samples for one core
#[derive(Debug, Clone)]
pub struct CoreSeries {
    label: String,
    capacity: usize,
    data: VecDeque<CoreSample>,
    vanished: bool,
}

impl CoreSeries {
    /// Create a full window of `capacity` zero readings with `initial`'s thresholds
    pub fn new(initial: &CoreSample, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidParameter(
                "window capacity must be at least 1".into(),
            ));
        }

        let data = std::iter::repeat(initial.zeroed()).take(capacity).collect();
        Ok(Self {
            label: initial.label.clone(),
            capacity,
            data,
            vanished: false,
        })
    }

    /// Append one sample and evict the oldest
    ///
    /// `None` means the core is missing from this tick: a zero reading that keeps
    /// the previous thresholds is pushed instead.
    pub fn push(&mut self, sample: Option<&CoreSample>) {
        let next = match sample {
            Some(sample) => sample.clone(),
            None => self
                .data
                .back()
                .map(CoreSample::zeroed)
                .unwrap_or_else(|| CoreSample::new(self.label.clone(), 0.0, 0.0, 0.0)),
        };
        self.vanished = sample.is_none();

        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(next);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the last push was a substitute for a missing reading
    pub fn is_vanished(&self) -> bool {
        self.vanished
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&CoreSample> {
        self.data.back()
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &CoreSample> {
        self.data.iter()
    }

    pub fn currents(&self) -> Vec<f32> {
        self.data.iter().map(|s| s.current).collect()
    }

    /// `(slot, current)` points for chart rendering
    pub fn current_points(&self) -> Vec<(f64, f64)> {
        self.points(|s| s.current)
    }

    /// `(slot, high)` points for chart rendering
    pub fn high_points(&self) -> Vec<(f64, f64)> {
        self.points(|s| s.high)
    }

    /// `(slot, critical)` points for chart rendering
    pub fn critical_points(&self) -> Vec<(f64, f64)> {
        self.points(|s| s.critical)
    }

    fn points(&self, value: impl Fn(&CoreSample) -> f32) -> Vec<(f64, f64)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, value(s) as f64))
            .collect()
    }

    /// Upper bound of the y-axis: 10% above the highest critical threshold
    pub fn y_ceiling(&self) -> f64 {
        let critical = self.max_of(|s| s.critical);
        if critical > 0.0 {
            return CEILING_FACTOR * critical;
        }
        let current = self.max_of(|s| s.current);
        if current > 0.0 {
            return CEILING_FACTOR * current;
        }
        DEFAULT_CEILING
    }

    fn max_of(&self, value: impl Fn(&CoreSample) -> f32) -> f64 {
        self.data.iter().map(value).fold(0.0_f32, f32::max) as f64
    }
}

/// All monitored cores, in startup enumeration order
#[derive(Debug, Clone)]
pub struct CoreSet {
    series: Vec<CoreSeries>,
}

impl CoreSet {
    /// Build one series per distinct label in the initial enumeration
    pub fn from_snapshot(snapshot: &SensorSnapshot, capacity: usize) -> Result<Self> {
        if snapshot.is_empty() {
            return Err(Error::SensorUnavailable(
                "no core temperature entries reported".into(),
            ));
        }

        let mut series: Vec<CoreSeries> = Vec::with_capacity(snapshot.len());
        for sample in snapshot.samples() {
            // Lookups are by label, so a repeat would mirror the first entry's readings
            if series.iter().any(|s| s.label() == sample.label) {
                log::warn!("Skipping duplicate sensor label {}", sample.label);
                continue;
            }
            series.push(CoreSeries::new(sample, capacity)?);
        }

        Ok(Self { series })
    }

    /// Push one tick's readings into every series
    ///
    /// Returns the labels that were missing from `snapshot`. Cores that appear
    /// after startup are ignored.
    pub fn reconcile(&mut self, snapshot: &SensorSnapshot) -> Vec<String> {
        let mut vanished = Vec::new();

        for series in &mut self.series {
            let sample = snapshot.get(series.label());
            match (sample.is_some(), series.is_vanished()) {
                (false, false) => {
                    log::warn!("{}", Error::CoreVanished(series.label().to_string()))
                }
                (false, true) => log::debug!("{} still missing", series.label()),
                (true, true) => log::info!("{} is reporting again", series.label()),
                (true, false) => {}
            }
            if sample.is_none() {
                vanished.push(series.label().to_string());
            }
            series.push(sample);
        }

        for label in snapshot.labels().filter(|l| self.get(l).is_none()) {
            log::debug!("Ignoring {} (not present at startup)", label);
        }

        vanished
    }

    pub fn get(&self, label: &str) -> Option<&CoreSeries> {
        self.series.iter().find(|s| s.label() == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoreSeries> {
        self.series.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(CoreSeries::label)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
