// Hardware monitoring module - per-core CPU temperature readings
//
// Linux exposes thermal sensors under /sys/class/hwmon. The Intel `coretemp`
// driver publishes one temp*_input per physical core, labelled "Core N", plus a
// package sensor. Each reading carries the vendor's high (temp*_max) and
// critical (temp*_crit) thresholds.

mod coretemp;

pub use coretemp::HwmonReader;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One temperature reading for one core, in degrees Celsius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreSample {
    pub label: String,
    pub current: f32,
    pub high: f32,
    pub critical: f32,
}

impl CoreSample {
    pub fn new(label: impl Into<String>, current: f32, high: f32, critical: f32) -> Self {
        Self {
            label: label.into(),
            current,
            high,
            critical,
        }
    }

    /// Zero reading that keeps this sample's thresholds
    pub fn zeroed(&self) -> Self {
        Self {
            label: self.label.clone(),
            current: 0.0,
            high: self.high,
            critical: self.critical,
        }
    }
}

/// Result of one sensor query, in enumeration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    samples: Vec<CoreSample>,
}

impl SensorSnapshot {
    pub fn new(samples: Vec<CoreSample>) -> Self {
        Self { samples }
    }

    /// Look up a core by label
    pub fn get(&self, label: &str) -> Option<&CoreSample> {
        self.samples.iter().find(|s| s.label == label)
    }

    pub fn samples(&self) -> &[CoreSample] {
        &self.samples
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|s| s.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromIterator<CoreSample> for SensorSnapshot {
    fn from_iter<I: IntoIterator<Item = CoreSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Source of per-core temperature snapshots
pub trait SensorReader {
    /// Short description of where readings come from (for logs and headers)
    fn source(&self) -> String;

    /// Query the sensors once
    ///
    /// Fails with [`crate::Error::SensorUnavailable`] when the underlying
    /// OS interface is missing.
    fn sample(&mut self) -> Result<SensorSnapshot>;
}
