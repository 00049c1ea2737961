//! # coretemp-graph
//!
//! Live per-core CPU temperature charts. The sensors are polled at a fixed
//! cadence, each core keeps a fixed-length sliding window of readings, and the
//! windows are drawn with the vendor's "high" and "critical" thresholds overlaid.
//!
//! ## Quick Start
//!
//! ```no_run
//! use coretemp_graph::{Config, HwmonReader, Monitor};
//! use std::ops::ControlFlow;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let reader = HwmonReader::from_config(&config.sensor);
//! let mut monitor = Monitor::new(Box::new(reader), &config.sampling)?;
//!
//! monitor.run(|m| {
//!     for core in m.cores().iter() {
//!         if let Some(latest) = core.latest() {
//!             println!("{}: {:.1}°C", core.label(), latest.current);
//!         }
//!     }
//!     Ok(if m.ticks() >= 10 {
//!         ControlFlow::Break(())
//!     } else {
//!         ControlFlow::Continue(())
//!     })
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default) - Command-line interface and TUI
//!
//! ## Platform Support
//!
//! Temperatures come from the Linux hwmon class (`coretemp` by default). The
//! processor name shown as the chart title is looked up on Linux, macOS and
//! Windows.

pub mod config; // Configuration management with TOML persistence
pub mod error;
pub mod hwmon; // Per-core temperature sensors
pub mod monitor; // Sampling loop state machine
pub mod platform; // Processor name lookup
pub mod window; // Fixed-length per-core windows

#[cfg(feature = "cli")]
pub mod tui; // Terminal UI

pub use config::{Config, DisplayConfig, SamplingConfig, SensorConfig};
pub use error::{Error, Result};
pub use hwmon::{CoreSample, HwmonReader, SensorReader, SensorSnapshot};
pub use monitor::{Monitor, MonitorState};
pub use platform::{detect as detect_processor_name, processor_name, ProcessorName};
pub use window::{CoreSeries, CoreSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
