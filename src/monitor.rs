//! Sampling loop state
//!
//! A [`Monitor`] owns the sensor reader and the per-core windows. It starts out
//! `Running` and moves to `Stopped` either on request or on the first tick that
//! fails; `Stopped` is terminal.

use crate::config::SamplingConfig;
use crate::error::{Error, Result};
use crate::hwmon::SensorReader;
use crate::window::CoreSet;
use std::ops::ControlFlow;
use std::time::Duration;

/// Lifecycle of a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Running,
    Stopped,
}

/// Per-core temperature monitor
pub struct Monitor {
    reader: Box<dyn SensorReader>,
    cores: CoreSet,
    state: MonitorState,
    refresh_interval: Duration,
    ticks: u64,
    last_error: Option<String>,
}

impl Monitor {
    /// Query the sensors once and build one window per reported core
    pub fn new(mut reader: Box<dyn SensorReader>, sampling: &SamplingConfig) -> Result<Self> {
        let snapshot = reader.sample()?;
        let cores = CoreSet::from_snapshot(&snapshot, sampling.window_size)?;

        log::info!(
            "Monitoring {} cores from {} (window {} samples, every {:?})",
            cores.len(),
            reader.source(),
            sampling.window_size,
            sampling.refresh_interval()
        );

        Ok(Self {
            reader,
            cores,
            state: MonitorState::Running,
            refresh_interval: sampling.refresh_interval(),
            ticks: 0,
            last_error: None,
        })
    }

    /// Sample once and push the readings into every window
    ///
    /// Returns the labels of cores missing from this sample. Any error stops the
    /// monitor for good.
    pub fn tick(&mut self) -> Result<Vec<String>> {
        if self.state == MonitorState::Stopped {
            return Err(Error::Stopped);
        }

        let snapshot = match self.reader.sample() {
            Ok(snapshot) => snapshot,
            Err(e) => return Err(self.fail(e)),
        };

        let vanished = self.cores.reconcile(&snapshot);
        self.ticks += 1;
        log::debug!(
            "Tick {}: {} readings, {} missing",
            self.ticks,
            snapshot.len(),
            vanished.len()
        );

        Ok(vanished)
    }

    /// Stop the monitor because of `err`, returning it as a tick failure
    pub fn fail(&mut self, err: Error) -> Error {
        let err = match err {
            Error::TickFailure(_) | Error::Stopped => err,
            other => Error::TickFailure(other.to_string()),
        };
        log::error!("Monitor stopped: {}", err);
        self.last_error = Some(err.to_string());
        self.state = MonitorState::Stopped;
        err
    }

    /// Ask the loop to stop; takes effect before the next tick
    pub fn request_stop(&mut self) {
        if self.state == MonitorState::Running {
            log::info!("Stop requested after {} ticks", self.ticks);
        }
        self.state = MonitorState::Stopped;
    }

    /// Blocking sleep-sample-render loop
    ///
    /// `render` is called after every successful tick; returning
    /// `ControlFlow::Break` requests a stop, an error stops the monitor and is
    /// returned as a tick failure.
    pub fn run<F>(&mut self, mut render: F) -> Result<()>
    where
        F: FnMut(&Monitor) -> Result<ControlFlow<()>>,
    {
        while self.is_running() {
            std::thread::sleep(self.refresh_interval);
            self.tick()?;

            match render(self) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => self.request_stop(),
                Err(e) => return Err(self.fail(e)),
            }
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.state == MonitorState::Running
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn cores(&self) -> &CoreSet {
        &self.cores
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Message of the error that stopped the monitor, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn source(&self) -> String {
        self.reader.source()
    }
}
