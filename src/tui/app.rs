//! Application state management

use crate::monitor::Monitor;

/// Application state
pub struct App {
    /// Sampling loop and per-core windows
    pub monitor: Monitor,
    /// Figure title, usually the processor name
    pub title: String,
    /// Show the legend inside each chart
    pub show_legend: bool,
}

impl App {
    pub fn new(monitor: Monitor, title: impl Into<String>, show_legend: bool) -> Self {
        Self {
            monitor,
            title: title.into(),
            show_legend,
        }
    }

    pub fn toggle_legend(&mut self) {
        self.show_legend = !self.show_legend;
    }

    /// Title shown in the header; falls back to the sensor source
    pub fn header_title(&self) -> String {
        if self.title.is_empty() {
            self.monitor.source()
        } else {
            self.title.clone()
        }
    }
}
