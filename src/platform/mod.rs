//! Platform-specific implementations
//!
//! The only thing that differs per OS is how the processor's marketing name is
//! found. A [`ProcessorName`] strategy is picked once by [`detect`] and reused.

mod cpuinfo;
mod sysctl;
mod wmic;

// Common utilities
pub mod common;

pub use cpuinfo::CpuInfoName;
pub use sysctl::SysctlName;
pub use wmic::WmicName;

/// Best-effort lookup of the processor model name
pub trait ProcessorName {
    /// The model name, or `None` when the platform does not tell
    fn processor_name(&self) -> Option<String>;
}

/// Fallback for platforms without a known lookup
#[derive(Debug, Default, Clone, Copy)]
pub struct UnknownProcessor;

impl ProcessorName for UnknownProcessor {
    fn processor_name(&self) -> Option<String> {
        None
    }
}

/// Select the lookup strategy for the running platform
pub fn detect() -> Box<dyn ProcessorName> {
    #[cfg(target_os = "linux")]
    {
        Box::new(CpuInfoName::default())
    }

    #[cfg(target_os = "macos")]
    {
        Box::new(SysctlName)
    }

    #[cfg(windows)]
    {
        Box::new(WmicName)
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
    {
        Box::new(UnknownProcessor)
    }
}

/// Processor name for display, empty when unknown
pub fn processor_name() -> String {
    detect().processor_name().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_processor() {
        assert_eq!(UnknownProcessor.processor_name(), None);
    }

    #[test]
    fn test_detect_does_not_panic() {
        let _ = detect().processor_name();
    }
}
