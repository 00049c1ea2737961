//! Linux: processor name from /proc/cpuinfo

use super::ProcessorName;
use std::path::PathBuf;

/// Reads the first `model name` entry of a cpuinfo file
#[derive(Debug, Clone)]
pub struct CpuInfoName {
    path: PathBuf,
}

impl CpuInfoName {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for CpuInfoName {
    fn default() -> Self {
        Self::new("/proc/cpuinfo")
    }
}

impl ProcessorName for CpuInfoName {
    fn processor_name(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| log::debug!("Cannot read {}: {}", self.path.display(), e))
            .ok()?;
        parse_model_name(&content)
    }
}

/// `model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz` -> the part after the colon
pub(crate) fn parse_model_name(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .find(|line| line.starts_with("model name\t:"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, model)| model.trim().to_string())
        .filter(|model| !model.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPUINFO: &str = "processor\t: 0\n\
vendor_id\t: GenuineIntel\n\
model\t\t: 142\n\
model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz\n\
stepping\t: 10\n\
\n\
processor\t: 1\n\
model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz\n";

    #[test]
    fn test_parse_model_name() {
        assert_eq!(
            parse_model_name(CPUINFO).as_deref(),
            Some("Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz")
        );
    }

    #[test]
    fn test_parse_model_name_missing() {
        assert_eq!(parse_model_name("processor\t: 0\nHardware\t: BCM2835\n"), None);
        // "model\t\t:" must not be mistaken for the model name
        assert_eq!(parse_model_name("model\t\t: 142\n"), None);
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpuinfo");
        std::fs::write(&path, CPUINFO).unwrap();

        let name = CpuInfoName::new(&path).processor_name();
        assert_eq!(name.as_deref(), Some("Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz"));
        assert_eq!(CpuInfoName::new(dir.path().join("none")).processor_name(), None);
    }
}
