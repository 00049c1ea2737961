// Per-core temperature reading from the Linux hwmon class
//
// Layout of one chip directory (attributes sit under device/ on older kernels):
//   name            driver name, e.g. "coretemp"
//   tempN_label     "Package id 0", "Core 0", ...
//   tempN_input     current reading in millidegrees Celsius
//   tempN_max       high threshold (optional)
//   tempN_crit      critical threshold (optional)

use super::{CoreSample, SensorReader, SensorSnapshot};
use crate::config::SensorConfig;
use crate::error::{Error, Result};
use crate::platform::common::{read_file_string, read_millidegrees};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads core temperatures from hwmon chips driven by one driver
#[derive(Debug, Clone)]
pub struct HwmonReader {
    root: PathBuf,
    driver: String,
    label_prefix: String,
}

impl HwmonReader {
    pub fn new(
        root: impl Into<PathBuf>,
        driver: impl Into<String>,
        label_prefix: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            driver: driver.into(),
            label_prefix: label_prefix.into(),
        }
    }

    pub fn from_config(config: &SensorConfig) -> Self {
        Self::new(
            config.hwmon_root.clone(),
            config.driver.clone(),
            config.label_prefix.clone(),
        )
    }

    /// Chips whose `name` matches the driver, ordered hwmon0, hwmon1, ...
    fn find_chips(&self) -> Result<Vec<Chip>> {
        if !self.root.is_dir() {
            return Err(Error::SensorUnavailable(format!(
                "{} not found",
                self.root.display()
            )));
        }

        let mut chips: Vec<(u32, Chip)> = fs::read_dir(&self.root)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|path| chip_name(path).map(|name| name == self.driver).unwrap_or(false))
            .map(|path| (numeric_suffix(&path), Chip::at(path)))
            .collect();

        if chips.is_empty() {
            return Err(Error::SensorUnavailable(format!(
                "no '{}' chip under {}",
                self.driver,
                self.root.display()
            )));
        }

        chips.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));
        Ok(chips.into_iter().map(|(_, chip)| chip).collect())
    }

    /// Read every matching core of one chip; `qualify` prefixes labels with the chip id
    fn read_chip(&self, chip: &Chip, qualify: bool, out: &mut Vec<CoreSample>) -> Result<()> {
        let dir = &chip.sensors;
        let mut indices: Vec<u32> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .filter_map(|e| temp_input_index(&e.file_name().to_string_lossy()))
            .collect();
        indices.sort_unstable();

        for i in indices {
            let label = read_file_string(dir.join(format!("temp{}_label", i)))
                .unwrap_or_else(|_| format!("temp{}", i));
            if !label.starts_with(&self.label_prefix) {
                continue;
            }

            // The input can disappear between listing and reading (core offlined)
            let current = match read_millidegrees(dir.join(format!("temp{}_input", i))) {
                Ok(value) => value,
                Err(e) => {
                    log::debug!("Skipping {} in {}: {}", label, dir.display(), e);
                    continue;
                }
            };

            let max = read_threshold(&dir.join(format!("temp{}_max", i)));
            let crit = read_threshold(&dir.join(format!("temp{}_crit", i)));
            let (high, critical) = resolve_thresholds(max, crit);

            let label = if qualify {
                format!("{}/{}", chip.id, label)
            } else {
                label
            };

            out.push(CoreSample {
                label,
                current,
                high,
                critical,
            });
        }

        Ok(())
    }
}

/// One hwmon chip
#[derive(Debug, Clone)]
struct Chip {
    /// Directory name under the hwmon root, e.g. `hwmon2`
    id: String,
    /// Directory holding the `tempN_*` files
    sensors: PathBuf,
}

impl Chip {
    /// Older kernels keep the attributes under `device/` instead of the chip directory
    fn at(path: PathBuf) -> Self {
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let device = path.join("device");
        let sensors = if !has_temp_inputs(&path) && has_temp_inputs(&device) {
            device
        } else {
            path
        };
        Self { id, sensors }
    }
}

impl SensorReader for HwmonReader {
    fn source(&self) -> String {
        format!("{} ({})", self.driver, self.root.display())
    }

    fn sample(&mut self) -> Result<SensorSnapshot> {
        let chips = self.find_chips()?;
        // Every socket has its own "Core 0".."Core N"
        let qualify = chips.len() > 1;

        let mut samples = Vec::new();
        for chip in &chips {
            self.read_chip(chip, qualify, &mut samples)?;
        }
        Ok(SensorSnapshot::new(samples))
    }
}

/// Driver name from `name`, or `device/name` on older kernels
fn chip_name(path: &Path) -> Option<String> {
    read_file_string(path.join("name"))
        .or_else(|_| read_file_string(path.join("device").join("name")))
        .ok()
}

fn has_temp_inputs(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .any(|e| temp_input_index(&e.file_name().to_string_lossy()).is_some())
        })
        .unwrap_or(false)
}

/// Thresholds of 0 mean the driver does not report one
fn read_threshold(path: &Path) -> Option<f32> {
    read_millidegrees(path).ok().filter(|value| *value != 0.0)
}

/// A missing high takes the critical value and vice versa; both missing is 0
fn resolve_thresholds(max: Option<f32>, crit: Option<f32>) -> (f32, f32) {
    match (max, crit) {
        (Some(high), Some(critical)) => (high, critical),
        (Some(high), None) => (high, high),
        (None, Some(critical)) => (critical, critical),
        (None, None) => (0.0, 0.0),
    }
}

/// `temp12_input` -> 12
fn temp_input_index(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("temp")?
        .strip_suffix("_input")?
        .parse()
        .ok()
}

/// `hwmon3` -> 3, anything else sorts last
fn numeric_suffix(path: &Path) -> u32 {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.trim_start_matches(|c: char| !c.is_ascii_digit()).parse().ok())
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::CoreSet;
    use std::fs;

    fn write(dir: &Path, file: &str, contents: &str) {
        fs::write(dir.join(file), format!("{}\n", contents)).unwrap();
    }

    fn make_chip(root: &Path, dir: &str, name: &str) -> PathBuf {
        let chip = root.join(dir);
        fs::create_dir_all(&chip).unwrap();
        write(&chip, "name", name);
        chip
    }

    fn add_temp(
        chip: &Path,
        i: u32,
        label: &str,
        input: i32,
        max: Option<i32>,
        crit: Option<i32>,
    ) {
        write(chip, &format!("temp{}_label", i), label);
        write(chip, &format!("temp{}_input", i), &input.to_string());
        if let Some(max) = max {
            write(chip, &format!("temp{}_max", i), &max.to_string());
        }
        if let Some(crit) = crit {
            write(chip, &format!("temp{}_crit", i), &crit.to_string());
        }
    }

    #[test]
    fn test_reads_core_entries_only() {
        let root = tempfile::tempdir().unwrap();
        make_chip(root.path(), "hwmon0", "acpitz");
        let chip = make_chip(root.path(), "hwmon1", "coretemp");
        add_temp(&chip, 1, "Package id 0", 52000, Some(80000), Some(100000));
        add_temp(&chip, 2, "Core 0", 45000, Some(80000), Some(100000));
        add_temp(&chip, 10, "Core 8", 47500, Some(80000), Some(100000));
        add_temp(&chip, 3, "Core 1", 46000, Some(80000), Some(100000));

        let mut reader = HwmonReader::new(root.path(), "coretemp", "Core");
        let snapshot = reader.sample().unwrap();

        assert_eq!(
            snapshot.labels().collect::<Vec<_>>(),
            ["Core 0", "Core 1", "Core 8"]
        );
        assert_eq!(
            snapshot.get("Core 8"),
            Some(&CoreSample::new("Core 8", 47.5, 80.0, 100.0))
        );
    }

    #[test]
    fn test_threshold_fallbacks() {
        let root = tempfile::tempdir().unwrap();
        let chip = make_chip(root.path(), "hwmon2", "coretemp");
        add_temp(&chip, 2, "Core 0", 40000, None, Some(100000));
        add_temp(&chip, 3, "Core 1", 41000, Some(84000), None);
        add_temp(&chip, 4, "Core 2", 42000, None, None);

        let snapshot = HwmonReader::new(root.path(), "coretemp", "Core")
            .sample()
            .unwrap();

        assert_eq!(snapshot.get("Core 0").map(|s| (s.high, s.critical)), Some((100.0, 100.0)));
        assert_eq!(snapshot.get("Core 1").map(|s| (s.high, s.critical)), Some((84.0, 84.0)));
        assert_eq!(snapshot.get("Core 2").map(|s| (s.high, s.critical)), Some((0.0, 0.0)));
    }

    #[test]
    fn test_missing_root_is_sensor_unavailable() {
        let root = tempfile::tempdir().unwrap();
        let mut reader = HwmonReader::new(root.path().join("nope"), "coretemp", "Core");
        assert!(matches!(reader.sample(), Err(Error::SensorUnavailable(_))));
    }

    #[test]
    fn test_no_matching_chip_is_sensor_unavailable() {
        let root = tempfile::tempdir().unwrap();
        let chip = make_chip(root.path(), "hwmon0", "k10temp");
        add_temp(&chip, 1, "Tctl", 55000, None, None);

        let mut reader = HwmonReader::new(root.path(), "coretemp", "Core");
        assert!(matches!(reader.sample(), Err(Error::SensorUnavailable(_))));
    }

    #[test]
    fn test_chip_without_cores_yields_empty_snapshot() {
        let root = tempfile::tempdir().unwrap();
        let chip = make_chip(root.path(), "hwmon0", "coretemp");
        add_temp(&chip, 1, "Package id 0", 52000, Some(80000), Some(100000));

        let snapshot = HwmonReader::new(root.path(), "coretemp", "Core")
            .sample()
            .unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_chips_ordered_numerically() {
        let root = tempfile::tempdir().unwrap();
        let second = make_chip(root.path(), "hwmon10", "coretemp");
        add_temp(&second, 2, "Core 0", 30000, None, None);
        let first = make_chip(root.path(), "hwmon2", "coretemp");
        add_temp(&first, 2, "Core 4", 31000, None, None);

        let snapshot = HwmonReader::new(root.path(), "coretemp", "Core")
            .sample()
            .unwrap();
        let currents: Vec<f32> = snapshot.samples().iter().map(|s| s.current).collect();
        assert_eq!(currents, [31.0, 30.0]);
        assert_eq!(
            snapshot.labels().collect::<Vec<_>>(),
            ["hwmon2/Core 4", "hwmon10/Core 0"]
        );
    }

    #[test]
    fn test_sockets_with_same_core_labels_stay_distinct() {
        let root = tempfile::tempdir().unwrap();
        let first = make_chip(root.path(), "hwmon0", "coretemp");
        add_temp(&first, 2, "Core 0", 30000, Some(80000), Some(100000));
        let second = make_chip(root.path(), "hwmon1", "coretemp");
        add_temp(&second, 2, "Core 0", 70000, Some(82000), Some(102000));

        let mut reader = HwmonReader::new(root.path(), "coretemp", "Core");
        let startup = reader.sample().unwrap();
        let mut cores = CoreSet::from_snapshot(&startup, 4).unwrap();
        assert!(cores.reconcile(&reader.sample().unwrap()).is_empty());

        let latest: Vec<(&str, f32, f32)> = cores
            .iter()
            .filter_map(|c| c.latest().map(|s| (c.label(), s.current, s.critical)))
            .collect();
        assert_eq!(
            latest,
            [("hwmon0/Core 0", 30.0, 100.0), ("hwmon1/Core 0", 70.0, 102.0)]
        );
    }

    #[test]
    fn test_single_chip_labels_are_unqualified() {
        let root = tempfile::tempdir().unwrap();
        let chip = make_chip(root.path(), "hwmon3", "coretemp");
        add_temp(&chip, 2, "Core 0", 30000, None, None);

        let snapshot = HwmonReader::new(root.path(), "coretemp", "Core")
            .sample()
            .unwrap();
        assert_eq!(snapshot.labels().collect::<Vec<_>>(), ["Core 0"]);
    }

    #[test]
    fn test_device_subdirectory_layout() {
        let root = tempfile::tempdir().unwrap();
        let device = root.path().join("hwmon0").join("device");
        fs::create_dir_all(&device).unwrap();
        write(&device, "name", "coretemp");
        add_temp(&device, 2, "Core 0", 44000, Some(86000), Some(96000));

        let snapshot = HwmonReader::new(root.path(), "coretemp", "Core")
            .sample()
            .unwrap();
        assert_eq!(
            snapshot.get("Core 0"),
            Some(&CoreSample::new("Core 0", 44.0, 86.0, 96.0))
        );
    }

    #[test]
    fn test_zero_threshold_treated_as_missing() {
        let root = tempfile::tempdir().unwrap();
        let chip = make_chip(root.path(), "hwmon0", "coretemp");
        add_temp(&chip, 2, "Core 0", 40000, Some(0), Some(100000));
        add_temp(&chip, 3, "Core 1", 41000, Some(84000), Some(0));
        add_temp(&chip, 4, "Core 2", 42000, Some(0), Some(0));

        let snapshot = HwmonReader::new(root.path(), "coretemp", "Core")
            .sample()
            .unwrap();
        let thresholds: Vec<(f32, f32)> =
            snapshot.samples().iter().map(|s| (s.high, s.critical)).collect();
        assert_eq!(thresholds, [(100.0, 100.0), (84.0, 84.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_temp_input_index() {
        assert_eq!(temp_input_index("temp12_input"), Some(12));
        assert_eq!(temp_input_index("temp1_label"), None);
        assert_eq!(temp_input_index("fan1_input"), None);
    }
}
