//! macOS: processor name from `sysctl -n machdep.cpu.brand_string`

use super::ProcessorName;
use std::process::Command;

#[derive(Debug, Default, Clone, Copy)]
pub struct SysctlName;

impl ProcessorName for SysctlName {
    fn processor_name(&self) -> Option<String> {
        let output = Command::new("/usr/sbin/sysctl")
            .args(["-n", "machdep.cpu.brand_string"])
            .output()
            .map_err(|e| log::debug!("sysctl: {}", e))
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!name.is_empty()).then_some(name)
    }
}
