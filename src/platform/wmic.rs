//! Windows: processor name from `wmic cpu get Name`

use super::ProcessorName;
use std::process::Command;

#[derive(Debug, Default, Clone, Copy)]
pub struct WmicName;

impl ProcessorName for WmicName {
    fn processor_name(&self) -> Option<String> {
        let output = Command::new("wmic")
            .args(["cpu", "get", "Name"])
            .output()
            .map_err(|e| log::debug!("wmic: {}", e))
            .ok()?;

        parse_wmic_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// First value line after the `Name` header
fn parse_wmic_output(text: &str) -> Option<String> {
    text.lines()
        .skip(1)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wmic_output() {
        let text = "Name  \r\n\r\nAMD Ryzen 7 5800X 8-Core Processor  \r\n\r\n";
        assert_eq!(
            parse_wmic_output(text).as_deref(),
            Some("AMD Ryzen 7 5800X 8-Core Processor")
        );
        assert_eq!(parse_wmic_output("Name\r\n"), None);
    }
}
