//! Reference-table emission.
//!
//! Formats the sweep output for direct inclusion as a C initializer list:
//! one brace-delimited `{voltage, current, power},` line per operating
//! point, with voltage at 3 decimal places and current and power in
//! scientific notation with 6 fractional digits, then a summary line naming
//! the code and voltage of the maximum power point.

use std::io::Write;

use crate::error::{LifeTesterError, Result};
use crate::sweep::{OperatingPoint, SweepResult};

/// Format one operating point as an initializer-list line.
pub fn format_point(point: &OperatingPoint) -> String {
    format!(
        "{{{:.3}, {:.6e}, {:.6e}}},",
        point.voltage, point.current, point.power
    )
}

/// Format the maximum power point summary line.
pub fn format_summary(mpp: &OperatingPoint) -> String {
    format!("code = {}, v_mpp = {}", mpp.code, mpp.voltage)
}

/// Write the full reference table followed by the MPP summary.
pub fn write_report<W: Write>(writer: &mut W, result: &SweepResult) -> Result<()> {
    for point in &result.points {
        writeln!(writer, "{}", format_point(point))
            .map_err(|source| LifeTesterError::ReportWrite { source })?;
    }
    writeln!(writer, "{}", format_summary(&result.max_power_point))
        .map_err(|source| LifeTesterError::ReportWrite { source })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::sweep;

    #[test]
    fn test_point_line_format() {
        let point = OperatingPoint {
            code: 1,
            voltage: 0.008,
            current: 1.0,
            power: 0.008,
        };
        assert_eq!(
            format_point(&point),
            "{0.008, 1.000000e0, 8.000000e-3},"
        );
    }

    #[test]
    fn test_zero_point_line_format() {
        assert_eq!(
            format_point(&OperatingPoint::SENTINEL),
            "{0.000, 0.000000e0, 0.000000e0},"
        );
    }

    #[test]
    fn test_summary_format() {
        let mpp = OperatingPoint {
            code: 57,
            voltage: 0.456,
            current: 0.9,
            power: 0.4104,
        };
        assert_eq!(format_summary(&mpp), "code = 57, v_mpp = 0.456");
    }

    #[test]
    fn test_report_line_count() {
        let result = sweep(256);
        let mut out = Vec::new();
        write_report(&mut out, &result).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 257);
        assert!(lines[0].starts_with('{'));
        assert!(lines[0].ends_with("},"));
        assert!(lines[256].starts_with("code = "));
    }
}
