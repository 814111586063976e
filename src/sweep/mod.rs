//! Sweep driver producing the expected I-V-P table.
//!
//! Walks the DAC code domain in ascending order, evaluates the diode model
//! at each bias point and tracks the maximum power point with a running
//! fold. The fold starts from a zero sentinel rather than the first real
//! point: with a strict `>` comparison the first maximum wins on ties, and
//! a sweep where no point has positive power reports the sentinel.

use crate::diode::{Dac, DiodeParams};

/// One sample on the cell's characteristic curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// DAC code that produced this point
    pub code: u32,
    /// Cell voltage in V
    pub voltage: f64,
    /// Cell current in A
    pub current: f64,
    /// Power in W (voltage * current)
    pub power: f64,
}

impl OperatingPoint {
    /// Initial value of the running-maximum fold.
    pub const SENTINEL: OperatingPoint = OperatingPoint {
        code: 0,
        voltage: 0.0,
        current: 0.0,
        power: 0.0,
    };
}

/// The full table of operating points plus the tracked maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    /// Points in ascending code order, one per swept code
    pub points: Vec<OperatingPoint>,
    /// Point of strictly greatest power, or the sentinel if none was positive
    pub max_power_point: OperatingPoint,
}

/// Sweep `domain_size` codes with the default DAC and diode model.
pub fn sweep(domain_size: u32) -> SweepResult {
    sweep_with(&Dac::default(), &DiodeParams::default(), domain_size)
}

/// Sweep `domain_size` codes with an explicit DAC and diode model.
///
/// Total over any domain size; a zero-length sweep returns an empty table
/// and the untouched sentinel maximum.
pub fn sweep_with(dac: &Dac, diode: &DiodeParams, domain_size: u32) -> SweepResult {
    let mut points = Vec::with_capacity(domain_size as usize);
    let mut mpp = OperatingPoint::SENTINEL;

    for code in 0..domain_size {
        let voltage = dac.code_to_voltage(code);
        let current = diode.current(voltage);
        let power = current * voltage;
        let point = OperatingPoint {
            code,
            voltage,
            current,
            power,
        };

        points.push(point);
        if point.power > mpp.power {
            mpp = point;
        }
    }

    SweepResult {
        points,
        max_power_point: mpp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sweep_covers_domain() {
        let result = sweep(256);
        assert_eq!(result.points.len(), 256);
        for (i, point) in result.points.iter().enumerate() {
            assert_eq!(point.code, i as u32);
        }
    }

    #[test]
    fn test_max_power_point_is_true_maximum() {
        let result = sweep(256);
        let mpp = result.max_power_point;
        assert!(mpp.power > 0.0);
        for point in &result.points {
            assert!(mpp.power >= point.power);
        }
        // The tracked point is a member of the table
        assert_eq!(result.points[mpp.code as usize], mpp);
    }

    #[test]
    fn test_first_maximum_wins_on_ties() {
        let result = sweep(256);
        let mpp = result.max_power_point;
        // No earlier point may reach the maximum power
        for point in &result.points[..mpp.code as usize] {
            assert!(point.power < mpp.power);
        }
    }

    #[test]
    fn test_empty_sweep_returns_sentinel() {
        let result = sweep(0);
        assert!(result.points.is_empty());
        assert_eq!(result.max_power_point, OperatingPoint::SENTINEL);
    }

    #[test]
    fn test_sweep_is_deterministic() {
        assert_eq!(sweep(256), sweep(256));
    }

    #[test]
    fn test_dark_sweep_keeps_sentinel() {
        // With no illumination every current (and power) clamps to zero,
        // so the fold never replaces the sentinel.
        let dark = DiodeParams {
            i_l: 0.0,
            ..DiodeParams::default()
        };
        let result = sweep_with(&Dac::default(), &dark, 256);
        assert_eq!(result.max_power_point, OperatingPoint::SENTINEL);
    }
}
