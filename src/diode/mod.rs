//! Ideal diode model and DAC transfer function.
//!
//! The reference cell is modeled as an illuminated ideal diode:
//!   I = I_L - I_0 * (exp(V / (n * Vt)) - 1)
//!
//! Shunt and series resistance are ignored, and the current is clamped at
//! zero once the junction term overtakes the light-generated current. The
//! clamp is the only guard: the exponential is evaluated in f64 with no
//! overflow limiting, which is safe for the voltages the DAC can produce
//! (0 to GAIN * V_REF).

use crate::{DAC_RESOLUTION, GAIN, IDEALITY, LIGHT_CURRENT, SATURATION_CURRENT, THERMAL_VOLTAGE, V_REF};

/// Parameters for the illuminated diode model.
#[derive(Debug, Clone)]
pub struct DiodeParams {
    /// Light-generated current (I_L) in A
    pub i_l: f64,
    /// Saturation current (I_0), typically 1e-12 to 1e-9 A
    pub i_0: f64,
    /// Ideality factor (n), typically 1.0 to 2.0
    pub n: f64,
}

impl Default for DiodeParams {
    fn default() -> Self {
        Self {
            i_l: LIGHT_CURRENT,
            i_0: SATURATION_CURRENT,
            n: IDEALITY,
        }
    }
}

impl DiodeParams {
    /// Thermal voltage times ideality factor.
    pub fn n_vt(&self) -> f64 {
        self.n * THERMAL_VOLTAGE
    }

    /// Calculate the cell current at a given voltage, clamped at zero.
    pub fn current(&self, v: f64) -> f64 {
        let i = self.i_l - self.i_0 * ((v / self.n_vt()).exp() - 1.0);
        if i > 0.0 {
            i
        } else {
            0.0
        }
    }
}

/// The DAC driving the cell bias voltage.
#[derive(Debug, Clone)]
pub struct Dac {
    /// Resolution in bits; the code domain is `2^resolution`
    pub resolution: u32,
    /// Reference voltage in V
    pub v_ref: f64,
    /// Gain between DAC output and cell voltage
    pub gain: f64,
}

impl Default for Dac {
    fn default() -> Self {
        Self {
            resolution: DAC_RESOLUTION,
            v_ref: V_REF,
            gain: GAIN,
        }
    }
}

impl Dac {
    /// Number of codes in the DAC domain.
    pub fn domain_size(&self) -> u32 {
        1u32 << self.resolution
    }

    /// Convert a DAC code to the voltage applied to the cell.
    ///
    /// Codes outside `[0, 2^resolution - 1]` are accepted arithmetically;
    /// the sweep driver never produces them.
    pub fn code_to_voltage(&self, code: u32) -> f64 {
        (code as f64 / self.domain_size() as f64) * self.gain * self.v_ref
    }
}

/// Cell current for the default model at a given voltage.
pub fn diode_current(v: f64) -> f64 {
    DiodeParams::default().current(v)
}

/// Cell voltage for a DAC code with the default DAC configuration.
pub fn code_to_voltage(code: u32) -> f64 {
    Dac::default().code_to_voltage(code)
}
