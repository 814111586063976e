//! # LifeTester Core
//!
//! Host-side tools for the LifeTester solar cell lifetime tester.
//!
//! This library provides:
//! - An ideal-diode model of the reference cell (Shockley equation)
//! - An 8-bit DAC sweep that generates the expected I-V-P table and its
//!   maximum power point
//! - Reference-table emission formatted as C initializer lines
//! - A serial CSV logger for capturing live device output, with an optional
//!   terminal plot of scan records
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`diode`] - Ideal-diode current model and the DAC code-to-voltage mapping
//! - [`sweep`] - Sweep driver producing operating points and the MPP
//! - [`report`] - Reference-table and MPP summary formatting
//! - [`serial`] - Line framing, record parsing, and the serial logger (CLI only)
//! - [`plot`] - Scan-trace accumulation and terminal rendering
//!
//! ## Usage
//!
//! Generate the reference table:
//!
//! ```bash
//! lifetester sweep > shockley_data.inc
//! ```
//!
//! Log CSV lines from a device, plotting channel `a` scans live:
//!
//! ```bash
//! lifetester log /dev/ttyUSB0 --plot
//! ```
//!
//! ## Model
//!
//! The expected current at a cell voltage V is given by the ideal Shockley
//! diode equation, shunt and series resistance ignored:
//!
//! ```text
//! I = I_L - I_0 * (exp(V / (n * Vt)) - 1)
//! ```
//!
//! clamped to zero wherever the exponential term overtakes the
//! light-generated current. Power is V * I, and the maximum power point is
//! tracked with a running fold over the swept DAC codes.

pub mod diode;
pub mod error;
pub mod plot;
pub mod report;
pub mod serial;
pub mod sweep;

// Re-export main types for convenience
pub use diode::{Dac, DiodeParams};
pub use error::{LifeTesterError, Result};
pub use sweep::{sweep, OperatingPoint, SweepResult};

/// Light-generated current of the reference cell in A.
pub const LIGHT_CURRENT: f64 = 1.0;

/// Diode saturation current in A.
pub const SATURATION_CURRENT: f64 = 1.0e-9;

/// Thermal voltage at room temperature in V.
pub const THERMAL_VOLTAGE: f64 = 0.0259;

/// Diode ideality factor (1.0 for an ideal junction).
pub const IDEALITY: f64 = 1.0;

/// Gain between the DAC output and the voltage applied to the cell.
pub const GAIN: f64 = 1.0;

/// DAC reference voltage in V.
pub const V_REF: f64 = 2.048;

/// DAC resolution in bits; the sweep domain is `2^DAC_RESOLUTION` codes.
pub const DAC_RESOLUTION: u32 = 8;

/// Baud rate the LifeTester firmware talks at.
pub const BAUD_RATE: u32 = 9600;
