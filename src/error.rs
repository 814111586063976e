//! Error types for the LifeTester host tools.
//!
//! This module provides a unified error type [`LifeTesterError`] that covers
//! all error conditions that can occur during serial logging, record parsing,
//! and report emission. The sweep itself is a total function and has no
//! failure modes of its own.

use thiserror::Error;

/// Result type alias using [`LifeTesterError`].
pub type Result<T> = std::result::Result<T, LifeTesterError>;

/// Unified error type for all LifeTester operations.
#[derive(Error, Debug)]
pub enum LifeTesterError {
    // ============ Record Errors ============
    /// A record field could not be parsed as a number
    #[error("Record field {index} is not a number: '{value}'")]
    InvalidField { index: usize, value: String },

    /// A record has fewer fields than expected
    #[error("Record has {found} fields, expected at least {expected}")]
    MissingField { expected: usize, found: usize },

    // ============ I/O Errors ============
    /// Error writing the reference report
    #[error("Failed to write report: {source}")]
    ReportWrite {
        #[source]
        source: std::io::Error,
    },

    /// Error opening the serial port
    #[cfg(feature = "cli")]
    #[error("Failed to open serial port '{port}': {source}")]
    SerialOpen {
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// Error reading from the serial port
    #[error("Serial read failed: {source}")]
    SerialRead {
        #[source]
        source: std::io::Error,
    },

    /// Error installing the Ctrl-C handler
    #[cfg(feature = "cli")]
    #[error("Failed to install interrupt handler: {source}")]
    Interrupt {
        #[source]
        source: ctrlc::Error,
    },
}

impl LifeTesterError {
    /// Create an invalid field error
    pub fn invalid_field(index: usize, value: impl Into<String>) -> Self {
        Self::InvalidField {
            index,
            value: value.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(expected: usize, found: usize) -> Self {
        Self::MissingField { expected, found }
    }

    /// Create a serial read error
    pub fn serial_read(source: std::io::Error) -> Self {
        Self::SerialRead { source }
    }
}
