//! Serial line framing and record parsing.
//!
//! The LifeTester firmware emits ASCII CSV lines terminated by CR/LF.
//! [`LineFramer`] accumulates raw bytes into lines (carriage returns are
//! discarded, newlines complete a line) and keeps any partial line across
//! reads. [`Record`] is one completed line split on commas; field meaning
//! is entirely device-defined.

#[cfg(feature = "cli")]
mod logger;

#[cfg(feature = "cli")]
pub use logger::{SerialConfig, SerialLogger};

use crate::error::{LifeTesterError, Result};

/// Accumulates bytes into newline-delimited lines.
///
/// Framing state survives across [`push_bytes`](LineFramer::push_bytes)
/// calls, so a line split across two serial reads still comes out whole.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: String,
}

impl LineFramer {
    /// Create an empty framer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns the completed line if this byte finished one.
    pub fn push(&mut self, byte: u8) -> Option<String> {
        match byte {
            b'\n' => Some(std::mem::take(&mut self.buffer)),
            b'\r' => None,
            other => {
                self.buffer.push(other as char);
                None
            }
        }
    }

    /// Feed a chunk of bytes; returns all lines completed by the chunk.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<String> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }

    /// The accumulated partial line, if any.
    pub fn pending(&self) -> &str {
        &self.buffer
    }
}

/// One CSV line from the device, split on commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Parse a completed line into a record. Empty fields are preserved.
    pub fn parse(line: &str) -> Self {
        Self {
            fields: line.split(',').map(str::to_string).collect(),
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the record holds a single empty field (a blank line).
    pub fn is_empty(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].is_empty()
    }

    /// Field by zero-based index.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Field by zero-based index, parsed as f64.
    pub fn field_f64(&self, index: usize) -> Result<f64> {
        let raw = self
            .field(index)
            .ok_or_else(|| LifeTesterError::missing_field(index + 1, self.len()))?;
        raw.trim()
            .parse()
            .map_err(|_| LifeTesterError::invalid_field(index, raw))
    }

    /// All fields in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_line_framed_once() {
        let mut framer = LineFramer::new();
        let lines = framer.push_bytes(b"scan,0,a,1.5,2.5\r\n");
        assert_eq!(lines, vec!["scan,0,a,1.5,2.5"]);
        assert_eq!(framer.pending(), "");
    }

    #[test]
    fn test_partial_line_kept_across_reads() {
        let mut framer = LineFramer::new();
        assert!(framer.push_bytes(b"scan,0").is_empty());
        assert_eq!(framer.pending(), "scan,0");
        let lines = framer.push_bytes(b",a,1,2\n3,4");
        assert_eq!(lines, vec!["scan,0,a,1,2"]);
        assert_eq!(framer.pending(), "3,4");
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut framer = LineFramer::new();
        let lines = framer.push_bytes(b"a,1\r\nb,2\r\nc,3\r\n");
        assert_eq!(lines, vec!["a,1", "b,2", "c,3"]);
    }

    #[test]
    fn test_bare_carriage_return_discarded() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b'\r').is_none());
        assert_eq!(framer.pending(), "");
    }

    #[test]
    fn test_record_splits_on_commas() {
        let record = Record::parse("scan,0,a,1.5,2.5");
        assert_eq!(record.len(), 5);
        assert_eq!(record.field(0), Some("scan"));
        assert_eq!(record.field(4), Some("2.5"));
        assert_eq!(record.field(5), None);
    }

    #[test]
    fn test_record_preserves_empty_fields() {
        let record = Record::parse("a,,b");
        assert_eq!(record.fields(), &["a", "", "b"]);
    }

    #[test]
    fn test_field_f64_errors() {
        let record = Record::parse("scan,x");
        assert!(matches!(
            record.field_f64(1),
            Err(LifeTesterError::InvalidField { index: 1, .. })
        ));
        assert!(matches!(
            record.field_f64(5),
            Err(LifeTesterError::MissingField { .. })
        ));
        assert!(record.field_f64(0).is_err());
    }

    #[test]
    fn test_field_f64_parses_number() {
        let record = Record::parse("scan,0,a, 1.5 ,2.5");
        assert_eq!(record.field_f64(3).unwrap(), 1.5);
    }
}
