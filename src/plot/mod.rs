//! Scan-trace accumulation and terminal rendering.
//!
//! The firmware interleaves several record kinds on the serial line; only
//! records tagged `scan` on channel `a` carry a plottable point, with x in
//! the 4th field and y in the 5th. The trace keeps every accepted point so
//! the whole curve can be redrawn after each new line. Rendering is best
//! effort with no correctness contract; malformed records are counted and
//! skipped, never fatal.

use tracing::debug;

use crate::serial::Record;

/// Tag marking an I-V scan record.
pub const SCAN_TAG: &str = "scan";

/// Channel whose scan points are plotted.
pub const CHANNEL_A: &str = "a";

/// Accumulated (x, y) points from matching scan records.
#[derive(Debug, Default)]
pub struct ScanTrace {
    points: Vec<(f64, f64)>,
    skipped: usize,
}

impl ScanTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a record to the trace.
    ///
    /// Returns true if the record was a well-formed channel-`a` scan record
    /// and its point was accepted. Matching records with missing or
    /// unparsable numeric fields are skipped and counted.
    pub fn offer(&mut self, record: &Record) -> bool {
        if record.field(0) != Some(SCAN_TAG) || record.field(2) != Some(CHANNEL_A) {
            return false;
        }
        match (record.field_f64(3), record.field_f64(4)) {
            (Ok(x), Ok(y)) => {
                self.points.push((x, y));
                true
            }
            (Err(e), _) | (_, Err(e)) => {
                self.skipped += 1;
                debug!("skipping malformed scan record: {}", e);
                false
            }
        }
    }

    /// Number of accepted points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no point has been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of matching records skipped as malformed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Accepted points in arrival order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Render the trace as a fixed-size character grid with min/max axis
    /// labels. Degenerate ranges (a single point, or all points equal)
    /// collapse to the center of the grid.
    pub fn render(&self, width: usize, height: usize) -> String {
        if self.points.is_empty() || width < 2 || height < 2 {
            return String::new();
        }

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in &self.points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        let mut grid = vec![vec![' '; width]; height];
        for &(x, y) in &self.points {
            let col = scale(x, x_min, x_max, width);
            let row = scale(y, y_min, y_max, height);
            // Row 0 is the top of the chart
            grid[height - 1 - row][col] = '*';
        }

        let mut out = String::new();
        for (i, row) in grid.iter().enumerate() {
            let label = if i == 0 {
                format!("{:>10.4} ", y_max)
            } else if i == height - 1 {
                format!("{:>10.4} ", y_min)
            } else {
                " ".repeat(11)
            };
            out.push_str(&label);
            out.push('|');
            out.extend(row.iter());
            out.push('\n');
        }
        out.push_str(&" ".repeat(11));
        out.push('+');
        out.push_str(&"-".repeat(width));
        out.push('\n');
        out.push_str(&format!(
            "{:>12.4}{:>width$.4}\n",
            x_min,
            x_max,
            width = width
        ));
        out
    }
}

/// Map a value in [min, max] onto a cell index in [0, cells).
fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max <= min {
        return cells / 2;
    }
    let frac = (value - min) / (max - min);
    ((frac * (cells - 1) as f64).round() as usize).min(cells - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_channel_a_scan_records() {
        let mut trace = ScanTrace::new();
        assert!(trace.offer(&Record::parse("scan,0,a,0.1,0.9")));
        assert!(trace.offer(&Record::parse("scan,1,a,0.2,0.8")));
        assert_eq!(trace.points(), &[(0.1, 0.9), (0.2, 0.8)]);
    }

    #[test]
    fn test_rejects_other_records() {
        let mut trace = ScanTrace::new();
        assert!(!trace.offer(&Record::parse("track,0,a,0.1,0.9")));
        assert!(!trace.offer(&Record::parse("scan,0,b,0.1,0.9")));
        assert!(!trace.offer(&Record::parse("temperature,25.0")));
        assert!(trace.is_empty());
        assert_eq!(trace.skipped(), 0);
    }

    #[test]
    fn test_malformed_scan_record_skipped() {
        let mut trace = ScanTrace::new();
        assert!(!trace.offer(&Record::parse("scan,0,a,oops,0.9")));
        assert!(!trace.offer(&Record::parse("scan,0,a")));
        assert_eq!(trace.skipped(), 2);
        assert!(trace.is_empty());
    }

    #[test]
    fn test_render_marks_points() {
        let mut trace = ScanTrace::new();
        trace.offer(&Record::parse("scan,0,a,0.0,0.0"));
        trace.offer(&Record::parse("scan,1,a,1.0,1.0"));
        let chart = trace.render(20, 10);
        assert!(chart.contains('*'));
        assert_eq!(chart.lines().count(), 12);
    }

    #[test]
    fn test_render_empty_trace() {
        assert_eq!(ScanTrace::new().render(20, 10), "");
    }

    #[test]
    fn test_render_single_point_centers() {
        let mut trace = ScanTrace::new();
        trace.offer(&Record::parse("scan,0,a,0.5,0.5"));
        let chart = trace.render(21, 11);
        assert!(chart.contains('*'));
    }
}
