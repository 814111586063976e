//! Blocking serial logger.
//!
//! Opens the device port at 9600 8N1, polls for bytes with a short read
//! timeout, frames them into CSV records and buffers every record for the
//! session. A shared stop flag (set from a Ctrl-C handler) ends the loop;
//! dropping the logger closes the port.

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serialport::SerialPort;
use tracing::info;

use crate::error::{LifeTesterError, Result};
use crate::BAUD_RATE;

use super::{LineFramer, Record};

/// Read chunk size for each poll.
const READ_CHUNK: usize = 256;

/// Serial port configuration for the logger.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Port path (e.g. "/dev/ttyUSB0", "COM3")
    pub port: String,
    /// Baud rate; the firmware uses 9600
    pub baud_rate: u32,
    /// Read timeout; keeps the poll loop responsive to the stop flag
    pub read_timeout: Duration,
}

impl SerialConfig {
    /// Configuration for a port at the firmware's baud rate.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: BAUD_RATE,
            read_timeout: Duration::from_millis(50),
        }
    }

    /// Override the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
}

/// Reads CSV lines from a LifeTester over a serial port.
pub struct SerialLogger {
    port: Box<dyn SerialPort>,
    framer: LineFramer,
    records: Vec<Record>,
    stop: Arc<AtomicBool>,
}

impl SerialLogger {
    /// Open the configured port (8 data bits, 1 stop bit, no parity, no
    /// flow control).
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(config.read_timeout)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .flow_control(serialport::FlowControl::None)
            .open()
            .map_err(|source| LifeTesterError::SerialOpen {
                port: config.port.clone(),
                source,
            })?;

        info!("opened {} at {} baud", config.port, config.baud_rate);

        Ok(Self {
            port,
            framer: LineFramer::new(),
            records: Vec::new(),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Shared stop flag; set it true (e.g. from a Ctrl-C handler) to end
    /// [`run`](Self::run).
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Poll the port once and return any records completed by this read.
    ///
    /// A timed-out read is not an error, it just means no bytes arrived
    /// within the read timeout.
    pub fn poll(&mut self) -> Result<Vec<Record>> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = match self.port.read(&mut chunk) {
            Ok(n) => n,
            Err(e)
                if e.kind() == std::io::ErrorKind::TimedOut
                    || e.kind() == std::io::ErrorKind::WouldBlock =>
            {
                return Ok(Vec::new());
            }
            Err(e) => return Err(LifeTesterError::serial_read(e)),
        };

        let mut completed = Vec::new();
        for line in self.framer.push_bytes(&chunk[..n]) {
            info!("{}", line);
            let record = Record::parse(&line);
            self.records.push(record.clone());
            completed.push(record);
        }
        Ok(completed)
    }

    /// Poll until the stop flag is raised, handing each completed record to
    /// the callback.
    pub fn run<F: FnMut(&Record)>(&mut self, mut on_record: F) -> Result<()> {
        while !self.stop.load(Ordering::SeqCst) {
            for record in self.poll()? {
                on_record(&record);
            }
        }
        info!("interrupted, closing port");
        Ok(())
    }

    /// All records buffered this session, in arrival order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the logger (closing the port) and take the session's records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
