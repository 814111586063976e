//! LifeTester - host tools for the LifeTester device
//!
//! Generates the ideal-diode reference table and logs live CSV output from
//! a device over a serial port.
//!
//! # Usage
//!
//! ```bash
//! lifetester sweep > shockley_data.inc
//! lifetester log /dev/ttyUSB0 --plot
//! ```

use std::io::{self, Write};
use std::sync::atomic::Ordering;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lifetester_core::{
    error::{LifeTesterError, Result},
    plot::ScanTrace,
    report,
    serial::{SerialConfig, SerialLogger},
    sweep::sweep,
    BAUD_RATE, DAC_RESOLUTION,
};

/// Chart size for the live plot.
const PLOT_WIDTH: usize = 60;
const PLOT_HEIGHT: usize = 20;

/// LifeTester host tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ideal-diode reference table and its maximum power point
    Sweep {
        /// Number of DAC codes to sweep
        #[arg(short, long, default_value_t = 1u32 << DAC_RESOLUTION)]
        codes: u32,
    },
    /// Log CSV lines from a device on a serial port until Ctrl-C
    Log {
        /// Serial port path (e.g. /dev/ttyUSB0 or COM3)
        port: String,

        /// Baud rate
        #[arg(short, long, default_value_t = BAUD_RATE)]
        baud: u32,

        /// Live-plot channel `a` scan records in the terminal
        #[arg(long)]
        plot: bool,
    },
}

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    match args.command {
        Command::Sweep { codes } => run_sweep(codes),
        Command::Log { port, baud, plot } => run_logger(&port, baud, plot),
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_sweep(codes: u32) -> Result<()> {
    let result = sweep(codes);
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    report::write_report(&mut handle, &result)?;
    handle
        .flush()
        .map_err(|source| LifeTesterError::ReportWrite { source })
}

fn run_logger(port: &str, baud: u32, plot: bool) -> Result<()> {
    let config = SerialConfig::new(port).with_baud_rate(baud);
    let mut logger = SerialLogger::open(&config)?;

    let stop = logger.stop_flag();
    ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))
        .map_err(|source| LifeTesterError::Interrupt { source })?;

    let mut trace = ScanTrace::new();
    logger.run(|record| {
        if plot && trace.offer(record) {
            println!("{}", trace.render(PLOT_WIDTH, PLOT_HEIGHT));
        }
    })?;

    let records = logger.into_records();
    tracing::info!(
        "session captured {} records ({} plotted, {} malformed scans)",
        records.len(),
        trace.len(),
        trace.skipped()
    );
    Ok(())
}
