//! Drives a scripted digit producer through the valid/done handshake and
//! prints every digit it reports, one zero-padded line each.
//!
//! Usage: `pisim <trace.toml>`. The arguments belong to the simulation
//! runtime; here the runtime is a trace replay, so the first argument names
//! the trace. Set `PISIM_CONFIG` to a TOML file to override the defaults and
//! `RUST_LOG` to change logging, which always goes to stderr.
use std::io::{self, BufWriter};
use std::path::Path;

use pisim::core::execution::{DriverConfig, SimulationDriver};
use pisim::core::output::{DigitWriter, ProgressLogger};
use pisim::core::trace::Trace;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::var_os("PISIM_CONFIG") {
        Some(path) => DriverConfig::load(Path::new(&path))?,
        None => DriverConfig::default(),
    };

    env_logger::Builder::new()
        .filter_level(config.level_filter()?)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let runtime_args: Vec<String> = std::env::args().skip(1).collect();
    let trace_path = runtime_args.first().ok_or("usage: pisim <trace.toml>")?;
    let device = Trace::load(Path::new(trace_path))?.into_device("pi_calculator");

    let mut driver = SimulationDriver::new(device, &config);
    if config.progress_interval > 0 {
        driver.add_observer(Box::new(ProgressLogger::new(config.progress_interval)));
    }

    let stdout = io::stdout();
    let mut sink = DigitWriter::new(BufWriter::new(stdout.lock()));
    driver.run(&mut sink)?;
    Ok(())
}
