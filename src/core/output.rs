use std::io::Write;

use log::{info, warn};

use crate::core::errors::DriverError;
use crate::core::execution::simulation_engine::{RunReport, SimulationObserver};

/// Minimum width of a printed digit field
pub const DIGIT_FIELD_WIDTH: usize = 9;

/// Largest value that fits the field without widening it
pub const MAX_FIELD_VALUE: u64 = 999_999_999;

/// Format a sampled value as a zero-padded line, without the terminator
pub fn format_digit(value: u64) -> String {
    format!("{:0width$}", value, width = DIGIT_FIELD_WIDTH)
}

/// Prints each sampled digit on its own zero-padded line
pub struct DigitWriter<W: Write> {
    out: W,
    lines: u64,
}

impl<W: Write> DigitWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Lines written so far
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SimulationObserver for DigitWriter<W> {
    fn on_digit(&mut self, edge: u64, digit: u64) -> Result<(), DriverError> {
        if digit > MAX_FIELD_VALUE {
            warn!(
                "digit value {} at edge {} is wider than {} characters",
                digit, edge, DIGIT_FIELD_WIDTH
            );
        }
        writeln!(self.out, "{}", format_digit(digit))?;
        self.lines += 1;
        Ok(())
    }

    fn on_finish(&mut self, _report: &RunReport) -> Result<(), DriverError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Logs progress every `interval` digits
#[derive(Debug)]
pub struct ProgressLogger {
    interval: u64,
    seen: u64,
}

impl ProgressLogger {
    pub fn new(interval: u64) -> Self {
        Self { interval, seen: 0 }
    }
}

impl SimulationObserver for ProgressLogger {
    fn on_digit(&mut self, edge: u64, _digit: u64) -> Result<(), DriverError> {
        self.seen += 1;
        if self.interval > 0 && self.seen % self.interval == 0 {
            info!("{} digits sampled by edge {}", self.seen, edge);
        }
        Ok(())
    }
}
