use log::{debug, info};
use uuid::Uuid;

use super::config::DriverConfig;
use super::cycle_engine::{CycleEngine, DriverState, StepOutcome};
use super::session::DeviceSession;
use crate::core::components::StimulableDevice;
use crate::core::connections::PortValidator;
use crate::core::errors::DriverError;

/// Observer trait for driver events
pub trait SimulationObserver {
    /// Called once for every valid digit, in sampling order
    fn on_digit(&mut self, edge: u64, digit: u64) -> Result<(), DriverError>;

    /// Called after every evaluation step
    fn on_step_complete(&mut self, _step: u64, _outcome: StepOutcome) {}

    /// Called once when the loop exits without error, before the device is finalized
    fn on_finish(&mut self, _report: &RunReport) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Why the drive loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// Valid and done were seen together
    Completed,
    /// The runtime ran out of work before completion
    RuntimeFinished,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub device: String,
    pub steps: u64,
    pub rising_edges: u64,
    pub digits: u64,
    pub exit: RunExit,
}

/// Drives a single device through the valid/done handshake until it completes
/// or its runtime stops scheduling work.
pub struct SimulationDriver<D: StimulableDevice> {
    session: DeviceSession<D>,
    requested_digits: u64,
    run_id: Uuid,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl<D: StimulableDevice> SimulationDriver<D> {
    /// Take ownership of a device for one run
    ///
    /// # Arguments
    /// * `device` - Device to drive; finalized when the run ends or the driver is dropped
    /// * `config` - Supplies the digit count driven on the `digits` port
    ///
    /// # Returns
    /// A driver with a fresh run id and no extra observers. Nothing is driven
    /// on the device until `run` is called.
    pub fn new(device: D, config: &DriverConfig) -> Self {
        Self {
            session: DeviceSession::new(device),
            requested_digits: config.requested_digits,
            run_id: Uuid::new_v4(),
            observers: Vec::new(),
        }
    }

    /// Add an observer that sees every digit alongside the main sink
    ///
    /// # Arguments
    /// * `observer` - Notified after the sink, in the order observers were added
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Run to completion, reporting digits to `sink`.
    ///
    /// The device is finalized and released exactly once before this returns,
    /// whether the loop completed, the runtime finished, or an error stopped it.
    pub fn run<O: SimulationObserver + ?Sized>(mut self, sink: &mut O) -> Result<RunReport, DriverError> {
        let result = self.drive(sink);
        let SimulationDriver { session, run_id, .. } = self;
        session.close();

        let report = result?;
        info!(
            "run {}: {:?} after {} steps, {} rising edges, {} digits",
            run_id, report.exit, report.steps, report.rising_edges, report.digits
        );
        Ok(report)
    }

    fn drive<O: SimulationObserver + ?Sized>(&mut self, sink: &mut O) -> Result<RunReport, DriverError> {
        PortValidator::validate_handshake(self.session.device())?;
        info!(
            "run {}: driving '{}', requesting {} digits",
            self.run_id,
            self.session.device().name(),
            self.requested_digits
        );

        let mut engine = CycleEngine::power_on(self.requested_digits, self.session.device_mut())?;

        while !self.session.device().finished() {
            let outcome = engine.step(self.session.device_mut())?;

            if let Some(digit) = outcome.digit() {
                let edge = engine.rising_edges();
                sink.on_digit(edge, digit)?;
                for observer in &mut self.observers {
                    observer.on_digit(edge, digit)?;
                }
            }

            let step = engine.steps();
            sink.on_step_complete(step, outcome);
            for observer in &mut self.observers {
                observer.on_step_complete(step, outcome);
            }

            if engine.state() == DriverState::Done {
                break;
            }
        }

        let exit = if engine.state() == DriverState::Done {
            RunExit::Completed
        } else {
            debug!("run {}: runtime finished before done", self.run_id);
            RunExit::RuntimeFinished
        };

        let report = RunReport {
            run_id: self.run_id,
            device: self.session.device().name().to_string(),
            steps: engine.steps(),
            rising_edges: engine.rising_edges(),
            digits: engine.digits_sampled(),
            exit,
        };

        sink.on_finish(&report)?;
        for observer in &mut self.observers {
            observer.on_finish(&report)?;
        }
        Ok(report)
    }
}
