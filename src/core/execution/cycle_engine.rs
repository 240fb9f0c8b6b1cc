use log::debug;

use crate::core::components::StimulableDevice;
use crate::core::errors::DeviceError;
use crate::core::types::{ports, ClockPhase, SignalValue};

/// Where the handshake is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Inputs are set, nothing has been evaluated yet; the device is held in reset
    Init,
    /// Reset was released and start asserted on the latest step
    ResetRelease,
    /// Sampling rising edges for digits
    Running,
    /// Valid and done were seen together; no further steps are taken
    Done,
}

/// Result of one step of the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to report this step
    Idle,
    /// A valid digit was sampled on this rising edge
    Digit(u64),
    /// The final digit was sampled; the run is over
    Completed(u64),
}

impl StepOutcome {
    /// The digit sampled on this step, if any
    pub fn digit(&self) -> Option<u64> {
        match *self {
            StepOutcome::Idle => None,
            StepOutcome::Digit(d) | StepOutcome::Completed(d) => Some(d),
        }
    }
}

/// Clock-driven valid/done handshake against a single device.
///
/// An engine only exists once `power_on` has driven the initial inputs. Each
/// `step()` then evaluates the device, performs the one-shot reset release on
/// the very first step, toggles the clock and, on the rising phase only,
/// samples `valid_output`. `pi_digit` and `done` are read only when it is set.
#[derive(Debug)]
pub struct CycleEngine {
    state: DriverState,
    clock: ClockPhase,
    requested_digits: u64,
    steps: u64,
    rising_edges: u64,
    digits_sampled: u64,
}

impl CycleEngine {
    /// Drive the power-on values and return an engine ready to step
    ///
    /// # Arguments
    /// * `requested_digits` - Value held on the `digits` port for the whole run
    /// * `device` - Device to put into its power-on state
    ///
    /// # Returns
    /// An engine in `DriverState::Init` with the clock low, reset and start
    /// deasserted, or the first error the device reported while being driven
    pub fn power_on<D: StimulableDevice + ?Sized>(
        requested_digits: u64,
        device: &mut D,
    ) -> Result<Self, DeviceError> {
        let engine = Self {
            state: DriverState::Init,
            clock: ClockPhase::Low,
            requested_digits,
            steps: 0,
            rising_edges: 0,
            digits_sampled: 0,
        };
        device.set_input(ports::CLOCK, engine.clock.as_signal())?;
        device.set_input(ports::RESET_N, SignalValue::Bool(false))?;
        device.set_input(ports::START, SignalValue::Bool(false))?;
        device.set_input(ports::DIGITS, SignalValue::UInt(requested_digits))?;
        debug!("{}: powered on, requesting {} digits", device.name(), requested_digits);
        Ok(engine)
    }

    /// Execute one iteration of the drive loop
    pub fn step<D: StimulableDevice + ?Sized>(&mut self, device: &mut D) -> Result<StepOutcome, DeviceError> {
        if self.state == DriverState::Done {
            return Ok(StepOutcome::Idle);
        }
        device.evaluate()?;
        self.steps += 1;

        match self.state {
            DriverState::Init => {
                device.set_input(ports::RESET_N, SignalValue::Bool(true))?;
                device.set_input(ports::START, SignalValue::Bool(true))?;
                self.state = DriverState::ResetRelease;
                debug!("{}: reset released and start asserted at step {}", device.name(), self.steps);
            }
            DriverState::ResetRelease => self.state = DriverState::Running,
            DriverState::Running | DriverState::Done => {}
        }

        self.clock = self.clock.toggle();
        device.set_input(ports::CLOCK, self.clock.as_signal())?;

        if !self.clock.is_rising() {
            return Ok(StepOutcome::Idle);
        }
        self.rising_edges += 1;

        if !device.get_output(ports::VALID_OUTPUT)?.as_bool() {
            return Ok(StepOutcome::Idle);
        }

        let digit = device.get_output(ports::PI_DIGIT)?.as_u64();
        self.digits_sampled += 1;

        if device.get_output(ports::DONE)?.as_bool() {
            self.state = DriverState::Done;
            debug!(
                "{}: done at edge {} after {} digits",
                device.name(),
                self.rising_edges,
                self.digits_sampled
            );
            return Ok(StepOutcome::Completed(digit));
        }
        Ok(StepOutcome::Digit(digit))
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn clock(&self) -> ClockPhase {
        self.clock
    }

    pub fn requested_digits(&self) -> u64 {
        self.requested_digits
    }

    /// Evaluation steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Rising clock phases seen so far
    pub fn rising_edges(&self) -> u64 {
        self.rising_edges
    }

    /// Valid digits sampled so far
    pub fn digits_sampled(&self) -> u64 {
        self.digits_sampled
    }
}
