use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use log::{debug, trace};

use super::port_specs::PortSpec;
use super::traits::StimulableDevice;
use crate::core::errors::DeviceError;
use crate::core::types::{ports, SignalValue};

/// Output presented by the device for one rising clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleOutput {
    pub valid: bool,
    pub digit: u64,
    pub done: bool,
}

impl CycleOutput {
    /// A valid digit with more to follow
    pub fn digit(digit: u64) -> Self {
        Self { valid: true, digit, done: false }
    }

    /// The final valid digit
    pub fn last(digit: u64) -> Self {
        Self { valid: true, digit, done: true }
    }

    /// A stall cycle with nothing to report
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Inputs seen by the device at one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stimulus {
    pub evaluation: u64,
    pub clock: bool,
    pub reset_n: bool,
    pub start: bool,
    pub digits: u64,
}

/// Record of everything the harness did to a device
#[derive(Debug, Default)]
pub struct StimulusLog {
    pub stimuli: Vec<Stimulus>,
    pub finalize_count: usize,
}

impl StimulusLog {
    pub fn shared() -> Rc<RefCell<StimulusLog>> {
        Rc::new(RefCell::new(StimulusLog::default()))
    }
}

#[derive(Debug)]
struct ScriptEntry {
    output: CycleOutput,
    remaining: u64,
}

/// Behavioural stand-in for the digit producer that replays a fixed script.
///
/// Outputs are held invalid while `reset_n` is low. Once `start` has been seen
/// high on a rising clock edge, every rising edge presents the next scripted
/// output; outputs stay stable between edges. The runtime reports itself
/// finished on the first rising edge after the script runs out, or after an
/// optional evaluation limit.
#[derive(Debug)]
pub struct ScriptedDevice {
    name: String,
    inputs: HashMap<&'static str, SignalValue>,
    output: CycleOutput,
    script: VecDeque<ScriptEntry>,
    prev_clock: bool,
    started: bool,
    evaluations: u64,
    exhausted_at: Option<u64>,
    finish_after: Option<u64>,
    finalized: bool,
    log: Option<Rc<RefCell<StimulusLog>>>,
}

impl ScriptedDevice {
    pub fn new(name: &str, script: impl IntoIterator<Item = CycleOutput>) -> Self {
        let mut device = Self {
            name: name.to_string(),
            inputs: HashMap::new(),
            output: CycleOutput::idle(),
            script: VecDeque::new(),
            prev_clock: false,
            started: false,
            evaluations: 0,
            exhausted_at: None,
            finish_after: None,
            finalized: false,
            log: None,
        };
        for port in [ports::CLOCK, ports::RESET_N, ports::START, ports::DIGITS] {
            device.inputs.insert(port, SignalValue::UInt(0));
        }
        for output in script {
            device.push(output, 1);
        }
        device
    }

    /// Append `repeat` copies of an output to the script
    pub fn push(&mut self, output: CycleOutput, repeat: u64) {
        if repeat == 0 {
            return;
        }
        match self.script.back_mut() {
            Some(last) if last.output == output => last.remaining += repeat,
            _ => self.script.push_back(ScriptEntry { output, remaining: repeat }),
        }
    }

    /// Stop scheduling work after this many evaluations, like a `$finish` at a fixed time
    pub fn with_finish_after(mut self, evaluations: u64) -> Self {
        self.finish_after = Some(evaluations);
        self
    }

    /// Record stimuli and finalization into a shared log
    pub fn with_log(mut self, log: Rc<RefCell<StimulusLog>>) -> Self {
        self.log = Some(log);
        self
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Scripted outputs not yet presented
    pub fn remaining(&self) -> u64 {
        self.script.iter().map(|e| e.remaining).sum()
    }

    fn input(&self, port: &str) -> SignalValue {
        self.inputs.get(port).copied().unwrap_or(SignalValue::UInt(0))
    }

    fn next_output(&mut self) -> Option<CycleOutput> {
        let entry = self.script.front_mut()?;
        let output = entry.output;
        entry.remaining -= 1;
        if entry.remaining == 0 {
            self.script.pop_front();
        }
        Some(output)
    }

    fn ensure_live(&self) -> Result<(), DeviceError> {
        if self.finalized {
            return Err(DeviceError::Finalized { device: self.name.clone() });
        }
        Ok(())
    }
}

impl StimulableDevice for ScriptedDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn ports(&self) -> Vec<PortSpec> {
        vec![
            PortSpec::input(ports::CLOCK),
            PortSpec::input(ports::RESET_N).with_description("active-low reset"),
            PortSpec::input(ports::START),
            PortSpec::input(ports::DIGITS).with_width(32),
            PortSpec::output(ports::VALID_OUTPUT),
            PortSpec::output(ports::PI_DIGIT).with_width(32),
            PortSpec::output(ports::DONE),
        ]
    }

    fn evaluate(&mut self) -> Result<(), DeviceError> {
        self.ensure_live()?;
        self.evaluations += 1;

        let clock = self.input(ports::CLOCK).as_bool();
        let reset_n = self.input(ports::RESET_N).as_bool();
        let start = self.input(ports::START).as_bool();

        if let Some(log) = &self.log {
            log.borrow_mut().stimuli.push(Stimulus {
                evaluation: self.evaluations,
                clock,
                reset_n,
                start,
                digits: self.input(ports::DIGITS).as_u64(),
            });
        }

        let rising = clock && !self.prev_clock;
        self.prev_clock = clock;

        if !reset_n {
            self.output = CycleOutput::idle();
            self.started = false;
            return Ok(());
        }

        if !rising {
            return Ok(());
        }

        if start && !self.started {
            debug!("{}: start latched at evaluation {}", self.name, self.evaluations);
            self.started = true;
        }
        if !self.started {
            return Ok(());
        }

        match self.next_output() {
            Some(output) => {
                trace!("{}: presenting {:?}", self.name, output);
                if output.done && !output.valid {
                    trace!("{}: done without valid at evaluation {}", self.name, self.evaluations);
                }
                self.output = output;
            }
            None => {
                self.output.valid = false;
                if self.exhausted_at.is_none() {
                    debug!("{}: script exhausted at evaluation {}", self.name, self.evaluations);
                    self.exhausted_at = Some(self.evaluations);
                }
            }
        }
        Ok(())
    }

    fn set_input(&mut self, port: &str, value: SignalValue) -> Result<(), DeviceError> {
        self.ensure_live()?;
        match self.inputs.get_mut(port) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(DeviceError::UnknownInput {
                device: self.name.clone(),
                port: port.to_string(),
            }),
        }
    }

    fn get_output(&self, port: &str) -> Result<SignalValue, DeviceError> {
        self.ensure_live()?;
        match port {
            ports::VALID_OUTPUT => Ok(SignalValue::Bool(self.output.valid)),
            ports::PI_DIGIT => Ok(SignalValue::UInt(self.output.digit)),
            ports::DONE => Ok(SignalValue::Bool(self.output.done)),
            _ => Err(DeviceError::UnknownOutput {
                device: self.name.clone(),
                port: port.to_string(),
            }),
        }
    }

    fn finished(&self) -> bool {
        self.exhausted_at.is_some()
            || self.finish_after.is_some_and(|limit| self.evaluations >= limit)
    }

    fn finalize(&mut self) {
        self.finalized = true;
        if let Some(log) = &self.log {
            log.borrow_mut().finalize_count += 1;
        }
        debug!("{}: finalized after {} evaluations", self.name, self.evaluations);
    }
}
