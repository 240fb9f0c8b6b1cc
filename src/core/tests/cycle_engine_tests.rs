#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::core::components::{CycleOutput, PortSpec, ScriptedDevice, StimulableDevice, StimulusLog};
    use crate::core::errors::DeviceError;
    use crate::core::execution::cycle_engine::{CycleEngine, DriverState, StepOutcome};
    use crate::core::types::{ports, ClockPhase, SignalValue};

    // Device that claims a valid digit after every evaluation, equal to the evaluation count
    struct AlwaysValid {
        evaluations: u64,
        writes: Vec<(String, SignalValue)>,
    }

    impl AlwaysValid {
        fn new() -> Self {
            Self {
                evaluations: 0,
                writes: Vec::new(),
            }
        }
    }

    impl StimulableDevice for AlwaysValid {
        fn name(&self) -> &str {
            "always_valid"
        }

        fn ports(&self) -> Vec<PortSpec> {
            ScriptedDevice::new("reference", []).ports()
        }

        fn evaluate(&mut self) -> Result<(), DeviceError> {
            self.evaluations += 1;
            Ok(())
        }

        fn set_input(&mut self, port: &str, value: SignalValue) -> Result<(), DeviceError> {
            self.writes.push((port.to_string(), value));
            Ok(())
        }

        fn get_output(&self, port: &str) -> Result<SignalValue, DeviceError> {
            match port {
                ports::VALID_OUTPUT => Ok(SignalValue::Bool(true)),
                ports::PI_DIGIT => Ok(SignalValue::UInt(self.evaluations)),
                ports::DONE => Ok(SignalValue::Bool(false)),
                _ => Err(DeviceError::UnknownOutput {
                    device: "always_valid".to_string(),
                    port: port.to_string(),
                }),
            }
        }

        fn finished(&self) -> bool {
            false
        }

        fn finalize(&mut self) {}
    }

    fn scripted(script: Vec<CycleOutput>) -> (ScriptedDevice, std::rc::Rc<std::cell::RefCell<StimulusLog>>) {
        let log = StimulusLog::shared();
        (ScriptedDevice::new("dut", script).with_log(log.clone()), log)
    }

    #[test]
    fn test_power_on_drives_initial_values() {
        let mut device = AlwaysValid::new();
        let engine = CycleEngine::power_on(1_000_000, &mut device).unwrap();

        assert_eq!(
            device.writes,
            vec![
                (ports::CLOCK.to_string(), SignalValue::Bool(false)),
                (ports::RESET_N.to_string(), SignalValue::Bool(false)),
                (ports::START.to_string(), SignalValue::Bool(false)),
                (ports::DIGITS.to_string(), SignalValue::UInt(1_000_000)),
            ]
        );
        assert_eq!(device.evaluations, 0);
        assert_eq!(engine.state(), DriverState::Init);
    }

    #[test]
    fn test_first_step_evaluates_before_releasing_reset() {
        let (mut device, log) = scripted(vec![CycleOutput::digit(3)]);
        let mut engine = CycleEngine::power_on(8, &mut device).unwrap();

        engine.step(&mut device).unwrap();
        assert_eq!(engine.state(), DriverState::ResetRelease);

        engine.step(&mut device).unwrap();
        assert_eq!(engine.state(), DriverState::Running);

        let log = log.borrow();
        let stimuli = &log.stimuli;
        assert!(!stimuli[0].reset_n);
        assert!(!stimuli[0].start);
        assert!(!stimuli[0].clock);
        assert_eq!(stimuli[0].digits, 8);
        assert!(stimuli[1].reset_n);
        assert!(stimuli[1].start);
        assert!(stimuli[1].clock);
    }

    #[test]
    fn test_reset_release_happens_once() {
        let mut device = AlwaysValid::new();
        let mut engine = CycleEngine::power_on(10, &mut device).unwrap();
        for _ in 0..20 {
            engine.step(&mut device).unwrap();
        }

        let releases = device
            .writes
            .iter()
            .filter(|(port, value)| port == ports::RESET_N && value.as_bool())
            .count();
        let starts = device
            .writes
            .iter()
            .filter(|(port, value)| port == ports::START && value.as_bool())
            .count();
        assert_eq!(releases, 1);
        assert_eq!(starts, 1);

        // The release lands between the first and second evaluation
        let release_index = device
            .writes
            .iter()
            .position(|(port, value)| port == ports::RESET_N && value.as_bool())
            .unwrap();
        let first_clock_after_init = device
            .writes
            .iter()
            .skip(4)
            .position(|(port, _)| port == ports::CLOCK)
            .unwrap()
            + 4;
        assert!(release_index < first_clock_after_init);
    }

    #[test]
    fn test_clock_alternates_every_step() {
        let (mut device, log) = scripted(vec![CycleOutput::idle(); 8]);
        let mut engine = CycleEngine::power_on(1, &mut device).unwrap();
        for _ in 0..10 {
            engine.step(&mut device).unwrap();
        }

        let clocks: Vec<bool> = log.borrow().stimuli.iter().map(|s| s.clock).collect();
        for (i, clock) in clocks.iter().enumerate() {
            assert_eq!(*clock, i % 2 == 1, "clock at evaluation {}", i + 1);
        }
        assert_eq!(engine.clock(), ClockPhase::Low);
        assert_eq!(engine.rising_edges(), 5);
    }

    #[test]
    fn test_samples_only_on_rising_phase() {
        let mut device = AlwaysValid::new();
        let mut engine = CycleEngine::power_on(10, &mut device).unwrap();

        let outcomes: Vec<StepOutcome> = (0..6).map(|_| engine.step(&mut device).unwrap()).collect();
        assert_eq!(
            outcomes,
            vec![
                StepOutcome::Digit(1),
                StepOutcome::Idle,
                StepOutcome::Digit(3),
                StepOutcome::Idle,
                StepOutcome::Digit(5),
                StepOutcome::Idle,
            ]
        );
        assert_eq!(engine.digits_sampled(), 3);
        assert_eq!(engine.steps(), 6);
    }

    #[test]
    fn test_each_scripted_digit_sampled_once() {
        let (mut device, _log) = scripted(vec![
            CycleOutput::digit(3),
            CycleOutput::idle(),
            CycleOutput::digit(1),
            CycleOutput::digit(4),
        ]);
        let mut engine = CycleEngine::power_on(4, &mut device).unwrap();

        let digits: Vec<u64> = (0..12)
            .filter_map(|_| engine.step(&mut device).unwrap().digit())
            .collect();
        assert_eq!(digits, vec![3, 1, 4]);
    }

    #[test]
    fn test_done_without_valid_is_not_completion() {
        let done_only = CycleOutput {
            valid: false,
            digit: 7,
            done: true,
        };
        let (mut device, _log) = scripted(vec![done_only, CycleOutput::digit(3), CycleOutput::last(1)]);
        let mut engine = CycleEngine::power_on(2, &mut device).unwrap();

        let mut outcomes = Vec::new();
        while engine.state() != DriverState::Done {
            outcomes.push(engine.step(&mut device).unwrap());
        }
        let reported: Vec<StepOutcome> = outcomes.into_iter().filter(|o| *o != StepOutcome::Idle).collect();
        assert_eq!(reported, vec![StepOutcome::Digit(3), StepOutcome::Completed(1)]);
    }

    #[test]
    fn test_step_after_completion_is_inert() {
        let (mut device, log) = scripted(vec![CycleOutput::last(3), CycleOutput::digit(1)]);
        let mut engine = CycleEngine::power_on(1, &mut device).unwrap();

        let mut last = StepOutcome::Idle;
        while engine.state() != DriverState::Done {
            last = engine.step(&mut device).unwrap();
        }
        assert_eq!(last, StepOutcome::Completed(3));
        let evaluations = log.borrow().stimuli.len();
        assert_eq!(evaluations, 3);

        assert_eq!(engine.step(&mut device).unwrap(), StepOutcome::Idle);
        assert_eq!(log.borrow().stimuli.len(), evaluations);
        assert_eq!(device.remaining(), 1);
    }

    #[test]
    fn test_device_error_propagates() {
        let mut device = ScriptedDevice::new("dut", []);
        let mut engine = CycleEngine::power_on(1, &mut device).unwrap();
        device.finalize();
        assert!(matches!(engine.step(&mut device), Err(DeviceError::Finalized { .. })));
    }

    #[test]
    fn test_power_on_error_propagates() {
        let mut device = ScriptedDevice::new("dut", []);
        device.finalize();
        assert!(matches!(
            CycleEngine::power_on(1, &mut device),
            Err(DeviceError::Finalized { .. })
        ));
    }

    // Output read as seen by the device: port, clock input, valid_output at the time
    #[derive(Debug, Clone, PartialEq)]
    struct OutputRead {
        port: String,
        clock: bool,
        valid: bool,
    }

    // Device that is valid on every third evaluation and raises done whenever
    // it is not valid, recording every output read
    struct ReadWatcher {
        evaluations: u64,
        clock: bool,
        valid: bool,
        reads: RefCell<Vec<OutputRead>>,
    }

    impl ReadWatcher {
        fn new() -> Self {
            Self {
                evaluations: 0,
                clock: false,
                valid: false,
                reads: RefCell::new(Vec::new()),
            }
        }

        fn reads_of(&self, port: &str) -> Vec<OutputRead> {
            self.reads.borrow().iter().filter(|r| r.port == port).cloned().collect()
        }
    }

    impl StimulableDevice for ReadWatcher {
        fn name(&self) -> &str {
            "read_watcher"
        }

        fn ports(&self) -> Vec<PortSpec> {
            ScriptedDevice::new("reference", []).ports()
        }

        fn evaluate(&mut self) -> Result<(), DeviceError> {
            self.evaluations += 1;
            self.valid = self.evaluations % 3 == 0;
            Ok(())
        }

        fn set_input(&mut self, port: &str, value: SignalValue) -> Result<(), DeviceError> {
            if port == ports::CLOCK {
                self.clock = value.as_bool();
            }
            Ok(())
        }

        fn get_output(&self, port: &str) -> Result<SignalValue, DeviceError> {
            self.reads.borrow_mut().push(OutputRead {
                port: port.to_string(),
                clock: self.clock,
                valid: self.valid,
            });
            match port {
                ports::VALID_OUTPUT => Ok(SignalValue::Bool(self.valid)),
                ports::PI_DIGIT => Ok(SignalValue::UInt(self.evaluations)),
                ports::DONE => Ok(SignalValue::Bool(!self.valid)),
                _ => Err(DeviceError::UnknownOutput {
                    device: "read_watcher".to_string(),
                    port: port.to_string(),
                }),
            }
        }

        fn finished(&self) -> bool {
            false
        }

        fn finalize(&mut self) {}
    }

    #[test]
    fn test_digit_and_done_read_only_after_valid() {
        let mut device = ReadWatcher::new();
        let mut engine = CycleEngine::power_on(10, &mut device).unwrap();
        for _ in 0..30 {
            engine.step(&mut device).unwrap();
        }

        assert!(device.reads.borrow().iter().all(|r| r.clock), "read on the falling phase");

        let valid_reads = device.reads_of(ports::VALID_OUTPUT);
        assert_eq!(valid_reads.len() as u64, engine.rising_edges());
        assert!(valid_reads.iter().any(|r| !r.valid));

        let digit_reads = device.reads_of(ports::PI_DIGIT);
        let done_reads = device.reads_of(ports::DONE);
        assert!(digit_reads.iter().chain(&done_reads).all(|r| r.valid));
        assert_eq!(digit_reads.len() as u64, engine.digits_sampled());
        assert_eq!(done_reads.len(), digit_reads.len());
        assert!(engine.digits_sampled() > 0);
        assert_eq!(engine.state(), DriverState::Running);
    }
}
