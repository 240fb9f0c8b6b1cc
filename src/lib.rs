pub mod core;

// Re-export commonly used types
pub use crate::core::components::{CycleOutput, PortSpec, ScriptedDevice, StimulableDevice};
pub use crate::core::errors::DriverError;
pub use crate::core::execution::{DriverConfig, RunExit, RunReport, SimulationDriver};
pub use crate::core::output::DigitWriter;
pub use crate::core::types::{ports, ClockPhase, SignalValue};
