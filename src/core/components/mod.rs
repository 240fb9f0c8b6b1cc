pub mod port_specs;
pub mod scripted_device;
pub mod traits;

// Re-export commonly used types
pub use port_specs::{PortDirection, PortSpec};
pub use scripted_device::{CycleOutput, ScriptedDevice, Stimulus, StimulusLog};
pub use traits::StimulableDevice;
