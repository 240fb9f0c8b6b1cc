use super::port_specs::PortSpec;
use crate::core::errors::DeviceError;
use crate::core::types::SignalValue;

/// A simulated synchronous circuit that the harness can stimulate and sample.
///
/// The device is opaque: its internal state only becomes observable through
/// `evaluate()`, and it is driven and read exclusively through named ports.
/// Implementations may wrap a compiled hardware model or stand in for one in
/// tests.
pub trait StimulableDevice {
    /// Instance name used in logs and errors
    fn name(&self) -> &str;

    /// Ports declared by the device
    fn ports(&self) -> Vec<PortSpec>;

    /// Settle the model against its current inputs
    fn evaluate(&mut self) -> Result<(), DeviceError>;

    /// Drive an input port. Takes effect on the next `evaluate()`.
    fn set_input(&mut self, port: &str, value: SignalValue) -> Result<(), DeviceError>;

    /// Sample an output port as of the last `evaluate()`
    fn get_output(&self, port: &str) -> Result<SignalValue, DeviceError>;

    /// True once the simulation runtime has no more scheduled work
    fn finished(&self) -> bool;

    /// Flush and close the model. Called exactly once, before the device is dropped.
    fn finalize(&mut self);
}

impl<D: StimulableDevice + ?Sized> StimulableDevice for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn ports(&self) -> Vec<PortSpec> {
        (**self).ports()
    }

    fn evaluate(&mut self) -> Result<(), DeviceError> {
        (**self).evaluate()
    }

    fn set_input(&mut self, port: &str, value: SignalValue) -> Result<(), DeviceError> {
        (**self).set_input(port, value)
    }

    fn get_output(&self, port: &str) -> Result<SignalValue, DeviceError> {
        (**self).get_output(port)
    }

    fn finished(&self) -> bool {
        (**self).finished()
    }

    fn finalize(&mut self) {
        (**self).finalize()
    }
}
