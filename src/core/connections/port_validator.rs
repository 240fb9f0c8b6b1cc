use crate::core::components::{PortDirection, PortSpec, StimulableDevice};
use crate::core::errors::PortError;
use crate::core::types::ports;

/// Ports the harness drives, in the order it first writes them
pub const HANDSHAKE_INPUTS: [&str; 4] = [ports::CLOCK, ports::RESET_N, ports::START, ports::DIGITS];

/// Ports the harness samples on rising edges
pub const HANDSHAKE_OUTPUTS: [&str; 3] = [ports::VALID_OUTPUT, ports::PI_DIGIT, ports::DONE];

/// Port validation utilities for devices
pub struct PortValidator;

impl PortValidator {
    /// Validate that a device declares the full valid/done handshake interface
    pub fn validate_handshake<D: StimulableDevice + ?Sized>(device: &D) -> Result<(), PortError> {
        let declared = device.ports();
        for port in HANDSHAKE_INPUTS {
            Self::validate_port(device.name(), &declared, port, PortDirection::Input)?;
        }
        for port in HANDSHAKE_OUTPUTS {
            Self::validate_port(device.name(), &declared, port, PortDirection::Output)?;
        }
        Ok(())
    }

    /// Validate that a single port exists with the expected direction
    pub fn validate_port(
        device: &str,
        declared: &[PortSpec],
        port: &str,
        expected: PortDirection,
    ) -> Result<(), PortError> {
        let spec = declared
            .iter()
            .find(|spec| spec.name == port)
            .ok_or_else(|| PortError::Missing {
                device: device.to_string(),
                port: port.to_string(),
            })?;

        if spec.direction != expected {
            return Err(PortError::WrongDirection {
                device: device.to_string(),
                port: port.to_string(),
                expected,
                found: spec.direction,
            });
        }
        Ok(())
    }
}
