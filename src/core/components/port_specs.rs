/// Port specification for a device's inputs and outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    /// Port name
    pub name: String,
    /// Whether the driver writes or reads the port
    pub direction: PortDirection,
    /// Width in bits
    pub width: u32,
    /// Optional description for documentation
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    /// Driven by the harness
    Input,
    /// Driven by the device
    Output,
}

impl PortSpec {
    /// Create a new single-bit input port
    pub fn input(name: &str) -> Self {
        Self {
            name: name.to_string(),
            direction: PortDirection::Input,
            width: 1,
            description: None,
        }
    }

    /// Create a new single-bit output port
    pub fn output(name: &str) -> Self {
        Self {
            name: name.to_string(),
            direction: PortDirection::Output,
            width: 1,
            description: None,
        }
    }

    /// Set the width of this port
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Add a description to this port
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn is_input(&self) -> bool {
        self.direction == PortDirection::Input
    }

    pub fn is_output(&self) -> bool {
        self.direction == PortDirection::Output
    }
}
