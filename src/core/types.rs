/// Names of the ports that make up the digit handshake
pub mod ports {
    pub const CLOCK: &str = "clock";
    pub const RESET_N: &str = "reset_n";
    pub const START: &str = "start";
    pub const DIGITS: &str = "digits";
    pub const VALID_OUTPUT: &str = "valid_output";
    pub const PI_DIGIT: &str = "pi_digit";
    pub const DONE: &str = "done";
}

/// Value carried by a single port of a simulated model.
///
/// Simulated models store every port as an integer underneath, so the two
/// variants convert into each other freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalValue {
    Bool(bool),
    UInt(u64),
}

impl SignalValue {
    /// Read the value as a flag; any non-zero integer is true
    pub fn as_bool(&self) -> bool {
        match *self {
            SignalValue::Bool(b) => b,
            SignalValue::UInt(v) => v != 0,
        }
    }

    /// Read the value as an unsigned integer
    pub fn as_u64(&self) -> u64 {
        match *self {
            SignalValue::Bool(b) => u64::from(b),
            SignalValue::UInt(v) => v,
        }
    }
}

impl From<bool> for SignalValue {
    fn from(value: bool) -> Self {
        SignalValue::Bool(value)
    }
}

impl From<u64> for SignalValue {
    fn from(value: u64) -> Self {
        SignalValue::UInt(value)
    }
}

impl std::fmt::Display for SignalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalValue::Bool(b) => write!(f, "{}", u8::from(*b)),
            SignalValue::UInt(v) => write!(f, "{}", v),
        }
    }
}

/// Phase of the driven clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockPhase {
    #[default]
    Low,
    High,
}

impl ClockPhase {
    /// The opposite phase
    pub fn toggle(self) -> Self {
        match self {
            ClockPhase::Low => ClockPhase::High,
            ClockPhase::High => ClockPhase::Low,
        }
    }

    /// True for the active phase, reached by a rising transition
    pub fn is_rising(self) -> bool {
        self == ClockPhase::High
    }

    pub fn as_signal(self) -> SignalValue {
        SignalValue::Bool(self.is_rising())
    }
}
