//! TOML traces that script a [`ScriptedDevice`].
//!
//! ```toml
//! [[cycle]]
//! valid = true
//! digit = 3
//!
//! [[cycle]]        # four stall edges
//! repeat = 4
//!
//! [[cycle]]
//! valid = true
//! digit = 141592653
//! done = true
//! ```
use std::path::Path;

use serde::Deserialize;

use crate::core::components::{CycleOutput, ScriptedDevice};
use crate::core::errors::TraceError;

fn one() -> u64 {
    1
}

/// One scripted rising edge, optionally repeated
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceEntry {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub digit: u64,
    #[serde(default)]
    pub done: bool,
    #[serde(default = "one")]
    pub repeat: u64,
}

impl TraceEntry {
    pub fn output(&self) -> CycleOutput {
        CycleOutput {
            valid: self.valid,
            digit: self.digit,
            done: self.done,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trace {
    #[serde(default, rename = "cycle")]
    pub cycles: Vec<TraceEntry>,
}

impl Trace {
    pub fn from_toml_str(content: &str) -> Result<Self, TraceError> {
        let trace: Trace = toml::from_str(content)?;
        if let Some(index) = trace.cycles.iter().position(|entry| entry.repeat == 0) {
            return Err(TraceError::ZeroRepeat { index });
        }
        Ok(trace)
    }

    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let content = std::fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Total number of rising edges the trace scripts
    pub fn edges(&self) -> u64 {
        self.cycles.iter().map(|entry| entry.repeat).sum()
    }

    /// Build a device that replays this trace
    pub fn into_device(self, name: &str) -> ScriptedDevice {
        let mut device = ScriptedDevice::new(name, []);
        for entry in &self.cycles {
            device.push(entry.output(), entry.repeat);
        }
        device
    }
}
