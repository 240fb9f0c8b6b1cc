use std::io;
use std::path::PathBuf;

/// Errors raised by a simulated device when it is stimulated or sampled
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("unknown input port '{port}' on device '{device}'")]
    UnknownInput { device: String, port: String },

    #[error("unknown output port '{port}' on device '{device}'")]
    UnknownOutput { device: String, port: String },

    #[error("device '{device}' was used after finalization")]
    Finalized { device: String },
}

/// Problems with the port interface a device declares
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port '{port}' not found on device '{device}'")]
    Missing { device: String, port: String },

    #[error("port '{port}' on device '{device}' is an {found:?}, expected {expected:?}")]
    WrongDirection {
        device: String,
        port: String,
        expected: crate::core::components::PortDirection,
        found: crate::core::components::PortDirection,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("failed to read trace {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid trace: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("trace entry {index} has repeat = 0")]
    ZeroRepeat { index: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reference file {path} holds no digits")]
    EmptyReference { path: PathBuf },
}

/// Top-level error for a driver run
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
