pub mod config;
pub mod cycle_engine;
pub mod session;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::DriverConfig;
pub use cycle_engine::{CycleEngine, DriverState, StepOutcome};
pub use session::DeviceSession;
pub use simulation_engine::{RunExit, RunReport, SimulationDriver, SimulationObserver};
