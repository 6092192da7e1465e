//! Mood Player Console Library
//!
//! Terminal host for the Mood Player core: configuration loading, a
//! simulated audio engine, and the frame loop that feeds media notifications
//! into the session.
//!
//! This library exposes the host components for testing purposes.

pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod simulation;

// Re-export commonly used types for convenience
pub use command::Command;
pub use config::{ConsoleConfig, SimulationSettings};
pub use error::{ConsoleError, Result};
pub use host::ConsoleHost;
