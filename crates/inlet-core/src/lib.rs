//! Inlet Core crate - shared foundation for the Inlet capture front-end.
//!
//! Provides the workspace-wide error type and the TOML configuration layer
//! used by every other Inlet crate.

pub mod config;
pub mod error;

pub use config::{CaptureConfig, GeneralConfig, InletConfig};
pub use error::{InletError, Result};
