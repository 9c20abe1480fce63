//! Tilawa Player - terminal driver
//!
//! Wires the playback controller to a simulated media element, a tokio
//! timer scheduler and a surah navigation host backed by the verse cache.

pub mod config;
pub mod error;
pub mod session;

pub use config::CliConfig;
pub use error::{CliError, Result};
