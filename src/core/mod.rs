/*!
 * Core Module
 * Shared types and error definitions
 */

pub mod errors;
pub mod types;

pub use errors::{ConfigError, SimError, StateError};
pub use types::{Band, Tick};
