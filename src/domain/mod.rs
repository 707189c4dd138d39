// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module holds the configuration vocabulary (keys, values, rules, schemas),
//! the credentials derived from it and the error taxonomy shared by every layer.
//! It performs no I/O.

pub mod config_key;
pub mod config_value;
pub mod credential;
pub mod effective;
pub mod errors;
pub mod rule;
pub mod schema;

// Re-export commonly used types
pub use config_key::{ConfigKey, ValueKind};
pub use config_value::ConfigValue;
pub use credential::{AuthScheme, Credential};
pub use effective::EffectiveConfiguration;
pub use errors::{ConfigError, DataError, HolmscanError, RemoteError, Result};
pub use rule::Rule;
pub use schema::Schema;
