// SPDX-License-Identifier: MIT OR Apache-2.0

//! A command-line client and library for the Holm Security VMP scanning API.
//!
//! The crate is built around two contracts: resolving a validated configuration
//! from layered sources, and performing authenticated HTTP calls through a single
//! gateway. The scan resources and the command line are thin consumers of both.
//!
//! # Architecture
//!
//! The configuration side follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigKey`, `ConfigValue`, `Schema`, `Rule`,
//!   `EffectiveConfiguration`, `Credential`) and the error taxonomy
//! - **Ports**: Trait definitions for origins of configuration (`ConfigSource`,
//!   `ConfigParser`)
//! - **Adapters**: Defaults, YAML files, YAML directories and the environment
//! - **Service**: The resolver that layers sources and the validator that gates
//!   startup
//!
//! On top of it sit the request [`gateway`], the per-resource [`resources`]
//! modules and the [`render`]ers used by the command line.
//!
//! # Precedence
//!
//! Later layers override earlier ones, key by key:
//!
//! 1. built-in defaults
//! 2. `/etc/holmscan.yaml`
//! 3. `/etc/holmscan.d/*.yaml`
//! 4. `~/.config/holmscan.yaml`
//! 5. `~/.config/holmscan.d/*.yaml`
//! 6. environment variables
//!
//! # Feature Flags
//!
//! - `cli`: the `holmscan` binary, its command tree and logging setup (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use holmscan::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigResolver::standard(Schema::token(), &ConfigLocations::standard()).load()?;
//! let mut gateway = Gateway::from_config(&config)?;
//! let assets = NetScans::new(&mut gateway).assets()?;
//! println!("{}", assets);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod gateway;
pub mod ports;
pub mod render;
pub mod resources;
pub mod service;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{DefaultsAdapter, EnvVarAdapter, YamlDirAdapter, YamlFileAdapter};
    pub use crate::domain::{
        AuthScheme, ConfigError, ConfigKey, ConfigValue, Credential, DataError,
        EffectiveConfiguration, HolmscanError, RemoteError, Result, Rule, Schema,
    };
    pub use crate::gateway::{AuthState, Gateway, RequestOptions, Response};
    pub use crate::ports::{layer, ConfigParser, ConfigSource};
    pub use crate::render::{OutputFormat, Renderer};
    pub use crate::resources::{NetScans, ScanResource, WebScans};
    pub use crate::service::{ConfigLocations, ConfigResolver, ConfigValidator};
}
