// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration source implementations.
//!
//! Each adapter implements the `ConfigSource` trait from the ports layer for one
//! kind of origin: built-in defaults, a YAML file, a directory of YAML files, or
//! the process environment.

pub mod defaults;
pub mod env_var;
pub mod yaml_dir;
pub mod yaml_file;

pub use defaults::DefaultsAdapter;
pub use env_var::EnvVarAdapter;
pub use yaml_dir::YamlDirAdapter;
pub use yaml_file::{YamlFileAdapter, YamlParser};
