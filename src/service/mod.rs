// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: resolving and validating configuration.
//!
//! [`ConfigResolver`] merges the configured sources into one mapping and
//! [`ConfigValidator`] turns that mapping into an
//! [`EffectiveConfiguration`](crate::domain::EffectiveConfiguration).

pub mod resolver;
pub mod validator;

// Re-export commonly used types
pub use resolver::{ConfigLocations, ConfigResolver, ConfigResolverBuilder, APP_NAME};
pub use validator::ConfigValidator;
