// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams between the resolver and the origins it reads.
//! They are implemented by the adapters in the adapters layer.

pub mod parser;
pub mod source;

// Re-export commonly used types
pub use parser::ConfigParser;
pub use source::{layer, ConfigSource};
