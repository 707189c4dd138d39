// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging setup for the command line.
//!
//! Logs go to standard error through a `tracing-subscriber` fmt layer. The
//! level filter sits behind a reload layer so the resolved `HOLMSCAN_DEBUG`
//! can raise it once configuration has been loaded.

use crate::domain::schema::HOLMSCAN_DEBUG;
use crate::domain::ConfigValue;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Maps `-q` and the number of `-v` flags to a level.
///
/// `-q` is error only, no flag is warn, then info, debug and trace.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Returns true if `HOLMSCAN_DEBUG` is set to a truthy value in the process
/// environment.
pub fn debug_requested_by_env() -> bool {
    std::env::var(HOLMSCAN_DEBUG)
        .map(|value| ConfigValue::from(value).is_truthy())
        .unwrap_or(false)
}

/// Handle to the installed subscriber's level filter.
#[derive(Debug)]
pub struct LogHandle {
    level: LevelFilter,
    /// `RUST_LOG` was set and owns the filter
    env_controlled: bool,
    reload: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogHandle {
    /// Returns the level set from the command line and early environment.
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Raises the filter to debug unless it is already at least that verbose
    /// or `RUST_LOG` is in control.
    pub fn raise_to_debug(&mut self) {
        if self.env_controlled || self.level >= LevelFilter::DEBUG {
            return;
        }
        if let Some(handle) = &self.reload {
            match handle.reload(EnvFilter::new(LevelFilter::DEBUG.to_string())) {
                Ok(()) => {
                    self.level = LevelFilter::DEBUG;
                    tracing::debug!("Debug logging enabled by {}", HOLMSCAN_DEBUG);
                }
                Err(e) => tracing::warn!("Failed to raise log level: {}", e),
            }
        }
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the level comes from [`level_for`],
/// raised to debug when [`debug_requested_by_env`] is true. Installing twice
/// keeps the first subscriber.
pub fn init(verbose: u8, quiet: bool) -> LogHandle {
    let mut level = level_for(verbose, quiet);
    if debug_requested_by_env() && level < LevelFilter::DEBUG {
        level = LevelFilter::DEBUG;
    }

    let (filter, env_controlled) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(level.to_string()), false),
    };

    let (filter, handle) = reload::Layer::new(filter);
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .is_ok();

    LogHandle {
        level,
        env_controlled,
        reload: installed.then_some(handle),
    }
}
