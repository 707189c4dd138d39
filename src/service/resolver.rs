// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration resolver.
//!
//! The resolver owns an ordered list of [`ConfigSource`]s and merges what they
//! read into one flat mapping. Sources are applied in ascending
//! [`ConfigSource::priority`] order, so a later layer replaces the value of an
//! earlier one key by key. Keys outside the active [`Schema`] are dropped.

use crate::adapters::{DefaultsAdapter, EnvVarAdapter, YamlDirAdapter, YamlFileAdapter};
use crate::domain::{EffectiveConfiguration, Result, Schema};
use crate::ports::{layer, ConfigSource};
use crate::service::validator::ConfigValidator;
use directories::BaseDirs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name used for configuration files and directories.
pub const APP_NAME: &str = "holmscan";

/// Default root for site-wide configuration.
pub const SITE_CONFIG_ROOT: &str = "/etc";

/// The file and directory locations the standard chain reads.
///
/// # Examples
///
/// ```rust
/// use holmscan::service::ConfigLocations;
/// use std::path::Path;
///
/// let locations = ConfigLocations::under("/etc", Some("/home/me/.config".into()));
/// assert_eq!(locations.site_file(), Path::new("/etc/holmscan.yaml"));
/// assert_eq!(locations.site_dir(), Path::new("/etc/holmscan.d"));
/// assert_eq!(
///     locations.user_file(),
///     Some(Path::new("/home/me/.config/holmscan.yaml"))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocations {
    site_file: PathBuf,
    site_dir: PathBuf,
    user_file: Option<PathBuf>,
    user_dir: Option<PathBuf>,
}

impl ConfigLocations {
    /// Locations under a site root and an optional user configuration root.
    ///
    /// Without a user root only the site layers are read.
    pub fn under<P: AsRef<Path>>(site_root: P, user_root: Option<PathBuf>) -> Self {
        let site_root = site_root.as_ref();
        Self {
            site_file: site_root.join(format!("{}.yaml", APP_NAME)),
            site_dir: site_root.join(format!("{}.d", APP_NAME)),
            user_file: user_root
                .as_ref()
                .map(|root| root.join(format!("{}.yaml", APP_NAME))),
            user_dir: user_root.map(|root| root.join(format!("{}.d", APP_NAME))),
        }
    }

    /// The platform locations: `/etc` for the site layers and the user
    /// configuration directory (`~/.config` on Linux) for the user layers.
    pub fn standard() -> Self {
        let user_root = BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf());
        if user_root.is_none() {
            tracing::debug!("No home directory found, skipping user configuration");
        }
        Self::under(SITE_CONFIG_ROOT, user_root)
    }

    /// Returns the site-wide configuration file.
    pub fn site_file(&self) -> &Path {
        &self.site_file
    }

    /// Returns the site-wide drop-in directory.
    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// Returns the user configuration file, if a user root is known.
    pub fn user_file(&self) -> Option<&Path> {
        self.user_file.as_deref()
    }

    /// Returns the user drop-in directory, if a user root is known.
    pub fn user_dir(&self) -> Option<&Path> {
        self.user_dir.as_deref()
    }
}

impl Default for ConfigLocations {
    fn default() -> Self {
        Self::standard()
    }
}

/// Merges configuration sources into one mapping restricted to a schema.
///
/// # Examples
///
/// ```rust
/// use holmscan::adapters::EnvVarAdapter;
/// use holmscan::domain::Schema;
/// use holmscan::service::ConfigResolver;
/// use std::collections::HashMap;
///
/// # fn main() -> holmscan::domain::Result<()> {
/// let mut env = HashMap::new();
/// env.insert("HOLMSEC_TOKEN".to_string(), "abc123".to_string());
/// env.insert("RANDOM_KEY".to_string(), "foo".to_string());
///
/// let resolver = ConfigResolver::builder(Schema::token())
///     .with_defaults()
///     .with_source(Box::new(EnvVarAdapter::with_values(env)))
///     .build();
///
/// let resolved = resolver.resolve()?;
/// assert_eq!(resolved.get("HOLMSEC_TOKEN").map(String::as_str), Some("abc123"));
/// assert!(!resolved.contains_key("RANDOM_KEY"));
/// # Ok(())
/// # }
/// ```
pub struct ConfigResolver {
    schema: Schema,
    /// Sources in application order (lowest priority first)
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigResolver {
    /// Creates a builder for a resolver over `schema`.
    pub fn builder(schema: Schema) -> ConfigResolverBuilder {
        ConfigResolverBuilder::new(schema)
    }

    /// The full six-layer chain: defaults, site file, site directory, user
    /// file, user directory, environment.
    pub fn standard(schema: Schema, locations: &ConfigLocations) -> Self {
        Self::builder(schema)
            .with_defaults()
            .with_locations(locations)
            .with_env_vars()
            .build()
    }

    /// Returns the schema keys are filtered against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Iterates over the sources in application order.
    pub fn sources(&self) -> impl Iterator<Item = &dyn ConfigSource> {
        self.sources.iter().map(|source| source.as_ref())
    }

    /// Reads every source and merges the allowlisted keys.
    ///
    /// A missing file or directory contributes nothing. A source that exists
    /// but cannot be read or parsed aborts resolution.
    pub fn resolve(&self) -> Result<HashMap<String, String>> {
        let mut resolved = HashMap::new();

        for source in &self.sources {
            let values = source.read()?;
            let mut kept = 0;

            for (key, value) in values {
                if self.schema.contains(&key) {
                    resolved.insert(key, value);
                    kept += 1;
                } else {
                    tracing::trace!("Ignoring unknown key '{}' from {}", key, source.describe());
                }
            }

            tracing::debug!(
                "Applied {} key(s) from {} source {} (priority {})",
                kept,
                source.name(),
                source.describe(),
                source.priority()
            );
        }

        Ok(resolved)
    }

    /// Resolves and validates in one step.
    pub fn load(&self) -> Result<EffectiveConfiguration> {
        let resolved = self.resolve()?;
        let config = ConfigValidator::new(self.schema.clone()).validate(&resolved)?;
        tracing::debug!("Effective configuration:\n{}", config);
        Ok(config)
    }
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("scheme", &self.schema.scheme())
            .field(
                "sources",
                &self.sources.iter().map(|s| s.describe()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for constructing a [`ConfigResolver`].
///
/// Sources may be added in any order; [`build`](Self::build) sorts them by
/// priority. Sources sharing a priority keep the order they were added in.
pub struct ConfigResolverBuilder {
    schema: Schema,
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigResolverBuilder {
    /// Creates a builder with no sources.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            sources: Vec::new(),
        }
    }

    /// Adds a configuration source.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds the schema's built-in defaults as the lowest layer.
    pub fn with_defaults(self) -> Self {
        let defaults = DefaultsAdapter::from_schema(&self.schema);
        self.with_source(Box::new(defaults))
    }

    /// Adds a single YAML file at the given priority.
    pub fn with_yaml_file(self, path: impl AsRef<Path>, priority: u8) -> Self {
        self.with_source(Box::new(YamlFileAdapter::new(path, priority)))
    }

    /// Adds a directory of YAML files at the given priority.
    pub fn with_yaml_dir(self, path: impl AsRef<Path>, priority: u8) -> Self {
        self.with_source(Box::new(YamlDirAdapter::new(path, priority)))
    }

    /// Adds the site and user file layers found at `locations`.
    pub fn with_locations(self, locations: &ConfigLocations) -> Self {
        let mut builder = self
            .with_yaml_file(locations.site_file(), layer::SITE_FILE)
            .with_yaml_dir(locations.site_dir(), layer::SITE_DIR);

        if let Some(user_file) = locations.user_file() {
            builder = builder.with_yaml_file(user_file, layer::USER_FILE);
        }
        if let Some(user_dir) = locations.user_dir() {
            builder = builder.with_yaml_dir(user_dir, layer::USER_DIR);
        }
        builder
    }

    /// Adds the process environment as the highest layer.
    pub fn with_env_vars(self) -> Self {
        self.with_source(Box::new(EnvVarAdapter::new()))
    }

    /// Builds the resolver.
    pub fn build(mut self) -> ConfigResolver {
        // sort_by_key is stable, equal priorities keep insertion order
        self.sources.sort_by_key(|source| source.priority());
        ConfigResolver {
            schema: self.schema,
            sources: self.sources,
        }
    }
}
