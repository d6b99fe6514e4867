//! Module: config
//! Responsibility: engine tunables and their one-time process install.
//! Does not own: per-definition options (those live on key parts).
//! Boundary: `install` is the only process-global write in the crate.


use crate::collation::CollationKind;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::OnceLock};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

pub const DEFAULT_MAX_PARTS: usize = 255;
pub const DEFAULT_REGION_CAPACITY: usize = 4096;
pub const DEFAULT_REGION_MAX_BYTES: usize = 16 * 1024 * 1024;

static INSTALLED: OnceLock<EngineConfig> = OnceLock::new();

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("collation alias '{alias}' targets unknown collation '{target}'")]
    UnknownCollationTarget { alias: String, target: String },

    #[error("max_parts must be a positive 32-bit count, got {got}")]
    InvalidMaxParts { got: usize },

    #[error("region initial_capacity ({initial}) exceeds max_bytes ({max})")]
    InvalidRegion { initial: usize, max: usize },

    #[error("engine config is already installed")]
    AlreadyInstalled,
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Upper bound on key parts accepted by the compiler.
    pub max_parts: usize,

    pub region: RegionConfig,

    /// Extra collation names mapped onto built-in collations.
    pub collations: BTreeMap<String, String>,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_parts == 0 || u32::try_from(self.max_parts).is_err() {
            return Err(ConfigError::InvalidMaxParts {
                got: self.max_parts,
            });
        }

        if self.region.initial_capacity > self.region.max_bytes {
            return Err(ConfigError::InvalidRegion {
                initial: self.region.initial_capacity,
                max: self.region.max_bytes,
            });
        }

        for (alias, target) in &self.collations {
            if CollationKind::from_builtin(target).is_none() {
                return Err(ConfigError::UnknownCollationTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        Ok(())
    }

    /// Resolve a collation name through the alias table.
    #[must_use]
    pub fn collation_kind(&self, name: &str) -> Option<CollationKind> {
        CollationKind::from_builtin(name).or_else(|| {
            self.collations
                .get(name)
                .and_then(|target| CollationKind::from_builtin(target))
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_parts: DEFAULT_MAX_PARTS,
            region: RegionConfig::default(),
            collations: BTreeMap::from([("ci".to_string(), "unicode_ci".to_string())]),
        }
    }
}

///
/// RegionConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionConfig {
    pub initial_capacity: usize,
    pub max_bytes: usize,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_REGION_CAPACITY,
            max_bytes: DEFAULT_REGION_MAX_BYTES,
        }
    }
}

/// Install the process-wide engine config.
///
/// Succeeds once; later calls with an identical config are accepted, any
/// other config is rejected.
pub fn install(config: EngineConfig) -> Result<&'static EngineConfig, ConfigError> {
    config.validate()?;

    let mut pending = Some(config);
    let installed = INSTALLED.get_or_init(|| pending.take().unwrap_or_default());

    match pending {
        Some(rejected) if rejected != *installed => {
            tracing::warn!(
                max_parts = rejected.max_parts,
                "engine config already installed; ignoring conflicting config"
            );
            Err(ConfigError::AlreadyInstalled)
        }
        _ => Ok(installed),
    }
}

/// Return the installed config, installing the default on first use.
pub fn current() -> &'static EngineConfig {
    INSTALLED.get_or_init(EngineConfig::default)
}
