//! Configuration System
//!
//! Layered configuration for the docview controller: built-in defaults, the user
//! config file, an optional explicit file, then `DOCVIEW_` environment variables.

use crate::error::DocviewError;
use crate::logging::LoggingConfig;
use crate::query::SortDirection;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

pub use sources::user_file::user_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocviewConfig {
    /// Pending refresh settings
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// List view defaults
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pending refresh settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Milliseconds between refresh ticks
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    2000
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

/// Defaults applied by list views to incoming queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Sort field used when a query has none
    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,

    #[serde(default)]
    pub default_sort_direction: SortDirection,

    /// Result-size limit for queries built from scratch
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_sort_field() -> String {
    "name".to_string()
}

fn default_limit() -> usize {
    crate::query::DEFAULT_LIMIT
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_sort_field: default_sort_field(),
            default_sort_direction: SortDirection::Asc,
            default_limit: default_limit(),
        }
    }
}

impl DocviewConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.refresh.interval_ms == 0 {
            errors.push("refresh.interval_ms must be greater than zero".to_string());
        }
        if self.listing.default_sort_field.trim().is_empty() {
            errors.push("listing.default_sort_field cannot be empty".to_string());
        }
        if self.listing.default_limit == 0 {
            errors.push("listing.default_limit must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads and validates layered configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the user file and the environment.
    pub fn load() -> Result<DocviewConfig, DocviewError> {
        Self::load_with(None)
    }

    /// Load with an explicit file layered above the user file.
    pub fn load_from_file(path: &Path) -> Result<DocviewConfig, DocviewError> {
        Self::load_with(Some(path))
    }

    fn load_with(path: Option<&Path>) -> Result<DocviewConfig, DocviewError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        builder = sources::user_file::add_to_builder(builder)?;
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = sources::environment::add_to_builder(builder);

        let config: DocviewConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            DocviewError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;
        Ok(config)
    }
}
