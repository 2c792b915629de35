//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("refresh.interval_ms", 2000_i64)?
        .set_default("listing.default_sort_field", "name")?
        .set_default("listing.default_sort_direction", "asc")?
        .set_default("listing.default_limit", 30_i64)
}
