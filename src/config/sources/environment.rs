//! Environment source: `DOCVIEW_<SECTION>__<KEY>`, e.g. `DOCVIEW_REFRESH__INTERVAL_MS=500`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "DOCVIEW";

/// Add the environment source to builder.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
