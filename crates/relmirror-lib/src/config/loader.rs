use super::{Config, DEFAULT_REMOTE_BASE_URL};
use crate::error::RelMirrorError;
use config::{Config as ConfigBuilder, Environment};

pub const ENV_PREFIX: &str = "RELMIRROR";

/// Loads configuration from built-in defaults, an optional file and
/// `RELMIRROR_*` environment variables, in increasing precedence.
pub fn load_config(config_path: Option<&str>) -> Result<Config, RelMirrorError> {
    load_config_with_env(config_path, Environment::with_prefix(ENV_PREFIX))
}

pub(crate) fn load_config_with_env(
    config_path: Option<&str>,
    environment: Environment,
) -> Result<Config, RelMirrorError> {
    let mut builder =
        ConfigBuilder::builder().set_default("remote_base_url", DEFAULT_REMOTE_BASE_URL)?;

    if let Some(config_path) = config_path {
        builder = builder.add_source(config::File::with_name(config_path));
    }

    let config_builder = builder.add_source(environment).build()?;

    config_builder.try_deserialize().map_err(Into::into)
}
