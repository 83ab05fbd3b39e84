// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::Path;

use config::{Config, ConfigError, File, FileFormat, Source};
use engagecommon::RouterSettings;

/// Prefix of environment variables overriding the configuration.
///
/// E.g. `ENGAGE_TRACK_DISMISSALS=false` sets `RouterSettings.track_dismissals`
/// and `ENGAGE_PRESENTATION__SOUND=false` sets
/// `RouterSettings.presentation.sound`.
pub const ENV_PREFIX: &str = "ENGAGE";

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn from_env() -> Result<Self, String> {
        std::env::var("ENGAGE_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

/// Load the configuration from the `base` and environment-specific files in
/// the given directory.
///
/// Both files are optional; missing values fall back to the defaults of
/// [`RouterSettings`].
pub fn get_configuration(directory: impl AsRef<Path>) -> Result<RouterSettings, ConfigError> {
    let directory = directory.as_ref();
    let environment = Environment::from_env().map_err(ConfigError::Message)?;

    get_configuration_impl(
        File::from(directory.join("base")).required(false),
        File::from(directory.join(environment.as_str())).required(false),
        ENV_PREFIX,
    )
}

/// Load the configuration from the given configuration strings (in YAML format).
pub fn get_configuration_from_str(
    base: &str,
    environment: &str,
) -> Result<RouterSettings, ConfigError> {
    get_configuration_impl(
        File::from_str(base, FileFormat::Yaml),
        File::from_str(environment, FileFormat::Yaml),
        ENV_PREFIX,
    )
}

fn get_configuration_impl(
    base: impl Source + Send + Sync + 'static,
    environment: impl Source + Send + Sync + 'static,
    env_prefix: &str,
) -> Result<RouterSettings, ConfigError> {
    let builder = Config::builder()
        // Read the "default" configuration
        .add_source(base)
        // Layer on the environment-specific values.
        .add_source(environment)
        // Add in settings from environment variables
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
    builder.build()?.try_deserialize()
}
