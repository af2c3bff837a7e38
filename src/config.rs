use std::collections::HashMap;

use config::{Config as ConfigLib, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Appended to the trust store path to name the base64 artifact.
    pub base64_suffix: String,
    /// Replace files through a temporary file and rename.
    pub atomic_replace: bool,
    /// Keep a copy of the original trust store as `<path>.bak`.
    pub backup: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base64_suffix: ".b64".to_string(),
            atomic_replace: true,
            backup: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources(None)
    }

    pub fn load_with_sources(
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = OutputConfig::default();
        let mut builder = ConfigLib::builder()
            .set_default("output.base64_suffix", defaults.base64_suffix)?
            .set_default("output.atomic_replace", defaults.atomic_replace)?
            .set_default("output.backup", defaults.backup)?
            .add_source(File::with_name("config/settings").required(false));

        // Explicit overrides replace the process environment so tests stay isolated
        if let Some(vars) = env_vars {
            for (key, value) in vars {
                builder = builder.set_override(&key, value)?;
            }
        } else {
            // e.g. TSCLEAN_OUTPUT__BASE64_SUFFIX=.base64
            builder = builder.add_source(
                Environment::with_prefix("TSCLEAN")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        builder.build()?.try_deserialize()
    }
}
