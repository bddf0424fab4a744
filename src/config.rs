use std::{fs, path::Path};

use parse_display::Display;
use serde::{Deserialize, Serialize};

use crate::Filter;


/// Settings for a [`TodoApp`](crate::TodoApp).
///
/// Every field is optional in TOML form.
///
/// ```toml
/// seed = false
/// initial_filter = "active"
///
/// [store]
/// completed_on_add = false
/// id_scheme = "sequential"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Start with [`Todos::seed`](crate::Todos::seed) instead of an empty list.
    pub seed: bool,
    pub initial_filter: Filter,
    pub store: StoreConfig,
}
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: true,
            initial_filter: Filter::All,
            store: StoreConfig::default(),
        }
    }
}
impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Parse)
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Value of `completed` for items created by [`TodoStore::add`](crate::TodoStore::add).
    pub completed_on_add: bool,
    pub id_scheme: IdScheme,
}

/// How [`TodoStore`](crate::TodoStore) assigns ids to new items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    /// Random UUID v4.
    #[default]
    Uuid,
    /// `todo-0`, `todo-1`, ... continuing after the initial items.
    Sequential,
}

#[derive(Debug, Display)]
pub enum ConfigError {
    #[display("failed to read config file `{path}`: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[display("invalid config: {0}")]
    Parse(toml::de::Error),
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
        }
    }
}
