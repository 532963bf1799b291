use std::path::{Path, PathBuf};

use cpc_vault_lib::settings::{load_string, save_string, settings_path};

use crate::error::SuggestError;

/// Environment variable overriding the flow endpoint.
pub const ENDPOINT_ENV_VAR: &str = "CPC_VAULT_SUGGEST_URL";

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "CPC_VAULT_SUGGEST_KEY";

/// Flow endpoint used when nothing else is configured (a local flow server).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3400/suggestRelatedGames";

const SECTION: &str = "suggest";

/// Where the suggestion service is and how to authenticate with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the settings file.
    SettingsFile,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::SettingsFile => write!(f, "settings file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub endpoint: ConfigSource,
    pub api_key: ConfigSource,
}

impl SuggestConfig {
    /// Load from environment variables and the shared settings file.
    ///
    /// Priority: env vars > `[suggest]` in `settings.toml` > default endpoint.
    /// The API key is optional; a local flow server needs none.
    pub fn load() -> Result<Self, SuggestError> {
        Self::load_from(&settings_path())
    }

    /// Same as [`SuggestConfig::load`], reading the settings file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, SuggestError> {
        let endpoint = env_value(ENDPOINT_ENV_VAR)
            .or_else(|| load_string(path, SECTION, "endpoint"))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        check_endpoint(&endpoint)?;

        let api_key = env_value(API_KEY_ENV_VAR).or_else(|| load_string(path, SECTION, "api_key"));

        Ok(Self { endpoint, api_key })
    }

    /// Replace the endpoint and/or key with explicit values (e.g., from CLI args).
    ///
    /// An overriding endpoint is held to the same rules as a loaded one.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, SuggestError> {
        if let Some(e) = endpoint {
            check_endpoint(&e)?;
            self.endpoint = e;
        }
        if let Some(k) = api_key {
            self.api_key = Some(k);
        }
        Ok(self)
    }
}

/// Store the endpoint and/or API key in the `[suggest]` section of the shared
/// settings file. `None` leaves a value as it is; an empty string removes it.
///
/// Returns the path written.
pub fn save_to_settings(
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<PathBuf, SuggestError> {
    let path = settings_path();
    save_to_settings_at(&path, endpoint, api_key)?;
    Ok(path)
}

fn save_to_settings_at(
    path: &Path,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<(), SuggestError> {
    if let Some(endpoint) = endpoint.map(str::trim) {
        if !endpoint.is_empty() {
            check_endpoint(endpoint)?;
        }
        save_string(path, SECTION, "endpoint", non_empty(endpoint))?;
    }
    if let Some(key) = api_key.map(str::trim) {
        save_string(path, SECTION, "api_key", non_empty(key))?;
    }
    Ok(())
}

/// An endpoint must be an absolute http or https URL.
fn check_endpoint(endpoint: &str) -> Result<(), SuggestError> {
    let parsed = url::Url::parse(endpoint)
        .map_err(|e| SuggestError::Config(format!("Invalid endpoint '{endpoint}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SuggestError::Config(format!(
            "Endpoint '{endpoint}' must use http or https"
        )));
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Determine where each config field is coming from.
pub fn config_sources() -> ConfigSources {
    config_sources_from(&settings_path())
}

fn config_sources_from(path: &Path) -> ConfigSources {
    let endpoint = if env_value(ENDPOINT_ENV_VAR).is_some() {
        ConfigSource::EnvVar(ENDPOINT_ENV_VAR)
    } else if load_string(path, SECTION, "endpoint").is_some() {
        ConfigSource::SettingsFile
    } else {
        ConfigSource::Default
    };

    let api_key = if env_value(API_KEY_ENV_VAR).is_some() {
        ConfigSource::EnvVar(API_KEY_ENV_VAR)
    } else if load_string(path, SECTION, "api_key").is_some() {
        ConfigSource::SettingsFile
    } else {
        ConfigSource::Missing
    };

    ConfigSources { endpoint, api_key }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}
