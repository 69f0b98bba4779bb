//! Where the backend lives.
//!
//! Native builds read an optional `disposisi.toml` and `DISPOSISI_*`
//! environment variables (a `.env` file is honoured). The browser build has
//! no environment at runtime, so the base URL is baked in at compile time
//! from `DISPOSISI_API_URL`.

use serde::Deserialize;

/// Fallback when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApiSettings {
    /// Base URL every API path is appended to.
    pub api_url: String,
    /// Key under which the browser build keeps the session token.
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_token_key() -> String {
    "disposisi_token".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_url: option_env!("DISPOSISI_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            token_key: default_token_key(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ApiSettings {
    /// Layer defaults, `disposisi.toml` and `DISPOSISI_*` variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::layered(config::Environment::with_prefix("DISPOSISI"))
    }

    fn layered(env: config::Environment) -> Result<Self, config::ConfigError> {
        use config::{Config, File, FileFormat};

        let defaults = ApiSettings::default();
        Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("token_key", defaults.token_key)?
            .add_source(
                File::with_name("disposisi.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

#[cfg(target_arch = "wasm32")]
impl ApiSettings {
    /// The browser build only has the compile-time defaults.
    pub fn load() -> Result<Self, std::convert::Infallible> {
        Ok(Self::default())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use config::{Environment, Map};

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("DISPOSISI").source(Some(map))
    }

    #[test]
    fn test_settings_from_env() {
        let settings = ApiSettings::layered(env(&[("DISPOSISI_API_URL", "http://10.0.0.5:8000/api")])).unwrap();
        assert_eq!(settings.api_url, "http://10.0.0.5:8000/api");
        assert_eq!(settings.token_key, "disposisi_token");
    }

    #[test]
    fn test_settings_defaults_without_env() {
        let settings = ApiSettings::layered(env(&[])).unwrap();
        assert_eq!(settings, ApiSettings::default());
    }
}
