use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://reqres.in/api/cupcakes";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Order endpoint the checkout posts to
    pub endpoint: String,
    /// Upper bound on a single submission; there is no retry
    pub timeout_secs: u64,
    /// Address and port for `serve`
    pub bind_address: String,
    pub port: u16,
}

impl AppConfig {
    /// Defaults, then `cupcake.toml` if present, then `CUPCAKE_*` variables
    /// (e.g. `CUPCAKE_ENDPOINT`, `CUPCAKE_TIMEOUT_SECS`).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::with_prefix("CUPCAKE"))
    }

    pub fn load_from(environment: Environment) -> Result<Self, ConfigError> {
        let config: Self = Self::defaults()?
            .add_source(File::with_name("cupcake").required(false))
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        // A zero timeout fails every request before it is sent
        if config.timeout_secs == 0 {
            return Err(ConfigError::Message("timeout_secs must be at least 1".to_string()));
        }

        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("bind_address", "127.0.0.1")?
            .set_default("port", 8080)
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::Message(format!("invalid endpoint {:?}: {}", self.endpoint, e)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("CUPCAKE").source(Some(vars))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_from(environment(&[])).unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.endpoint_url().unwrap().path(), "/api/cupcakes");
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::load_from(environment(&[
            ("CUPCAKE_ENDPOINT", "http://localhost:9000/orders"),
            ("CUPCAKE_TIMEOUT_SECS", "3"),
            ("CUPCAKE_PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:9000/orders");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_endpoint_is_reported() {
        let config = AppConfig::load_from(environment(&[("CUPCAKE_ENDPOINT", "not a url")])).unwrap();
        assert!(config.endpoint_url().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = AppConfig::load_from(environment(&[("CUPCAKE_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }
}
