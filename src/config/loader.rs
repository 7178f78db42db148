use std::{path::Path, sync::OnceLock};

use clap::{Arg, Command};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::Deserialize;

use super::{Config, ConfigRaw, defaults};
use crate::config::ConfigError;

static CONFIG_ENV: OnceLock<String> = OnceLock::new();

/// Secrets injected from the environment, mapped onto their config keys.
const SECRET_ENV_VARS: [(&str, &str); 3] = [
    ("PQ_DB_PASSWORD", "managers.repository.password"),
    ("PQ_WALLET_PRIVATE_KEY", "managers.blockchain.wallet_private_key"),
    ("PQ_PINATA_JWT", "pinning.jwt"),
];

#[derive(Debug, Deserialize)]
struct EnvironmentConfig {
    environment: Option<String>,
}

/// Returns true if running in a development environment.
/// Derived from config/environment (true if "development").
pub(crate) fn is_dev_env() -> bool {
    matches!(CONFIG_ENV.get().map(String::as_str), Some("development"))
}

pub(crate) fn initialize_configuration() -> Config {
    load_configuration().expect("Failed to load configuration")
}

fn load_configuration() -> Result<Config, ConfigError> {
    let matches = Command::new("Photo Quest Node")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file (.toml format)"),
        )
        .get_matches();

    let custom_config_path = matches.get_one::<String>("config").map(String::as_str);
    load_configuration_from(custom_config_path)
}

pub(super) fn load_configuration_from(
    custom_config_path: Option<&str>,
) -> Result<Config, ConfigError> {
    let node_env = resolve_environment(custom_config_path)?;
    set_config_env(&node_env);

    tracing::info!("Loading configuration for environment: {}", node_env);

    // Priority, lowest to highest: typed defaults, config.toml, custom file, secrets.
    let mut figment = Figment::from(Serialized::defaults(defaults::config_for(&node_env)?));

    if Path::new("config.toml").exists() {
        figment = figment.merge(Toml::file("config.toml"));
    }

    if let Some(config_path) = custom_config_path {
        tracing::info!("Loading custom config file: {}", config_path);
        figment = figment.merge(Toml::file(config_path));
    }

    for (variable, key) in SECRET_ENV_VARS {
        figment = figment.merge(Env::raw().only(&[variable]).map(move |_| key.into()));
    }

    let config: ConfigRaw = figment.extract().map_err(Box::new)?;
    if config.environment != node_env {
        return Err(ConfigError::UnknownEnvironment(format!(
            "config environment '{}' does not match selected '{}'",
            config.environment, node_env
        )));
    }

    let config = config.resolve()?;
    tracing::info!("Configuration loaded successfully");

    Ok(config)
}

fn set_config_env(env: &str) {
    let _ = CONFIG_ENV.set(env.to_string());
}

fn resolve_environment(custom_config_path: Option<&str>) -> Result<String, ConfigError> {
    let config_path = custom_config_path.unwrap_or("config.toml");

    if !Path::new(config_path).exists() {
        return Err(ConfigError::MissingConfig(config_path.to_string()));
    }

    let env = read_environment_from(config_path).ok_or_else(|| {
        ConfigError::MissingEnvironment(
            "set environment = \"development|testnet|mainnet\" in your config".to_string(),
        )
    })?;

    if !matches!(env.as_str(), "development" | "testnet" | "mainnet") {
        return Err(ConfigError::UnknownEnvironment(env));
    }

    Ok(env)
}

fn read_environment_from(path: &str) -> Option<String> {
    Figment::from(Toml::file(path))
        .extract::<EnvironmentConfig>()
        .ok()
        .and_then(|config| config.environment)
        .map(|env| env.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn missing_file_is_reported() {
        let error = resolve_environment(Some("/nonexistent/photo-quest.toml")).unwrap_err();
        assert!(matches!(error, ConfigError::MissingConfig(_)));
    }

    #[test]
    fn file_must_declare_environment() {
        let file = config_file("[http_api]\nport = 9000\n");
        let error = resolve_environment(file.path().to_str()).unwrap_err();
        assert!(matches!(error, ConfigError::MissingEnvironment(_)));
    }

    #[test]
    fn environment_is_normalized() {
        let file = config_file("environment = \" Testnet \"\n");
        assert_eq!(resolve_environment(file.path().to_str()).unwrap(), "testnet");
    }

    #[test]
    fn rejects_unknown_environment() {
        let file = config_file("environment = \"staging\"\n");
        let error = resolve_environment(file.path().to_str()).unwrap_err();
        assert!(matches!(error, ConfigError::UnknownEnvironment(env) if env == "staging"));
    }

    #[test]
    fn custom_file_overrides_defaults() {
        let file = config_file(
            r#"
            environment = "development"
            [indexer]
            poll_interval_ms = 250
            [http_api]
            enabled = false
            "#,
        );
        let config = load_configuration_from(file.path().to_str()).expect("config loads");
        assert_eq!(config.indexer.poll_interval_ms, 250);
        assert!(!config.http_api.enabled);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = config_file(
            r#"
            environment = "development"
            [indexer]
            poll_every = 5
            "#,
        );
        let error = load_configuration_from(file.path().to_str()).unwrap_err();
        assert!(matches!(error, ConfigError::LoadError(_)));
    }
}
