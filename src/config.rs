use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use config::{Config, File};
use serde::Deserialize;
use url::Url;

const DEFAULT_CONFIG_PATH: &str = "settings.yml";
const APP_PORT_ENV: &str = "APP_PORT";
const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_CACHE_CAPACITY: u64 = 100;

pub struct Settings {
    pub port: u16,
    pub database_url: Url,
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
    pub frontend_origin: Option<String>,
}

#[derive(Deserialize)]
struct DefaultConfig {
    app_port: u16,
    db_name: String,
    db_host: String,
    db_port: u16,
    db_user: String,
    db_pass: String,
    #[serde(default = "default_cache_ttl_secs")]
    cache_ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    cache_capacity: u64,
    #[serde(default)]
    frontend_origin: Option<String>,
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

fn default_cache_capacity() -> u64 {
    DEFAULT_CACHE_CAPACITY
}

fn load_default_config() -> Result<DefaultConfig> {
    let settings = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_PATH))
        .build()
        .map_err(|_| anyhow!("Failed to read config file"))?;

    settings
        .try_deserialize::<DefaultConfig>()
        .map_err(|_| anyhow!("Failed to deserialize config file"))
}

/// Try to parse env variable. If it's not set, return None. If it's invalid, treat it as an error.
fn try_from_env<T, F>(env_var: &str, f: F) -> Result<Option<T>>
where
    F: FnOnce(String) -> Result<T>,
{
    match std::env::var(env_var) {
        Ok(raw) => {
            let val = f(raw).map_err(|_| anyhow!("Failed to parse {}", env_var))?;
            Ok(Some(val))
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(_) => bail!("Could not read {env_var} from env"),
    }
}

/// Load configuration from env with fallback to default config file. Early returns if everything is set in env.
pub fn load() -> Result<Settings> {
    let port_opt: Option<u16> = try_from_env(APP_PORT_ENV, |env_str| {
        env_str.parse::<u16>().map_err(|e| e.into())
    })?;

    let database_url_opt: Option<Url> = try_from_env(DATABASE_URL_ENV, |env_str| {
        Url::parse(&env_str).map_err(|e| e.into())
    })?;

    if let (Some(port), Some(database_url)) = (port_opt, database_url_opt.clone()) {
        return Ok(Settings {
            port,
            database_url,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            frontend_origin: None,
        });
    }

    let config = load_default_config()?;

    let port = match port_opt {
        Some(val) => val,
        None => {
            tracing::warn!("{APP_PORT_ENV} is not set, using value from {DEFAULT_CONFIG_PATH}");
            config.app_port
        }
    };

    let database_url = match database_url_opt {
        Some(url) => url,
        None => {
            tracing::warn!("{DATABASE_URL_ENV} is not set, using value from {DEFAULT_CONFIG_PATH}");
            let url_str = format!(
                "postgres://{}:{}@{}:{}/{}",
                config.db_user, config.db_pass, config.db_host, config.db_port, config.db_name
            );
            Url::parse(&url_str)?
        }
    };

    Ok(Settings {
        port,
        database_url,
        cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        cache_capacity: config.cache_capacity,
        frontend_origin: config.frontend_origin,
    })
}
