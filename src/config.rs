use crate::domain::{AssetId, Decimal};
use std::collections::HashMap;
use thiserror::Error;

/// Bootstrap ROOT total for distribution cycle 6. No on-chain source for the
/// per-cycle bootstrap amount exists yet, so it is supplied as configuration.
pub const DEFAULT_BOOTSTRAP_ROOT: &str = "17057307006875";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_dir: String,
    pub default_database: String,
    pub chain_rpc_url: String,
    pub vtx_asset_id: AssetId,
    pub root_asset_id: AssetId,
    pub bootstrap_root: Decimal,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_dir = env_map
            .get("DATABASE_DIR")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_DIR".to_string()))?;

        let default_database = env_map
            .get("DEFAULT_DATABASE")
            .cloned()
            .unwrap_or_else(|| "vortex".to_string());
        crate::db::registry::validate_database_name(&default_database).map_err(|_| {
            ConfigError::InvalidValue(
                "DEFAULT_DATABASE".to_string(),
                "must match [A-Za-z0-9_-]+".to_string(),
            )
        })?;

        let chain_rpc_url = env_map
            .get("CHAIN_RPC_URL")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("CHAIN_RPC_URL".to_string()))?;

        let vtx_asset_id = parse_asset_id(&env_map, "VTX_ASSET_ID", "3")?;
        let root_asset_id = parse_asset_id(&env_map, "ROOT_ASSET_ID", "1")?;

        let bootstrap_root = Decimal::from_str_canonical(
            env_map
                .get("BOOTSTRAP_ROOT")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_BOOTSTRAP_ROOT),
        )
        .ok()
        .filter(|d| !d.is_negative())
        .ok_or_else(|| {
            ConfigError::InvalidValue(
                "BOOTSTRAP_ROOT".to_string(),
                "must be a non-negative decimal".to_string(),
            )
        })?;

        Ok(Config {
            port,
            database_dir,
            default_database,
            chain_rpc_url,
            vtx_asset_id,
            root_asset_id,
            bootstrap_root,
        })
    }
}

fn parse_asset_id(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
) -> Result<AssetId, ConfigError> {
    env_map
        .get(key)
        .map(|s| s.as_str())
        .unwrap_or(default)
        .parse::<AssetId>()
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), "must be a valid u32".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("DATABASE_DIR".to_string(), "/tmp/vortex".to_string());
        map.insert(
            "CHAIN_RPC_URL".to_string(),
            "http://127.0.0.1:9933".to_string(),
        );
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_database, "vortex");
        assert_eq!(config.vtx_asset_id, 3);
        assert_eq!(config.root_asset_id, 1);
        assert_eq!(config.bootstrap_root.to_canonical_string(), DEFAULT_BOOTSTRAP_ROOT);
    }

    #[test]
    fn test_missing_database_dir() {
        let mut env_map = setup_required_env();
        env_map.remove("DATABASE_DIR");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_DIR"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_missing_chain_rpc_url() {
        let mut env_map = setup_required_env();
        env_map.remove("CHAIN_RPC_URL");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "CHAIN_RPC_URL"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_default_database() {
        let mut env_map = setup_required_env();
        env_map.insert("DEFAULT_DATABASE".to_string(), "../other".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DEFAULT_DATABASE"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_asset_id() {
        let mut env_map = setup_required_env();
        env_map.insert("VTX_ASSET_ID".to_string(), "-3".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "VTX_ASSET_ID"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_bootstrap_root_override() {
        let mut env_map = setup_required_env();
        env_map.insert("BOOTSTRAP_ROOT".to_string(), "42.5".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.bootstrap_root.to_canonical_string(), "42.5");
    }

    #[test]
    fn test_negative_bootstrap_root_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("BOOTSTRAP_ROOT".to_string(), "-1".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BOOTSTRAP_ROOT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
