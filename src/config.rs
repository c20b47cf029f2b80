use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_min_connections: u32,
    pub server_port: u16,
    pub graceful_shutdown_period: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| "DATABASE_URL must be set".to_string())?;

        let database_max_connections: u32 = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 50)?;
        let database_min_connections: u32 = parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", 5)?;
        if database_min_connections > database_max_connections {
            return Err(
                "DATABASE_MIN_CONNECTIONS cannot exceed DATABASE_MAX_CONNECTIONS".to_string(),
            );
        }

        let server_port: u16 = parse_or(&lookup, "SERVER_PORT", 3000)?;
        let graceful_shutdown_secs: u64 =
            parse_or(&lookup, "SERVER_GRACEFUL_SHUTDOWN_SECS", 30)?;

        Ok(Self {
            database_url,
            database_max_connections,
            database_min_connections,
            server_port,
            graceful_shutdown_period: Duration::from_secs(graceful_shutdown_secs),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, String> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} has an invalid value: {}", key, raw)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/test")]).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/test");
        assert_eq!(config.database_max_connections, 50);
        assert_eq!(config.database_min_connections, 5);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.graceful_shutdown_period, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("DATABASE_MAX_CONNECTIONS", "10"),
            ("DATABASE_MIN_CONNECTIONS", "2"),
            ("SERVER_PORT", "8080"),
            ("SERVER_GRACEFUL_SHUTDOWN_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.database_min_connections, 2);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.graceful_shutdown_period, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_database_url() {
        assert_eq!(config_from(&[]).unwrap_err(), "DATABASE_URL must be set");
    }

    #[test]
    fn test_invalid_values() {
        let err = config_from(&[("DATABASE_URL", "x"), ("SERVER_PORT", "http")]).unwrap_err();
        assert!(err.starts_with("SERVER_PORT"));

        let err = config_from(&[
            ("DATABASE_URL", "x"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("DATABASE_MIN_CONNECTIONS", "3"),
        ])
        .unwrap_err();
        assert!(err.contains("cannot exceed"));
    }
}
