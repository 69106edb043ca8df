//! Runtime settings read from the process environment (`.env` is loaded by the binary).

use crate::error::AppError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/bakery";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5555";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub store: StoreKind,
    /// Bakery names inserted at startup when the table is empty.
    pub seed_bakeries: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|e| AppError::Config(format!("BIND_ADDR: {}", e)))?;
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AppError::Config(format!("DATABASE_MAX_CONNECTIONS: invalid value '{}'", v)))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let store = match lookup("BAKERY_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => StoreKind::Postgres,
            Some("memory") => StoreKind::Memory,
            Some(other) => return Err(AppError::Config(format!("BAKERY_STORE: unknown store '{}'", other))),
        };
        let seed_bakeries = lookup("BAKERY_SEED")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            store,
            seed_bakeries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, AppError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_addr.port(), 5555);
        assert_eq!(s.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(s.store, StoreKind::Postgres);
        assert!(s.seed_bakeries.is_empty());
    }

    #[test]
    fn overrides_are_parsed() {
        let s = settings(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BAKERY_STORE", "memory"),
            ("BAKERY_SEED", "Delightful donuts, ,Incredible crullers"),
        ])
        .unwrap();
        assert_eq!(s.bind_addr.port(), 8080);
        assert_eq!(s.max_connections, 12);
        assert_eq!(s.store, StoreKind::Memory);
        assert_eq!(s.seed_bakeries, ["Delightful donuts", "Incredible crullers"]);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        assert!(matches!(settings(&[("BIND_ADDR", "nowhere")]), Err(AppError::Config(_))));
        assert!(matches!(settings(&[("DATABASE_MAX_CONNECTIONS", "0")]), Err(AppError::Config(_))));
        assert!(matches!(settings(&[("BAKERY_STORE", "redis")]), Err(AppError::Config(_))));
    }
}
