//! Runtime configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATS_API_ROOT: &str = "http://localhost:3000/";
pub const DEFAULT_REQUESTS_PATH: &str = "requests-per-day";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Base URL of the statistics API, always ending in `/`.
    pub stats_api_root: String,
    /// Path of the daily definition requests endpoint. Older API builds serve
    /// `requests-per-day`, newer ones `definition_requests_per_day`.
    pub requests_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 8080
    /// - `STATS_API_ROOT`: default `http://localhost:3000/`
    /// - `STATS_REQUESTS_PATH`: default `requests-per-day`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let mut stats_api_root = lookup("STATS_API_ROOT")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_STATS_API_ROOT.to_string());
        if !stats_api_root.ends_with('/') {
            stats_api_root.push('/');
        }

        let requests_path = lookup("STATS_REQUESTS_PATH")
            .map(|value| value.trim().trim_start_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_REQUESTS_PATH.to_string());

        Self {
            port,
            stats_api_root,
            requests_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.stats_api_root, DEFAULT_STATS_API_ROOT);
        assert_eq!(config.requests_path, DEFAULT_REQUESTS_PATH);
    }

    #[test]
    fn api_root_gets_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[(
            "STATS_API_ROOT",
            "http://stats.internal:9000",
        )]));
        assert_eq!(config.stats_api_root, "http://stats.internal:9000/");
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.port, DEFAULT_PORT);

        let config = Config::from_lookup(lookup_from(&[("PORT", "3100")]));
        assert_eq!(config.port, 3100);
    }

    #[test]
    fn requests_path_override_strips_leading_slash() {
        let config = Config::from_lookup(lookup_from(&[(
            "STATS_REQUESTS_PATH",
            "/definition_requests_per_day",
        )]));
        assert_eq!(config.requests_path, "definition_requests_per_day");
    }
}
