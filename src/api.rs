use crate::errors::LoadError;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Read-only client for the statistics API.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    root: String,
}

impl StatsClient {
    pub fn new(root: impl Into<String>) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LoadError::Client)?;
        let mut root = root.into();
        if !root.ends_with('/') {
            root.push('/');
        }
        Ok(Self { http, root })
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.root, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, LoadError> {
        let url = self.endpoint_url(path);
        debug!("fetching {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| LoadError::Request { endpoint: path.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| LoadError::Request { endpoint: path.to_string(), source })?;
        serde_json::from_slice(&body).map_err(|source| LoadError::Parse {
            endpoint: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_root_and_path() {
        let client = StatsClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.endpoint_url("active-guilds"), "http://localhost:3000/active-guilds");
        assert_eq!(
            client.endpoint_url("/commands_per_day"),
            "http://localhost:3000/commands_per_day"
        );
    }
}
