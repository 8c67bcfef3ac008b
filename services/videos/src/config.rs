//! Server configuration from the environment

use std::env;

/// Network settings for the HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read the listener settings from `SERVER_HOST` and `SERVER_PORT`,
    /// falling back to `0.0.0.0:3001`.
    pub fn from_env() -> Self {
        Self::resolve(env::var("SERVER_HOST").ok(), env::var("SERVER_PORT").ok())
    }

    fn resolve(host: Option<String>, port: Option<String>) -> Self {
        let host = host.unwrap_or_else(|| "0.0.0.0".to_string());
        let port = port.and_then(|s| s.parse().ok()).unwrap_or(3001);

        Self { host, port }
    }

    /// Socket address string for the TCP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
