use crate::{env_or_default, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Listener and static asset configuration for the documentation server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding stylesheets, client scripts and the HTML templates
    pub public_dir: PathBuf,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
        }
    }

    pub fn with_public_dir(mut self, public_dir: impl Into<PathBuf>) -> Self {
        self.public_dir = public_dir.into();
        self
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL used in startup log lines
    pub fn display_url(&self) -> String {
        let host = if self.host == Ipv4Addr::UNSPECIFIED.to_string() {
            "localhost"
        } else {
            self.host.as_str()
        };
        format!("http://{}:{}", host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with defaults:
    /// - HOST: 0.0.0.0 (all interfaces)
    /// - PORT: 3000
    /// - PUBLIC_DIR: `public`
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_or_default("PORT", &DEFAULT_PORT.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "PORT".to_string(),
                details: format!("{}", e),
            })?;
        let public_dir = PathBuf::from(env_or_default("PUBLIC_DIR", DEFAULT_PUBLIC_DIR));

        Ok(Self {
            host,
            port,
            public_dir,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("HOST", None::<&str>),
                ("PORT", None::<&str>),
                ("PUBLIC_DIR", None::<&str>),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.host, "0.0.0.0");
                assert_eq!(config.port, 3000);
                assert_eq!(config.address(), "0.0.0.0:3000");
                assert_eq!(config.public_dir, PathBuf::from("public"));
            },
        );
    }

    #[test]
    fn test_server_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("HOST", Some("127.0.0.1")),
                ("PORT", Some("8081")),
                ("PUBLIC_DIR", Some("/srv/docs/public")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.address(), "127.0.0.1:8081");
                assert_eq!(config.public_dir, PathBuf::from("/srv/docs/public"));
            },
        );
    }

    #[test]
    fn test_server_config_from_env_invalid_port() {
        temp_env::with_var("PORT", Some("not_a_number"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_server_config_from_env_port_out_of_range() {
        temp_env::with_var("PORT", Some("99999"), || {
            assert!(ServerConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_display_url_replaces_unspecified_host() {
        let config = ServerConfig::default();
        assert_eq!(config.display_url(), "http://localhost:3000");

        let config = ServerConfig::new("docs.internal".to_string(), 8080);
        assert_eq!(config.display_url(), "http://docs.internal:8080");
    }

    #[test]
    fn test_with_public_dir() {
        let config = ServerConfig::default().with_public_dir("assets");
        assert_eq!(config.public_dir, PathBuf::from("assets"));
    }
}
