//! Backing store configuration for specification documents.
//!
//! The documents either live in a local directory tree (`<root>/<folder>/<file>.yaml`)
//! or in an S3 bucket under a key prefix (`<prefix><folder>/<file>.yaml`).

use crate::{env_optional, env_or_default, ConfigError, FromEnv};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_SPECS_DIR: &str = "data";
const DEFAULT_BUCKET: &str = "api-documentation";
const DEFAULT_REGION: &str = "eu-west-1";

/// Which store the catalog is loaded from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Local,
    S3,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" | "fs" | "filesystem" => Ok(StoreBackend::Local),
            "s3" => Ok(StoreBackend::S3),
            other => Err(format!("unknown store backend '{}', expected 'local' or 's3'", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Local => f.write_str("local"),
            StoreBackend::S3 => f.write_str("s3"),
        }
    }
}

/// Static credentials for the object store
#[derive(Clone)]
pub struct S3Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

// Secrets stay out of logs.
impl fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .finish()
    }
}

/// Object store location and access settings
#[derive(Clone, Debug)]
pub struct S3Config {
    pub bucket: String,
    pub prefix: String,
    pub region: String,
    /// Custom endpoint (MinIO, LocalStack); forces path-style addressing
    pub endpoint: Option<String>,
    /// `None` falls back to the AWS default credential chain
    pub credentials: Option<S3Credentials>,
}

impl FromEnv for S3Config {
    /// Reads:
    /// - S3_BUCKET_NAME (default `api-documentation`)
    /// - S3_PREFIX (default empty)
    /// - AWS_REGION (default `eu-west-1`)
    /// - AWS_ENDPOINT_URL (optional)
    /// - AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY / AWS_SESSION_TOKEN (optional, both keys or neither)
    fn from_env() -> Result<Self, ConfigError> {
        let credentials = match (
            env_optional("AWS_ACCESS_KEY_ID"),
            env_optional("AWS_SECRET_ACCESS_KEY"),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => Some(S3Credentials {
                access_key_id,
                secret_access_key,
                session_token: env_optional("AWS_SESSION_TOKEN"),
            }),
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar("AWS_SECRET_ACCESS_KEY".to_string()));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar("AWS_ACCESS_KEY_ID".to_string()));
            }
            (None, None) => None,
        };

        Ok(Self {
            bucket: env_or_default("S3_BUCKET_NAME", DEFAULT_BUCKET),
            prefix: normalize_prefix(&env_or_default("S3_PREFIX", "")),
            region: env_or_default("AWS_REGION", DEFAULT_REGION),
            endpoint: env_optional("AWS_ENDPOINT_URL"),
            credentials,
        })
    }
}

/// Specification store configuration
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Root of the local directory tree
    pub specs_dir: PathBuf,
    /// Only loaded when the backend is S3
    pub s3: Option<S3Config>,
}

impl FromEnv for StoreConfig {
    /// Reads SPECS_SOURCE (`local` or `s3`, default `local`) and SPECS_DIR (default `data`).
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env_or_default("SPECS_SOURCE", "local")
            .parse::<StoreBackend>()
            .map_err(|details| ConfigError::ParseError {
                key: "SPECS_SOURCE".to_string(),
                details,
            })?;

        let s3 = match backend {
            StoreBackend::S3 => Some(S3Config::from_env()?),
            StoreBackend::Local => None,
        };

        Ok(Self {
            backend,
            specs_dir: PathBuf::from(env_or_default("SPECS_DIR", DEFAULT_SPECS_DIR)),
            s3,
        })
    }
}

/// Prefixes are matched as folder paths, so a non-empty prefix always ends with '/'.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}
