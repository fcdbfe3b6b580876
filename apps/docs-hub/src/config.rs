use core_config::{app_info, server::ServerConfig, store::StoreConfig, AppInfo, FromEnv};

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=3000, PUBLIC_DIR=public
        let store = StoreConfig::from_env()?; // SPECS_SOURCE=local unless set to s3

        Ok(Self {
            app: app_info!(),
            server,
            store,
            environment,
        })
    }
}
