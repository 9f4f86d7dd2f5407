use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables named `WALL_ROBOT_<SECTION>__<KEY>` override file values.
pub const ENV_PREFIX: &str = "WALL_ROBOT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub planner: PlannerConfig,
    pub storage: StorageConfig,
    pub postgres: PostgresConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Row and column spacing in metres.
    pub step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// JSON Lines file used by the `file` backend.
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub file: String,
    pub level: String,
}

impl Config {
    /// Layer defaults, the optional TOML file at `path` and the environment.
    /// A missing file is not an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Config::default())?;
        let settings = ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                static_dir: PathBuf::from("static"),
            },
            planner: PlannerConfig {
                step: crate::domains::coverage::DEFAULT_STEP,
            },
            storage: StorageConfig {
                backend: StorageBackend::File,
                file_path: PathBuf::from("wall_robot.jsonl"),
            },
            postgres: PostgresConfig {
                host: "localhost".to_string(),
                port: 5432,
                database: "wall_robot".to_string(),
                username: "postgres".to_string(),
                password: "password".to_string(),
                max_connections: 10,
            },
            logging: LoggingConfig {
                file: "wall_robot.log".to_string(),
                level: "info".to_string(),
            },
        }
    }
}
