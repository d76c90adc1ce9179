//! Server Configuration
//!
//! Settings come from command-line flags first, then environment variables,
//! then defaults.
//!
//! | Flag          | Environment        | Default          |
//! |---------------|--------------------|------------------|
//! | `--bind`      | `BOOKREC_BIND`     | `127.0.0.1:5000` |
//! | `--data-dir`  | `BOOKREC_DATA_DIR` | `.`              |
//! | `--log-level` | `BOOKREC_LOG`      | `info`           |

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_DATA_DIR: &str = ".";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_BIND: &str = "BOOKREC_BIND";
pub const ENV_DATA_DIR: &str = "BOOKREC_DATA_DIR";
pub const ENV_LOG: &str = "BOOKREC_LOG";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("invalid bind address '{0}'")]
    InvalidBind(String),

    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),

    #[error("help requested")]
    HelpRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding the four dataset artifacts.
    pub data_dir: PathBuf,
    pub log_level: tracing::Level,
}

impl ServerConfig {
    /// Builds the configuration from the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Parses `args` (without the program name), consulting `env` for anything not given.
    pub fn parse<I, F>(args: I, env: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut bind: Option<String> = None;
        let mut data_dir: Option<String> = None;
        let mut log_level: Option<String> = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--bind" => &mut bind,
                "--data-dir" => &mut data_dir,
                "--log-level" => &mut log_level,
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            };
            *slot = Some(args.next().ok_or(ConfigError::MissingValue(arg))?);
        }

        let bind = bind
            .or_else(|| env(ENV_BIND))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

        let data_dir = data_dir
            .or_else(|| env(ENV_DATA_DIR))
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let log_level = log_level
            .or_else(|| env(ENV_LOG))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let log_level = log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(log_level.clone()))?;

        Ok(Self {
            bind_addr,
            data_dir: PathBuf::from(data_dir),
            log_level,
        })
    }

    pub fn usage(program: &str) -> String {
        format!(
            "Usage: {} [--bind <addr:port>] [--data-dir <path>] [--log-level <level>]\n\
             Example: {} --bind 127.0.0.1:5000 --data-dir ./artifacts",
            program, program
        )
    }
}
