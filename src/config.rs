use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::model::WorkflowConfig;

pub const DEFAULT_PORT: u16 = 8090;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Configuración del proceso, leída del entorno (y de `.env` si existe).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workflow: WorkflowConfig,
    pub port: u16,
    pub static_dir: PathBuf,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("ROBOFLOW_API_KEY").ok_or(ConfigError::Missing("ROBOFLOW_API_KEY"))?;
        let mut workflow = WorkflowConfig::new(api_key);
        if let Some(url) = get("ROBOFLOW_API_URL") {
            workflow.api_url = url;
        }
        if let Some(workspace) = get("ROBOFLOW_WORKSPACE") {
            workflow.workspace = workspace;
        }
        if let Some(id) = get("ROBOFLOW_WORKFLOW_ID") {
            workflow.workflow_id = id;
        }

        Ok(Self {
            workflow,
            port: parse_or(get("VIBE_PORT"), "VIBE_PORT", DEFAULT_PORT)?,
            static_dir: get("VIBE_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            request_timeout: Duration::from_secs(parse_or(
                get("VIBE_REQUEST_TIMEOUT_SECS"),
                "VIBE_REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            max_upload_bytes: parse_or(
                get("VIBE_MAX_UPLOAD_BYTES"),
                "VIBE_MAX_UPLOAD_BYTES",
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
