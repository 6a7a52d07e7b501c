//! Configuration loaded from `lectio.toml`.
//!
//! [`LectioConfig`] holds every configurable parameter. Values missing from
//! the file fall back to defaults, and the `LECTIO_SERVICE_URL` environment
//! variable takes precedence over the file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LectioConfig {
    /// Base URL of the processing service.
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Upper bound in seconds for one processing request. Transcription of
    /// a long recording is slow, so the default is generous.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Where the persisted workflow state lives.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_service_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    600
}

fn default_store_path() -> PathBuf {
    PathBuf::from("lectio-store.json")
}

impl Default for LectioConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            request_timeout_secs: default_request_timeout_secs(),
            store_path: default_store_path(),
        }
    }
}

impl LectioConfig {
    /// Load the configuration from `lectio.toml` in the current directory,
    /// falling back to defaults if the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Path::new("lectio.toml");
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<LectioConfig>(&contents)?
        } else {
            Self::default()
        };

        // The environment variable wins over the config file.
        if let Ok(url) = std::env::var("LECTIO_SERVICE_URL")
            && !url.is_empty()
        {
            config.service_url = url;
        }

        Ok(config)
    }
}
