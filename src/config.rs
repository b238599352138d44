//! Runtime configuration utilities for article-ai.

use std::{env, fmt, path::PathBuf};

use serde::Deserialize;

/// Fallback session key, only suitable for local development.
const INSECURE_SECRET_KEY: &str = "123";

/// Compute device selected for model inference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum Device {
    Cpu,
    /// Visible device list as given by `CUDA_VISIBLE_DEVICES`.
    Gpu(String),
}

impl Device {
    /// Resolve the device from a `CUDA_VISIBLE_DEVICES` style selector.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(str::trim) {
            Some(devices) if !devices.is_empty() => Device::Gpu(devices.to_string()),
            _ => Device::Cpu,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("cpu"),
            Device::Gpu(devices) => write!(f, "gpu:{devices}"),
        }
    }
}

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Key used to sign session cookies.
    pub secret_key: String,
    /// Optional log file; stderr is used when absent.
    pub log_file: Option<PathBuf>,
    /// Device selected for inference.
    pub device: Device,
    /// Folder holding robots.txt, the web manifest and icons.
    pub static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            secret_key: INSECURE_SECRET_KEY.to_string(),
            log_file: None,
            device: Device::Cpu,
            static_dir: PathBuf::from("src/ui/static"),
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let secret_key = first_var(&["ARTICLE_AI_SECRET_KEY", "FLASK_SECRET_KEY"])
            .unwrap_or(defaults.secret_key);
        let log_file = first_var(&["ARTICLE_AI_LOG_FILE", "FLASK_LOG_FILE_PATH"])
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let device = Device::from_selector(env::var("CUDA_VISIBLE_DEVICES").ok().as_deref());
        let static_dir = env::var("ARTICLE_AI_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        Ok(Self {
            secret_key,
            log_file,
            device,
            static_dir,
        })
    }

    /// Whether the session key is still the development fallback.
    pub fn uses_insecure_secret(&self) -> bool {
        self.secret_key == INSECURE_SECRET_KEY
    }
}

fn first_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selector_means_cpu() {
        assert_eq!(Device::from_selector(None), Device::Cpu);
        assert_eq!(Device::from_selector(Some("")), Device::Cpu);
        assert_eq!(Device::from_selector(Some("  ")), Device::Cpu);
    }

    #[test]
    fn device_list_selects_gpu() {
        let device = Device::from_selector(Some("0,1"));
        assert_eq!(device, Device::Gpu("0,1".into()));
        assert_eq!(device.to_string(), "gpu:0,1");
    }

    #[test]
    fn default_settings_flag_insecure_key() {
        assert!(Settings::default().uses_insecure_secret());
    }
}
