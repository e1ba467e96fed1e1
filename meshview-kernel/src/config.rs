use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::telemetry::DEFAULT_BASE_URL;
use crate::view::DEFAULT_COVERAGE_LIMIT;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct KernelConfig {
    pub telemetry: TelemetryConf,
    pub http: HttpConf,
    pub log_level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TelemetryConf {
    pub base_url: String,
    pub coverage_limit: usize,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HttpConf {
    pub bind: String,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            telemetry: TelemetryConf::default(),
            http: HttpConf::default(),
            log_level: "info".into(),
        }
    }
}

impl Default for TelemetryConf {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            coverage_limit: DEFAULT_COVERAGE_LIMIT,
            timeout_secs: None,
        }
    }
}

impl Default for HttpConf {
    fn default() -> Self {
        Self { bind: "0.0.0.0:8080".into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn parse_config(txt: &str) -> Result<KernelConfig, ConfigError> {
    if txt.trim().is_empty() {
        return Ok(KernelConfig::default());
    }
    Ok(serde_yaml::from_str(txt)?)
}

pub async fn read_config<P: AsRef<Path>>(path: P) -> Result<KernelConfig, ConfigError> {
    let txt = fs::read_to_string(path).await?;
    parse_config(&txt)
}

// variables d'environnement prioritaires sur le fichier
fn apply_env_overrides(mut cfg: KernelConfig) -> KernelConfig {
    if let Ok(url) = std::env::var("MESHVIEW_TELEMETRY_URL") {
        if !url.trim().is_empty() {
            cfg.telemetry.base_url = url;
        }
    }
    if let Ok(bind) = std::env::var("MESHVIEW_BIND") {
        if !bind.trim().is_empty() {
            cfg.http.bind = bind;
        }
    }
    cfg
}

pub fn config_path() -> String {
    std::env::var("MESHVIEW_KERNEL_CONFIG").unwrap_or_else(|_| "kernel.yaml".into())
}

/// Fichier absent : config par défaut. Fichier invalide : erreur, à l'appelant de retomber sur le défaut.
pub async fn load_config() -> Result<KernelConfig, ConfigError> {
    let path = config_path();
    let cfg = if Path::new(&path).exists() {
        read_config(&path).await?
    } else {
        KernelConfig::default()
    };
    Ok(apply_env_overrides(cfg))
}
