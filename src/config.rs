use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorConfig,
    pub image: ImageConfig,
    pub cluster: ClusterConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Report destination; overwritten on every run.
    pub output: PathBuf,
    /// Window for the global CPU utilization sample.
    pub host_cpu_sample_ms: u64,
    /// Window for the per-process CPU sample. 100 ms keeps a full scan
    /// bounded; 1000 ms trades latency for a longer observation window.
    pub process_sample_ms: u64,
    /// Mount point whose disk totals appear in the report.
    pub mount_point: String,
    /// Number of top-CPU processes listed.
    pub top_processes: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            output: PathBuf::from("monitor.txt"),
            host_cpu_sample_ms: 1000,
            process_sample_ms: 100,
            mount_point: "/".to_string(),
            top_processes: 5,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Container engine CLI; anything docker-compatible works.
    pub engine: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            engine: "docker".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub kubectl: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            kubectl: "kubectl".to_string(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("opskit").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
