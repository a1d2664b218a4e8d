//! YAML configuration for the CLI.
//!
//! ```yaml
//! robot:     { dof: 10, link_length: 0.25, joint_limit: 3.14159 }
//! render:    { format: text, dynamic_duration_secs: 5.0 }
//! simulator: { time_constant: 1.0 }
//! ```
//!
//! Every section and key is optional and falls back to its default.

use anyhow::Context;
use planarvis_render::RenderConfig;
use planarvis_scene::{RelaxationSimulator, RobotConfig};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

const SECTIONS: [&str; 3] = ["robot", "render", "simulator"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub robot: RobotConfig,
    pub render: RenderConfig,
    pub simulator: RelaxationSimulator,
}

impl AppConfig {
    /// Load from an optional YAML file. Missing sections are logged and defaulted.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            info!("no config file given, using default configuration");
            return Ok(Self::default());
        };
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml_str(&data).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml_str(data: &str) -> anyhow::Result<Self> {
        if data.trim().is_empty() {
            info!("config file is empty, using default configuration");
            return Ok(Self::default());
        }
        let mut value: serde_yaml::Value = serde_yaml::from_str(data)?;
        if let Some(map) = value.as_mapping_mut() {
            // A section written without a body (`robot:`) means "use the defaults".
            map.retain(|_, v| !v.is_null());
        }
        for section in SECTIONS {
            if value.get(section).is_none() {
                info!(section, "config section not defined, using defaults");
            }
        }
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }
}
