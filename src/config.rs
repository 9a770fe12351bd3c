//! Run configuration consumed by a placement run.
//!
//! Loaded from TOML via `serde` + `toml`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{PlacementError, Result};

fn default_slots_per_section() -> u32 {
    200
}
fn default_slots_increase_factor() -> f32 {
    0.01
}
fn default_usage_per_section() -> f32 {
    0.8
}
fn default_usage_increase_factor() -> f32 {
    0.01
}
fn default_force_pin_spread() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct Parameters {
    #[serde(rename = "inputDefFile")]
    pub input_def_file: PathBuf,
    #[serde(rename = "outputDefFile")]
    pub output_def_file: PathBuf,
    #[serde(rename = "horizontalMetalLayer")]
    pub horizontal_metal_layer: u32,
    #[serde(rename = "verticalMetalLayer")]
    pub vertical_metal_layer: u32,
    #[serde(rename = "returnHPWL", default)]
    pub return_hpwl: bool,
    #[serde(rename = "slotsPerSection", default = "default_slots_per_section")]
    pub slots_per_section: u32,
    #[serde(
        rename = "slotsIncreaseFactor",
        default = "default_slots_increase_factor"
    )]
    pub slots_increase_factor: f32,
    #[serde(rename = "usagePerSection", default = "default_usage_per_section")]
    pub usage_per_section: f32,
    #[serde(
        rename = "usageIncreaseFactor",
        default = "default_usage_increase_factor"
    )]
    pub usage_increase_factor: f32,
    #[serde(rename = "forcePinSpread", default = "default_force_pin_spread")]
    pub force_pin_spread: bool,
    #[serde(rename = "blockagesFile", default)]
    pub blockages_file: Option<PathBuf>,
}

impl Parameters {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| PlacementError::InvalidConfiguration(format!("malformed config: {e}")))
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PlacementError::InvalidConfiguration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn horizontal_metal_layer_name(&self) -> String {
        format!("Metal{}", self.horizontal_metal_layer)
    }

    pub fn vertical_metal_layer_name(&self) -> String {
        format!("Metal{}", self.vertical_metal_layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let parms = Parameters::from_toml_str(
            r#"
            inputDefFile = "in.def"
            outputDefFile = "out.def"
            horizontalMetalLayer = 4
            verticalMetalLayer = 3
            "#,
        )
        .unwrap();
        assert_eq!(parms.slots_per_section, 200);
        assert_eq!(parms.usage_per_section, 0.8);
        assert!(parms.force_pin_spread);
        assert_eq!(parms.horizontal_metal_layer_name(), "Metal4");
    }
}
