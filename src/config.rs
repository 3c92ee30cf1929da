//! Generator configuration
//!
//! The default reproduces the build table: the four Razer driver headers and
//! `include/DeviceIds.h`. A TOML file can override any field:
//!
//! ```toml
//! prefix = "USB_DEVICE_ID_RAZER_"
//! output = "include/DeviceIds.h"
//!
//! [[sources]]
//! path = "driver/razermouse_driver.h"
//! category = "Mouse"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::aggregator::SourceSpec;
use crate::category::DeviceCategory;
use crate::emitter::EmitOptions;
use crate::error::{GenError, Result};
use crate::extractor::DEFAULT_PREFIX;

/// Full generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Symbol prefix a `#define` must carry to be picked up
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Artifact path, relative to the generator root
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_enum_name")]
    pub enum_name: String,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    /// Comment written under `#pragma once`
    #[serde(default = "default_provenance")]
    pub provenance: String,
    /// Headers in scan order
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceSpec>,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("include/DeviceIds.h")
}

fn default_enum_name() -> String {
    EmitOptions::default().enum_name
}

fn default_function_name() -> String {
    EmitOptions::default().function_name
}

fn default_provenance() -> String {
    EmitOptions::default().provenance
}

fn default_sources() -> Vec<SourceSpec> {
    vec![
        SourceSpec::new("driver/razermouse_driver.h", DeviceCategory::Mouse),
        SourceSpec::new("driver/razerkbd_driver.h", DeviceCategory::Keyboard),
        SourceSpec::new("driver/razerkraken_driver.h", DeviceCategory::Headset),
        SourceSpec::new("driver/razeraccessory_driver.h", DeviceCategory::Accessory),
    ]
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            output: default_output(),
            enum_name: default_enum_name(),
            function_name: default_function_name(),
            provenance: default_provenance(),
            sources: default_sources(),
        }
    }
}

/// C identifier: letter or underscore, then word characters
fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl GeneratorConfig {
    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| GenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| GenError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Reject configs that would produce an uncompilable header
    pub fn validate(&self) -> Result<()> {
        if !is_c_identifier(&self.prefix) {
            return Err(GenError::Config(format!(
                "prefix \"{}\" is not the start of a C identifier",
                self.prefix
            )));
        }
        if !is_c_identifier(&self.enum_name) {
            return Err(GenError::Config(format!(
                "enum_name \"{}\" is not a C identifier",
                self.enum_name
            )));
        }
        if !is_c_identifier(&self.function_name) {
            return Err(GenError::Config(format!(
                "function_name \"{}\" is not a C identifier",
                self.function_name
            )));
        }
        if let Some(src) = self.sources.iter().find(|s| s.category.is_sentinel()) {
            return Err(GenError::Config(format!(
                "{} cannot be mapped to {}",
                src.path.display(),
                src.category
            )));
        }
        Ok(())
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            enum_name: self.enum_name.clone(),
            function_name: self.function_name.clone(),
            provenance: self.provenance.clone(),
        }
    }
}
