//! Generator error types

use std::path::PathBuf;
use thiserror::Error;

use crate::category::DeviceCategory;
use crate::extractor::Origin;

/// Errors that abort a generation run
#[derive(Error, Debug)]
pub enum GenError {
    /// Source exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact could not be written or moved into place
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Same symbol defined twice across the scanned sources
    #[error(
        "Duplicate definition of {name}: 0x{first_value:04X} at {first} and 0x{second_value:04X} at {second}"
    )]
    DuplicateName {
        name: String,
        first: Origin,
        first_value: u16,
        second: Origin,
        second_value: u16,
    },

    /// Two symbols share a product ID, the switch would get two equal labels
    #[error(
        "Product ID 0x{value:04X} defined twice: {first_name} ({first_category}) at {first} and {second_name} ({second_category}) at {second}"
    )]
    DuplicateValue {
        value: u16,
        first_name: String,
        first_category: DeviceCategory,
        first: Origin,
        second_name: String,
        second_category: DeviceCategory,
        second: Origin,
    },

    /// Hex literal matched but does not fit a USB product ID
    #[error("{name} at {origin}: value {literal} does not fit in 16 bits")]
    ValueOutOfRange {
        name: String,
        literal: String,
        origin: Origin,
    },

    /// Semantically invalid configuration
    #[error("Invalid config: {0}")]
    Config(String),

    /// Config file is not valid TOML for `GeneratorConfig`
    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `--check` found the artifact missing or out of date
    #[error("{} is out of date, rerun the generator", path.display())]
    Stale { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, GenError>;
