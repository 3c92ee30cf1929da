//! Device categories assigned per driver header

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device class a product ID belongs to
///
/// Serialized with the same spelling that the generated C++ enum uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceCategory {
    Mouse,
    Keyboard,
    Headset,
    Accessory,
    /// Sentinel returned by the lookup for unmatched IDs
    Unknown,
}

impl DeviceCategory {
    /// Categories a source header may be assigned to, in enum order
    pub const CONFIGURABLE: &'static [DeviceCategory] = &[
        DeviceCategory::Mouse,
        DeviceCategory::Keyboard,
        DeviceCategory::Headset,
        DeviceCategory::Accessory,
    ];

    /// Enumerator name in the generated header
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::Mouse => "Mouse",
            DeviceCategory::Keyboard => "Keyboard",
            DeviceCategory::Headset => "Headset",
            DeviceCategory::Accessory => "Accessory",
            DeviceCategory::Unknown => "Unknown",
        }
    }

    /// True for `Unknown`, which no source may be mapped to
    pub fn is_sentinel(&self) -> bool {
        matches!(self, DeviceCategory::Unknown)
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mouse" => Ok(DeviceCategory::Mouse),
            "keyboard" | "kbd" => Ok(DeviceCategory::Keyboard),
            "headset" | "kraken" => Ok(DeviceCategory::Headset),
            "accessory" => Ok(DeviceCategory::Accessory),
            "unknown" => Ok(DeviceCategory::Unknown),
            _ => Err(format!("unknown device category: \"{s}\"")),
        }
    }
}
