//! Header scanner - pulls product ID macros out of driver headers
//!
//! A line is a product ID definition when it has the shape
//!
//! ```text
//! #define <PREFIX><word chars> 0x<hex digits>[u|l suffix]
//! ```
//!
//! anchored at the start of the line. Hex digits are case-insensitive, a C
//! integer suffix (`u`, `UL`, `ull`, ...) is accepted and dropped, and the
//! literal must end on a word boundary, so `0x12G4` is not a match at all.
//! Anything after the literal (comments, casts) is ignored. Lines without this
//! shape are skipped silently.

use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::category::DeviceCategory;
use crate::error::{GenError, Result};

/// Symbol prefix used by the Razer kernel driver headers
pub const DEFAULT_PREFIX: &str = "USB_DEVICE_ID_RAZER_";

/// Where a definition was found (1-based line)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub path: PathBuf,
    pub line: usize,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// One `(name, value, category)` triple discovered in a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdDefinition {
    pub name: String,
    pub value: u16,
    pub category: DeviceCategory,
    pub origin: Origin,
}

/// Compiled line grammar for a given symbol prefix
#[derive(Debug, Clone)]
pub struct IdPattern {
    regex: Regex,
}

impl IdPattern {
    /// Build the grammar for `prefix`, which is matched literally
    pub fn new(prefix: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(GenError::Config("symbol prefix must not be empty".into()));
        }
        let pattern = format!(
            r"^#define[ \t]+({}\w+)[ \t]+(0x([0-9A-Fa-f]+))[uUlL]{{0,3}}\b",
            regex::escape(prefix)
        );
        let regex =
            Regex::new(&pattern).map_err(|e| GenError::Config(format!("bad prefix: {e}")))?;
        Ok(Self { regex })
    }

    /// Scan `text` line by line, tagging every match with `category`
    ///
    /// `source` is only used to label origins in diagnostics.
    pub fn extract(
        &self,
        source: &Path,
        text: &str,
        category: DeviceCategory,
    ) -> Result<Vec<IdDefinition>> {
        let mut defs = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let Some(caps) = self.regex.captures(line) else {
                continue;
            };
            let origin = Origin {
                path: source.to_path_buf(),
                line: idx + 1,
            };
            let name = caps[1].to_string();
            let value = u16::from_str_radix(&caps[3], 16).map_err(|_| GenError::ValueOutOfRange {
                name: name.clone(),
                literal: caps[2].to_string(),
                origin: origin.clone(),
            })?;
            defs.push(IdDefinition {
                name,
                value,
                category,
                origin,
            });
        }
        Ok(defs)
    }
}
