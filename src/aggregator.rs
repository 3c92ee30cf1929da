//! Aggregates definitions across the configured driver headers
//!
//! Sources are visited in configured order. A source that does not exist is
//! skipped so partial checkouts still generate; a source that exists but
//! cannot be read aborts the run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::category::DeviceCategory;
use crate::error::{GenError, Result};
use crate::extractor::{IdDefinition, IdPattern};

/// One configured `(header, category)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Header path, relative paths resolve against the generator root
    pub path: PathBuf,
    pub category: DeviceCategory,
}

impl SourceSpec {
    pub fn new(path: impl Into<PathBuf>, category: DeviceCategory) -> Self {
        Self {
            path: path.into(),
            category,
        }
    }
}

/// Ordered list of discovered definitions, unique by name and by value
///
/// Each value becomes one `case` label in the generated switch, so two names
/// sharing a value are rejected like two definitions of one name.
#[derive(Debug, Default, Clone)]
pub struct DefinitionSequence {
    defs: Vec<IdDefinition>,
    /// Symbol name -> index into `defs`
    by_name: HashMap<String, usize>,
    /// Product ID -> index into `defs`
    by_value: HashMap<u16, usize>,
}

impl DefinitionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition, rejecting a name or value that was already seen
    pub fn push(&mut self, def: IdDefinition) -> Result<()> {
        if let Some(&idx) = self.by_name.get(&def.name) {
            let first = &self.defs[idx];
            return Err(GenError::DuplicateName {
                name: def.name,
                first: first.origin.clone(),
                first_value: first.value,
                second: def.origin,
                second_value: def.value,
            });
        }
        if let Some(&idx) = self.by_value.get(&def.value) {
            let first = &self.defs[idx];
            return Err(GenError::DuplicateValue {
                value: def.value,
                first_name: first.name.clone(),
                first_category: first.category,
                first: first.origin.clone(),
                second_name: def.name,
                second_category: def.category,
                second: def.origin,
            });
        }
        self.by_name.insert(def.name.clone(), self.defs.len());
        self.by_value.insert(def.value, self.defs.len());
        self.defs.push(def);
        Ok(())
    }

    pub fn extend(&mut self, defs: impl IntoIterator<Item = IdDefinition>) -> Result<()> {
        defs.into_iter().try_for_each(|d| self.push(d))
    }

    /// Definitions in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &IdDefinition> {
        self.defs.iter()
    }

    pub fn get(&self, name: &str) -> Option<&IdDefinition> {
        self.by_name.get(name).map(|&idx| &self.defs[idx])
    }

    /// Category the generated lookup returns for `value`
    pub fn lookup(&self, value: u16) -> DeviceCategory {
        self.by_value
            .get(&value)
            .map(|&idx| self.defs[idx].category)
            .unwrap_or(DeviceCategory::Unknown)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Scan every source in order and collect one definition sequence
pub fn collect(
    sources: &[SourceSpec],
    root: &Path,
    pattern: &IdPattern,
) -> Result<DefinitionSequence> {
    let mut seq = DefinitionSequence::new();

    for spec in sources {
        let path = root.join(&spec.path);
        if !path.exists() {
            debug!("Skipping missing source {}", path.display());
            continue;
        }

        let text = std::fs::read_to_string(&path).map_err(|source| GenError::Read {
            path: path.clone(),
            source,
        })?;
        let defs = pattern.extract(&spec.path, &text, spec.category)?;
        debug!(
            "{}: {} {} IDs",
            spec.path.display(),
            defs.len(),
            spec.category
        );
        seq.extend(defs)?;
    }

    Ok(seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{Origin, DEFAULT_PREFIX};

    fn def(name: &str, value: u16, category: DeviceCategory, line: usize) -> IdDefinition {
        IdDefinition {
            name: name.to_string(),
            value,
            category,
            origin: Origin {
                path: PathBuf::from("test.h"),
                line,
            },
        }
    }

    fn write(dir: &Path, rel: &str, text: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn test_push_rejects_duplicate_name() {
        let mut seq = DefinitionSequence::new();
        seq.push(def("USB_DEVICE_ID_RAZER_A", 0x0001, DeviceCategory::Mouse, 1))
            .unwrap();
        let err = seq
            .push(def("USB_DEVICE_ID_RAZER_A", 0x0002, DeviceCategory::Keyboard, 9))
            .unwrap_err();
        match err {
            GenError::DuplicateName {
                name,
                first,
                first_value,
                second,
                second_value,
            } => {
                assert_eq!(name, "USB_DEVICE_ID_RAZER_A");
                assert_eq!(first.line, 1);
                assert_eq!(first_value, 1);
                assert_eq!(second.line, 9);
                assert_eq!(second_value, 2);
            }
            other => panic!("Expected DuplicateName, got {other:?}"),
        }
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_lookup_is_total() {
        let mut seq = DefinitionSequence::new();
        seq.push(def("USB_DEVICE_ID_RAZER_A", 0x0013, DeviceCategory::Mouse, 1))
            .unwrap();
        seq.push(def("USB_DEVICE_ID_RAZER_B", 0x0203, DeviceCategory::Keyboard, 2))
            .unwrap();
        assert_eq!(seq.lookup(0x0013), DeviceCategory::Mouse);
        assert_eq!(seq.lookup(0x0203), DeviceCategory::Keyboard);
        assert_eq!(seq.lookup(0x0000), DeviceCategory::Unknown);
        assert_eq!(seq.lookup(0xFFFF), DeviceCategory::Unknown);
    }

    #[test]
    fn test_push_rejects_shared_value() {
        let mut seq = DefinitionSequence::new();
        seq.push(def("USB_DEVICE_ID_RAZER_M", 0x0100, DeviceCategory::Mouse, 1))
            .unwrap();
        let err = seq
            .push(def("USB_DEVICE_ID_RAZER_K", 0x0100, DeviceCategory::Keyboard, 4))
            .unwrap_err();
        match err {
            GenError::DuplicateValue {
                value,
                first_name,
                first_category,
                second_name,
                second_category,
                ..
            } => {
                assert_eq!(value, 0x0100);
                assert_eq!(first_name, "USB_DEVICE_ID_RAZER_M");
                assert_eq!(first_category, DeviceCategory::Mouse);
                assert_eq!(second_name, "USB_DEVICE_ID_RAZER_K");
                assert_eq!(second_category, DeviceCategory::Keyboard);
            }
            other => panic!("Expected DuplicateValue, got {other:?}"),
        }
        // Rejected entry leaves no trace in either index
        assert_eq!(seq.len(), 1);
        assert!(seq.get("USB_DEVICE_ID_RAZER_K").is_none());
        assert_eq!(seq.lookup(0x0100), DeviceCategory::Mouse);
    }

    #[test]
    fn test_same_category_alias_also_rejected() {
        let mut seq = DefinitionSequence::new();
        seq.push(def("USB_DEVICE_ID_RAZER_A", 0x0100, DeviceCategory::Headset, 1))
            .unwrap();
        assert!(matches!(
            seq.push(def("USB_DEVICE_ID_RAZER_B", 0x0100, DeviceCategory::Headset, 2)),
            Err(GenError::DuplicateValue { .. })
        ));
    }

    #[test]
    fn test_collect_preserves_source_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "driver/kbd.h",
            "#define USB_DEVICE_ID_RAZER_K1 0x0203\n#define USB_DEVICE_ID_RAZER_K2 0x0204\n",
        );
        write(
            dir.path(),
            "driver/mouse.h",
            "#define USB_DEVICE_ID_RAZER_M1 0x0013\n",
        );

        let sources = [
            SourceSpec::new("driver/kbd.h", DeviceCategory::Keyboard),
            SourceSpec::new("driver/mouse.h", DeviceCategory::Mouse),
        ];
        let pattern = IdPattern::new(DEFAULT_PREFIX).unwrap();
        let seq = collect(&sources, dir.path(), &pattern).unwrap();

        let got: Vec<_> = seq.iter().map(|d| (d.name.as_str(), d.category)).collect();
        assert_eq!(
            got,
            [
                ("USB_DEVICE_ID_RAZER_K1", DeviceCategory::Keyboard),
                ("USB_DEVICE_ID_RAZER_K2", DeviceCategory::Keyboard),
                ("USB_DEVICE_ID_RAZER_M1", DeviceCategory::Mouse),
            ]
        );
        // Origins stay relative to the root
        assert_eq!(
            seq.get("USB_DEVICE_ID_RAZER_M1").unwrap().origin.path,
            PathBuf::from("driver/mouse.h")
        );
    }

    #[test]
    fn test_collect_skips_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "present.h",
            "#define USB_DEVICE_ID_RAZER_M1 0x0013\n",
        );
        let sources = [
            SourceSpec::new("absent.h", DeviceCategory::Keyboard),
            SourceSpec::new("present.h", DeviceCategory::Mouse),
        ];
        let pattern = IdPattern::new(DEFAULT_PREFIX).unwrap();
        let seq = collect(&sources, dir.path(), &pattern).unwrap();
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_collect_detects_cross_source_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.h", "#define USB_DEVICE_ID_RAZER_X 0x0001\n");
        write(dir.path(), "b.h", "\n#define USB_DEVICE_ID_RAZER_X 0x0002\n");
        let sources = [
            SourceSpec::new("a.h", DeviceCategory::Mouse),
            SourceSpec::new("b.h", DeviceCategory::Accessory),
        ];
        let pattern = IdPattern::new(DEFAULT_PREFIX).unwrap();
        let err = collect(&sources, dir.path(), &pattern).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("a.h:1"), "{msg}");
        assert!(msg.contains("b.h:2"), "{msg}");
    }

    #[test]
    fn test_collect_unreadable_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as text
        std::fs::create_dir(dir.path().join("dir.h")).unwrap();
        let sources = [SourceSpec::new("dir.h", DeviceCategory::Mouse)];
        let pattern = IdPattern::new(DEFAULT_PREFIX).unwrap();
        let err = collect(&sources, dir.path(), &pattern).unwrap_err();
        assert!(matches!(err, GenError::Read { .. }));
    }

    #[test]
    fn test_collect_non_utf8_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bin.h"), [0xFF, 0xFE, 0x00, 0x80]).unwrap();
        let sources = [SourceSpec::new("bin.h", DeviceCategory::Mouse)];
        let pattern = IdPattern::new(DEFAULT_PREFIX).unwrap();
        let err = collect(&sources, dir.path(), &pattern).unwrap_err();
        assert!(err.to_string().contains("bin.h"));
    }
}
