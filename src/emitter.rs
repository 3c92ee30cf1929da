//! DeviceIds.h emitter
//!
//! Renders a definition sequence into a C++ header with, in order:
//! - `#pragma once` and a provenance comment
//! - one `#ifndef`-guarded `#define` per definition
//! - the device category enum (fixed classes plus `Unknown`)
//! - an inline lookup function switching on the product ID, one case per
//!   definition (the sequence guarantees names and values are unique)
//!
//! Rendering is a pure function of its input so reruns are byte-identical.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::aggregator::DefinitionSequence;
use crate::category::DeviceCategory;
use crate::error::{GenError, Result};

/// Names and comment used in the generated header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub enum_name: String,
    pub function_name: String,
    pub provenance: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            enum_name: "RazerDeviceType".to_string(),
            function_name: "GetRazerDeviceType".to_string(),
            provenance: "Auto-generated from driver/ headers".to_string(),
        }
    }
}

/// Render the full header text
pub fn render(seq: &DefinitionSequence, opts: &EmitOptions) -> String {
    let mut out = String::new();
    // fmt::Write into a String cannot fail
    let _ = write_header(&mut out, seq, opts);
    out
}

fn write_header(
    out: &mut String,
    seq: &DefinitionSequence,
    opts: &EmitOptions,
) -> std::fmt::Result {
    writeln!(out, "#pragma once")?;
    writeln!(out)?;
    for line in opts.provenance.lines() {
        writeln!(out, "// {line}")?;
    }
    writeln!(out)?;

    for def in seq.iter() {
        writeln!(out, "#ifndef {}", def.name)?;
        writeln!(out, "#define {} 0x{:04X}", def.name, def.value)?;
        writeln!(out, "#endif")?;
    }
    writeln!(out)?;

    let members: Vec<&str> = DeviceCategory::CONFIGURABLE
        .iter()
        .chain(std::iter::once(&DeviceCategory::Unknown))
        .map(|c| c.as_str())
        .collect();
    writeln!(out, "enum class {} {{ {} }};", opts.enum_name, members.join(", "))?;
    writeln!(out)?;

    writeln!(out, "inline {} {}(int pid) {{", opts.enum_name, opts.function_name)?;
    writeln!(out, "    switch(pid) {{")?;
    for def in seq.iter() {
        writeln!(
            out,
            "    case {}: return {}::{};",
            def.name, opts.enum_name, def.category
        )?;
    }
    writeln!(
        out,
        "    default: return {}::{};",
        opts.enum_name,
        DeviceCategory::Unknown
    )?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Replace `path` with `text` in one step
///
/// The header is written to a temp file next to the target and renamed over
/// it, so a failed run leaves the previous artifact untouched.
pub fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let write_err = |source| GenError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = parent_dir(path);
    std::fs::create_dir_all(&dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Verify `path` already holds exactly `text`
pub fn check(path: &Path, text: &str) -> Result<()> {
    match std::fs::read_to_string(path) {
        Ok(existing) if existing == text => Ok(()),
        Ok(_) => Err(GenError::Stale {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(GenError::Stale {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(GenError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
