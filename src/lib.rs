//! Razer device ID header generator
//!
//! Scans the Razer driver headers for `USB_DEVICE_ID_RAZER_*` product IDs,
//! tags each with the device category of its header, and emits
//! `include/DeviceIds.h`: guarded defines, a category enum and a lookup
//! function from product ID to category.

pub mod aggregator;
pub mod category;
pub mod config;
pub mod emitter;
pub mod error;
pub mod extractor;

pub use aggregator::{DefinitionSequence, SourceSpec};
pub use category::DeviceCategory;
pub use config::GeneratorConfig;
pub use emitter::EmitOptions;
pub use error::{GenError, Result};
pub use extractor::{IdDefinition, IdPattern, Origin};

use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of definitions emitted
    pub count: usize,
    /// Artifact path as written
    pub output: PathBuf,
}

/// Rendered header, not yet written anywhere
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Complete header contents
    pub text: String,
    /// Number of definitions rendered
    pub count: usize,
}

/// Scan the configured sources under `root` and render the header text
pub fn render_only(config: &GeneratorConfig, root: &Path) -> Result<Rendered> {
    config.validate()?;
    let pattern = IdPattern::new(&config.prefix)?;
    let seq = aggregator::collect(&config.sources, root, &pattern)?;
    let text = emitter::render(&seq, &config.emit_options());
    Ok(Rendered {
        text,
        count: seq.len(),
    })
}

/// Run the full pipeline and atomically write the artifact
pub fn generate(config: &GeneratorConfig, root: &Path) -> Result<GenerationReport> {
    let rendered = render_only(config, root)?;
    let output = root.join(&config.output);
    emitter::write_atomic(&output, &rendered.text)?;
    info!(
        "Wrote {} ({} device IDs)",
        output.display(),
        rendered.count
    );
    Ok(GenerationReport {
        count: rendered.count,
        output,
    })
}

/// Fail with `GenError::Stale` unless the artifact matches a fresh render
pub fn check(config: &GeneratorConfig, root: &Path) -> Result<GenerationReport> {
    let rendered = render_only(config, root)?;
    let output = root.join(&config.output);
    emitter::check(&output, &rendered.text)?;
    Ok(GenerationReport {
        count: rendered.count,
        output,
    })
}
