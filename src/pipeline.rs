//! End-to-end generation: descriptors in, registry and both artifacts out.
//!
//! ```text
//! UnitDescriptor ─► normalize ─► digest ─► resolve ─► Registry ─► emit
//!        │
//!        └── missing namespace/type ──► SkippedUnit (logged, not fatal)
//! ```

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{EmitConfig, StampConfig};
use crate::descriptor::{MissingSymbol, UnitDescriptor};
use crate::emit::{self, RuntimeArtifact, StaticArtifact};
use crate::error::StampError;
use crate::hash::digest;
use crate::normalize::normalize;
use crate::registry::Registry;
use crate::resolve::{UnitRecord, resolve};
use crate::source;

/// A descriptor the pipeline dropped because its symbols could not be placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedUnit {
    pub member_name: String,
    pub qualified_signature: String,
    pub reason: MissingSymbol,
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct Generation {
    pub registry: Registry,
    pub static_artifact: StaticArtifact,
    pub runtime_artifact: RuntimeArtifact,
    /// Descriptors left out of the registry, in input order.
    pub skipped: Vec<SkippedUnit>,
}

impl Generation {
    /// Rust source with both artifacts, see [`emit::render_source`].
    pub fn render_source(&self, cfg: &EmitConfig) -> Result<String, StampError> {
        emit::render_source(&self.static_artifact, &self.runtime_artifact, cfg)
    }
}

/// Run the whole pipeline over `descriptors`.
///
/// Output depends only on the descriptors' content, never on their order or
/// on `cfg.use_parallel`.
pub fn generate(
    descriptors: &[UnitDescriptor],
    cfg: &StampConfig,
) -> Result<Generation, StampError> {
    let (records, skipped) = hash_units(descriptors, cfg);
    for unit in &skipped {
        tracing::warn!(
            member = %unit.member_name,
            signature = %unit.qualified_signature,
            reason = %unit.reason,
            "skipping unit"
        );
    }

    let hashed = records.len();
    let resolved = resolve(records, cfg.use_parallel)?;
    let registry = Registry::build(resolved)?;
    let (static_artifact, runtime_artifact) = emit::emit(&registry)?;

    tracing::info!(
        units = descriptors.len(),
        hashed,
        skipped = skipped.len(),
        namespaces = registry.namespaces().count(),
        "generated hash stamps"
    );

    Ok(Generation {
        registry,
        static_artifact,
        runtime_artifact,
        skipped,
    })
}

/// Normalize and digest every descriptor that carries full symbol information.
pub fn hash_units(
    descriptors: &[UnitDescriptor],
    cfg: &StampConfig,
) -> (Vec<UnitRecord>, Vec<SkippedUnit>) {
    let hashed: Vec<Result<UnitRecord, SkippedUnit>> = if cfg.use_parallel {
        descriptors.par_iter().map(|unit| hash_unit(unit, cfg)).collect()
    } else {
        descriptors.iter().map(|unit| hash_unit(unit, cfg)).collect()
    };

    let mut records = Vec::with_capacity(hashed.len());
    let mut skipped = Vec::new();
    for result in hashed {
        match result {
            Ok(record) => records.push(record),
            Err(unit) => skipped.push(unit),
        }
    }
    (records, skipped)
}

fn hash_unit(unit: &UnitDescriptor, cfg: &StampConfig) -> Result<UnitRecord, SkippedUnit> {
    let (namespace, type_name) = unit.symbol().map_err(|reason| SkippedUnit {
        member_name: unit.member_name.clone(),
        qualified_signature: unit.qualified_signature.clone(),
        reason,
    })?;
    let text = normalize(unit.body.as_ref(), &cfg.normalize);
    Ok(UnitRecord::new(
        namespace,
        type_name,
        unit.member_name.trim(),
        unit.qualified_signature.trim(),
        digest(&text),
    ))
}

/// Scan a source tree and run the pipeline over what it finds.
pub fn generate_from_dir(
    src_dir: impl AsRef<Path>,
    cfg: &StampConfig,
) -> Result<Generation, StampError> {
    let descriptors = source::scan_dir(src_dir, &cfg.source)?;
    generate(&descriptors, cfg)
}

/// Scan `src_dir` and write the rendered artifacts to `out_path`.
///
/// Meant for build scripts:
///
/// ```rust,no_run
/// # fn main() -> Result<(), hashstamp::StampError> {
/// let cfg = hashstamp::StampConfig::new().with_crate_name("my_crate");
/// let out = std::path::Path::new("target/hash_stamps.rs");
/// hashstamp::generate_file("src", out, &cfg)?;
/// # Ok(())
/// # }
/// ```
///
/// The target file is only rewritten when its content changes.
pub fn generate_file(
    src_dir: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
    cfg: &StampConfig,
) -> Result<Generation, StampError> {
    let out_path = out_path.as_ref();
    let generation = generate_from_dir(src_dir, cfg)?;
    let rendered = generation.render_source(&cfg.emit)?;

    let unchanged = fs::read_to_string(out_path).is_ok_and(|existing| existing == rendered);
    if unchanged {
        tracing::debug!(path = %out_path.display(), "generated file is up to date");
        return Ok(generation);
    }

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StampError::io(parent, err))?;
    }
    fs::write(out_path, rendered).map_err(|err| StampError::io(out_path, err))?;
    tracing::info!(path = %out_path.display(), "wrote generated file");
    Ok(generation)
}
