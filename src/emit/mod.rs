//! Dual emitter.
//!
//! Walks the [`Registry`] once per rendering and produces:
//!
//! - a [`StaticArtifact`]: nested modules of `pub const` digests, addressable
//!   at compile time as `root::Namespace_Path::Type::member`;
//! - a [`RuntimeArtifact`]: nested string-keyed maps with the same digests
//!   plus each member's signature.
//!
//! Both come from the same registry walk, so for every
//! `(namespace, type, resolved_name)` they expose the same digest.
//! [`render_source`] stitches them into one Rust file meant for `include!`.

pub mod runtime;
pub mod static_artifact;

use quote::quote;

pub use self::runtime::{MemberHash, NamespaceHashes, RuntimeArtifact, TypeHashes};
pub use self::static_artifact::{
    StaticArtifact, StaticConstant, StaticNamespace, StaticType, flatten_namespace, rust_ident,
};

use crate::config::EmitConfig;
use crate::error::StampError;
use crate::registry::Registry;

/// Render the registry into both artifacts.
pub fn emit(registry: &Registry) -> Result<(StaticArtifact, RuntimeArtifact), StampError> {
    let static_artifact = StaticArtifact::from_registry(registry)?;
    let runtime_artifact = RuntimeArtifact::from_registry(registry);
    tracing::debug!(
        namespaces = static_artifact.namespaces.len(),
        members = runtime_artifact.len(),
        "emitted artifacts"
    );
    Ok((static_artifact, runtime_artifact))
}

/// Generated Rust source holding both artifacts under `cfg.root_module`.
pub fn render_source(
    static_artifact: &StaticArtifact,
    runtime_artifact: &RuntimeArtifact,
    cfg: &EmitConfig,
) -> Result<String, StampError> {
    let root = rust_ident(&cfg.root_module)?;
    if root != cfg.root_module.as_str() {
        return Err(StampError::InvalidIdentifier {
            name: cfg.root_module.clone(),
        });
    }
    let constants = static_artifact.to_tokens()?;
    let table = runtime_artifact.to_tokens();

    let tokens = quote! {
        #[allow(non_snake_case, non_camel_case_types, non_upper_case_globals, dead_code)]
        pub mod #root {
            #constants
            #table
        }
    };

    let mut source = String::from("// @generated by hashstamp. Do not edit.\n");
    source.push_str(&tokens.to_string());
    source.push('\n');
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::digest;
    use crate::resolve::UnitRecord;

    fn registry() -> Registry {
        Registry::build(vec![
            UnitRecord::new("N.Sub", "T", "A", "A()", digest("a")),
            UnitRecord::new("N.Sub", "T", "B_int", "B(int)", digest("b")),
            UnitRecord::new("M", "U", "A", "A()", digest("c")),
        ])
        .expect("registry")
    }

    #[test]
    fn both_artifacts_agree() {
        let (static_artifact, runtime) = emit(&registry()).expect("emit");
        for ns in &static_artifact.namespaces {
            for ty in &ns.types {
                for c in &ty.constants {
                    let hash = runtime
                        .get(&ns.namespace, &ty.type_name, &c.resolved_name)
                        .expect("runtime entry");
                    assert_eq!(hash.digest, c.digest);
                }
            }
        }
        assert_eq!(runtime.len(), 3);
    }

    #[test]
    fn rendered_source_is_one_root_module() {
        let (static_artifact, runtime) = emit(&registry()).expect("emit");
        let source =
            render_source(&static_artifact, &runtime, &EmitConfig::default()).expect("render");
        assert!(source.starts_with("// @generated"));

        let file = syn::parse_file(&source).expect("valid rust");
        assert_eq!(file.items.len(), 1);
        match &file.items[0] {
            syn::Item::Mod(root) => assert_eq!(root.ident, "hash_stamps"),
            other => panic!("expected module, got {other:?}"),
        }
    }

    #[test]
    fn empty_registry_renders() {
        let (static_artifact, runtime) = emit(&Registry::default()).expect("emit");
        let source =
            render_source(&static_artifact, &runtime, &EmitConfig::default()).expect("render");
        assert!(syn::parse_file(&source).is_ok());
    }

    #[test]
    fn root_module_must_be_a_plain_identifier() {
        let (static_artifact, runtime) = emit(&registry()).expect("emit");
        let cfg = EmitConfig {
            root_module: "hash stamps".into(),
        };
        let res = render_source(&static_artifact, &runtime, &cfg);
        assert!(matches!(res, Err(StampError::InvalidIdentifier { .. })));
    }
}
