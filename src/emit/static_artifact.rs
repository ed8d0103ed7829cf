//! Compile-time rendering: nested modules of string constants.
//!
//! ```text
//! pub mod HashStamp_Test {          // namespace, separators flattened to `_`
//!     pub mod TestClass1 {          // type
//!         pub const TestMethod1: &str = "<64 hex chars>";
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::error::StampError;
use crate::hash::Digest;
use crate::registry::Registry;
use crate::resolve::identifier_safe;

/// Type names the generated runtime table defines next to the namespace
/// modules; a namespace module with one of these names would not compile.
pub(crate) const RESERVED_ROOT_NAMES: &[&str] = &["MemberHash", "TypeHashes", "NamespaceHashes"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticConstant {
    pub resolved_name: String,
    pub ident: String,
    pub digest: Digest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticType {
    pub type_name: String,
    pub ident: String,
    pub constants: Vec<StaticConstant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticNamespace {
    pub namespace: String,
    pub ident: String,
    pub types: Vec<StaticType>,
}

/// The registry laid out as identifiers that resolve at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticArtifact {
    pub namespaces: Vec<StaticNamespace>,
}

impl StaticArtifact {
    pub fn from_registry(registry: &Registry) -> Result<Self, StampError> {
        let mut namespaces = Vec::new();
        let mut root_idents = IdentScope::new("root module");
        for reserved in RESERVED_ROOT_NAMES {
            root_idents.reserve(reserved);
        }

        for (namespace, types) in registry.namespaces() {
            let ns_ident = root_idents.claim(&flatten_namespace(namespace), namespace)?;

            let mut type_idents = IdentScope::new(format!("namespace {namespace}"));
            let mut static_types = Vec::new();
            for (type_name, members) in types.iter() {
                let type_ident = type_idents.claim(type_name, type_name)?;

                let mut const_idents = IdentScope::new(format!("type {namespace}.{type_name}"));
                let mut constants = Vec::new();
                for (resolved_name, entry) in members.iter() {
                    constants.push(StaticConstant {
                        resolved_name: resolved_name.to_string(),
                        ident: const_idents.claim(resolved_name, resolved_name)?,
                        digest: entry.digest.clone(),
                    });
                }

                static_types.push(StaticType {
                    type_name: type_name.to_string(),
                    ident: type_ident,
                    constants,
                });
            }

            namespaces.push(StaticNamespace {
                namespace: namespace.to_string(),
                ident: ns_ident,
                types: static_types,
            });
        }

        Ok(Self { namespaces })
    }

    /// Digest bound to `namespace_ident::type_ident::const_ident`, the way
    /// generated code would name it.
    pub fn constant(
        &self,
        namespace_ident: &str,
        type_ident: &str,
        const_ident: &str,
    ) -> Option<&Digest> {
        self.namespaces
            .iter()
            .find(|ns| ns.ident == namespace_ident)?
            .types
            .iter()
            .find(|ty| ty.ident == type_ident)?
            .constants
            .iter()
            .find(|c| c.ident == const_ident)
            .map(|c| &c.digest)
    }

    pub fn to_tokens(&self) -> Result<TokenStream, StampError> {
        let mut modules = Vec::with_capacity(self.namespaces.len());
        for ns in &self.namespaces {
            let ns_ident = parse_ident(&ns.ident)?;
            let mut types = Vec::with_capacity(ns.types.len());
            for ty in &ns.types {
                let type_ident = parse_ident(&ty.ident)?;
                let mut constants = Vec::with_capacity(ty.constants.len());
                for c in &ty.constants {
                    let const_ident = parse_ident(&c.ident)?;
                    let digest = c.digest.as_str();
                    constants.push(quote! { pub const #const_ident: &str = #digest; });
                }
                types.push(quote! {
                    pub mod #type_ident {
                        #(#constants)*
                    }
                });
            }
            modules.push(quote! {
                #[allow(non_snake_case, non_camel_case_types, non_upper_case_globals, dead_code)]
                pub mod #ns_ident {
                    #(#types)*
                }
            });
        }
        Ok(quote! { #(#modules)* })
    }
}

/// `HashStamp.Test` and `hash_stamp::test` flatten to `HashStamp_Test` and
/// `hash_stamp_test`.
pub fn flatten_namespace(namespace: &str) -> String {
    identifier_safe(&namespace.replace("::", "."))
}

/// Turn a registry key into a Rust identifier. Keywords become raw
/// identifiers; names that cannot be raw (`self`, `crate`, ...) are rejected.
pub fn rust_ident(name: &str) -> Result<Ident, StampError> {
    let safe = identifier_safe(name);
    syn::parse_str::<Ident>(&safe)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{safe}")))
        .map_err(|_| StampError::InvalidIdentifier {
            name: name.to_string(),
        })
}

/// Identifiers stored in the artifact are the `to_string` of a [`rust_ident`].
fn parse_ident(ident: &str) -> Result<Ident, StampError> {
    syn::parse_str::<Ident>(ident).map_err(|_| StampError::InvalidIdentifier {
        name: ident.to_string(),
    })
}

/// Tracks which identifiers are taken inside one emitted module.
struct IdentScope {
    scope: String,
    taken: BTreeMap<String, String>,
}

impl IdentScope {
    fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            taken: BTreeMap::new(),
        }
    }

    fn reserve(&mut self, ident: &str) {
        self.taken.insert(ident.to_string(), format!("<generated {ident}>"));
    }

    /// Map `candidate` to an identifier on behalf of registry key `owner`.
    fn claim(&mut self, candidate: &str, owner: &str) -> Result<String, StampError> {
        let ident = rust_ident(candidate)?.to_string();
        if let Some(previous) = self.taken.get(&ident) {
            return Err(StampError::ContainerCollision {
                scope: self.scope.clone(),
                container: ident,
                names: vec![previous.clone(), owner.to_string()],
            });
        }
        self.taken.insert(ident.clone(), owner.to_string());
        Ok(ident)
    }
}
