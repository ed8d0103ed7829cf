//! Runtime rendering: string-keyed nested maps.
//!
//! Reachable as `by_namespace[ns].by_type[ty].by_member[name]`, enumerable
//! without the static artifact, serializable to JSON, and renderable as a
//! sorted `static` table with binary-search lookups for generated code.

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::quote;
use serde::{Deserialize, Serialize};

use crate::error::StampError;
use crate::hash::Digest;
use crate::registry::Registry;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberHash {
    pub digest: Digest,
    pub signature: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeHashes {
    pub by_member: BTreeMap<String, MemberHash>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamespaceHashes {
    pub by_type: BTreeMap<String, TypeHashes>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeArtifact {
    pub by_namespace: BTreeMap<String, NamespaceHashes>,
}

impl RuntimeArtifact {
    pub fn from_registry(registry: &Registry) -> Self {
        let mut by_namespace: BTreeMap<String, NamespaceHashes> = BTreeMap::new();
        for (namespace, type_name, resolved_name, entry) in registry.iter() {
            by_namespace
                .entry(namespace.to_string())
                .or_default()
                .by_type
                .entry(type_name.to_string())
                .or_default()
                .by_member
                .insert(
                    resolved_name.to_string(),
                    MemberHash {
                        digest: entry.digest.clone(),
                        signature: entry.qualified_signature.clone(),
                    },
                );
        }
        Self { by_namespace }
    }

    pub fn get(&self, namespace: &str, type_name: &str, member: &str) -> Option<&MemberHash> {
        self.by_namespace
            .get(namespace)?
            .by_type
            .get(type_name)?
            .by_member
            .get(member)
    }

    /// Every member as `(namespace, type, member, hash)`, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str, &MemberHash)> {
        self.by_namespace.iter().flat_map(|(ns, types)| {
            types.by_type.iter().flat_map(move |(ty, members)| {
                members
                    .by_member
                    .iter()
                    .map(move |(name, hash)| (ns.as_str(), ty.as_str(), name.as_str(), hash))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.by_namespace
            .values()
            .flat_map(|ns| ns.by_type.values())
            .map(|ty| ty.by_member.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_namespace.is_empty()
    }

    pub fn to_json(&self) -> Result<String, StampError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StampError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Generated-code form: the runtime types, a `NAMESPACES` table sorted by
    /// key at every level, and `namespace`/`lookup` functions over it.
    ///
    /// Namespace modules live next to these items, so every std name is
    /// spelled through `::core` and a namespace such as `Option` or `str`
    /// cannot shadow it.
    pub fn to_tokens(&self) -> TokenStream {
        let namespaces = self.by_namespace.iter().map(|(ns, types)| {
            let types = types.by_type.iter().map(|(ty, members)| {
                let members = members.by_member.iter().map(|(name, hash)| {
                    let digest = hash.digest.as_str();
                    let signature = hash.signature.as_str();
                    quote! {
                        MemberHash { name: #name, digest: #digest, signature: #signature }
                    }
                });
                quote! { TypeHashes { name: #ty, members: &[#(#members),*] } }
            });
            quote! { NamespaceHashes { name: #ns, types: &[#(#types),*] } }
        });

        quote! {
            #[derive(
                ::core::fmt::Debug,
                ::core::clone::Clone,
                ::core::marker::Copy,
                ::core::cmp::PartialEq,
                ::core::cmp::Eq
            )]
            pub struct MemberHash {
                pub name: &'static ::core::primitive::str,
                pub digest: &'static ::core::primitive::str,
                pub signature: &'static ::core::primitive::str,
            }

            #[derive(::core::fmt::Debug, ::core::clone::Clone, ::core::marker::Copy)]
            pub struct TypeHashes {
                pub name: &'static ::core::primitive::str,
                pub members: &'static [MemberHash],
            }

            impl TypeHashes {
                pub fn member(
                    &self,
                    name: &::core::primitive::str,
                ) -> ::core::option::Option<&'static MemberHash> {
                    let members: &'static [MemberHash] = self.members;
                    members
                        .binary_search_by(|m| m.name.cmp(name))
                        .ok()
                        .map(|i| &members[i])
                }
            }

            #[derive(::core::fmt::Debug, ::core::clone::Clone, ::core::marker::Copy)]
            pub struct NamespaceHashes {
                pub name: &'static ::core::primitive::str,
                pub types: &'static [TypeHashes],
            }

            impl NamespaceHashes {
                pub fn type_hashes(
                    &self,
                    name: &::core::primitive::str,
                ) -> ::core::option::Option<&'static TypeHashes> {
                    let types: &'static [TypeHashes] = self.types;
                    types
                        .binary_search_by(|t| t.name.cmp(name))
                        .ok()
                        .map(|i| &types[i])
                }
            }

            pub static NAMESPACES: &[NamespaceHashes] = &[#(#namespaces),*];

            pub fn namespace(
                name: &::core::primitive::str,
            ) -> ::core::option::Option<&'static NamespaceHashes> {
                NAMESPACES
                    .binary_search_by(|n| n.name.cmp(name))
                    .ok()
                    .map(|i| &NAMESPACES[i])
            }

            pub fn lookup(
                namespace_name: &::core::primitive::str,
                type_name: &::core::primitive::str,
                member: &::core::primitive::str,
            ) -> ::core::option::Option<&'static MemberHash> {
                namespace(namespace_name)?.type_hashes(type_name)?.member(member)
            }
        }
    }
}
