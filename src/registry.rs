//! The namespace → type → member tree.
//!
//! ```text
//! Registry
//! └── namespace: TypeBucket
//!     └── type_name: MemberBucket
//!         └── resolved_name: MemberEntry { digest, qualified_signature }
//! ```
//!
//! Built once per run from resolved records and never mutated afterwards.
//! All levels are ordered maps, so walking the tree is deterministic and
//! every rendering of it is byte-for-byte reproducible.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StampError;
use crate::hash::Digest;
use crate::resolve::UnitRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberEntry {
    pub digest: Digest,
    pub qualified_signature: String,
}

/// Members of one type, keyed by resolved name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MemberBucket(BTreeMap<String, MemberEntry>);

impl MemberBucket {
    pub fn get(&self, resolved_name: &str) -> Option<&MemberEntry> {
        self.0.get(resolved_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MemberEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Types of one namespace, keyed by type name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TypeBucket(BTreeMap<String, MemberBucket>);

impl TypeBucket {
    pub fn get(&self, type_name: &str) -> Option<&MemberBucket> {
        self.0.get(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MemberBucket)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Registry(BTreeMap<String, TypeBucket>);

impl Registry {
    /// Group resolved records into the three-level tree.
    ///
    /// The resolver already guarantees unique keys per type. A duplicate that
    /// still reaches this point is reported instead of replacing the earlier
    /// entry.
    pub fn build(records: impl IntoIterator<Item = UnitRecord>) -> Result<Self, StampError> {
        let mut namespaces: BTreeMap<String, TypeBucket> = BTreeMap::new();

        for record in records {
            let members = namespaces
                .entry(record.namespace.clone())
                .or_default()
                .0
                .entry(record.type_name.clone())
                .or_default();

            match members.0.entry(record.resolved_name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(MemberEntry {
                        digest: record.digest,
                        qualified_signature: record.qualified_signature,
                    });
                }
                Entry::Occupied(existing) => {
                    let mut signatures = vec![
                        existing.get().qualified_signature.clone(),
                        record.qualified_signature,
                    ];
                    signatures.sort();
                    return Err(StampError::UnresolvedCollision {
                        namespace: record.namespace,
                        type_name: record.type_name,
                        resolved_name: record.resolved_name,
                        signatures,
                    });
                }
            }
        }

        Ok(Self(namespaces))
    }

    pub fn namespace(&self, namespace: &str) -> Option<&TypeBucket> {
        self.0.get(namespace)
    }

    /// Point lookup by the three keys.
    pub fn get(
        &self,
        namespace: &str,
        type_name: &str,
        resolved_name: &str,
    ) -> Option<&MemberEntry> {
        self.0.get(namespace)?.get(type_name)?.get(resolved_name)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &TypeBucket)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every member as `(namespace, type, resolved_name, entry)`, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str, &MemberEntry)> {
        self.namespaces().flat_map(|(ns, types)| {
            types.iter().flat_map(move |(ty, members)| {
                members.iter().map(move |(name, entry)| (ns, ty, name, entry))
            })
        })
    }

    /// Total number of members.
    pub fn len(&self) -> usize {
        self.0
            .values()
            .flat_map(|types| types.0.values())
            .map(MemberBucket::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
