//! Collision resolution.
//!
//! Within one `(namespace, type)` group, a member whose simple name is unique
//! keeps it. Members sharing a simple name (overloads) are all renamed to an
//! identifier-safe rendering of their qualified signature:
//!
//! ```text
//! Process(int)            -> Process_int
//! Process(int, string)    -> Process_int__string
//! Process()               -> Process
//! ```
//!
//! After renaming every key in the group must be unique. If it is not, the
//! group is ambiguous and the whole run fails with
//! [`StampError::UnresolvedCollision`]; nothing is silently overwritten.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::StampError;
use crate::hash::Digest;

/// A hashed member on its way into the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitRecord {
    pub namespace: String,
    pub type_name: String,
    pub member_name: String,
    /// Registry key. Equals `member_name` unless an overload forced qualification.
    pub resolved_name: String,
    pub qualified_signature: String,
    pub digest: Digest,
}

impl UnitRecord {
    pub fn new(
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        member_name: impl Into<String>,
        qualified_signature: impl Into<String>,
        digest: Digest,
    ) -> Self {
        let member_name = member_name.into();
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
            resolved_name: member_name.clone(),
            member_name,
            qualified_signature: qualified_signature.into(),
            digest,
        }
    }

    fn is_qualified(&self) -> bool {
        self.resolved_name != self.member_name
    }
}

/// Rewrite `text` so it can serve as a plain identifier.
///
/// Every character other than ASCII letters, digits and `_` becomes `_`,
/// then trailing underscores are dropped. Underscores inside the string,
/// whether original or produced by a separator, are kept. A result that
/// would be empty or start with a digit gets a leading `_`.
///
/// ```rust
/// use hashstamp::identifier_safe;
///
/// assert_eq!(identifier_safe("TestMethod3(string)"), "TestMethod3_string");
/// assert_eq!(identifier_safe("Run()"), "Run");
/// assert_eq!(identifier_safe("Area(Shape.Circle)"), "Area_Shape_Circle");
/// ```
pub fn identifier_safe(text: &str) -> String {
    let mut safe: String = text
        .chars()
        .map(|c| {
            if c == '_' || c.is_ascii_alphanumeric() {
                c
            } else {
                '_'
            }
        })
        .collect();

    let kept = safe.trim_end_matches('_').len();
    safe.truncate(kept);

    if safe.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        safe.insert(0, '_');
    }
    safe
}

/// Resolve names across all groups.
///
/// Groups are independent, so with `parallel` they are resolved on the rayon
/// pool. The returned records are ordered by `(namespace, type)` and keep
/// their input order within a group. When several groups are ambiguous the
/// error reports the first in that order.
pub fn resolve(records: Vec<UnitRecord>, parallel: bool) -> Result<Vec<UnitRecord>, StampError> {
    let mut groups: BTreeMap<(String, String), Vec<UnitRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.namespace.clone(), record.type_name.clone()))
            .or_default()
            .push(record);
    }
    let groups: Vec<Vec<UnitRecord>> = groups.into_values().collect();

    let resolved: Vec<Result<Vec<UnitRecord>, StampError>> = if parallel {
        groups.into_par_iter().map(resolve_group).collect()
    } else {
        groups.into_iter().map(resolve_group).collect()
    };

    let mut out = Vec::new();
    for group in resolved {
        out.extend(group?);
    }
    Ok(out)
}

/// Resolve one `(namespace, type)` group.
pub fn resolve_group(mut group: Vec<UnitRecord>) -> Result<Vec<UnitRecord>, StampError> {
    let mut name_counts: HashMap<&str, usize> = HashMap::with_capacity(group.len());
    for record in &group {
        *name_counts.entry(record.member_name.as_str()).or_insert(0) += 1;
    }
    let colliding: Vec<bool> = group
        .iter()
        .map(|r| name_counts[r.member_name.as_str()] > 1)
        .collect();

    for (record, collides) in group.iter_mut().zip(colliding) {
        record.resolved_name = if collides {
            identifier_safe(&record.qualified_signature)
        } else {
            record.member_name.clone()
        };
    }

    check_unique(&group)?;

    let qualified = group.iter().filter(|r| r.is_qualified()).count();
    if qualified > 0 {
        if let Some(first) = group.first() {
            tracing::debug!(
                namespace = %first.namespace,
                type_name = %first.type_name,
                qualified,
                "qualified overloaded members"
            );
        }
    }
    Ok(group)
}

fn check_unique(group: &[UnitRecord]) -> Result<(), StampError> {
    let mut by_key: BTreeMap<&str, Vec<&UnitRecord>> = BTreeMap::new();
    for record in group {
        by_key
            .entry(record.resolved_name.as_str())
            .or_default()
            .push(record);
    }

    match by_key.into_iter().find(|(_, records)| records.len() > 1) {
        None => Ok(()),
        Some((resolved_name, records)) => {
            let mut signatures: Vec<String> = records
                .iter()
                .map(|r| r.qualified_signature.clone())
                .collect();
            signatures.sort();
            Err(StampError::UnresolvedCollision {
                namespace: records[0].namespace.clone(),
                type_name: records[0].type_name.clone(),
                resolved_name: resolved_name.to_string(),
                signatures,
            })
        }
    }
}
