//! Input data model.
//!
//! A [`UnitDescriptor`] is what an upstream producer (the [`source`](crate::source)
//! scanner, or any tool writing a JSON manifest) knows about one member:
//! where it lives, how it is called, and the raw text of its body.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StampError;

/// Executable content of a member whose change should be detectable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodyContent {
    /// Top-level statements in declared order.
    Statements(Vec<String>),
    /// Expression-form member (`=> expr`).
    Expression(String),
}

/// One analyzed member as reported by the upstream producer.
///
/// `namespace` and `type_name` are optional because a producer may fail to
/// resolve the enclosing symbols; such descriptors are dropped by the
/// pipeline rather than turned into half-filled records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitDescriptor {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub type_name: Option<String>,
    pub member_name: String,
    /// Member name plus parameter types, e.g. `Process(int, string)`.
    pub qualified_signature: String,
    #[serde(default)]
    pub body: Option<BodyContent>,
}

impl UnitDescriptor {
    pub fn new(
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        member_name: impl Into<String>,
        qualified_signature: impl Into<String>,
        body: Option<BodyContent>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            type_name: Some(type_name.into()),
            member_name: member_name.into(),
            qualified_signature: qualified_signature.into(),
            body,
        }
    }

    /// Returns the `(namespace, type_name)` pair when both are present and
    /// non-blank, together with the member name.
    pub(crate) fn symbol(&self) -> Result<(&str, &str), MissingSymbol> {
        let namespace = non_blank(self.namespace.as_deref()).ok_or(MissingSymbol::Namespace)?;
        let type_name = non_blank(self.type_name.as_deref()).ok_or(MissingSymbol::TypeName)?;
        if self.member_name.trim().is_empty() {
            return Err(MissingSymbol::MemberName);
        }
        Ok((namespace, type_name))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Which piece of symbol information a dropped descriptor lacked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingSymbol {
    Namespace,
    TypeName,
    MemberName,
}

impl std::fmt::Display for MissingSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self {
            MissingSymbol::Namespace => "enclosing namespace",
            MissingSymbol::TypeName => "enclosing type",
            MissingSymbol::MemberName => "member name",
        };
        write!(f, "missing {what}")
    }
}

/// Parse a JSON array of descriptors.
pub fn parse_manifest(json: &str) -> Result<Vec<UnitDescriptor>, StampError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a JSON descriptor manifest from disk.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Vec<UnitDescriptor>, StampError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|err| StampError::io(path, err))?;
    parse_manifest(&json)
}
