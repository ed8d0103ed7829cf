use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation run.
///
/// Per-unit problems (a descriptor without symbol information) never show up
/// here; the pipeline drops those and lists them in
/// [`Generation::skipped`](crate::Generation::skipped).
#[derive(Debug, Error)]
pub enum StampError {
    /// Two or more members of one type still share a registry key after
    /// qualification.
    #[error(
        "unresolved collision in {namespace}.{type_name}: `{resolved_name}` is produced by {}",
        .signatures.join(", ")
    )]
    UnresolvedCollision {
        namespace: String,
        type_name: String,
        resolved_name: String,
        signatures: Vec<String>,
    },
    /// Distinct registry keys flatten to the same emitted identifier.
    #[error("{scope}: `{container}` would be emitted for each of {}", .names.join(", "))]
    ContainerCollision {
        scope: String,
        container: String,
        names: Vec<String>,
    },
    #[error("`{name}` cannot be emitted as an identifier")]
    InvalidIdentifier { name: String },
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl StampError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StampError::Io {
            path: path.into(),
            source,
        }
    }
}
