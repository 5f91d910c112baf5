use thiserror::Error;

/// Errors at the snapshot decode boundary. The layout, role, and permission
/// functions themselves are infallible: malformed graphs degrade to partial
/// output instead of failing.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
