use std::path::PathBuf;

/// Error loading posts or writing the site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Posts document is not valid JSON or has the wrong shape.
    #[error("Invalid posts document: {0}")]
    Json(#[from] serde_json::Error),
    /// Posts document parsed but violates a constraint.
    #[error("Invalid posts document: {0}")]
    Validation(String),
    /// Posts document not found.
    #[error("Posts document not found: {}", .0.display())]
    NotFound(PathBuf),
}
