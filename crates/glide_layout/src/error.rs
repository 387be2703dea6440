//! Layout and widget error types

use thiserror::Error;

use crate::tree::LayoutNodeId;

/// Document and layout errors
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Node was never created or has been removed
    #[error("Unknown layout node: {0:?}")]
    UnknownNode(LayoutNodeId),

    /// A scroll surface needs its content to sit inside a viewport
    #[error("Node {0:?} has no parent to act as viewport")]
    NoViewport(LayoutNodeId),

    /// Error reported by the layout engine
    #[error("Layout engine error: {0}")]
    Taffy(#[from] taffy::TaffyError),
}

/// Configuration parsing errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid JSON scroll config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML scroll config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
