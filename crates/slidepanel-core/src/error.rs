//! Core error types

use thiserror::Error;

use slidepanel_host::ElementId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Container not found: {0}")]
    ContainerNotFound(ElementId),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
