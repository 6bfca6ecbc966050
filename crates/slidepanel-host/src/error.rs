//! Host error types

use thiserror::Error;

use crate::document::ElementId;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Cannot move {child} under its own descendant {parent}")]
    InvalidHierarchy { parent: ElementId, child: ElementId },
}
