//! Slidepanel Host Layer
//!
//! The panel never talks to a concrete render tree. It drives three seams:
//! - [`Document`]: elements, classes, inline styles, wrapping and measurement
//! - [`Animator`]: interpolates one dimension over a duration, then calls back
//! - [`Dispatcher`]: named handlers and notifications targeted at elements
//!
//! In-memory implementations of all three back the tests and the demo.

mod animation;
mod document;
mod error;
mod events;

use std::sync::Arc;

pub use animation::{Animator, Completion, TimelineAnimator};
pub use document::{Document, ElementId, MemoryDocument};
pub use error::HostError;
pub use events::{Dispatcher, Event, EventBus, Handler, HandlerId};

pub type Result<T> = std::result::Result<T, HostError>;

/// The collaborators a panel is attached through
#[derive(Clone)]
pub struct Host {
    pub document: Arc<dyn Document>,
    pub animator: Arc<dyn Animator>,
    pub events: Arc<dyn Dispatcher>,
}

impl Host {
    pub fn new(
        document: Arc<dyn Document>,
        animator: Arc<dyn Animator>,
        events: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            document,
            animator,
            events,
        }
    }
}

/// A fully in-memory host: one document, an animator writing into it and an
/// event bus that bubbles through it.
#[derive(Clone)]
pub struct MemoryHost {
    pub document: MemoryDocument,
    pub animator: TimelineAnimator,
    pub events: EventBus,
}

impl MemoryHost {
    pub fn new() -> Self {
        let document = MemoryDocument::new();
        let animator = TimelineAnimator::new(Arc::new(document.clone()));
        let events = EventBus::bubbling(Arc::new(document.clone()));

        Self {
            document,
            animator,
            events,
        }
    }

    pub fn host(&self) -> Host {
        Host::new(
            Arc::new(self.document.clone()),
            Arc::new(self.animator.clone()),
            Arc::new(self.events.clone()),
        )
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}
