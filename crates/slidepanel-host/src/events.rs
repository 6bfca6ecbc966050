//! Event dispatch seam and an in-memory event bus

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::document::{Document, ElementId};

/// A named notification fired at an element
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub name: String,
    /// Element the event was fired at
    pub target: ElementId,
    /// Element whose handler is currently running (differs from `target`
    /// while bubbling)
    pub current_target: ElementId,
    pub fired_at: DateTime<Utc>,
}

pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(Uuid);

impl HandlerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait Dispatcher: Send + Sync {
    /// Attach `handler` for `name` events reaching `target`.
    ///
    /// `namespace` groups handlers so an owner can detach all of its own at
    /// once without touching anyone else's.
    fn on(
        &self,
        target: ElementId,
        name: &str,
        namespace: Option<&str>,
        handler: Handler,
    ) -> HandlerId;

    fn off(&self, id: HandlerId) -> bool;

    /// Detach every handler registered under `namespace`; returns how many
    fn off_namespace(&self, namespace: &str) -> usize;

    /// Fire `name` at `target` and run matching handlers synchronously
    fn trigger(&self, target: ElementId, name: &str) -> Event;
}

struct Registration {
    id: HandlerId,
    target: ElementId,
    name: String,
    namespace: Option<String>,
    handler: Handler,
}

const HISTORY_LIMIT: usize = 1024;

/// In-memory [`Dispatcher`].
///
/// With a document attached, events bubble from the target through its
/// ancestors. Handlers run outside the registry lock so they may attach,
/// detach or trigger further events.
pub struct EventBus {
    registrations: Arc<RwLock<Vec<Registration>>>,
    history: Arc<RwLock<Vec<Event>>>,
    document: Option<Arc<dyn Document>>,
}

impl EventBus {
    /// Bus that delivers only to handlers on the target itself
    pub fn new() -> Self {
        Self {
            registrations: Arc::new(RwLock::new(Vec::new())),
            history: Arc::new(RwLock::new(Vec::new())),
            document: None,
        }
    }

    /// Bus that bubbles events up through `document`
    pub fn bubbling(document: Arc<dyn Document>) -> Self {
        Self {
            document: Some(document),
            ..Self::new()
        }
    }

    /// Events fired so far, oldest first
    pub fn history(&self) -> Vec<Event> {
        self.history.read().clone()
    }

    /// Names of the events fired at `target`, oldest first
    pub fn fired_at(&self, target: ElementId) -> Vec<String> {
        self.history
            .read()
            .iter()
            .filter(|e| e.target == target)
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }

    pub fn handler_count(&self) -> usize {
        self.registrations.read().len()
    }

    fn propagation_path(&self, target: ElementId) -> Vec<ElementId> {
        let mut path = vec![target];
        if let Some(document) = &self.document {
            let mut current = target;
            while let Some(parent) = document.parent(current) {
                path.push(parent);
                current = parent;
            }
        }
        path
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            registrations: Arc::clone(&self.registrations),
            history: Arc::clone(&self.history),
            document: self.document.clone(),
        }
    }
}

impl Dispatcher for EventBus {
    fn on(
        &self,
        target: ElementId,
        name: &str,
        namespace: Option<&str>,
        handler: Handler,
    ) -> HandlerId {
        let id = HandlerId::new();
        self.registrations.write().push(Registration {
            id,
            target,
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            handler,
        });
        id
    }

    fn off(&self, id: HandlerId) -> bool {
        let mut registrations = self.registrations.write();
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        registrations.len() != before
    }

    fn off_namespace(&self, namespace: &str) -> usize {
        let mut registrations = self.registrations.write();
        let before = registrations.len();
        registrations.retain(|r| r.namespace.as_deref() != Some(namespace));
        before - registrations.len()
    }

    fn trigger(&self, target: ElementId, name: &str) -> Event {
        let event = Event {
            name: name.to_string(),
            target,
            current_target: target,
            fired_at: Utc::now(),
        };

        {
            let mut history = self.history.write();
            if history.len() >= HISTORY_LIMIT {
                history.remove(0);
            }
            history.push(event.clone());
        }

        for element in self.propagation_path(target) {
            let handlers: Vec<Handler> = self
                .registrations
                .read()
                .iter()
                .filter(|r| r.target == element && r.name == name)
                .map(|r| Arc::clone(&r.handler))
                .collect();

            let delivered = Event {
                current_target: element,
                ..event.clone()
            };
            for handler in handlers {
                handler(&delivered);
            }
        }

        event
    }
}
