//! Render tree seam and an in-memory tree

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use slidepanel_geometry::Dimension;

use crate::error::HostError;
use crate::Result;

/// Opaque handle to an element in a host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Operations the panel needs from the host render tree.
///
/// Every mutating call on an unknown element is ignored; queries on an unknown
/// element return empty values.
pub trait Document: Send + Sync {
    fn contains(&self, element: ElementId) -> bool;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Direct children, in document order
    fn children(&self, element: ElementId) -> Vec<ElementId>;

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&self, element: ElementId, class: &str);

    fn remove_class(&self, element: ElementId, class: &str);

    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    fn set_style(&self, element: ElementId, property: &str, value: &str);

    fn remove_style(&self, element: ElementId, property: &str);

    /// Drop every inline style on the element
    fn clear_style(&self, element: ElementId);

    /// Rendered size of the element along `dimension`
    fn measure(&self, element: ElementId, dimension: Dimension) -> f64;

    /// Insert a new element with `class` in place of `element` and move
    /// `element` inside it. Returns the wrapper.
    fn wrap(&self, element: ElementId, class: &str) -> Option<ElementId>;

    /// Replace the parent of `element` with the parent's own children
    fn unwrap(&self, element: ElementId);

    /// All descendants, depth first, in document order
    fn descendants(&self, element: ElementId) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(element).into_iter().rev().collect();

        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }

        found
    }

    /// Descendants of `root` carrying `class`
    fn find_by_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|el| self.has_class(*el, class))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    width: f64,
    height: f64,
}

#[derive(Debug, Default)]
struct Tree {
    nodes: HashMap<ElementId, Node>,
}

impl Tree {
    fn is_ancestor(&self, ancestor: ElementId, mut element: ElementId) -> bool {
        while let Some(parent) = self.nodes.get(&element).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            element = parent;
        }
        false
    }

    fn detach(&mut self, element: ElementId) -> Option<(ElementId, usize)> {
        let parent = self.nodes.get_mut(&element)?.parent.take()?;
        let siblings = &mut self.nodes.get_mut(&parent)?.children;
        let index = siblings.iter().position(|c| *c == element)?;
        siblings.remove(index);
        Some((parent, index))
    }
}

/// In-memory render tree.
///
/// Sizes are fixed per element (`set_size`); an inline `width`/`height` style
/// in pixels overrides them when measuring.
pub struct MemoryDocument {
    tree: Arc<Mutex<Tree>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            tree: Arc::new(Mutex::new(Tree::default())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create a detached element
    pub fn create_element(&self, tag: &str) -> ElementId {
        let id = ElementId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.tree.lock().nodes.insert(
            id,
            Node {
                tag: tag.to_string(),
                ..Node::default()
            },
        );
        id
    }

    /// Create an element with the given classes, appended to `parent`
    pub fn append(&self, parent: ElementId, tag: &str, classes: &[&str]) -> Result<ElementId> {
        if !self.contains(parent) {
            return Err(HostError::ElementNotFound(parent));
        }

        let element = self.create_element(tag);
        for class in classes {
            self.add_class(element, class);
        }
        self.append_child(parent, element)?;
        Ok(element)
    }

    /// Move `child` to the end of `parent`'s children
    pub fn append_child(&self, parent: ElementId, child: ElementId) -> Result<()> {
        let mut tree = self.tree.lock();

        if !tree.nodes.contains_key(&parent) {
            return Err(HostError::ElementNotFound(parent));
        }
        if !tree.nodes.contains_key(&child) {
            return Err(HostError::ElementNotFound(child));
        }
        if parent == child || tree.is_ancestor(child, parent) {
            return Err(HostError::InvalidHierarchy { parent, child });
        }

        tree.detach(child);
        if let Some(node) = tree.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = tree.nodes.get_mut(&parent) {
            node.children.push(child);
        }

        Ok(())
    }

    pub fn set_size(&self, element: ElementId, width: f64, height: f64) {
        if let Some(node) = self.tree.lock().nodes.get_mut(&element) {
            node.width = width;
            node.height = height;
        }
    }

    pub fn tag(&self, element: ElementId) -> Option<String> {
        self.tree.lock().nodes.get(&element).map(|n| n.tag.clone())
    }

    pub fn classes(&self, element: ElementId) -> Vec<String> {
        self.tree
            .lock()
            .nodes
            .get(&element)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    pub fn styles(&self, element: ElementId) -> BTreeMap<String, String> {
        self.tree
            .lock()
            .nodes
            .get(&element)
            .map(|n| n.styles.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tree.lock().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryDocument {
    fn clone(&self) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl Document for MemoryDocument {
    fn contains(&self, element: ElementId) -> bool {
        self.tree.lock().nodes.contains_key(&element)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.tree.lock().nodes.get(&element).and_then(|n| n.parent)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.tree
            .lock()
            .nodes
            .get(&element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.tree
            .lock()
            .nodes
            .get(&element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&self, element: ElementId, class: &str) {
        if let Some(node) = self.tree.lock().nodes.get_mut(&element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&self, element: ElementId, class: &str) {
        if let Some(node) = self.tree.lock().nodes.get_mut(&element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.tree
            .lock()
            .nodes
            .get(&element)
            .and_then(|n| n.styles.get(property).cloned())
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.tree.lock().nodes.get_mut(&element) {
            if value.is_empty() {
                node.styles.remove(property);
            } else {
                node.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn remove_style(&self, element: ElementId, property: &str) {
        if let Some(node) = self.tree.lock().nodes.get_mut(&element) {
            node.styles.remove(property);
        }
    }

    fn clear_style(&self, element: ElementId) {
        if let Some(node) = self.tree.lock().nodes.get_mut(&element) {
            node.styles.clear();
        }
    }

    fn measure(&self, element: ElementId, dimension: Dimension) -> f64 {
        let tree = self.tree.lock();
        let Some(node) = tree.nodes.get(&element) else {
            return 0.0;
        };

        let inline = node
            .styles
            .get(dimension.as_str())
            .and_then(|v| v.trim_end_matches("px").trim().parse::<f64>().ok());

        inline.unwrap_or(match dimension {
            Dimension::Height => node.height,
            Dimension::Width => node.width,
        })
    }

    fn wrap(&self, element: ElementId, class: &str) -> Option<ElementId> {
        let wrapper = self.create_element("div");
        let mut tree = self.tree.lock();

        if !tree.nodes.contains_key(&element) {
            tree.nodes.remove(&wrapper);
            return None;
        }

        if let Some(node) = tree.nodes.get_mut(&wrapper) {
            node.classes.push(class.to_string());
        }

        // Take the element's slot in its parent, if it has one
        if let Some((parent, index)) = tree.detach(element) {
            if let Some(node) = tree.nodes.get_mut(&parent) {
                node.children.insert(index, wrapper);
            }
            if let Some(node) = tree.nodes.get_mut(&wrapper) {
                node.parent = Some(parent);
            }
        }

        if let Some(node) = tree.nodes.get_mut(&element) {
            node.parent = Some(wrapper);
        }
        if let Some(node) = tree.nodes.get_mut(&wrapper) {
            node.children.push(element);
        }

        tracing::trace!(%element, %wrapper, class, "Wrapped element");

        Some(wrapper)
    }

    fn unwrap(&self, element: ElementId) {
        let mut tree = self.tree.lock();

        let Some(wrapper) = tree.nodes.get(&element).and_then(|n| n.parent) else {
            return;
        };
        let Some((grandparent, index)) = tree.detach(wrapper) else {
            // Wrapper is a root; leave the tree as is
            return;
        };

        let Some(removed) = tree.nodes.remove(&wrapper) else {
            return;
        };

        for child in &removed.children {
            if let Some(node) = tree.nodes.get_mut(child) {
                node.parent = Some(grandparent);
            }
        }
        if let Some(node) = tree.nodes.get_mut(&grandparent) {
            for (offset, child) in removed.children.iter().enumerate() {
                node.children.insert(index + offset, *child);
            }
        }

        tracing::trace!(%element, %wrapper, "Unwrapped element");
    }
}
