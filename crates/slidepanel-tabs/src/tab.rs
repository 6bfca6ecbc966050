//! Tab records and discovery

use serde::Serialize;

use slidepanel_host::{Document, ElementId};

use crate::classes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    /// The `.tab` element itself
    pub element: ElementId,
    /// Clickable handle, if one was found
    pub label: Option<ElementId>,
    /// Body revealed when the panel opens on this tab
    pub content: Option<ElementId>,
    /// Margin container inserted around `content` while attached
    pub wrapper: Option<ElementId>,
}

/// How labels and contents were located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Discovery {
    /// Labels came from each tab's first child
    pub label_fallback: bool,
    /// Contents came from each tab's last child
    pub content_fallback: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TabSet {
    tabs: Vec<Tab>,
    discovery: Discovery,
}

impl TabSet {
    /// Collect `.tabs > .tab` under `container` with their labels and contents
    pub fn discover(document: &dyn Document, container: ElementId) -> Self {
        let mut elements: Vec<ElementId> = Vec::new();
        for list in document.find_by_class(container, classes::TABS) {
            for child in document.children(list) {
                if document.has_class(child, classes::TAB) && !elements.contains(&child) {
                    elements.push(child);
                }
            }
        }

        let mut tabs: Vec<Tab> = elements
            .iter()
            .map(|element| Tab {
                element: *element,
                label: document
                    .find_by_class(*element, classes::TAB_LABEL)
                    .first()
                    .copied(),
                content: document
                    .find_by_class(*element, classes::TAB_CONTENT)
                    .first()
                    .copied(),
                wrapper: None,
            })
            .collect();

        let discovery = Discovery {
            label_fallback: tabs.iter().all(|t| t.label.is_none()),
            content_fallback: tabs.iter().all(|t| t.content.is_none()),
        };

        if discovery.label_fallback || discovery.content_fallback {
            for tab in &mut tabs {
                let children = document.children(tab.element);
                if discovery.label_fallback {
                    tab.label = children.first().copied();
                }
                if discovery.content_fallback {
                    tab.content = children.last().copied();
                }
            }
        }

        tracing::debug!(
            %container,
            tabs = tabs.len(),
            label_fallback = discovery.label_fallback,
            content_fallback = discovery.content_fallback,
            "Discovered tabs"
        );

        Self { tabs, discovery }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn discovery(&self) -> Discovery {
        self.discovery
    }

    /// The first content element, used to measure the opened size
    pub fn first_content(&self) -> Option<ElementId> {
        self.tabs.iter().find_map(|t| t.content)
    }

    /// Wrap every content element in a `tab-content-wrapper`
    pub fn wrap_contents(&mut self, document: &dyn Document) {
        for tab in &mut self.tabs {
            if let Some(content) = tab.content {
                tab.wrapper = document.wrap(content, classes::TAB_CONTENT_WRAPPER);
            }
        }
    }

    /// Undo [`wrap_contents`](Self::wrap_contents)
    pub fn unwrap_contents(&mut self, document: &dyn Document) {
        for tab in &mut self.tabs {
            if let (Some(content), Some(_)) = (tab.content, tab.wrapper.take()) {
                document.unwrap(content);
            }
        }
    }

    pub fn wrappers(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.tabs.iter().filter_map(|t| t.wrapper)
    }

    /// Put the selected marker on `selected` only
    pub fn mark_selected(&self, document: &dyn Document, selected: Option<usize>) {
        for (index, tab) in self.tabs.iter().enumerate() {
            if Some(index) == selected {
                document.add_class(tab.element, classes::TAB_SELECTED);
            } else {
                document.remove_class(tab.element, classes::TAB_SELECTED);
            }
        }
    }
}
