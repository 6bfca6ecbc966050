//! In-memory page the demo panel is attached to

use chrono::{DateTime, Utc};
use std::sync::Arc;

use slidepanel_core::{Dispatcher, Document, ElementId, Event, MemoryHost};

const TAB_WIDTH: f64 = 120.0;
const LABEL_HEIGHT: f64 = 28.0;
const CONTENT_HEIGHT: f64 = 240.0;

pub struct DemoPage {
    pub host: MemoryHost,
    pub container: ElementId,
    pub tabs: Vec<ElementId>,
    pub labels: Vec<ElementId>,
}

impl DemoPage {
    /// One tab per title, with explicit label and content markers
    pub fn build(titles: &[&str]) -> anyhow::Result<Self> {
        let host = MemoryHost::new();
        let doc = &host.document;

        let body = doc.create_element("body");
        let container = doc.append(body, "div", &[])?;
        doc.set_size(container, TAB_WIDTH * titles.len() as f64, LABEL_HEIGHT);
        let list = doc.append(container, "ul", &["tabs"])?;

        let mut tabs = Vec::with_capacity(titles.len());
        let mut labels = Vec::with_capacity(titles.len());

        for title in titles {
            let tab = doc.append(list, "li", &["tab"])?;
            let label = doc.append(tab, "header", &["tab-label"])?;
            doc.append(label, "h1", &[])?;
            let content = doc.append(tab, "div", &["tab-content"])?;
            doc.set_size(label, TAB_WIDTH, LABEL_HEIGHT);
            doc.set_size(content, TAB_WIDTH, CONTENT_HEIGHT);

            tracing::debug!(title, %tab, %label, %content, "Built tab");

            tabs.push(tab);
            labels.push(label);
        }

        Ok(Self {
            host,
            container,
            tabs,
            labels,
        })
    }

    /// Log every panel notification with its offset from `started`
    pub fn log_notifications(&self, started: DateTime<Utc>) {
        let log = Arc::new(move |event: &Event| {
            let offset = event.fired_at - started;
            tracing::info!(
                event = %event.name,
                target = %event.target,
                offset_ms = offset.num_milliseconds(),
                "Notification"
            );
        });

        for name in ["opened", "closed"] {
            self.host
                .events
                .on(self.container, name, Some("demo"), log.clone());
        }
        for tab in &self.tabs {
            self.host
                .events
                .on(*tab, "selected", Some("demo"), log.clone());
        }
    }

    /// Simulate a click on the heading inside a tab label
    pub fn click(&self, index: usize) {
        let Some(label) = self.labels.get(index) else {
            tracing::warn!(index, "No such tab label");
            return;
        };

        let target = self
            .host
            .document
            .children(*label)
            .first()
            .copied()
            .unwrap_or(*label);

        self.host.events.trigger(target, "click");
    }
}
