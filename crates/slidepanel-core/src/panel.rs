//! Sliding panel widget
//!
//! The widget owns no rendering. It drives the host through three seams and
//! keeps its own state behind short-lived locks that are always released
//! before calling out, so host handlers and animators may call back in.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use uuid::Uuid;

use slidepanel_geometry::{Axis, Dimension, Geometry, Orientation, Position};
use slidepanel_host::{ElementId, Event, HandlerId, Host};
use slidepanel_tabs::{SelectionCoordinator, Tab, TabSet};
use slidepanel_transition::{PanelState, Ticket, Transition, TransitionController};

use crate::config::Options;
use crate::error::CoreError;
use crate::Result;

/// Class names applied to the container
pub mod classes {
    pub const SLIDING_PANEL: &str = "sliding-panel";
    pub const OPENED: &str = "opened";
}

/// Namespace the label click handlers are registered under
pub const HANDLER_NAMESPACE: &str = "slidingPanel";

const CLICK: &str = "click";
const SELECTED: &str = "selected";

struct PanelInner {
    id: Uuid,
    host: Host,
    container: ElementId,
    options: Options,
    axis: Option<Axis>,
    tabs: Mutex<TabSet>,
    transition: Mutex<TransitionController>,
    selection: Mutex<SelectionCoordinator>,
    handlers: Mutex<Vec<HandlerId>>,
    removed: AtomicBool,
}

/// Handle to an attached panel. Clones share the same panel.
#[derive(Clone)]
pub struct SlidingPanel {
    inner: Arc<PanelInner>,
}

impl SlidingPanel {
    /// Attach a panel to `container`.
    ///
    /// Discovers the tabs, wraps their contents, applies the container markers
    /// and margin, measures both sizes, wires the label clicks and settles in
    /// `options.state` without animating.
    pub fn init(host: Host, container: ElementId, options: Options) -> Result<Self> {
        let document = Arc::clone(&host.document);

        if !document.contains(container) {
            return Err(CoreError::ContainerNotFound(container));
        }

        let mut tabs = TabSet::discover(document.as_ref(), container);
        let axis = options.position.axis();

        // Measured before any wrapping so the margin does not leak into it
        let content_size = match (axis, tabs.first_content()) {
            (Some(axis), Some(content)) => document.measure(content, axis.dimension),
            _ => 0.0,
        };

        tabs.wrap_contents(document.as_ref());

        document.add_class(container, classes::SLIDING_PANEL);
        if let Some(axis) = axis {
            document.add_class(container, axis.orientation.marker());

            if let Some(margin) = options.margin() {
                for property in axis.orientation.padding_properties() {
                    document.set_style(container, property, margin);
                    for wrapper in tabs.wrappers() {
                        document.set_style(wrapper, property, margin);
                    }
                }
            }
        } else {
            tracing::warn!(
                position = %options.position,
                "Unrecognized panel position; sizing and animation disabled"
            );
        }
        document.add_class(container, &options.position.marker());

        let geometry = axis.map(|axis| {
            Geometry::resolve(
                axis,
                document.measure(container, axis.dimension),
                content_size,
            )
        });

        let committed = if document.has_class(container, classes::OPENED) {
            PanelState::Opened
        } else {
            PanelState::Closed
        };

        let selection = SelectionCoordinator::new(tabs.len());
        let controller =
            TransitionController::new(committed, options.animation.clone(), geometry);
        let initial_state = options.state;

        let panel = Self {
            inner: Arc::new(PanelInner {
                id: Uuid::new_v4(),
                host,
                container,
                options,
                axis,
                tabs: Mutex::new(tabs),
                transition: Mutex::new(controller),
                selection: Mutex::new(selection),
                handlers: Mutex::new(Vec::new()),
                removed: AtomicBool::new(false),
            }),
        };

        panel.attach_handlers();
        panel.toggle(Some(initial_state), true);

        tracing::info!(
            panel = %panel.inner.id,
            %container,
            position = %panel.inner.options.position,
            tabs = panel.tab_count(),
            size_closed = geometry.map(|g| g.size_closed),
            size_opened = geometry.map(|g| g.size_opened),
            state = %initial_state,
            "Attached sliding panel"
        );

        Ok(panel)
    }

    /// Attach one panel per container, in order
    pub fn init_all(host: &Host, containers: &[ElementId], options: &Options) -> Result<Vec<Self>> {
        containers
            .iter()
            .map(|container| Self::init(host.clone(), *container, options.clone()))
            .collect()
    }

    /// Undo everything `init` did to the container and its tabs.
    ///
    /// Calling it again is a no-op, as are `toggle` and `select` afterwards.
    pub fn remove(&self) -> &Self {
        if self.inner.removed.swap(true, Ordering::SeqCst) {
            tracing::warn!(panel = %self.inner.id, "Sliding panel already removed");
            return self;
        }

        let document = &self.inner.host.document;
        let container = self.inner.container;

        if self.inner.transition.lock().cancel() {
            tracing::debug!(panel = %self.inner.id, "Cancelled in-flight transition");
        }
        self.inner.host.animator.stop(container);

        let handlers: Vec<HandlerId> = self.inner.handlers.lock().drain(..).collect();
        for handler in handlers {
            self.inner.host.events.off(handler);
        }

        let mut tabs = self.inner.tabs.lock().clone();
        tabs.unwrap_contents(document.as_ref());
        tabs.mark_selected(document.as_ref(), None);
        *self.inner.tabs.lock() = tabs;
        self.inner.selection.lock().clear();

        document.remove_class(container, classes::SLIDING_PANEL);
        if let Some(axis) = self.inner.axis {
            document.remove_class(container, axis.orientation.marker());
        }
        document.remove_class(container, &self.inner.options.position.marker());
        document.remove_class(container, classes::OPENED);
        document.clear_style(container);

        tracing::info!(panel = %self.inner.id, %container, "Removed sliding panel");

        self
    }

    /// Open or close the panel.
    ///
    /// `state` defaults to the opposite of the current state. `snap` skips the
    /// animation; so does a configured duration below 1ms for that direction.
    pub fn toggle(&self, state: Option<PanelState>, snap: bool) -> &Self {
        if self.is_removed() {
            tracing::debug!(panel = %self.inner.id, "Toggle on removed panel ignored");
            return self;
        }

        let transition = self.inner.transition.lock().request(state, snap);
        self.apply(transition);
        self
    }

    /// Select the tab at `index`, clearing any other selection.
    ///
    /// Fires `selected` at the tab. Out-of-range indexes only clear.
    pub fn select(&self, index: usize) -> &Self {
        if self.is_removed() {
            tracing::debug!(panel = %self.inner.id, "Select on removed panel ignored");
            return self;
        }

        let selected = self.inner.selection.lock().select(index);

        let tabs = self.inner.tabs.lock().clone();
        tabs.mark_selected(self.inner.host.document.as_ref(), selected);
        let target = selected.and_then(|i| tabs.get(i)).map(|t| t.element);

        if let Some(element) = target {
            self.inner.host.events.trigger(element, SELECTED);
        }

        self
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn container(&self) -> ElementId {
        self.inner.container
    }

    pub fn options(&self) -> &Options {
        &self.inner.options
    }

    pub fn position(&self) -> &Position {
        &self.inner.options.position
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.inner.axis.map(|a| a.orientation)
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.inner.axis.map(|a| a.dimension)
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.inner.transition.lock().geometry()
    }

    /// Last committed state; an animation in flight has not committed yet
    pub fn state(&self) -> PanelState {
        self.inner.transition.lock().state()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.transition.lock().is_animating()
    }

    pub fn selected(&self) -> Option<usize> {
        self.inner.selection.lock().selected()
    }

    pub fn tab_count(&self) -> usize {
        self.inner.tabs.lock().len()
    }

    pub fn tab(&self, index: usize) -> Option<Tab> {
        self.inner.tabs.lock().get(index).cloned()
    }

    /// Snapshot of the discovered tabs
    pub fn tabs(&self) -> TabSet {
        self.inner.tabs.lock().clone()
    }

    pub fn is_removed(&self) -> bool {
        self.inner.removed.load(Ordering::SeqCst)
    }

    fn attach_handlers(&self) {
        let labels: Vec<(usize, ElementId)> = self
            .inner
            .tabs
            .lock()
            .iter()
            .enumerate()
            .filter_map(|(index, tab)| tab.label.map(|label| (index, label)))
            .collect();

        let mut handlers = Vec::with_capacity(labels.len());
        for (index, label) in labels {
            let weak = Arc::downgrade(&self.inner);
            let id = self.inner.host.events.on(
                label,
                CLICK,
                Some(HANDLER_NAMESPACE),
                Arc::new(move |_: &Event| {
                    if let Some(panel) = Self::upgrade(&weak) {
                        panel.handle_click(index);
                    }
                }),
            );
            handlers.push(id);
        }

        self.inner.handlers.lock().extend(handlers);
    }

    /// Clicking the selected tab toggles; clicking any other tab selects it
    /// and opens the panel.
    fn handle_click(&self, index: usize) {
        if self.is_removed() {
            return;
        }

        let already_selected = self.inner.selection.lock().is_selected(index);
        tracing::debug!(panel = %self.inner.id, index, already_selected, "Tab label clicked");

        if already_selected {
            self.toggle(None, false);
        } else {
            self.select(index).toggle(Some(PanelState::Opened), false);
        }
    }

    fn apply(&self, transition: Transition) {
        let host = &self.inner.host;
        let container = self.inner.container;

        match transition {
            Transition::None => {}
            Transition::Snap {
                target,
                interrupted,
            } => {
                if interrupted {
                    host.animator.stop(container);
                    self.clear_dimension();
                }
                self.settle(target);
            }
            Transition::Animate {
                target,
                dimension,
                size,
                duration,
                ticket,
            } => {
                tracing::debug!(
                    panel = %self.inner.id,
                    %target,
                    %dimension,
                    size,
                    ?duration,
                    %ticket,
                    "Starting animated transition"
                );

                let weak = Arc::downgrade(&self.inner);
                host.animator.animate(
                    container,
                    dimension,
                    size,
                    duration,
                    Box::new(move || {
                        if let Some(panel) = Self::upgrade(&weak) {
                            panel.complete(ticket);
                        }
                    }),
                );
            }
            Transition::Revert { state, dimension } => {
                tracing::debug!(panel = %self.inner.id, %state, "Reverting to committed state");
                host.animator.stop(container);
                if let Some(dimension) = dimension {
                    host.document.remove_style(container, dimension.as_str());
                }
            }
        }
    }

    fn complete(&self, ticket: Ticket) {
        if self.is_removed() {
            return;
        }

        let Some(target) = self.inner.transition.lock().complete(ticket) else {
            return;
        };

        self.clear_dimension();
        self.settle(target);
    }

    /// Make the `opened` marker match `target`, then notify
    fn settle(&self, target: PanelState) {
        let document = &self.inner.host.document;
        let container = self.inner.container;

        if target.is_opened() {
            document.add_class(container, classes::OPENED);
        } else {
            document.remove_class(container, classes::OPENED);
        }

        tracing::debug!(panel = %self.inner.id, state = %target, "Panel settled");

        self.inner
            .host
            .events
            .trigger(container, target.notification());
    }

    /// Drop the inline size so layout flows naturally again
    fn clear_dimension(&self) {
        if let Some(axis) = self.inner.axis {
            self.inner
                .host
                .document
                .remove_style(self.inner.container, axis.dimension.as_str());
        }
    }

    fn upgrade(weak: &Weak<PanelInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }
}

impl std::fmt::Debug for SlidingPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingPanel")
            .field("id", &self.inner.id)
            .field("container", &self.inner.container)
            .field("position", &self.inner.options.position)
            .field("state", &self.state())
            .field("selected", &self.selected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidepanel_host::{
        Animator, Completion, Dispatcher, Document, EventBus, MemoryDocument, MemoryHost,
    };
    use slidepanel_tabs::classes as tab_classes;
    use slidepanel_transition::{AnimationOptions, CloseTiming};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    const CONTAINER_WIDTH: f64 = 40.0;
    const CONTAINER_HEIGHT: f64 = 30.0;
    const CONTENT_WIDTH: f64 = 260.0;
    const CONTENT_HEIGHT: f64 = 170.0;

    struct Page {
        host: MemoryHost,
        container: ElementId,
        tabs: Vec<ElementId>,
        labels: Vec<ElementId>,
        contents: Vec<ElementId>,
    }

    impl Page {
        fn new(count: usize) -> Self {
            let host = MemoryHost::new();
            let doc = &host.document;
            let container = doc.create_element("div");
            doc.set_size(container, CONTAINER_WIDTH, CONTAINER_HEIGHT);
            let list = doc.append(container, "ul", &[tab_classes::TABS]).unwrap();

            let mut page = Self {
                host: host.clone(),
                container,
                tabs: Vec::new(),
                labels: Vec::new(),
                contents: Vec::new(),
            };

            for _ in 0..count {
                let tab = doc.append(list, "li", &[tab_classes::TAB]).unwrap();
                let label = doc.append(tab, "header", &[tab_classes::TAB_LABEL]).unwrap();
                let content = doc.append(tab, "div", &[tab_classes::TAB_CONTENT]).unwrap();
                doc.set_size(content, CONTENT_WIDTH, CONTENT_HEIGHT);
                page.tabs.push(tab);
                page.labels.push(label);
                page.contents.push(content);
            }

            page
        }

        fn doc(&self) -> &MemoryDocument {
            &self.host.document
        }

        fn bus(&self) -> &EventBus {
            &self.host.events
        }

        fn init(&self, options: Options) -> SlidingPanel {
            SlidingPanel::init(self.host.host(), self.container, options).unwrap()
        }

        fn click(&self, index: usize) {
            self.bus().trigger(self.labels[index], CLICK);
        }

        fn is_opened(&self) -> bool {
            self.doc().has_class(self.container, classes::OPENED)
        }

        fn selected_markers(&self) -> Vec<usize> {
            self.tabs
                .iter()
                .enumerate()
                .filter(|(_, t)| self.doc().has_class(**t, tab_classes::TAB_SELECTED))
                .map(|(i, _)| i)
                .collect()
        }

        /// (event name, target) pairs fired so far
        fn fired(&self) -> Vec<(String, ElementId)> {
            self.bus()
                .history()
                .into_iter()
                .filter(|e| e.name != CLICK)
                .map(|e| (e.name, e.target))
                .collect()
        }
    }

    fn instant() -> Options {
        Options::default().with_animation(AnimationOptions::instant())
    }

    /// Animator that records requests and completes them only on demand
    #[derive(Clone, Default)]
    struct RecordingAnimator {
        calls: Arc<Mutex<Vec<(ElementId, Dimension, f64, Duration)>>>,
        pending: Arc<Mutex<Vec<Completion>>>,
    }

    impl RecordingAnimator {
        fn complete_all(&self) {
            let pending: Vec<Completion> = self.pending.lock().drain(..).collect();
            for on_complete in pending {
                on_complete();
            }
        }
    }

    impl Animator for RecordingAnimator {
        fn animate(
            &self,
            element: ElementId,
            dimension: Dimension,
            target: f64,
            duration: Duration,
            on_complete: Completion,
        ) {
            self.calls.lock().push((element, dimension, target, duration));
            self.pending.lock().push(on_complete);
        }

        fn stop(&self, _element: ElementId) {
            self.pending.lock().clear();
        }

        fn is_animating(&self, _element: ElementId) -> bool {
            !self.pending.lock().is_empty()
        }
    }

    fn recording_host(page: &Page) -> (Host, RecordingAnimator) {
        let animator = RecordingAnimator::default();
        let host = Host::new(
            Arc::new(page.doc().clone()),
            Arc::new(animator.clone()),
            Arc::new(page.bus().clone()),
        );
        (host, animator)
    }

    #[test]
    fn test_init_applies_horizontal_markers() {
        let page = Page::new(2);
        let panel = page.init(Options::default());
        let doc = page.doc();

        assert!(doc.has_class(page.container, classes::SLIDING_PANEL));
        assert!(doc.has_class(page.container, "panel-horizontal"));
        assert!(doc.has_class(page.container, "panel-top"));
        assert!(!page.is_opened());

        assert_eq!(panel.orientation(), Some(Orientation::Horizontal));
        assert_eq!(panel.dimension(), Some(Dimension::Height));
        assert_eq!(doc.style(page.container, "padding-left").as_deref(), Some("0.5em"));
        assert_eq!(doc.style(page.container, "padding-right").as_deref(), Some("0.5em"));
        assert_eq!(doc.style(page.container, "padding-top"), None);

        for (index, content) in page.contents.iter().enumerate() {
            let wrapper = doc.parent(*content).unwrap();
            assert!(doc.has_class(wrapper, tab_classes::TAB_CONTENT_WRAPPER));
            assert_eq!(doc.parent(wrapper), Some(page.tabs[index]));
            assert_eq!(doc.style(wrapper, "padding-left").as_deref(), Some("0.5em"));
        }

        let geometry = panel.geometry().unwrap();
        assert_eq!(geometry.size_closed, CONTAINER_HEIGHT);
        assert_eq!(geometry.size_opened, CONTAINER_HEIGHT + CONTENT_HEIGHT);
        assert_eq!(panel.state(), PanelState::Closed);
        assert!(page.fired().is_empty());
    }

    #[test]
    fn test_init_applies_vertical_markers() {
        let page = Page::new(1);
        let panel = page.init(
            Options::default()
                .with_position(Position::Right)
                .with_margin(Some("4px")),
        );
        let doc = page.doc();

        assert!(doc.has_class(page.container, "panel-vertical"));
        assert!(doc.has_class(page.container, "panel-right"));
        assert_eq!(doc.style(page.container, "padding-top").as_deref(), Some("4px"));
        assert_eq!(doc.style(page.container, "padding-bottom").as_deref(), Some("4px"));
        assert_eq!(doc.style(page.container, "padding-left"), None);

        let geometry = panel.geometry().unwrap();
        assert_eq!(geometry.dimension, Dimension::Width);
        assert_eq!(geometry.content_size(), CONTENT_WIDTH);
        assert_eq!(geometry.size_closed, CONTAINER_WIDTH);
    }

    #[test]
    fn test_unrecognized_position_degrades() {
        let page = Page::new(2);
        let panel = page.init(Options::default().with_position(Position::from("diagonal")));
        let doc = page.doc();

        assert!(doc.has_class(page.container, "panel-diagonal"));
        assert!(!doc.has_class(page.container, "panel-horizontal"));
        assert!(!doc.has_class(page.container, "panel-vertical"));
        assert!(doc.styles(page.container).is_empty());
        assert!(panel.geometry().is_none());
        assert_eq!(panel.orientation(), None);

        // Default durations would animate; without an axis the toggle snaps
        panel.toggle(None, false);
        assert!(page.is_opened());
        assert!(page.host.animator.is_idle());
        assert_eq!(page.bus().fired_at(page.container), vec!["opened"]);
    }

    #[test]
    fn test_select_then_toggle_scenario() {
        let page = Page::new(3);
        let panel = page.init(instant().with_position(Position::Left));

        panel.select(1).toggle(None, false);

        assert_eq!(page.selected_markers(), vec![1]);
        assert_eq!(panel.selected(), Some(1));
        assert!(page.is_opened());
        assert_eq!(panel.state(), PanelState::Opened);
        assert_eq!(
            page.fired(),
            vec![
                ("selected".to_string(), page.tabs[1]),
                ("opened".to_string(), page.container),
            ]
        );
    }

    #[test]
    fn test_redundant_toggle_is_silent() {
        let page = Page::new(1);
        let panel = page.init(instant());

        panel.toggle(Some(PanelState::Closed), false);
        assert!(!page.is_opened());
        assert!(page.fired().is_empty());

        panel.toggle(Some(PanelState::Opened), false);
        panel.toggle(Some(PanelState::Opened), false);
        assert!(page.is_opened());
        assert_eq!(page.bus().fired_at(page.container), vec!["opened"]);
    }

    #[test]
    fn test_selection_is_exclusive() {
        let page = Page::new(4);
        let panel = page.init(instant());

        for index in [0, 3, 2, 2, 1] {
            panel.select(index);
            assert_eq!(page.selected_markers(), vec![index]);
        }
        assert_eq!(page.bus().fired_at(page.tabs[2]), vec!["selected", "selected"]);
        // Selecting never opens the panel on its own
        assert!(!page.is_opened());
    }

    #[test]
    fn test_out_of_range_select_clears_silently() {
        let page = Page::new(2);
        let panel = page.init(instant());

        panel.select(0);
        page.bus().clear_history();
        panel.select(9);

        assert!(page.selected_markers().is_empty());
        assert_eq!(panel.selected(), None);
        assert!(page.fired().is_empty());
    }

    #[test]
    fn test_animated_open_reaches_opened_size_before_notifying() {
        let page = Page::new(2);
        let (host, animator) = recording_host(&page);
        let panel = SlidingPanel::init(host, page.container, Options::default()).unwrap();

        panel.toggle(None, false);
        assert!(!page.is_opened());
        assert!(panel.is_animating());
        assert!(page.fired().is_empty());

        let calls = animator.calls.lock().clone();
        assert_eq!(
            calls,
            vec![(
                page.container,
                Dimension::Height,
                CONTAINER_HEIGHT + CONTENT_HEIGHT,
                Duration::from_millis(200)
            )]
        );

        animator.complete_all();
        assert!(page.is_opened());
        assert_eq!(panel.state(), PanelState::Opened);
        assert_eq!(page.bus().fired_at(page.container), vec!["opened"]);
    }

    #[test]
    fn test_animation_progress_with_timeline() {
        let page = Page::new(1);
        let panel = page.init(Options::default());
        let animator = &page.host.animator;

        panel.toggle(Some(PanelState::Opened), false);
        animator.advance(Duration::from_millis(100));

        let midway = page.doc().measure(page.container, Dimension::Height);
        assert!(midway > CONTAINER_HEIGHT && midway < CONTAINER_HEIGHT + CONTENT_HEIGHT);
        assert!(!page.is_opened());

        animator.advance(Duration::from_millis(100));
        assert!(page.is_opened());
        // Inline override dropped once settled
        assert_eq!(page.doc().style(page.container, "height"), None);
        assert_eq!(page.bus().fired_at(page.container), vec!["opened"]);
    }

    #[test]
    fn test_marker_present_when_notified() {
        let page = Page::new(1);
        let panel = page.init(Options::default());

        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        let doc = page.doc().clone();
        let container = page.container;
        page.bus().on(
            container,
            "opened",
            None,
            Arc::new(move |_: &Event| {
                sink.lock().push((
                    doc.has_class(container, classes::OPENED),
                    doc.style(container, "height"),
                ));
            }),
        );

        panel.toggle(None, false);
        page.host.animator.finish_all();

        assert_eq!(*observed.lock(), vec![(true, None)]);
    }

    #[test]
    fn test_close_animation_duration_follows_close_timing() {
        for (timing, expected) in [
            (CloseTiming::Open, Duration::from_millis(200)),
            (CloseTiming::Close, Duration::from_millis(100)),
        ] {
            let page = Page::new(1);
            let (host, animator) = recording_host(&page);
            let options = Options::default()
                .with_state(PanelState::Opened)
                .with_animation(AnimationOptions {
                    close_timing: timing,
                    ..AnimationOptions::default()
                });
            let panel = SlidingPanel::init(host, page.container, options).unwrap();
            assert!(page.is_opened());

            panel.toggle(None, false);
            let calls = animator.calls.lock().clone();
            assert_eq!(
                calls,
                vec![(page.container, Dimension::Height, CONTAINER_HEIGHT, expected)]
            );

            animator.complete_all();
            assert!(!page.is_opened());
            assert_eq!(page.bus().fired_at(page.container), vec!["opened", "closed"]);
        }
    }

    #[test]
    fn test_same_target_during_animation_completes_once() {
        let page = Page::new(2);
        let panel = page.init(Options::default());

        panel.toggle(Some(PanelState::Opened), false);
        page.host.animator.advance(Duration::from_millis(50));
        panel.toggle(Some(PanelState::Opened), false);
        panel.toggle(None, false);
        page.host.animator.finish_all();

        assert!(page.is_opened());
        assert_eq!(page.bus().fired_at(page.container), vec!["opened"]);
    }

    #[test]
    fn test_opposite_target_during_animation_reverts() {
        let page = Page::new(2);
        let panel = page.init(Options::default());

        panel.toggle(Some(PanelState::Opened), false);
        page.host.animator.advance(Duration::from_millis(50));
        assert!(page.doc().style(page.container, "height").is_some());

        panel.toggle(Some(PanelState::Closed), false);
        assert!(!panel.is_animating());
        assert!(page.host.animator.is_idle());
        assert_eq!(page.doc().style(page.container, "height"), None);

        page.host.animator.finish_all();
        assert!(!page.is_opened());
        assert_eq!(panel.state(), PanelState::Closed);
        assert!(page.fired().is_empty());
    }

    #[test]
    fn test_snap_interrupts_animation() {
        let page = Page::new(1);
        let panel = page.init(Options::default());

        panel.toggle(Some(PanelState::Opened), false);
        page.host.animator.advance(Duration::from_millis(50));
        panel.toggle(Some(PanelState::Opened), true);

        assert!(page.is_opened());
        assert_eq!(page.doc().style(page.container, "height"), None);
        page.host.animator.finish_all();
        assert_eq!(page.bus().fired_at(page.container), vec!["opened"]);
    }

    #[test]
    fn test_initial_opened_state_snaps() {
        let page = Page::new(2);
        let panel = page.init(Options::default().with_state(PanelState::Opened));

        assert!(page.is_opened());
        assert!(page.host.animator.is_idle());
        assert_eq!(panel.state(), PanelState::Opened);
        assert_eq!(page.bus().fired_at(page.container), vec!["opened"]);
    }

    #[test]
    fn test_click_unselected_tab_selects_and_opens() {
        let page = Page::new(3);
        let panel = page.init(instant());

        page.click(2);
        assert_eq!(page.selected_markers(), vec![2]);
        assert!(page.is_opened());

        // Another tab while open: selection moves, panel stays open
        page.click(0);
        assert_eq!(page.selected_markers(), vec![0]);
        assert!(page.is_opened());
        assert_eq!(panel.selected(), Some(0));
        assert_eq!(page.bus().fired_at(page.container), vec!["opened"]);
    }

    #[test]
    fn test_click_selected_tab_toggles() {
        let page = Page::new(3);
        let panel = page.init(instant());

        page.click(1);
        assert!(page.is_opened());

        page.click(1);
        assert!(!page.is_opened());
        assert_eq!(panel.selected(), Some(1));
        assert_eq!(page.selected_markers(), vec![1]);

        page.click(1);
        assert!(page.is_opened());
        assert_eq!(
            page.bus().fired_at(page.container),
            vec!["opened", "closed", "opened"]
        );
    }

    #[test]
    fn test_click_bubbles_from_label_children() {
        let page = Page::new(2);
        let panel = page.init(instant());
        let heading = page.doc().append(page.labels[1], "h1", &[]).unwrap();

        page.bus().trigger(heading, CLICK);
        assert_eq!(panel.selected(), Some(1));
        assert!(page.is_opened());
    }

    #[test]
    fn test_fallback_labels_are_clickable() {
        let host = MemoryHost::new();
        let doc = &host.document;
        let container = doc.create_element("div");
        let list = doc.append(container, "ul", &[tab_classes::TABS]).unwrap();
        let mut firsts = Vec::new();
        for _ in 0..2 {
            let tab = doc.append(list, "li", &[tab_classes::TAB]).unwrap();
            firsts.push(doc.append(tab, "h1", &[]).unwrap());
            doc.append(tab, "section", &[]).unwrap();
        }

        let panel = SlidingPanel::init(host.host(), container, instant()).unwrap();
        host.events.trigger(firsts[1], CLICK);

        assert_eq!(panel.selected(), Some(1));
        assert!(doc.has_class(container, classes::OPENED));
    }

    #[test]
    fn test_remove_restores_container() {
        let page = Page::new(3);
        let panel = page.init(instant().with_position(Position::Bottom));
        page.click(1);
        assert!(page.is_opened());

        panel.remove();
        let doc = page.doc();

        assert!(doc.classes(page.container).is_empty());
        assert!(doc.styles(page.container).is_empty());
        assert!(page.selected_markers().is_empty());
        assert_eq!(panel.selected(), None);
        for (index, content) in page.contents.iter().enumerate() {
            assert_eq!(doc.parent(*content), Some(page.tabs[index]));
        }
        assert!(doc
            .find_by_class(page.container, tab_classes::TAB_CONTENT_WRAPPER)
            .is_empty());
        assert_eq!(page.bus().handler_count(), 0);

        // Detached: clicks and calls do nothing
        page.bus().clear_history();
        page.click(0);
        panel.toggle(None, true).select(2);
        assert!(page.fired().is_empty());
        assert!(doc.classes(page.container).is_empty());

        panel.remove();
        assert!(panel.is_removed());
    }

    #[test]
    fn test_remove_during_animation_never_completes() {
        let page = Page::new(1);
        let panel = page.init(Options::default());

        panel.toggle(None, false);
        page.host.animator.advance(Duration::from_millis(20));
        panel.remove();
        page.host.animator.finish_all();

        assert!(!page.is_opened());
        assert!(page.doc().styles(page.container).is_empty());
        assert!(page.fired().is_empty());
    }

    #[test]
    fn test_remove_leaves_foreign_handlers() {
        let page = Page::new(1);
        let panel = page.init(instant());
        page.bus()
            .on(page.labels[0], CLICK, Some("page"), Arc::new(|_: &Event| {}));

        panel.remove();
        assert_eq!(page.bus().handler_count(), 1);
    }

    #[test]
    fn test_notification_handler_may_reenter_panel() {
        let page = Page::new(2);
        let panel = page.init(instant());

        let reentrant = panel.clone();
        page.bus().on(
            page.container,
            "opened",
            None,
            Arc::new(move |_: &Event| {
                reentrant.select(0);
            }),
        );

        panel.toggle(None, false);
        assert_eq!(panel.selected(), Some(0));
        assert_eq!(page.selected_markers(), vec![0]);
    }

    #[test]
    fn test_init_all_attaches_each_container() {
        let first = Page::new(1);
        let doc = first.doc();
        let second = doc.create_element("div");
        let list = doc.append(second, "ul", &[tab_classes::TABS]).unwrap();
        let tab = doc.append(list, "li", &[tab_classes::TAB]).unwrap();
        doc.append(tab, "header", &[tab_classes::TAB_LABEL]).unwrap();

        let panels = SlidingPanel::init_all(
            &first.host.host(),
            &[first.container, second],
            &instant(),
        )
        .unwrap();

        assert_eq!(panels.len(), 2);
        assert_ne!(panels[0].id(), panels[1].id());
        assert_eq!(panels[1].container(), second);
        assert!(doc.has_class(second, classes::SLIDING_PANEL));

        // Removing one panel leaves the other wired
        panels[0].remove();
        panels[1].toggle(None, false);
        assert!(doc.has_class(second, classes::OPENED));
    }

    #[test]
    fn test_missing_container_is_an_error() {
        let host = MemoryHost::new();
        let result = SlidingPanel::init(host.host(), ElementId::new(404), Options::default());
        assert!(matches!(result, Err(CoreError::ContainerNotFound(_))));
    }

    #[test]
    fn test_without_margin_no_padding() {
        let page = Page::new(1);
        let panel = page.init(Options::default().with_margin(None));

        assert_eq!(panel.geometry().unwrap().content_size(), CONTENT_HEIGHT);
        assert!(page.doc().styles(page.container).is_empty());
        let wrapper = page.doc().parent(page.contents[0]).unwrap();
        assert!(page.doc().styles(wrapper).is_empty());
    }

    #[test]
    fn test_preexisting_opened_marker_is_current_state() {
        let page = Page::new(1);
        page.doc().add_class(page.container, classes::OPENED);

        let panel = page.init(instant());
        assert_eq!(panel.state(), PanelState::Closed);
        assert!(!page.is_opened());
        assert_eq!(page.bus().fired_at(page.container), vec!["closed"]);
    }

    #[test]
    fn test_oversized_duration_still_animates() {
        let page = Page::new(1);
        let (host, animator) = recording_host(&page);
        let options = Options::from_json(r#"{"animation": {"open": 1e300}}"#).unwrap();
        let panel = SlidingPanel::init(host, page.container, options).unwrap();

        panel.toggle(None, false);
        assert!(panel.is_animating());
        assert_eq!(animator.calls.lock()[0].3, Duration::MAX);

        animator.complete_all();
        assert_eq!(panel.state(), PanelState::Opened);
    }

    /// Document that reads back from the panel on every mutation, the way a
    /// host mutation observer would
    struct ObservedDocument {
        inner: MemoryDocument,
        panel: Mutex<Option<SlidingPanel>>,
        observed: AtomicUsize,
    }

    impl ObservedDocument {
        fn observe(&self) {
            let panel = self.panel.lock().clone();
            if let Some(panel) = panel {
                panel.tab_count();
                self.observed.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    impl Document for ObservedDocument {
        fn contains(&self, element: ElementId) -> bool {
            self.inner.contains(element)
        }

        fn parent(&self, element: ElementId) -> Option<ElementId> {
            self.inner.parent(element)
        }

        fn children(&self, element: ElementId) -> Vec<ElementId> {
            self.inner.children(element)
        }

        fn has_class(&self, element: ElementId, class: &str) -> bool {
            self.inner.has_class(element, class)
        }

        fn add_class(&self, element: ElementId, class: &str) {
            self.inner.add_class(element, class);
            self.observe();
        }

        fn remove_class(&self, element: ElementId, class: &str) {
            self.inner.remove_class(element, class);
            self.observe();
        }

        fn style(&self, element: ElementId, property: &str) -> Option<String> {
            self.inner.style(element, property)
        }

        fn set_style(&self, element: ElementId, property: &str, value: &str) {
            self.inner.set_style(element, property, value);
        }

        fn remove_style(&self, element: ElementId, property: &str) {
            self.inner.remove_style(element, property);
        }

        fn clear_style(&self, element: ElementId) {
            self.inner.clear_style(element);
        }

        fn measure(&self, element: ElementId, dimension: Dimension) -> f64 {
            self.inner.measure(element, dimension)
        }

        fn wrap(&self, element: ElementId, class: &str) -> Option<ElementId> {
            self.inner.wrap(element, class)
        }

        fn unwrap(&self, element: ElementId) {
            self.inner.unwrap(element);
            self.observe();
        }
    }

    #[test]
    fn test_document_may_reenter_panel_on_mutation() {
        let page = Page::new(2);
        let document = Arc::new(ObservedDocument {
            inner: page.doc().clone(),
            panel: Mutex::new(None),
            observed: AtomicUsize::new(0),
        });
        let host = Host::new(
            document.clone(),
            Arc::new(page.host.animator.clone()),
            Arc::new(page.bus().clone()),
        );
        let panel = SlidingPanel::init(host, page.container, instant()).unwrap();
        *document.panel.lock() = Some(panel.clone());

        let (done, finished) = std::sync::mpsc::channel();
        let worker = panel.clone();
        std::thread::spawn(move || {
            worker.select(1);
            worker.remove();
            let _ = done.send(());
        });

        assert!(finished.recv_timeout(Duration::from_secs(3)).is_ok());
        assert!(document.observed.load(Ordering::SeqCst) > 0);
        assert!(panel.is_removed());
        assert!(page.selected_markers().is_empty());
        assert_eq!(page.doc().parent(page.contents[0]), Some(page.tabs[0]));

        // Break the panel <-> document cycle
        document.panel.lock().take();
    }
}
