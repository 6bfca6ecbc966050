//! Slidepanel Core
//!
//! A panel of labeled tabs docked to one edge of a container. Clicking a label
//! selects that tab and slides the panel open; clicking the selected tab's
//! label slides it closed again.
//!
//! ```text
//! SlidingPanel::init(host, container, options)
//!     ├─ TabSet::discover        (slidepanel-tabs)
//!     ├─ Geometry::resolve       (slidepanel-geometry)
//!     └─ TransitionController    (slidepanel-transition)
//! ```

mod config;
mod error;
mod panel;

pub use config::Options;
pub use error::CoreError;
pub use panel::{classes, SlidingPanel, HANDLER_NAMESPACE};

// Re-export the component crates
pub use slidepanel_geometry::{Axis, Dimension, Geometry, Orientation, Position};
pub use slidepanel_host::{
    Animator, Dispatcher, Document, ElementId, Event, EventBus, Host, MemoryDocument, MemoryHost,
    TimelineAnimator,
};
pub use slidepanel_tabs::{Tab, TabSet};
pub use slidepanel_transition::{AnimationOptions, CloseTiming, PanelState};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
