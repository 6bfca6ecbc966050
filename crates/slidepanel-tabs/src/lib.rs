//! Slidepanel Tabs
//!
//! Expected structure under the panel container:
//! ```text
//! <container>
//!   <ul class="tabs">
//!     <li class="tab">
//!       <header class="tab-label">...</header>
//!       <div class="tab-content">...</div>
//!     </li>
//!     ...
//! ```
//! Without any `tab-label` (or `tab-content`) markers the first (or last)
//! child of each tab is used instead. The tab set is fixed once discovered.

mod selection;
mod tab;

pub use selection::SelectionCoordinator;
pub use tab::{Discovery, Tab, TabSet};

/// Class names read and written on tab elements
pub mod classes {
    pub const TABS: &str = "tabs";
    pub const TAB: &str = "tab";
    pub const TAB_LABEL: &str = "tab-label";
    pub const TAB_CONTENT: &str = "tab-content";
    pub const TAB_CONTENT_WRAPPER: &str = "tab-content-wrapper";
    pub const TAB_SELECTED: &str = "tab-selected";
}
