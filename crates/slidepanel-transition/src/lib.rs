//! Slidepanel Transitions
//!
//! ```text
//!            toggle / snap
//!  Closed  ────────────────▶  Opened
//!          ◀────────────────
//! ```
//!
//! A request either does nothing, snaps (commits at once) or starts an
//! animation that commits only when its ticket completes. Requests toward the
//! opposite state while an animation is in flight abandon that animation and
//! return the panel to its committed state.

mod controller;
mod state;
mod timing;

pub use controller::{Ticket, Transition, TransitionController};
pub use state::PanelState;
pub use timing::{AnimationOptions, CloseTiming};
