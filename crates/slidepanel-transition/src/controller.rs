//! Transition Controller
//!
//! Pure decision logic: the controller never touches the host. Callers apply
//! the returned [`Transition`] and report animation completion back through
//! [`TransitionController::complete`].

use std::time::Duration;

use slidepanel_geometry::{Dimension, Geometry};

use crate::state::PanelState;
use crate::timing::AnimationOptions;

/// Identifies one animated transition; stale tickets complete nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Already there (or already on the way)
    None,
    /// State committed immediately. When `interrupted` is set an animation
    /// toward the same target was running and must be stopped first.
    Snap {
        target: PanelState,
        interrupted: bool,
    },
    /// Animate `dimension` to `size`; commit when `ticket` completes
    Animate {
        target: PanelState,
        dimension: Dimension,
        size: f64,
        duration: Duration,
        ticket: Ticket,
    },
    /// An animation toward the opposite state was abandoned. Stop it and drop
    /// the inline dimension; the committed state is unchanged.
    Revert {
        state: PanelState,
        dimension: Option<Dimension>,
    },
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    target: PanelState,
    ticket: Ticket,
}

#[derive(Debug)]
pub struct TransitionController {
    /// Last committed state (matches the `opened` marker)
    state: PanelState,
    animation: AnimationOptions,
    /// Absent when the position has no axis; animations then degrade to snaps
    geometry: Option<Geometry>,
    in_flight: Option<InFlight>,
    next_ticket: u64,
}

impl TransitionController {
    pub fn new(
        state: PanelState,
        animation: AnimationOptions,
        geometry: Option<Geometry>,
    ) -> Self {
        Self {
            state,
            animation,
            geometry,
            in_flight: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    pub fn animation(&self) -> &AnimationOptions {
        &self.animation
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Target of the running animation, if any
    pub fn pending_target(&self) -> Option<PanelState> {
        self.in_flight.map(|f| f.target)
    }

    /// Decide what a toggle request does.
    ///
    /// `target` defaults to the opposite of the committed state. Snaps commit
    /// before returning; animations commit in [`complete`](Self::complete).
    pub fn request(&mut self, target: Option<PanelState>, snap: bool) -> Transition {
        let target = target.unwrap_or_else(|| self.state.toggled());
        let snap = snap || self.animation.is_instant(target) || self.geometry.is_none();

        if let Some(in_flight) = self.in_flight {
            if in_flight.target == target {
                if !snap {
                    tracing::debug!(%target, ticket = %in_flight.ticket, "Transition already in flight");
                    return Transition::None;
                }

                self.in_flight = None;
                self.commit(target);
                return Transition::Snap {
                    target,
                    interrupted: true,
                };
            }

            // The only other target is the committed state itself
            tracing::debug!(
                from = %in_flight.target,
                to = %target,
                ticket = %in_flight.ticket,
                "Abandoning in-flight transition"
            );
            self.in_flight = None;
            return Transition::Revert {
                state: self.state,
                dimension: self.geometry.map(|g| g.dimension),
            };
        }

        if target == self.state {
            tracing::debug!(%target, "Transition to current state ignored");
            return Transition::None;
        }

        if snap {
            self.commit(target);
            return Transition::Snap {
                target,
                interrupted: false,
            };
        }

        // `snap` is forced above whenever geometry is missing
        let Some(geometry) = self.geometry else {
            return Transition::None;
        };

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(InFlight { target, ticket });

        Transition::Animate {
            target,
            dimension: geometry.dimension,
            size: geometry.target_size(target.is_opened()),
            duration: self.animation.animation_duration(target),
            ticket,
        }
    }

    /// Report that the animation for `ticket` finished. Returns the state to
    /// apply, or `None` when the ticket was cancelled or superseded.
    pub fn complete(&mut self, ticket: Ticket) -> Option<PanelState> {
        match self.in_flight {
            Some(in_flight) if in_flight.ticket == ticket => {
                self.in_flight = None;
                self.commit(in_flight.target);
                Some(in_flight.target)
            }
            _ => {
                tracing::debug!(%ticket, "Ignoring stale transition completion");
                None
            }
        }
    }

    /// Abandon any running animation. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        self.in_flight.take().is_some()
    }

    fn commit(&mut self, target: PanelState) {
        tracing::debug!(from = %self.state, to = %target, "Panel state transition");
        self.state = target;
    }
}
