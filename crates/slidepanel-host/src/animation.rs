//! Animation seam and a frame-driven animator
//!
//! An animator moves one dimension of one element toward a target value over
//! a duration and invokes the completion exactly once when it gets there.
//! A stopped animation never completes.

use parking_lot::Mutex;
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Duration;

use slidepanel_geometry::Dimension;

use crate::document::{Document, ElementId};

pub type Completion = Box<dyn FnOnce() + Send>;

pub trait Animator: Send + Sync {
    /// Start animating `dimension` of `element` to `target`.
    ///
    /// Starting a new animation on an element that is already animating the
    /// same dimension replaces the running one; its completion is dropped.
    fn animate(
        &self,
        element: ElementId,
        dimension: Dimension,
        target: f64,
        duration: Duration,
        on_complete: Completion,
    );

    /// Stop every running animation on `element` without completing it
    fn stop(&self, element: ElementId);

    fn is_animating(&self, element: ElementId) -> bool;
}

struct Track {
    element: ElementId,
    dimension: Dimension,
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    on_complete: Option<Completion>,
}

impl Track {
    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Current value on a swing curve
    fn value(&self) -> f64 {
        let eased = 0.5 - (self.progress() * PI).cos() / 2.0;
        self.from + (self.to - self.from) * eased
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Animator advanced explicitly by the host's frame loop.
///
/// Each [`advance`](TimelineAnimator::advance) writes the interpolated value
/// as an inline pixel style and fires completions for tracks that finished.
/// Completions run after the internal lock is released so they may start new
/// animations.
pub struct TimelineAnimator {
    document: Arc<dyn Document>,
    tracks: Arc<Mutex<Vec<Track>>>,
}

impl TimelineAnimator {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self {
            document,
            tracks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Move every running animation forward by `delta`
    pub fn advance(&self, delta: Duration) {
        let mut finished = Vec::new();

        {
            let mut tracks = self.tracks.lock();
            for track in tracks.iter_mut() {
                track.elapsed = track.elapsed.saturating_add(delta).min(track.duration);
                self.document.set_style(
                    track.element,
                    track.dimension.as_str(),
                    &format!("{}px", track.value()),
                );
            }

            let mut index = 0;
            while index < tracks.len() {
                if tracks[index].is_finished() {
                    finished.push(tracks.remove(index));
                } else {
                    index += 1;
                }
            }
        }

        for mut track in finished {
            tracing::trace!(element = %track.element, to = track.to, "Animation finished");
            if let Some(on_complete) = track.on_complete.take() {
                on_complete();
            }
        }
    }

    /// Run every animation, including ones started by completions, to the end
    pub fn finish_all(&self) {
        // Bounded so a completion that keeps restarting animations cannot spin forever
        for _ in 0..64 {
            let remaining = self
                .tracks
                .lock()
                .iter()
                .map(|t| t.duration.saturating_sub(t.elapsed))
                .max();

            match remaining {
                Some(remaining) => self.advance(remaining),
                None => return,
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.tracks.lock().is_empty()
    }

    pub fn running(&self) -> usize {
        self.tracks.lock().len()
    }
}

impl Clone for TimelineAnimator {
    fn clone(&self) -> Self {
        Self {
            document: Arc::clone(&self.document),
            tracks: Arc::clone(&self.tracks),
        }
    }
}

impl Animator for TimelineAnimator {
    fn animate(
        &self,
        element: ElementId,
        dimension: Dimension,
        target: f64,
        duration: Duration,
        on_complete: Completion,
    ) {
        let from = self.document.measure(element, dimension);
        let mut tracks = self.tracks.lock();

        tracks.retain(|t| !(t.element == element && t.dimension == dimension));
        tracks.push(Track {
            element,
            dimension,
            from,
            to: target,
            duration,
            elapsed: Duration::ZERO,
            on_complete: Some(on_complete),
        });

        tracing::trace!(%element, %dimension, from, to = target, ?duration, "Animation started");
    }

    fn stop(&self, element: ElementId) {
        self.tracks.lock().retain(|t| t.element != element);
    }

    fn is_animating(&self, element: ElementId) -> bool {
        self.tracks.lock().iter().any(|t| t.element == element)
    }
}
