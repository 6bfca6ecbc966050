//! Steady-state sizes of a panel
//!
//! Both sizes are computed once when the panel is attached. The content is
//! never re-measured afterwards.

use crate::position::{Axis, Dimension, Orientation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub orientation: Orientation,
    /// Dimension animated between the two sizes
    pub dimension: Dimension,
    /// Size along `dimension` with only the tab labels showing
    pub size_closed: f64,
    /// `size_closed` plus the measured content size
    pub size_opened: f64,
}

impl Geometry {
    pub fn resolve(axis: Axis, size_closed: f64, content_size: f64) -> Self {
        let size_closed = sanitize(size_closed);

        Self {
            orientation: axis.orientation,
            dimension: axis.dimension,
            size_closed,
            size_opened: size_closed + sanitize(content_size),
        }
    }

    pub fn content_size(&self) -> f64 {
        self.size_opened - self.size_closed
    }

    /// Size the panel settles at when opened (`true`) or closed (`false`)
    pub fn target_size(&self, opened: bool) -> f64 {
        if opened {
            self.size_opened
        } else {
            self.size_closed
        }
    }
}

fn sanitize(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}
