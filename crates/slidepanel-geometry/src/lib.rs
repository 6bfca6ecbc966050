//! Slidepanel Geometry
//!
//! Maps the edge a panel is docked to onto the axis it slides along:
//! - `top` / `bottom` slide horizontally docked panels open along `height`
//! - `left` / `right` slide vertically docked panels open along `width`
//!
//! Unrecognized positions resolve to no axis at all; callers treat that as
//! "nothing to size or animate" rather than an error.

mod geometry;
mod position;

pub use geometry::Geometry;
pub use position::{Axis, Dimension, Orientation, Position};
