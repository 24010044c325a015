//! **gridturn-core**: geometry primitives for turn-aware grid routing.
//!
//! This crate provides the small value types shared by the *gridturn*
//! workspace: integer points, half-open rectangles, and the four cardinal
//! facing directions.

pub mod direction;
pub mod geom;

pub use direction::Direction;
pub use geom::{Point, Range, RangeIter};
