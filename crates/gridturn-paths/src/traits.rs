use std::collections::HashSet;
use std::hash::BuildHasher;

use gridturn_core::{Point, Range};

use crate::distance::manhattan;

/// Read-only graph interface consumed by the searches.
///
/// Vertices are grid cells; edges connect cells one cardinal step apart, so
/// every edge has a well-defined [`Direction`](gridturn_core::Direction).
/// Implementations must keep adjacency symmetric and only relate members
/// of the vertex set.
pub trait Graph {
    /// Whether `p` is a vertex of the graph.
    fn contains_vertex(&self, p: Point) -> bool;

    /// Whether an edge joins `from` and `to`.
    fn adjacent(&self, from: Point, to: Point) -> bool;

    /// Every vertex, in no particular order.
    fn vertices(&self) -> impl Iterator<Item = Point> + '_;

    /// Rectangle covering the vertices. Compact graphs get dense search
    /// tables over it; see [`TurnSearch::for_graph`](crate::TurnSearch::for_graph).
    fn bounds(&self) -> Range {
        Range::bounding(self.vertices())
    }

    fn vertex_count(&self) -> usize {
        self.vertices().count()
    }
}

/// A bare vertex set: cells are adjacent when both are members and one
/// step apart.
impl<S: BuildHasher> Graph for HashSet<Point, S> {
    fn contains_vertex(&self, p: Point) -> bool {
        self.contains(&p)
    }

    fn adjacent(&self, from: Point, to: Point) -> bool {
        manhattan(from, to) == 1 && self.contains(&from) && self.contains(&to)
    }

    fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.iter().copied()
    }

    fn vertex_count(&self) -> usize {
        self.len()
    }
}
