use std::collections::HashMap;
use std::sync::Arc;

use gridturn_core::{Direction, Point, Range};

use crate::traits::Graph;

/// A route found by the turn-aware search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Visited cells, start first and goal last.
    pub path: Vec<Point>,
    /// Total cost under the [`TurnCosts`](crate::TurnCosts) used for the search.
    pub cost: i32,
    /// Facing on arrival at the last cell (the initial facing for a
    /// one-cell route).
    pub facing: Direction,
}

impl Route {
    /// Number of edges walked.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Point> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.path.last().copied()
    }
}

// ---------------------------------------------------------------------------
// Internal node for A*/Dijkstra priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: NO_PARENT,
            generation: 0,
            open: false,
        }
    }
}

pub(crate) const NO_PARENT: usize = usize::MAX;

/// Heap entry for a state, ordered so that `BinaryHeap` pops the smallest
/// `f` first, then the largest `g`, then the earliest push.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) g: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then(self.g.cmp(&other.g))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Cost reported for states a search never reached.
pub const UNREACHABLE: i32 = i32::MAX;

/// Search target: any facing at a vertex, or one exact state.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Goal {
    Vertex(Point),
    State(Point, Direction),
}

impl Goal {
    pub(crate) fn point(self) -> Point {
        match self {
            Goal::Vertex(p) | Goal::State(p, _) => p,
        }
    }

    pub(crate) fn reached(self, p: Point, facing: Direction) -> bool {
        match self {
            Goal::Vertex(g) => g == p,
            Goal::State(g, d) => g == p && d == facing,
        }
    }
}

// ---------------------------------------------------------------------------
// Cell layout
// ---------------------------------------------------------------------------

/// Bounding boxes up to this many cells are always stored densely.
const DENSE_FLOOR: usize = 4096;

/// Past the floor, dense storage is used while the bounding box holds at
/// most this many cells per vertex.
const DENSE_RATIO: usize = 4;

/// Numbering of the cells a [`TurnSearch`] or [`StateCosts`](crate::StateCosts)
/// holds slots for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Cells {
    /// Every cell of a rectangle, row-major.
    Dense(Range),
    /// An explicit vertex list, sorted row-major.
    Sparse(Arc<SparseCells>),
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SparseCells {
    points: Vec<Point>,
    index: HashMap<Point, usize>,
}

impl Cells {
    fn sparse(points: impl IntoIterator<Item = Point>) -> Self {
        let mut points: Vec<Point> = points.into_iter().collect();
        points.sort();
        points.dedup();
        let index = points.iter().enumerate().map(|(i, &p)| (p, i)).collect();
        Cells::Sparse(Arc::new(SparseCells { points, index }))
    }

    /// Dense over the graph's bounds when those are compact and cover every
    /// vertex; sparse otherwise.
    fn for_graph<G: Graph>(graph: &G) -> Self {
        let bounds = graph.bounds();
        let limit = graph
            .vertex_count()
            .saturating_mul(DENSE_RATIO)
            .max(DENSE_FLOOR);
        if bounds.len() <= limit && graph.vertices().all(|v| bounds.contains(v)) {
            Cells::Dense(bounds)
        } else {
            log::debug!(
                "sparse search tables: {} vertices in bounds {bounds}",
                graph.vertex_count()
            );
            Cells::sparse(graph.vertices())
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Cells::Dense(rng) => rng.len(),
            Cells::Sparse(s) => s.points.len(),
        }
    }

    #[inline]
    pub(crate) fn index_of(&self, p: Point) -> Option<usize> {
        match self {
            Cells::Dense(rng) => rng.index_of(p),
            Cells::Sparse(s) => s.index.get(&p).copied(),
        }
    }

    #[inline]
    pub(crate) fn point_at(&self, idx: usize) -> Point {
        match self {
            Cells::Dense(rng) => rng.point_at(idx),
            Cells::Sparse(s) => s.points[idx],
        }
    }
}

// ---------------------------------------------------------------------------
// TurnSearch
// ---------------------------------------------------------------------------

/// Reusable search tables for one graph.
///
/// Every `(cell, facing)` pair the tables cover owns a node slot. A
/// generation counter invalidates all slots at the start of each query, so
/// a `TurnSearch` can serve many queries without clearing or reallocating,
/// and no query observes another's results.
///
/// The tables must cover every vertex a query can reach. Vertices outside
/// them are treated as missing from the graph (and logged at `warn`), which
/// can hide routes. [`for_graph`](Self::for_graph) always covers its graph.
pub struct TurnSearch {
    pub(crate) cells: Cells,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) seq: u64,
}

impl TurnSearch {
    pub(crate) fn with_cells(cells: Cells) -> Self {
        Self {
            nodes: vec![Node::default(); cells.len() * 4],
            cells,
            generation: 0,
            seq: 0,
        }
    }

    /// Create dense tables covering every cell of `rng`.
    pub fn new(rng: Range) -> Self {
        Self::with_cells(Cells::Dense(rng))
    }

    /// Create tables holding exactly the given cells, however far apart.
    pub fn for_vertices(vertices: impl IntoIterator<Item = Point>) -> Self {
        Self::with_cells(Cells::sparse(vertices))
    }

    /// Create tables covering every vertex of `graph`.
    ///
    /// Compact graphs get dense tables over their bounds; sparse or
    /// far-flung vertex sets get one slot per vertex.
    pub fn for_graph<G: Graph>(graph: &G) -> Self {
        Self::with_cells(Cells::for_graph(graph))
    }

    /// Whether the tables hold slots for `p`.
    #[inline]
    pub fn covers(&self, p: Point) -> bool {
        self.cells.index_of(p).is_some()
    }

    /// Number of cells the tables hold slots for.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Start a new query: stale nodes become invisible.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old generations could alias, so wipe once.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.seq = 0;
        self.generation
    }

    pub(crate) fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    // -----------------------------------------------------------------------
    // State helpers
    // -----------------------------------------------------------------------

    /// Flat index of the state `(p, facing)`. `None` for uncovered cells.
    #[inline]
    pub(crate) fn state(&self, p: Point, facing: Direction) -> Option<usize> {
        self.cells.index_of(p).map(|i| i * 4 + facing.index())
    }

    /// Inverse of [`state`](Self::state).
    #[inline]
    pub(crate) fn unstate(&self, idx: usize) -> (Point, Direction) {
        (self.cells.point_at(idx / 4), Direction::ALL[idx % 4])
    }

    /// Follow parents from `goal` back to the root.
    pub(crate) fn reconstruct(&self, goal: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != NO_PARENT {
            path.push(self.unstate(ci).0);
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}
