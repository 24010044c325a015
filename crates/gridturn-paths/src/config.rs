//! Cost model and per-query search parameters.

use gridturn_core::Direction;

use crate::error::Error;
use crate::traits::Graph;

/// Edge prices for turn-penalized movement.
///
/// Moving straight on costs `step`; moving off in a perpendicular direction
/// costs `step + turn`. A path's cost is therefore
/// `steps * step + turns * turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnCosts {
    step: i32,
    turn: i32,
}

impl TurnCosts {
    /// One point per step, a thousand per turn.
    pub const DEFAULT: Self = Self {
        step: 1,
        turn: 1000,
    };

    pub fn new(step: i32, turn: i32) -> Result<Self, Error> {
        if step <= 0 || turn < 0 {
            return Err(Error::InvalidCosts { step, turn });
        }
        Ok(Self { step, turn })
    }

    #[inline]
    pub fn step(&self) -> i32 {
        self.step
    }

    #[inline]
    pub fn turn(&self) -> i32 {
        self.turn
    }

    /// Price of the edge taken in direction `next` while facing `facing`.
    #[inline]
    pub fn edge(&self, facing: Direction, next: Direction) -> i32 {
        if facing == next {
            self.step
        } else {
            self.step + self.turn
        }
    }

    /// Most expensive single edge.
    #[inline]
    pub fn max_edge(&self) -> i32 {
        self.step + self.turn
    }
}

impl Default for TurnCosts {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters shared by every search over one graph.
///
/// `sentinel` stands in for "infinite" cost: tentative costs at or above it
/// are discarded. It must exceed every optimal cost the graph admits, which
/// depends on the graph, so there is no `Default`; use
/// [`for_graph`](Self::for_graph) or pick one and [`validate`](Self::validate) it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub costs: TurnCosts,
    pub sentinel: i32,
}

impl SearchConfig {
    pub fn new(costs: TurnCosts, sentinel: i32) -> Self {
        Self { costs, sentinel }
    }

    /// Default costs and a sentinel sized for `graph`.
    pub fn for_graph<G: Graph>(graph: &G) -> Self {
        Self::for_graph_with(graph, TurnCosts::DEFAULT)
    }

    /// A sentinel sized for `graph` under `costs`: the larger of
    /// `(width + height) * max_edge` and [`required_sentinel`].
    pub fn for_graph_with<G: Graph>(graph: &G, costs: TurnCosts) -> Self {
        let b = graph.bounds();
        let by_size = (i64::from(b.width()) + i64::from(b.height())) * i64::from(costs.max_edge());
        let by_states = i64::from(required_sentinel(graph, &costs));
        let sentinel = by_size.max(by_states).min(i64::from(i32::MAX)) as i32;
        Self { costs, sentinel }
    }

    pub fn with_costs(mut self, costs: TurnCosts) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_sentinel(mut self, sentinel: i32) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Check the sentinel against the conservative bound of
    /// [`required_sentinel`].
    ///
    /// Searches do not call this; a too-small sentinel silently hides routes.
    pub fn validate<G: Graph>(&self, graph: &G) -> Result<(), Error> {
        let required = required_sentinel(graph, &self.costs);
        if self.sentinel < required {
            return Err(Error::SentinelTooSmall {
                sentinel: self.sentinel,
                required,
            });
        }
        Ok(())
    }
}

/// Smallest sentinel guaranteed to exceed every optimal cost in `graph`.
///
/// An optimal route never repeats a `(vertex, facing)` state, so it has at
/// most `4 * V` edges, each costing at most `step + turn`.
pub fn required_sentinel<G: Graph>(graph: &G, costs: &TurnCosts) -> i32 {
    let states = 4 * graph.vertex_count() as i64;
    let bound = states * i64::from(costs.max_edge()) + 1;
    bound.min(i64::from(i32::MAX)) as i32
}
