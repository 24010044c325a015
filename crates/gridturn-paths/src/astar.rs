use std::collections::BinaryHeap;

use gridturn_core::{Direction, Point};

use crate::config::SearchConfig;
use crate::distance::estimate;
use crate::search::{Goal, NO_PARENT, NodeRef, Route, TurnSearch};
use crate::traits::Graph;

impl TurnSearch {
    /// Cheapest route from `start`, initially facing `initial`, to `end`
    /// arriving in any facing.
    ///
    /// Returns `None` if `end` cannot be reached for less than the sentinel,
    /// or if either endpoint is not a vertex. When `start == end` the route
    /// is the single cell with cost 0.
    pub fn find_route<G: Graph>(
        &mut self,
        graph: &G,
        start: Point,
        end: Point,
        initial: Direction,
        config: &SearchConfig,
    ) -> Option<Route> {
        self.astar(graph, start, initial, Goal::Vertex(end), config)
    }

    /// Cheapest route from `(start, initial)` that arrives at `end` facing
    /// exactly `arrival`.
    pub fn find_route_to_state<G: Graph>(
        &mut self,
        graph: &G,
        start: Point,
        initial: Direction,
        end: Point,
        arrival: Direction,
        config: &SearchConfig,
    ) -> Option<Route> {
        self.astar(graph, start, initial, Goal::State(end, arrival), config)
    }

    fn astar<G: Graph>(
        &mut self,
        graph: &G,
        start: Point,
        initial: Direction,
        goal: Goal,
        config: &SearchConfig,
    ) -> Option<Route> {
        let to = goal.point();
        if !graph.contains_vertex(start) || !graph.contains_vertex(to) {
            log::trace!("turn search: endpoint {start} or {to} is not a vertex");
            return None;
        }
        let Some(start_idx) = self.state(start, initial) else {
            log::warn!("turn search: start {start} is outside the search tables");
            return None;
        };
        let costs = config.costs;

        let cur_gen = self.next_generation();
        let h = estimate(start, to, &costs);
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = h;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let seq = self.next_seq();
        open.push(NodeRef {
            idx: start_idx,
            f: h,
            g: 0,
            seq,
        });

        let mut expanded = 0usize;
        let mut uncovered = 0usize;
        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search None;
            };

            let ci = current.idx;

            // Skip stale entries.
            {
                let n = &self.nodes[ci];
                if n.generation != cur_gen || !n.open || n.g != current.g {
                    continue;
                }
            }

            let (cp, facing) = self.unstate(ci);
            if goal.reached(cp, facing) {
                break 'search Some(ci);
            }

            self.nodes[ci].open = false;
            expanded += 1;
            let current_g = current.g;

            for next in facing.continuations() {
                let Some(np) = cp.checked_step(next) else {
                    continue;
                };
                if !graph.adjacent(cp, np) {
                    continue;
                }
                let Some(ni) = self.state(np, next) else {
                    uncovered += 1;
                    continue;
                };
                let tentative = current_g.saturating_add(costs.edge(facing, next));
                if tentative >= config.sentinel {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                let f = tentative.saturating_add(estimate(np, to, &costs));
                n.g = tentative;
                n.f = f;
                n.parent = ci;
                n.open = true;

                let seq = self.next_seq();
                open.push(NodeRef {
                    idx: ni,
                    f,
                    g: tentative,
                    seq,
                });
            }
        };

        if uncovered > 0 {
            log::warn!(
                "turn search {start} -> {to}: skipped {uncovered} edges to vertices outside the \
                 search tables"
            );
        }

        let Some(goal_idx) = found else {
            log::trace!("turn search {start} -> {to}: unreachable after {expanded} expansions");
            return None;
        };

        let cost = self.nodes[goal_idx].g;
        let (_, facing) = self.unstate(goal_idx);
        log::trace!("turn search {start} -> {to}: cost {cost}, {expanded} expansions");
        Some(Route {
            path: self.reconstruct(goal_idx),
            cost,
            facing,
        })
    }
}

/// Cheapest route from `start` (facing `initial`) to `end`.
///
/// Convenience wrapper allocating a fresh [`TurnSearch`] for one query.
pub fn find_path<G: Graph>(
    graph: &G,
    start: Point,
    end: Point,
    initial: Direction,
    config: &SearchConfig,
) -> Option<Route> {
    TurnSearch::for_graph(graph).find_route(graph, start, end, initial, config)
}
