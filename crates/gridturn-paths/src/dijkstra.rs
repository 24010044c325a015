use std::collections::BinaryHeap;

use gridturn_core::{Direction, Point};

use crate::config::SearchConfig;
use crate::search::{Cells, NO_PARENT, NodeRef, TurnSearch, UNREACHABLE};
use crate::traits::Graph;

/// Per-state costs produced by [`TurnSearch::cost_map`] and
/// [`TurnSearch::reverse_cost_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCosts {
    cells: Cells,
    costs: Vec<i32>,
}

impl StateCosts {
    fn new(cells: Cells) -> Self {
        Self {
            costs: vec![UNREACHABLE; cells.len() * 4],
            cells,
        }
    }

    /// Cost recorded for the state `(p, facing)`, or [`UNREACHABLE`].
    pub fn at(&self, p: Point, facing: Direction) -> i32 {
        match self.cells.index_of(p) {
            Some(i) => self.costs[i * 4 + facing.index()],
            None => UNREACHABLE,
        }
    }

    /// Cheapest cost over the four facings at `p`.
    pub fn best_at(&self, p: Point) -> i32 {
        Direction::ALL
            .iter()
            .map(|&d| self.at(p, d))
            .min()
            .unwrap_or(UNREACHABLE)
    }

    /// Every reached state with its cost, in row-major cell order.
    pub fn reached(&self) -> impl Iterator<Item = (Point, Direction, i32)> + '_ {
        self.costs
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != UNREACHABLE)
            .map(|(i, &c)| (self.cells.point_at(i / 4), Direction::ALL[i % 4], c))
    }
}

impl TurnSearch {
    /// Multi-source Dijkstra over `(cell, facing)` states.
    ///
    /// Every source state starts at cost 0. The result holds the cheapest
    /// cost of *arriving* in each state; costs at or above the sentinel are
    /// left unreached.
    pub fn cost_map<G: Graph>(
        &mut self,
        graph: &G,
        sources: &[(Point, Direction)],
        config: &SearchConfig,
    ) -> StateCosts {
        self.sweep(graph, sources, config, false)
    }

    /// Cost-to-go from every state to any cell in `targets`.
    ///
    /// Runs Dijkstra over reversed transitions seeded with every facing at
    /// every target, so `at(p, d)` is the cheapest cost of finishing when
    /// standing on `p` facing `d`.
    pub fn reverse_cost_map<G: Graph>(
        &mut self,
        graph: &G,
        targets: &[Point],
        config: &SearchConfig,
    ) -> StateCosts {
        let seeds: Vec<(Point, Direction)> = targets
            .iter()
            .flat_map(|&t| Direction::ALL.map(|d| (t, d)))
            .collect();
        self.sweep(graph, &seeds, config, true)
    }

    fn sweep<G: Graph>(
        &mut self,
        graph: &G,
        seeds: &[(Point, Direction)],
        config: &SearchConfig,
        reversed: bool,
    ) -> StateCosts {
        let mut out = StateCosts::new(self.cells.clone());
        let costs = config.costs;
        let cur_gen = self.next_generation();

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut uncovered = 0usize;

        // Seed sources.
        for &(p, d) in seeds {
            if !graph.contains_vertex(p) {
                continue;
            }
            let Some(si) = self.state(p, d) else {
                continue;
            };
            let n = &mut self.nodes[si];
            n.g = 0;
            n.f = 0;
            n.parent = NO_PARENT;
            n.generation = cur_gen;
            n.open = true;
            let seq = self.next_seq();
            open.push(NodeRef {
                idx: si,
                f: 0,
                g: 0,
                seq,
            });
        }

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.nodes[ci];
            if cn.generation != cur_gen || !cn.open || cn.g != current.g {
                continue;
            }
            let current_g = cn.g;
            self.nodes[ci].open = false;
            out.costs[ci] = current_g;

            let (cp, facing) = self.unstate(ci);

            // Forward: (cp, facing) -> (cp + next, next).
            // Reversed: (cp - facing, prev) -> (cp, facing) for every prev
            // that may continue into `facing`; that set is the same three
            // directions as `facing.continuations()`.
            for other in facing.continuations() {
                let (np, nd, edge) = if reversed {
                    (cp.checked_step(facing.reverse()), other, costs.edge(other, facing))
                } else {
                    (cp.checked_step(other), other, costs.edge(facing, other))
                };
                let Some(np) = np else {
                    continue;
                };
                if !graph.adjacent(cp, np) {
                    continue;
                }
                let Some(ni) = self.state(np, nd) else {
                    uncovered += 1;
                    continue;
                };
                let tentative = current_g.saturating_add(edge);
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

                n.g = tentative;
                n.f = tentative;
                n.parent = ci;
                n.open = true;
                let seq = self.next_seq();
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                    g: tentative,
                    seq,
                });
            }
        }

        if uncovered > 0 {
            log::warn!("cost map skipped {uncovered} edges to vertices outside the search tables");
        }
        log::debug!(
            "{} cost map from {} seeds: {} states reached",
            if reversed { "reverse" } else { "forward" },
            seeds.len(),
            out.reached().count()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridGraph;
    use gridturn_core::Range;
    use std::collections::HashSet;

    fn open_grid(w: i32, h: i32) -> GridGraph {
        GridGraph::from_fn(Range::new(0, 0, w, h), |_| true)
    }

    #[test]
    fn forward_map_matches_single_queries() {
        let g = open_grid(4, 3);
        let cfg = SearchConfig::for_graph(&g);
        let start = (Point::new(0, 2), Direction::Right);
        let mut ts = TurnSearch::for_graph(&g);
        let map = ts.cost_map(&g, &[start], &cfg);

        assert_eq!(map.at(start.0, start.1), 0);
        for p in g.bounds() {
            let single = ts
                .find_route(&g, start.0, p, start.1, &cfg)
                .map_or(UNREACHABLE, |r| r.cost);
            assert_eq!(map.best_at(p), single, "at {p}");
        }
    }

    #[test]
    fn reverse_map_is_cost_to_go() {
        let g = open_grid(3, 3);
        let cfg = SearchConfig::for_graph(&g);
        let end = Point::new(2, 0);
        let mut ts = TurnSearch::for_graph(&g);
        let back = ts.reverse_cost_map(&g, &[end], &cfg);

        for d in Direction::ALL {
            assert_eq!(back.at(end, d), 0);
        }
        for p in g.bounds() {
            for d in Direction::ALL {
                let single = ts
                    .find_route(&g, p, end, d, &cfg)
                    .map_or(UNREACHABLE, |r| r.cost);
                assert_eq!(back.at(p, d), single, "at {p} facing {d}");
            }
        }
    }

    #[test]
    fn walls_and_outside_cells_stay_unreached() {
        let g = GridGraph::from_rows(&[[true, false, true]]).unwrap();
        let cfg = SearchConfig::for_graph(&g);
        let mut ts = TurnSearch::for_graph(&g);
        let map = ts.cost_map(&g, &[(Point::new(0, 0), Direction::Right)], &cfg);
        assert_eq!(map.best_at(Point::new(1, 0)), UNREACHABLE);
        assert_eq!(map.best_at(Point::new(2, 0)), UNREACHABLE);
        assert_eq!(map.best_at(Point::new(9, 9)), UNREACHABLE);
        let reached: Vec<_> = map.reached().collect();
        assert_eq!(reached, vec![(Point::new(0, 0), Direction::Right, 0)]);
    }

    #[test]
    fn sparse_maps_cover_far_apart_vertices() {
        let far = Point::new(-70_000, 90_000);
        let g: HashSet<Point> = [Point::new(0, 0), Point::new(0, 1), far].into_iter().collect();
        let cfg = SearchConfig::for_graph(&g);
        let mut ts = TurnSearch::for_graph(&g);
        let map = ts.cost_map(&g, &[(Point::new(0, 0), Direction::Down)], &cfg);
        assert_eq!(map.at(Point::new(0, 1), Direction::Down), 1);
        assert_eq!(map.best_at(far), UNREACHABLE);
        let back = ts.reverse_cost_map(&g, &[far], &cfg);
        assert_eq!(back.best_at(far), 0);
        assert_eq!(back.best_at(Point::new(0, 0)), UNREACHABLE);
    }
}
