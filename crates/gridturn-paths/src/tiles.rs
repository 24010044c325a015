//! Cells lying on at least one minimum-cost route.
//!
//! A cell `v` belongs to some optimal route exactly when, for some facing
//! `d`, the cheapest way to arrive at `v` facing `d` plus the cheapest way
//! to finish from there equals the global optimum. Turn prices only depend
//! on the facing entering each edge, so the two legs are independent once
//! the boundary facing is fixed.

use std::collections::HashSet;

use dashmap::DashMap;
use rayon::prelude::*;

use gridturn_core::{Direction, Point};

use crate::config::{SearchConfig, TurnCosts};
use crate::evaluate::walk;
use crate::search::{Cells, Route, TurnSearch, UNREACHABLE};
use crate::traits::Graph;

/// How the two legs for every cell are obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Two whole-graph cost maps: forward from the start, reversed from the
    /// end.
    #[default]
    Sweep,
    /// Independent A* queries per cell and facing, spread over the rayon
    /// pool.
    PerVertex,
}

/// Options for [`OptimalTiles::find`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimalTilesConfig {
    pub strategy: Strategy,
    /// With [`Strategy::PerVertex`], share leg costs discovered along each
    /// computed route between workers.
    pub memoize: bool,
}

impl OptimalTilesConfig {
    pub fn per_vertex(memoize: bool) -> Self {
        Self {
            strategy: Strategy::PerVertex,
            memoize,
        }
    }
}

/// Result of an optimal-tiles query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalTiles {
    /// Cost of the best route from start to end.
    pub cost: i32,
    /// One route achieving `cost`.
    pub route: Route,
    /// Every cell on some route of cost `cost`.
    pub vertices: HashSet<Point>,
}

impl OptimalTiles {
    /// Find every cell on a cheapest route from `start` (facing `initial`)
    /// to `end`. `None` when `end` is unreachable.
    pub fn find<G: Graph + Sync>(
        graph: &G,
        start: Point,
        end: Point,
        initial: Direction,
        search: &SearchConfig,
        config: &OptimalTilesConfig,
    ) -> Option<Self> {
        let mut ts = TurnSearch::for_graph(graph);
        let route = ts.find_route(graph, start, end, initial, search)?;
        let cost = route.cost;

        let vertices = match config.strategy {
            Strategy::Sweep => sweep(&mut ts, graph, start, end, initial, search, cost),
            Strategy::PerVertex => {
                let memo = config.memoize.then(LegMemo::default);
                let query = Query {
                    graph,
                    start,
                    end,
                    initial,
                    config: search,
                    memo: memo.as_ref(),
                };
                per_vertex(&query, &ts.cells, cost)
            }
        };

        log::debug!(
            "optimal tiles {start} -> {end}: cost {cost}, {} of {} cells ({:?})",
            vertices.len(),
            graph.vertex_count(),
            config.strategy
        );
        Some(Self {
            cost,
            route,
            vertices,
        })
    }

    /// The cells in row-major order.
    pub fn sorted(&self) -> Vec<Point> {
        let mut v: Vec<Point> = self.vertices.iter().copied().collect();
        v.sort();
        v
    }
}

/// Every cell on a cheapest route, using the default [`Strategy`].
///
/// Empty when `end` is unreachable.
pub fn optimal_vertices<G: Graph + Sync>(
    graph: &G,
    start: Point,
    end: Point,
    initial: Direction,
    config: &SearchConfig,
) -> HashSet<Point> {
    OptimalTiles::find(graph, start, end, initial, config, &OptimalTilesConfig::default())
        .map(|t| t.vertices)
        .unwrap_or_default()
}

/// Whether leg costs `from + to` put a cell on an optimal route.
fn on_optimum(from: i32, to: i32, optimum: i32, v: Point, facing: Direction) -> bool {
    if from == UNREACHABLE || to == UNREACHABLE {
        return false;
    }
    let total = from.saturating_add(to);
    if total < optimum {
        log::warn!(
            "legs through {v} facing {facing} cost {total}, below optimum {optimum}; \
             is the sentinel large enough?"
        );
    }
    total == optimum
}

fn sweep<G: Graph + Sync>(
    ts: &mut TurnSearch,
    graph: &G,
    start: Point,
    end: Point,
    initial: Direction,
    config: &SearchConfig,
    optimum: i32,
) -> HashSet<Point> {
    let forward = ts.cost_map(graph, &[(start, initial)], config);
    let backward = ts.reverse_cost_map(graph, &[end], config);
    let vertices: Vec<Point> = graph.vertices().collect();
    vertices
        .into_par_iter()
        .filter(|&v| {
            Direction::ALL
                .iter()
                .any(|&d| on_optimum(forward.at(v, d), backward.at(v, d), optimum, v, d))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-vertex decomposition
// ---------------------------------------------------------------------------

type Leg = Option<i32>;

/// Leg costs shared between workers, keyed by state.
///
/// Entries are only ever inserted if absent and every value is a pure
/// function of the query, so a lost race just repeats a search.
#[derive(Default)]
struct LegMemo {
    from_start: DashMap<(Point, Direction), Leg>,
    to_end: DashMap<(Point, Direction), Leg>,
}

impl LegMemo {
    /// Record every prefix of `route` (which starts at the query start) as
    /// an optimal arrival cost.
    fn record_prefixes(&self, route: &Route, initial: Direction, costs: &TurnCosts) {
        for (p, d, c) in walk(&route.path, initial, costs) {
            self.from_start.entry((p, d)).or_insert(Some(c));
        }
    }

    /// Record every suffix of `route` (which ends at the query end) as an
    /// optimal cost-to-go.
    fn record_suffixes(&self, route: &Route, facing: Direction, costs: &TurnCosts) {
        for (p, d, c) in walk(&route.path, facing, costs) {
            self.to_end.entry((p, d)).or_insert(Some(route.cost - c));
        }
    }
}

struct Query<'a, G> {
    graph: &'a G,
    start: Point,
    end: Point,
    initial: Direction,
    config: &'a SearchConfig,
    memo: Option<&'a LegMemo>,
}

impl<G: Graph> Query<'_, G> {
    fn from_start(&self, ts: &mut TurnSearch, v: Point, d: Direction) -> Leg {
        if let Some(memo) = self.memo {
            if let Some(hit) = memo.from_start.get(&(v, d)) {
                return *hit;
            }
        }
        let route = ts.find_route_to_state(self.graph, self.start, self.initial, v, d, self.config);
        if let Some(memo) = self.memo {
            match &route {
                Some(r) => memo.record_prefixes(r, self.initial, &self.config.costs),
                None => {
                    memo.from_start.entry((v, d)).or_insert(None);
                }
            }
        }
        route.map(|r| r.cost)
    }

    fn to_end(&self, ts: &mut TurnSearch, v: Point, d: Direction) -> Leg {
        if let Some(memo) = self.memo {
            if let Some(hit) = memo.to_end.get(&(v, d)) {
                return *hit;
            }
        }
        let route = ts.find_route(self.graph, v, self.end, d, self.config);
        if let Some(memo) = self.memo {
            match &route {
                Some(r) => memo.record_suffixes(r, d, &self.config.costs),
                None => {
                    memo.to_end.entry((v, d)).or_insert(None);
                }
            }
        }
        route.map(|r| r.cost)
    }

    fn on_optimal_route(&self, ts: &mut TurnSearch, v: Point, optimum: i32) -> bool {
        Direction::ALL.iter().any(|&d| {
            let Some(from) = self.from_start(ts, v, d) else {
                return false;
            };
            let Some(to) = self.to_end(ts, v, d) else {
                return false;
            };
            on_optimum(from, to, optimum, v, d)
        })
    }
}

fn per_vertex<G: Graph + Sync>(
    query: &Query<'_, G>,
    cells: &Cells,
    optimum: i32,
) -> HashSet<Point> {
    let vertices: Vec<Point> = query.graph.vertices().collect();
    vertices
        .into_par_iter()
        .map_init(
            || TurnSearch::with_cells(cells.clone()),
            |ts, v| query.on_optimal_route(ts, v, optimum).then_some(v),
        )
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridGraph;
    use gridturn_core::Range;

    const ALL_CONFIGS: [OptimalTilesConfig; 3] = [
        OptimalTilesConfig {
            strategy: Strategy::Sweep,
            memoize: false,
        },
        OptimalTilesConfig {
            strategy: Strategy::PerVertex,
            memoize: false,
        },
        OptimalTilesConfig {
            strategy: Strategy::PerVertex,
            memoize: true,
        },
    ];

    fn find_all<G: Graph + Sync>(
        g: &G,
        start: Point,
        end: Point,
        initial: Direction,
    ) -> Vec<Option<Vec<Point>>> {
        let cfg = SearchConfig::for_graph(g);
        ALL_CONFIGS
            .iter()
            .map(|c| OptimalTiles::find(g, start, end, initial, &cfg, c).map(|t| t.sorted()))
            .collect()
    }

    #[test]
    fn open_square_has_two_optimal_l_routes() {
        // Facing right in a 3x3 room from bottom-left to top-right: go right
        // then up, or (turning first) up then right -- only the first is
        // optimal, since the second pays an extra turn.
        let g = GridGraph::from_fn(Range::new(0, 0, 3, 3), |_| true);
        for tiles in find_all(&g, Point::new(0, 2), Point::new(2, 0), Direction::Right) {
            assert_eq!(
                tiles.unwrap(),
                vec![
                    Point::new(2, 0),
                    Point::new(2, 1),
                    Point::new(0, 2),
                    Point::new(1, 2),
                    Point::new(2, 2),
                ]
            );
        }
    }

    fn ring() -> GridGraph {
        GridGraph::from_rows(&[
            [true, true, true],
            [true, false, true],
            [true, true, true],
        ])
        .unwrap()
    }

    #[test]
    fn initial_facing_picks_the_branch() {
        let g = ring();
        let (start, end) = (Point::new(0, 2), Point::new(2, 0));
        for tiles in find_all(&g, start, end, Direction::Up) {
            let tiles = tiles.unwrap();
            assert_eq!(tiles.len(), 5, "{tiles:?}");
            assert!(tiles.contains(&Point::new(0, 0)));
            assert!(!tiles.contains(&Point::new(2, 2)));
        }
        // Facing down, the only legal first move is to the right.
        for tiles in find_all(&g, start, end, Direction::Down) {
            let tiles = tiles.unwrap();
            assert_eq!(tiles.len(), 5, "{tiles:?}");
            assert!(tiles.contains(&Point::new(2, 2)));
            assert!(!tiles.contains(&Point::new(0, 0)));
        }
    }

    #[test]
    fn ties_include_every_branch() {
        // Bottom middle facing the wall: left and right around the ring
        // both cost three turns.
        let g = ring();
        for tiles in find_all(&g, Point::new(1, 2), Point::new(1, 0), Direction::Up) {
            assert_eq!(tiles.unwrap().len(), 8);
        }
    }

    #[test]
    fn unreachable_end_yields_nothing() {
        let g = GridGraph::from_rows(&[[true, false, true]]).unwrap();
        for tiles in find_all(&g, Point::new(0, 0), Point::new(2, 0), Direction::Right) {
            assert_eq!(tiles, None);
        }
        let cfg = SearchConfig::for_graph(&g);
        let (start, end) = (Point::new(0, 0), Point::new(2, 0));
        assert!(optimal_vertices(&g, start, end, Direction::Right, &cfg).is_empty());
    }

    #[test]
    fn start_equals_end() {
        let g = GridGraph::from_fn(Range::new(0, 0, 2, 2), |_| true);
        let p = Point::new(1, 1);
        for tiles in find_all(&g, p, p, Direction::Left) {
            assert_eq!(tiles.unwrap(), vec![p]);
        }
    }

    #[test]
    fn sparse_vertex_sets_are_searched_per_vertex() {
        // A short corridor plus an island far away.
        let far = Point::new(60_000, 60_000);
        let mut g: HashSet<Point> = (0..4).map(|x| Point::new(x, 0)).collect();
        g.insert(far);
        for tiles in find_all(&g, Point::new(0, 0), Point::new(3, 0), Direction::Right) {
            assert_eq!(tiles.unwrap().len(), 4);
        }
        for tiles in find_all(&g, Point::new(0, 0), far, Direction::Right) {
            assert_eq!(tiles, None);
        }
        let cfg = SearchConfig::for_graph(&g);
        assert!(optimal_vertices(&g, Point::new(0, 0), far, Direction::Right, &cfg).is_empty());
    }

    #[test]
    fn vertices_on_the_coordinate_edge() {
        let g: HashSet<Point> = (0..3).map(|i| Point::new(i32::MAX - i, 0)).collect();
        let (lo, hi) = (Point::new(i32::MAX - 2, 0), Point::new(i32::MAX, 0));
        for tiles in find_all(&g, lo, hi, Direction::Right) {
            assert_eq!(tiles.unwrap(), vec![lo, Point::new(i32::MAX - 1, 0), hi]);
        }
    }
}
