//! Randomised checks against a naive fixed-point relaxation over
//! `(cell, facing)` states.

use std::collections::HashSet;

use gridturn_core::{Direction, Point, Range};
use gridturn_paths::{
    Graph, GridGraph, OptimalTiles, OptimalTilesConfig, SearchConfig, TurnCosts, evaluate,
    find_path, manhattan,
};
use proptest::prelude::*;

const INF: i32 = i32::MAX;

struct Case {
    graph: GridGraph,
    start: Point,
    end: Point,
    initial: Direction,
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = self.graph.bounds();
        writeln!(f, "start {} end {} facing {}", self.start, self.end, self.initial)?;
        for y in b.min.y..b.max.y {
            for x in b.min.x..b.max.x {
                let p = Point::new(x, y);
                let c = if p == self.start {
                    'S'
                } else if p == self.end {
                    'E'
                } else if self.graph.is_passable(p) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn case() -> impl Strategy<Value = Case> {
    (2..7i32, 2..7i32)
        .prop_flat_map(|(w, h)| {
            let n = (w * h) as usize;
            (
                Just((w, h)),
                prop::collection::vec(prop::bool::weighted(0.7), n),
                0..n,
                0..n,
                0..4usize,
            )
        })
        .prop_map(|((w, h), cells, s, e, d)| {
            let rng = Range::new(0, 0, w, h);
            let start = rng.point_at(s);
            let end = rng.point_at(e);
            let graph = GridGraph::from_fn(rng, |p| {
                p == start || p == end || rng.index_of(p).is_some_and(|i| cells[i])
            });
            Case {
                graph,
                start,
                end,
                initial: Direction::ALL[d],
            }
        })
}

fn slot(rng: Range, p: Point, d: Direction) -> usize {
    rng.index_of(p).unwrap() * 4 + d.index()
}

/// Cheapest arrival cost at every state, by relaxing until nothing changes.
fn forward_reference(c: &Case) -> Vec<i32> {
    let rng = c.graph.bounds();
    let costs = TurnCosts::DEFAULT;
    let mut dist = vec![INF; rng.len() * 4];
    dist[slot(rng, c.start, c.initial)] = 0;
    let mut changed = true;
    while changed {
        changed = false;
        for p in rng.iter().filter(|&p| c.graph.is_passable(p)) {
            for f in Direction::ALL {
                let here = dist[slot(rng, p, f)];
                if here == INF {
                    continue;
                }
                for d in f.continuations() {
                    let q = p.step(d);
                    if !c.graph.is_passable(q) {
                        continue;
                    }
                    let cand = here + costs.edge(f, d);
                    let there = &mut dist[slot(rng, q, d)];
                    if cand < *there {
                        *there = cand;
                        changed = true;
                    }
                }
            }
        }
    }
    dist
}

/// Cheapest cost to finish at `end` from every state.
fn backward_reference(c: &Case) -> Vec<i32> {
    let rng = c.graph.bounds();
    let costs = TurnCosts::DEFAULT;
    let mut dist = vec![INF; rng.len() * 4];
    for f in Direction::ALL {
        dist[slot(rng, c.end, f)] = 0;
    }
    let mut changed = true;
    while changed {
        changed = false;
        for p in rng.iter().filter(|&p| c.graph.is_passable(p) && p != c.end) {
            for f in Direction::ALL {
                let mut cand = INF;
                for d in f.continuations() {
                    let q = p.step(d);
                    if !c.graph.is_passable(q) {
                        continue;
                    }
                    let rest = dist[slot(rng, q, d)];
                    if rest != INF {
                        cand = cand.min(rest + costs.edge(f, d));
                    }
                }
                let here = &mut dist[slot(rng, p, f)];
                if cand < *here {
                    *here = cand;
                    changed = true;
                }
            }
        }
    }
    dist
}

fn reference_optimum(c: &Case, forward: &[i32]) -> Option<i32> {
    let rng = c.graph.bounds();
    Direction::ALL
        .iter()
        .map(|&d| forward[slot(rng, c.end, d)])
        .filter(|&v| v != INF)
        .min()
}

fn reference_tiles(c: &Case) -> HashSet<Point> {
    let rng = c.graph.bounds();
    let forward = forward_reference(c);
    let backward = backward_reference(c);
    let Some(opt) = reference_optimum(c, &forward) else {
        return HashSet::new();
    };
    rng.iter()
        .filter(|&p| c.graph.is_passable(p))
        .filter(|&p| {
            Direction::ALL.iter().any(|&d| {
                let (a, b) = (forward[slot(rng, p, d)], backward[slot(rng, p, d)]);
                a != INF && b != INF && a + b == opt
            })
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn search_matches_relaxation(c in case()) {
        let cfg = SearchConfig::for_graph(&c.graph);
        prop_assert!(cfg.validate(&c.graph).is_ok());
        let expected = reference_optimum(&c, &forward_reference(&c));
        let route = find_path(&c.graph, c.start, c.end, c.initial, &cfg);
        prop_assert_eq!(route.as_ref().map(|r| r.cost), expected, "{:?}", c);

        if let Some(r) = route {
            prop_assert_eq!(r.start(), Some(c.start));
            prop_assert_eq!(r.end(), Some(c.end));
            prop_assert_eq!(evaluate(&r.path, c.initial), r.cost);
            prop_assert!(r.steps() as i32 >= manhattan(c.start, c.end));
            for w in r.path.windows(2) {
                prop_assert!(c.graph.adjacent(w[0], w[1]));
            }
        }
    }

    #[test]
    fn optimal_tiles_match_relaxation(c in case()) {
        let cfg = SearchConfig::for_graph(&c.graph);
        let expected = reference_tiles(&c);
        for tc in [
            OptimalTilesConfig::default(),
            OptimalTilesConfig::per_vertex(false),
            OptimalTilesConfig::per_vertex(true),
        ] {
            let found = OptimalTiles::find(&c.graph, c.start, c.end, c.initial, &cfg, &tc)
                .map(|t| t.vertices)
                .unwrap_or_default();
            prop_assert_eq!(&found, &expected, "{:?} {:?}", tc, c);
        }
    }
}
