//! Turn-penalized routing on 4-connected grids.
//!
//! Moving straight on costs one step; moving off in a new direction costs a
//! step plus a turn penalty. This crate answers two questions over any
//! [`Graph`]:
//!
//! - **Cheapest route** from a start cell and facing to a goal cell
//!   ([`find_path`], [`TurnSearch::find_route`]), via A* over
//!   `(cell, facing)` states.
//! - **Optimal tiles**: every cell lying on *some* cheapest route
//!   ([`optimal_vertices`], [`OptimalTiles::find`]).
//!
//! Supporting pieces: [`evaluate`] re-scores a known path, and
//! [`TurnSearch::cost_map`] / [`TurnSearch::reverse_cost_map`] produce
//! whole-graph Dijkstra cost tables.
//!
//! # Example
//!
//! ```
//! use gridturn_core::{Direction, Point, Range};
//! use gridturn_paths::{GridGraph, SearchConfig, evaluate, find_path};
//!
//! // An L-shaped corridor.
//! let g = GridGraph::from_fn(Range::new(0, 0, 4, 4), |p| p.y == 3 || p.x == 3);
//! let cfg = SearchConfig::for_graph(&g);
//! let route = find_path(&g, Point::new(0, 3), Point::new(3, 0), Direction::Right, &cfg).unwrap();
//! assert_eq!(route.cost, 6 + 1000);
//! assert_eq!(evaluate(&route.path, Direction::Right), route.cost);
//! ```

mod astar;
mod config;
mod dijkstra;
mod distance;
mod error;
mod evaluate;
mod grid;
mod search;
mod tiles;
mod traits;

pub use astar::find_path;
pub use config::{SearchConfig, TurnCosts, required_sentinel};
pub use dijkstra::StateCosts;
pub use distance::manhattan;
pub use error::Error;
pub use evaluate::{Moves, count_moves, evaluate, evaluate_with, try_evaluate, walk};
pub use grid::GridGraph;
pub use search::{Route, TurnSearch, UNREACHABLE};
pub use tiles::{OptimalTiles, OptimalTilesConfig, Strategy, optimal_vertices};
pub use traits::Graph;
