//! ASCII maze fixtures shared by the integration tests.

#![allow(dead_code)]

use gridturn_core::{Point, Range};
use gridturn_paths::GridGraph;

pub const MAZE_15: &str = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############";

pub const MAZE_17: &str = "\
#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################";

pub struct Maze {
    pub graph: GridGraph,
    pub start: Point,
    pub end: Point,
}

/// `#` is wall, anything else is open; `S` and `E` mark the endpoints.
pub fn maze(text: &str) -> Maze {
    let lines: Vec<&str> = text.lines().collect();
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as i32;
    let bounds = Range::new(0, 0, width, lines.len() as i32);
    let at = |p: Point| {
        lines
            .get(p.y as usize)
            .and_then(|l| l.as_bytes().get(p.x as usize))
            .copied()
            .unwrap_or(b'#')
    };
    let find = |c: u8| bounds.iter().find(|&p| at(p) == c).expect("marker");
    Maze {
        graph: GridGraph::from_fn(bounds, |p| at(p) != b'#'),
        start: find(b'S'),
        end: find(b'E'),
    }
}
