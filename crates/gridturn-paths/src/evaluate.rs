//! Scoring of already-known paths.

use gridturn_core::{Direction, Point};

use crate::config::TurnCosts;
use crate::error::Error;

/// Step and turn counts of a walked path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Moves {
    pub steps: i32,
    pub turns: i32,
}

impl Moves {
    pub fn cost(&self, costs: &TurnCosts) -> i32 {
        self.steps * costs.step() + self.turns * costs.turn()
    }
}

/// Count steps and turns along `path`, starting out facing `initial`.
///
/// Every consecutive pair is one step; a pair whose direction differs from
/// the previous one (the first pair is compared with `initial`) is also a
/// turn. Pairs that are not a single cardinal step have no direction and
/// always count as a turn.
pub fn count_moves(path: &[Point], initial: Direction) -> Moves {
    let mut moves = Moves::default();
    let mut last = Some(initial);
    for w in path.windows(2) {
        let dir = Direction::between(w[0], w[1]);
        if dir != last {
            moves.turns += 1;
        }
        moves.steps += 1;
        last = dir;
    }
    moves
}

/// Cost of `path` under the default prices (1 per step, 1000 per turn).
///
/// Empty and single-cell paths cost 0, so callers must not use this to tell
/// "unreachable" apart from "already there"; searches return `Option` for
/// that.
pub fn evaluate(path: &[Point], initial: Direction) -> i32 {
    evaluate_with(path, initial, &TurnCosts::DEFAULT)
}

/// Cost of `path` under `costs`.
pub fn evaluate_with(path: &[Point], initial: Direction, costs: &TurnCosts) -> i32 {
    count_moves(path, initial).cost(costs)
}

/// Like [`evaluate_with`], but rejects paths containing a pair of cells that
/// are not one cardinal step apart.
pub fn try_evaluate(path: &[Point], initial: Direction, costs: &TurnCosts) -> Result<i32, Error> {
    if let Some(w) = path
        .windows(2)
        .find(|w| Direction::between(w[0], w[1]).is_none())
    {
        return Err(Error::NotAStep {
            from: w[0],
            to: w[1],
        });
    }
    Ok(evaluate_with(path, initial, costs))
}

/// Walk `path` and yield every visited state with the cost accumulated on
/// arrival: `(cell, facing, cost_so_far)`.
///
/// The first entry is `(path[0], initial, 0)`.
pub fn walk<'a>(
    path: &'a [Point],
    initial: Direction,
    costs: &'a TurnCosts,
) -> impl Iterator<Item = (Point, Direction, i32)> + 'a {
    let mut state = path.first().map(|&p| (p, initial, 0));
    let mut rest = path.iter().skip(1);
    std::iter::from_fn(move || {
        let current = state?;
        state = rest.next().map(|&next| {
            let (p, facing, cost) = current;
            let dir = Direction::between(p, next).unwrap_or(facing.reverse());
            (next, dir, cost + costs.edge(facing, dir))
        });
        Some(current)
    })
}
