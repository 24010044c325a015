use gridturn_core::Point;

use crate::config::TurnCosts;

/// Manhattan (L1) distance between two points, saturating at `i32::MAX`.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    let dx = (i64::from(a.x) - i64::from(b.x)).abs();
    let dy = (i64::from(a.y) - i64::from(b.y)).abs();
    (dx + dy).min(i64::from(i32::MAX)) as i32
}

/// Admissible A* estimate: every remaining step costs at least `step`.
#[inline]
pub(crate) fn estimate(from: Point, to: Point, costs: &TurnCosts) -> i32 {
    manhattan(from, to).saturating_mul(costs.step())
}
