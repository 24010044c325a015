use std::fmt;

use gridturn_core::Point;

/// Errors raised while building graphs or validating search parameters.
///
/// Searches themselves never fail: an unreachable goal is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Rows handed to [`GridGraph::from_rows`](crate::GridGraph::from_rows)
    /// have different lengths.
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell outside the graph bounds was addressed.
    OutOfBounds(Point),
    /// The sentinel does not exceed the worst optimal cost the graph allows.
    SentinelTooSmall { sentinel: i32, required: i32 },
    /// Step cost must be positive and turn penalty non-negative.
    InvalidCosts { step: i32, turn: i32 },
    /// Two consecutive path entries are not one cardinal step apart.
    NotAStep { from: Point, to: Point },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RaggedRows {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::OutOfBounds(p) => write!(f, "cell {p} is outside the graph bounds"),
            Self::SentinelTooSmall { sentinel, required } => write!(
                f,
                "sentinel {sentinel} is too small for this graph (need at least {required})"
            ),
            Self::InvalidCosts { step, turn } => {
                write!(f, "invalid costs: step {step} must be > 0, turn {turn} must be >= 0")
            }
            Self::NotAStep { from, to } => write!(f, "{from} -> {to} is not a single step"),
        }
    }
}

impl std::error::Error for Error {}
