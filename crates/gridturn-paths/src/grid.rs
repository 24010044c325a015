//! A rectangular passability map implementing [`Graph`].

use gridturn_core::{Point, Range};

use crate::distance::manhattan;
use crate::error::Error;
use crate::traits::Graph;

/// Grid graph backed by a flat passability bitmap.
///
/// Open cells are vertices; two open cells one cardinal step apart are
/// adjacent. Walls are simply absent from the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridGraph {
    bounds: Range,
    open: Vec<bool>,
    count: usize,
}

impl GridGraph {
    /// Create a graph over `bounds` with every cell walled off.
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            open: vec![false; bounds.len()],
            count: 0,
        }
    }

    /// Create a graph over `bounds`, opening the cells for which `passable`
    /// returns `true`.
    pub fn from_fn(bounds: Range, mut passable: impl FnMut(Point) -> bool) -> Self {
        let open: Vec<bool> = bounds.iter().map(&mut passable).collect();
        let count = open.iter().filter(|&&o| o).count();
        Self {
            bounds,
            open,
            count,
        }
    }

    /// Build from rows of passability flags with the origin at (0, 0).
    ///
    /// All rows must have the same length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, Error> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        for (row, r) in rows.iter().enumerate() {
            let found = r.as_ref().len();
            if found != width {
                return Err(Error::RaggedRows {
                    row,
                    expected: width,
                    found,
                });
            }
        }
        let bounds = Range::new(0, 0, width as i32, rows.len() as i32);
        Ok(Self::from_fn(bounds, |p| {
            rows[p.y as usize].as_ref()[p.x as usize]
        }))
    }

    /// Open or wall off a single cell.
    pub fn set_passable(&mut self, p: Point, passable: bool) -> Result<(), Error> {
        let i = self.bounds.index_of(p).ok_or(Error::OutOfBounds(p))?;
        if self.open[i] != passable {
            self.open[i] = passable;
            if passable {
                self.count += 1;
            } else {
                self.count -= 1;
            }
        }
        Ok(())
    }

    /// Whether `p` is inside the bounds and open.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.bounds.index_of(p).is_some_and(|i| self.open[i])
    }

    /// Number of open cells.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Graph for GridGraph {
    #[inline]
    fn contains_vertex(&self, p: Point) -> bool {
        self.is_passable(p)
    }

    #[inline]
    fn adjacent(&self, from: Point, to: Point) -> bool {
        manhattan(from, to) == 1 && self.is_passable(from) && self.is_passable(to)
    }

    fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds.iter().filter(move |&p| self.is_passable(p))
    }

    fn bounds(&self) -> Range {
        self.bounds
    }

    fn vertex_count(&self) -> usize {
        self.count
    }
}
