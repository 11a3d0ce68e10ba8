//! Rectangular byte grids.

mod error;

use core::fmt;
use core::iter;
use core::slice::ChunksExact;

use bstr::BStr;

pub use self::error::GridError;

const NL: u8 = b'\n';

/// An immutable, rectangular, row-major grid of bytes.
///
/// Every row has the same number of columns and the grid is never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    data: Vec<u8>,
    rows: usize,
    columns: usize,
}

impl Grid {
    /// Load a grid from newline-separated text.
    ///
    /// Lines may be terminated by either `\n` or `\r\n`, and trailing line
    /// terminators are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::{Grid, GridError};
    ///
    /// let grid = Grid::load(b"467..\n...*.\n")?;
    /// assert_eq!(grid.rows_len(), 2);
    /// assert_eq!(grid.columns_len(), 5);
    /// assert_eq!(grid.get(1, 3)?, b'*');
    ///
    /// assert_eq!(Grid::load(b"\n\n"), Err(GridError::Empty));
    /// assert!(matches!(Grid::load(b"..\n...\n"), Err(GridError::Ragged { row: 1, .. })));
    /// # Ok::<_, GridError>(())
    /// ```
    pub fn load(text: &[u8]) -> Result<Self, GridError> {
        let text = trim_line_endings(text);

        if text.is_empty() {
            return Err(GridError::Empty);
        }

        let mut data = Vec::with_capacity(text.len());
        let mut columns = None;
        let mut rows = 0;
        let mut start = 0;

        for end in memchr::memchr_iter(NL, text).chain(iter::once(text.len())) {
            let line = trim_line_endings(text.get(start..end).unwrap_or_default());
            start = end.saturating_add(1);

            match columns {
                None if line.is_empty() => return Err(GridError::Empty),
                None => columns = Some(line.len()),
                Some(expected) if expected != line.len() => {
                    return Err(GridError::Ragged {
                        row: rows,
                        expected,
                        actual: line.len(),
                    });
                }
                Some(_) => {}
            }

            data.extend_from_slice(line);
            rows += 1;
        }

        Ok(Self {
            data,
            rows,
            columns: columns.unwrap_or_default(),
        })
    }

    /// Get number of rows in the grid.
    #[inline]
    pub fn rows_len(&self) -> usize {
        self.rows
    }

    /// Get number of columns in the grid.
    #[inline]
    pub fn columns_len(&self) -> usize {
        self.columns
    }

    /// Get the cell at the given row and column.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Result<u8, GridError> {
        self.try_get(row, column)
            .ok_or_else(|| self.out_of_bounds(row, column))
    }

    /// Get the cell at the given row and column, or `None` if it's outside of
    /// the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::Grid;
    ///
    /// let grid = Grid::load(b"12\n34")?;
    /// assert_eq!(grid.try_get(1, 0), Some(b'3'));
    /// assert_eq!(grid.try_get(0, 2), None);
    /// assert_eq!(grid.try_get(2, 0), None);
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    #[inline]
    pub fn try_get(&self, row: usize, column: usize) -> Option<u8> {
        self.row(row)?.get(column).copied()
    }

    /// Access the specified row in the grid.
    #[inline]
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }

        let start = row.checked_mul(self.columns)?;
        self.data.get(start..start.checked_add(self.columns)?)
    }

    /// Iterate over rows in the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::Grid;
    ///
    /// let grid = Grid::load(b"ab\ncd\nef\n")?;
    /// assert!(grid.rows().eq([&b"ab"[..], &b"cd"[..], &b"ef"[..]]));
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    #[inline]
    pub fn rows(&self) -> ChunksExact<'_, u8> {
        self.data.chunks_exact(self.columns.max(1))
    }

    /// Iterate over every cell with its coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows()
            .enumerate()
            .flat_map(|(row, cells)| cells.iter().enumerate().map(move |(c, b)| (row, c, *b)))
    }

    pub(crate) fn out_of_bounds(&self, row: usize, column: usize) -> GridError {
        GridError::OutOfBounds {
            row,
            column,
            rows: self.rows,
            columns: self.columns,
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rows().map(BStr::new))
            .finish()
    }
}

fn trim_line_endings(mut data: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r'] = data {
        data = rest;
    }

    data
}
