use core::fmt;

use crate::grid::{Grid, GridError};

use super::MAX_DIGITS;

/// A maximal horizontal run of digits in one row of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    row: usize,
    start: usize,
    end: usize,
    value: u64,
}

impl Span {
    /// Derive the span which covers the given cell.
    ///
    /// The cell may be any digit of the span, the full extent is recovered by
    /// scanning the whole row to the left and to the right of it. Returns
    /// `None` if the cell is not a digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::Grid;
    /// use lib::schematic::Span;
    ///
    /// let grid = Grid::load(b"..467*")?;
    ///
    /// let span = Span::at(&grid, 0, 3)?.unwrap();
    /// assert_eq!((span.start(), span.end(), span.value()), (2, 4, 467));
    /// assert_eq!(Span::at(&grid, 0, 2)?, Some(span));
    /// assert_eq!(Span::at(&grid, 0, 5)?, None);
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    pub fn at(grid: &Grid, row: usize, column: usize) -> Result<Option<Self>, GridError> {
        let cells = grid
            .row(row)
            .ok_or_else(|| grid.out_of_bounds(row, column))?;

        let Some(cell) = cells.get(column) else {
            return Err(grid.out_of_bounds(row, column));
        };

        if !cell.is_ascii_digit() {
            return Ok(None);
        }

        let mut start = column;
        let mut end = column;
        let mut state = Scan::Left;

        loop {
            state = match state {
                Scan::Left => match start.checked_sub(1) {
                    Some(n) if is_digit(cells, n) => {
                        start = n;
                        Scan::Left
                    }
                    _ => Scan::Right,
                },
                Scan::Right => match end.checked_add(1) {
                    Some(n) if is_digit(cells, n) => {
                        end = n;
                        Scan::Right
                    }
                    _ => Scan::Done,
                },
                Scan::Done => break,
            };
        }

        let digits = cells.get(start..=end).unwrap_or_default();

        if digits.len() > MAX_DIGITS {
            return Err(GridError::SpanTooLong {
                row,
                column: start,
                len: digits.len(),
            });
        }

        let value = digits
            .iter()
            .fold(0u64, |value, d| value * 10 + u64::from(d - b'0'));

        Ok(Some(Self {
            row,
            start,
            end,
            value,
        }))
    }

    /// The row the span is on.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// The first column of the span.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The last column of the span, inclusive.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The number the span spells out.
    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Test if the span covers the given cell.
    #[inline]
    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.row == row && (self.start..=self.end).contains(&column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{value} at {row}:{start}..={end}",
            value = self.value,
            row = self.row,
            start = self.start,
            end = self.end
        )
    }
}

/// States of [Span::at] while it looks for the edges of a span.
#[derive(Debug, Clone, Copy)]
enum Scan {
    Left,
    Right,
    Done,
}

#[inline]
fn is_digit(cells: &[u8], n: usize) -> bool {
    cells.get(n).is_some_and(u8::is_ascii_digit)
}

/// Lazy iterator over the spans of a single row, left to right.
///
/// Constructed through [Spans::new]. Cloning the iterator before it's
/// exhausted allows for restarting the scan at that point.
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    grid: &'a Grid,
    row: usize,
    column: usize,
}

impl<'a> Spans<'a> {
    /// Scan the given row for spans.
    ///
    /// A row outside of the grid produces no spans.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::Grid;
    /// use lib::schematic::Spans;
    ///
    /// let grid = Grid::load(b"12..3.456")?;
    /// let values = Spans::new(&grid, 0).map(|s| s.map(|s| s.value())).collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(values, [12, 3, 456]);
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    #[inline]
    pub fn new(grid: &'a Grid, row: usize) -> Self {
        Self {
            grid,
            row,
            column: 0,
        }
    }
}

impl Iterator for Spans<'_> {
    type Item = Result<Span, GridError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cells = self.grid.row(self.row)?;
        let rest = cells.get(self.column..)?;
        let offset = rest.iter().position(u8::is_ascii_digit)?;
        let column = self.column + offset;

        match Span::at(self.grid, self.row, column) {
            Ok(Some(span)) => {
                self.column = span.end + 1;
                Some(Ok(span))
            }
            Ok(None) => None,
            Err(error) => {
                self.column = cells.len();
                Some(Err(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Span, Spans};
    use crate::grid::{Grid, GridError};

    fn spans(row: &[u8]) -> Vec<(usize, usize, u64)> {
        let grid = Grid::load(row).unwrap();

        Spans::new(&grid, 0)
            .map(|s| s.map(|s| (s.start(), s.end(), s.value())))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn row_without_digits() {
        assert!(spans(b"...*..#.").is_empty());
    }

    #[test]
    fn span_closed_at_end_of_row() {
        let grid = Grid::load(b"..12\n34..\n").unwrap();
        let first = Spans::new(&grid, 0).collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!((first[0].start(), first[0].end(), first[0].value()), (2, 3, 12));

        let second = Spans::new(&grid, 1).collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!((second[0].start(), second[0].end(), second[0].value()), (0, 1, 34));
    }

    #[test]
    fn whole_row_is_one_span() {
        assert_eq!(spans(b"98765"), [(0, 4, 98765)]);
    }

    #[test]
    fn spans_are_maximal() {
        assert_eq!(spans(b"1.22*333"), [(0, 0, 1), (2, 3, 22), (5, 7, 333)]);
    }

    #[test]
    fn leading_zeros() {
        assert_eq!(spans(b".007."), [(1, 3, 7)]);
    }

    #[test]
    fn too_many_digits() {
        let grid = Grid::load(b"12345678901234567890").unwrap();

        assert_eq!(
            Span::at(&grid, 0, 7),
            Err(GridError::SpanTooLong {
                row: 0,
                column: 0,
                len: 20
            })
        );

        let mut it = Spans::new(&grid, 0);
        assert!(matches!(it.next(), Some(Err(GridError::SpanTooLong { .. }))));
        assert!(it.next().is_none());
    }

    #[test]
    fn largest_span() {
        let grid = Grid::load(b"9999999999999999999").unwrap();
        let span = Span::at(&grid, 0, 0).unwrap().unwrap();
        assert_eq!(span.value(), 9_999_999_999_999_999_999);
    }

    #[test]
    fn restart_from_clone() {
        let grid = Grid::load(b"1.2.3").unwrap();
        let mut it = Spans::new(&grid, 0);
        assert!(it.next().is_some());

        let restarted = it.clone().count();
        assert_eq!(restarted, 2);
        assert_eq!(it.count(), 2);
    }

    #[test]
    fn out_of_bounds() {
        let grid = Grid::load(b"12").unwrap();
        assert!(matches!(Span::at(&grid, 1, 0), Err(GridError::OutOfBounds { .. })));
        assert!(matches!(Span::at(&grid, 0, 2), Err(GridError::OutOfBounds { .. })));
        assert_eq!(Spans::new(&grid, 1).count(), 0);
    }
}
