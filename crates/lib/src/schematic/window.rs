use crate::grid::Grid;

use super::Span;

/// The 8-neighbour bounding rectangle around a span or a single cell,
/// clipped to the bounds of the grid. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    from_row: usize,
    to_row: usize,
    from_column: usize,
    to_column: usize,
}

impl Window {
    /// The window around the given span.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::Grid;
    /// use lib::schematic::{Span, Window};
    ///
    /// let grid = Grid::load(b"467..\n...*.\n")?;
    /// let span = Span::at(&grid, 0, 0)?.unwrap();
    ///
    /// let w = Window::around_span(&grid, &span);
    /// assert_eq!((w.from_row(), w.to_row()), (0, 1));
    /// assert_eq!((w.from_column(), w.to_column()), (0, 3));
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    #[inline]
    pub fn around_span(grid: &Grid, span: &Span) -> Self {
        Self::around(grid, span.row(), span.start(), span.end())
    }

    /// The window around a single cell.
    #[inline]
    pub fn around_cell(grid: &Grid, row: usize, column: usize) -> Self {
        Self::around(grid, row, column, column)
    }

    fn around(grid: &Grid, row: usize, start: usize, end: usize) -> Self {
        let last_row = grid.rows_len().saturating_sub(1);
        let last_column = grid.columns_len().saturating_sub(1);

        Self {
            from_row: row.saturating_sub(1),
            to_row: row.saturating_add(1).min(last_row),
            from_column: start.saturating_sub(1),
            to_column: end.saturating_add(1).min(last_column),
        }
    }

    /// First row of the window.
    #[inline]
    pub fn from_row(&self) -> usize {
        self.from_row
    }

    /// Last row of the window.
    #[inline]
    pub fn to_row(&self) -> usize {
        self.to_row
    }

    /// First column of the window.
    #[inline]
    pub fn from_column(&self) -> usize {
        self.from_column
    }

    /// Last column of the window.
    #[inline]
    pub fn to_column(&self) -> usize {
        self.to_column
    }

    /// Number of rows covered.
    #[inline]
    pub fn rows_len(&self) -> usize {
        self.to_row - self.from_row + 1
    }

    /// Number of columns covered.
    #[inline]
    pub fn columns_len(&self) -> usize {
        self.to_column - self.from_column + 1
    }

    /// Number of cells covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.rows_len() * self.columns_len()
    }

    /// Test if the cell is inside the window.
    #[inline]
    pub fn contains(&self, row: usize, column: usize) -> bool {
        (self.from_row..=self.to_row).contains(&row)
            && (self.from_column..=self.to_column).contains(&column)
    }

    /// Row-major offset of a cell inside of the window.
    #[inline]
    pub fn offset(&self, row: usize, column: usize) -> Option<usize> {
        if !self.contains(row, column) {
            return None;
        }

        Some((row - self.from_row) * self.columns_len() + (column - self.from_column))
    }

    /// Iterate over the coordinates of every cell in the window, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let Self {
            from_row,
            to_row,
            from_column,
            to_column,
        } = *self;

        (from_row..=to_row).flat_map(move |row| (from_column..=to_column).map(move |c| (row, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::Window;
    use crate::grid::Grid;
    use crate::schematic::Span;

    fn grid() -> Grid {
        Grid::load(b"12...\n.....\n...34\n").unwrap()
    }

    #[test]
    fn clipped_at_top_left() {
        let grid = grid();
        let span = Span::at(&grid, 0, 1).unwrap().unwrap();
        let w = Window::around_span(&grid, &span);

        assert_eq!((w.from_row(), w.to_row(), w.from_column(), w.to_column()), (0, 1, 0, 2));
        assert_eq!(w.area(), 6);
    }

    #[test]
    fn clipped_at_bottom_right() {
        let grid = grid();
        let span = Span::at(&grid, 2, 4).unwrap().unwrap();
        let w = Window::around_span(&grid, &span);

        assert_eq!((w.from_row(), w.to_row(), w.from_column(), w.to_column()), (1, 2, 2, 4));
        assert!(w.cells().all(|(r, c)| grid.try_get(r, c).is_some()));
    }

    #[test]
    fn interior_cell() {
        let grid = grid();
        let w = Window::around_cell(&grid, 1, 2);

        assert_eq!(w.area(), 9);
        assert_eq!(w.cells().next(), Some((0, 1)));
        assert_eq!(w.cells().last(), Some((2, 3)));
        assert_eq!(w.offset(1, 2), Some(4));
        assert_eq!(w.offset(1, 4), None);
    }

    #[test]
    fn single_cell_grid() {
        let grid = Grid::load(b"*").unwrap();
        let w = Window::around_cell(&grid, 0, 0);
        assert_eq!(w.cells().collect::<Vec<_>>(), [(0, 0)]);
    }
}
