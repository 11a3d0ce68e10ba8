use bittle::{Bits, BitsMut};

use super::{Span, Window};

/// Cells of a [Window] that have already been attributed to a span.
///
/// Windows are built around spans of at most [MAX_DIGITS] digits, so they
/// never cover more than `3 * (MAX_DIGITS + 2)` cells, which fits the set.
///
/// [MAX_DIGITS]: super::MAX_DIGITS
#[derive(Debug, Clone)]
pub struct Visited {
    window: Window,
    bits: u64,
}

impl Visited {
    /// Construct an empty set for the given window.
    #[inline]
    pub fn new(window: Window) -> Self {
        debug_assert!(window.area() <= u64::BITS as usize);
        Self { window, bits: 0 }
    }

    /// Test if the cell has been visited. Cells outside of the window never
    /// have.
    #[inline]
    pub fn test(&self, row: usize, column: usize) -> bool {
        match self.window.offset(row, column) {
            Some(n) => self.bits.test_bit(n as u32),
            None => false,
        }
    }

    /// Mark a single cell as visited, ignoring it if it is outside of the
    /// window.
    #[inline]
    pub fn mark(&mut self, row: usize, column: usize) {
        if let Some(n) = self.window.offset(row, column) {
            self.bits.set_bit(n as u32);
        }
    }

    /// Mark every cell where the span overlaps the window.
    pub fn mark_span(&mut self, span: &Span) {
        let from = span.start().max(self.window.from_column());
        let to = span.end().min(self.window.to_column());

        for column in from..=to {
            self.mark(span.row(), column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Visited;
    use crate::grid::Grid;
    use crate::schematic::{Span, Window};

    #[test]
    fn span_overlapping_window_edge() {
        let grid = Grid::load(b".....\n1234.\n..*..\n").unwrap();
        let window = Window::around_cell(&grid, 2, 2);
        let span = Span::at(&grid, 1, 0).unwrap().unwrap();

        let mut visited = Visited::new(window);
        visited.mark_span(&span);

        assert!(visited.test(1, 1));
        assert!(visited.test(1, 2));
        assert!(visited.test(1, 3));
        assert!(!visited.test(1, 0));
        assert!(!visited.test(2, 1));
    }

    #[test]
    fn span_outside_of_window() {
        let grid = Grid::load(b"1......\n.....*.\n").unwrap();
        let window = Window::around_cell(&grid, 1, 5);
        let span = Span::at(&grid, 0, 0).unwrap().unwrap();

        let mut visited = Visited::new(window);
        visited.mark_span(&span);
        assert!(window.cells().all(|(r, c)| !visited.test(r, c)));
    }
}
