use thiserror::Error;

use crate::schematic::MAX_DIGITS;

/// Errors raised while loading or scanning a [Grid].
///
/// Fields hold 0-based grid coordinates, messages print 1-based lines and
/// columns.
///
/// [Grid]: crate::grid::Grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GridError {
    /// The input contained no cells.
    #[error("grid is empty")]
    Empty,
    /// A row does not have the same length as the first row.
    #[error("line {} has {actual} columns, expected {expected}", .row + 1)]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A cell holds a byte which is neither a digit, `.` nor punctuation.
    #[error(
        "unexpected byte `{}` at line {}, column {}",
        .byte.escape_ascii(),
        .row + 1,
        .column + 1
    )]
    UnexpectedChar { row: usize, column: usize, byte: u8 },
    /// A number is longer than what fits the value type.
    #[error(
        "number at line {}, column {} has {len} digits, at most {} are supported",
        .row + 1,
        .column + 1,
        MAX_DIGITS
    )]
    SpanTooLong { row: usize, column: usize, len: usize },
    /// Cell access outside of the grid.
    #[error(
        "cell at line {}, column {} is outside of the {rows}x{columns} grid",
        .row + 1,
        .column + 1
    )]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    /// A sum or product overflowed.
    #[error("arithmetic overflow")]
    Overflow,
}

impl GridError {
    /// The 0-based row and column the error refers to, if any.
    ///
    /// A ragged row is reported at its first column.
    pub fn position(&self) -> Option<(usize, usize)> {
        match *self {
            GridError::Ragged { row, .. } => Some((row, 0)),
            GridError::UnexpectedChar { row, column, .. }
            | GridError::SpanTooLong { row, column, .. }
            | GridError::OutOfBounds { row, column, .. } => Some((row, column)),
            GridError::Empty | GridError::Overflow => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GridError;

    #[test]
    fn messages_are_one_based() {
        let error = GridError::Ragged {
            row: 1,
            expected: 2,
            actual: 1,
        };

        assert_eq!(error.to_string(), "line 2 has 1 columns, expected 2");
        assert_eq!(error.position(), Some((1, 0)));

        let error = GridError::UnexpectedChar {
            row: 0,
            column: 3,
            byte: b'a',
        };

        assert_eq!(error.to_string(), "unexpected byte `a` at line 1, column 4");
        assert_eq!(error.position(), Some((0, 3)));
        assert_eq!(GridError::Overflow.position(), None);
    }
}
