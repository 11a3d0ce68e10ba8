//! Engine schematic scanning.
//!
//! A schematic is a [Grid] of digits, `.` and symbols. Horizontal runs of
//! digits are part numbers, which count when a symbol touches them in any of
//! the eight directions. A `*` touching exactly two part numbers is a gear.

mod span;
mod visited;
mod window;


use arrayvec::ArrayVec;
use log::{debug, trace};

use crate::grid::{Grid, GridError};

pub use self::span::{Span, Spans};
pub use self::visited::Visited;
pub use self::window::Window;

/// Maximum number of digits in a span, every such value fits a `u64`.
pub const MAX_DIGITS: usize = 19;

/// The symbol which marks a potential gear.
pub const GEAR: u8 = b'*';

/// Test if the given cell is a symbol.
///
/// # Examples
///
/// ```
/// use lib::schematic::is_symbol;
///
/// assert!(is_symbol(b'*'));
/// assert!(is_symbol(b'#'));
/// assert!(!is_symbol(b'.'));
/// assert!(!is_symbol(b'7'));
/// ```
#[inline]
pub fn is_symbol(b: u8) -> bool {
    b.is_ascii_punctuation() && b != b'.'
}

/// A `*` cell which touches exactly two part numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gear {
    row: usize,
    column: usize,
    parts: [Span; 2],
}

impl Gear {
    /// Row of the `*` cell.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column of the `*` cell.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// The two part numbers, in the order they were discovered.
    #[inline]
    pub fn parts(&self) -> &[Span; 2] {
        &self.parts
    }

    /// The gear ratio.
    #[inline]
    pub fn ratio(&self) -> Result<u64, GridError> {
        let [a, b] = &self.parts;
        a.value()
            .checked_mul(b.value())
            .ok_or(GridError::Overflow)
    }
}

/// A validated schematic.
#[derive(Debug, Clone)]
pub struct Schematic {
    grid: Grid,
}

impl Schematic {
    /// Validate a grid as a schematic.
    ///
    /// Every cell must be a digit, `.` or a symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::{Grid, GridError};
    /// use lib::schematic::Schematic;
    ///
    /// let grid = Grid::load(b"1.\n.a")?;
    ///
    /// assert_eq!(
    ///     Schematic::new(grid).unwrap_err(),
    ///     GridError::UnexpectedChar { row: 1, column: 1, byte: b'a' }
    /// );
    /// # Ok::<_, GridError>(())
    /// ```
    pub fn new(grid: Grid) -> Result<Self, GridError> {
        for (row, column, byte) in grid.cells() {
            if !(byte.is_ascii_digit() || byte == b'.' || is_symbol(byte)) {
                return Err(GridError::UnexpectedChar { row, column, byte });
            }
        }

        Ok(Self { grid })
    }

    /// Load and validate a schematic from text.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::schematic::Schematic;
    ///
    /// let schematic = Schematic::parse(b"467..114..\n...*......\n..35..633.\n")?;
    /// assert_eq!(schematic.part_sum()?, 467 + 35);
    /// assert_eq!(schematic.gear_sum()?, 467 * 35);
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    pub fn parse(text: &[u8]) -> Result<Self, GridError> {
        Self::new(Grid::load(text)?)
    }

    /// Access the underlying grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Iterate over every span in the schematic, row by row.
    pub fn spans(&self) -> impl Iterator<Item = Result<Span, GridError>> + '_ {
        (0..self.grid.rows_len()).flat_map(move |row| Spans::new(&self.grid, row))
    }

    /// Test if any symbol touches the span.
    pub fn is_part(&self, span: &Span) -> Result<bool, GridError> {
        let window = Window::around_span(&self.grid, span);

        for (row, column) in window.cells() {
            if is_symbol(self.grid.get(row, column)?) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Iterate over every span touched by a symbol.
    pub fn parts(&self) -> impl Iterator<Item = Result<Span, GridError>> + '_ {
        self.spans().filter_map(move |span| {
            let span = match span {
                Ok(span) => span,
                Err(error) => return Some(Err(error)),
            };

            match self.is_part(&span) {
                Ok(true) => Some(Ok(span)),
                Ok(false) => None,
                Err(error) => Some(Err(error)),
            }
        })
    }

    /// Sum of every part number.
    pub fn part_sum(&self) -> Result<u64, GridError> {
        let mut sum = 0u64;

        for span in self.parts() {
            let span = span?;
            debug!("part {span}");
            sum = sum.checked_add(span.value()).ok_or(GridError::Overflow)?;
        }

        Ok(sum)
    }

    /// Find the gear at the given cell, if any.
    ///
    /// The cell must hold a `*` which touches exactly two distinct spans.
    pub fn gear_at(&self, row: usize, column: usize) -> Result<Option<Gear>, GridError> {
        if self.grid.get(row, column)? != GEAR {
            return Ok(None);
        }

        let window = Window::around_cell(&self.grid, row, column);
        let mut visited = Visited::new(window);
        let mut parts = ArrayVec::<Span, 2>::new();

        for (r, c) in window.cells() {
            if visited.test(r, c) {
                continue;
            }

            let Some(span) = Span::at(&self.grid, r, c)? else {
                continue;
            };

            visited.mark_span(&span);

            if parts.try_push(span).is_err() {
                trace!("{row}:{column}: more than two adjacent numbers");
                return Ok(None);
            }
        }

        let Ok(parts) = parts.into_inner() else {
            return Ok(None);
        };

        Ok(Some(Gear { row, column, parts }))
    }

    /// Iterate over every gear in the schematic.
    pub fn gears(&self) -> impl Iterator<Item = Result<Gear, GridError>> + '_ {
        self.grid
            .cells()
            .filter(|&(_, _, b)| b == GEAR)
            .filter_map(move |(row, column, _)| self.gear_at(row, column).transpose())
    }

    /// Sum of every gear ratio.
    pub fn gear_sum(&self) -> Result<u64, GridError> {
        let mut sum = 0u64;

        for gear in self.gears() {
            let gear = gear?;
            let ratio = gear.ratio()?;
            debug!("gear at {}:{} with ratio {ratio}", gear.row, gear.column);
            sum = sum.checked_add(ratio).ok_or(GridError::Overflow)?;
        }

        Ok(sum)
    }
}
