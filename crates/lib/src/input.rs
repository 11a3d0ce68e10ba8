//! Input parser.

mod error;

use core::mem;
use core::ops::Range;
use std::str::from_utf8;

use arrayvec::ArrayString;
use bstr::BStr;

use crate::grid::{Grid, GridError};
use crate::schematic::Schematic;

pub use self::error::{ErrorKind, IStrError};

pub(self) type Result<T> = std::result::Result<T, IStrError>;

pub(crate) const NL: u8 = b'\n';

/// Helper to parse input.
///
/// Keeps track of the offset into the original input so that errors can be
/// traced back to a line and column.
#[derive(Debug, Clone, Copy)]
pub struct IStr<'a> {
    /// The data being parsed.
    data: &'a [u8],
    /// Offset of `data` in the original input.
    index: usize,
}

impl<'a> IStr<'a> {
    /// Construct a new input processor.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, index: 0 }
    }

    /// Access index of input string.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Test if input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the length of the current input.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Get input being processed.
    #[inline]
    pub fn as_data(&self) -> &'a [u8] {
        self.data
    }

    /// Get remaining binary string of the input.
    #[inline]
    pub fn as_bstr(&self) -> &'a BStr {
        BStr::new(self.data)
    }

    /// Parse the next value as T.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next<T>(&mut self) -> Result<T>
    where
        T: FromInput<'a>,
    {
        T::from_input(self)
    }

    /// Try parse the next value as `T`, returns `None` if there is no more
    /// data to process.
    #[inline]
    pub fn try_next<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput<'a>,
    {
        T::try_from_input(self)
    }

    /// Parse the next line as `T`, errors with `Err(IStrError)` if there is no
    /// line or it is not a valid value of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::input::IStr;
    ///
    /// let mut input = IStr::new(b"42\nhello\n");
    /// assert_eq!(input.line::<u32>()?, 42);
    /// assert_eq!(input.line::<&str>()?, "hello");
    /// assert!(input.line::<&str>().is_err());
    /// # Ok::<_, lib::input::IStrError>(())
    /// ```
    #[inline]
    pub fn line<T>(&mut self) -> Result<T>
    where
        T: FromInput<'a>,
    {
        let index = self.index;

        let Some(line) = self.try_line()? else {
            return Err(IStrError::new(index..self.index, ErrorKind::ExpectedLine));
        };

        Ok(line)
    }

    /// Parse the next line as `T`, errors with `Err(IStrError)` if the line is
    /// not a valid value of type `T`, returns `Ok(None)` if there are no more
    /// lines to process.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::input::IStr;
    /// use lib::prelude::ArrayString;
    ///
    /// let mut input = IStr::new(b"one\r\ntwo");
    /// let mut lines = Vec::new();
    ///
    /// while let Some(line) = input.try_line::<ArrayString<8>>()? {
    ///     lines.push(line);
    /// }
    ///
    /// assert!(lines.iter().map(|s| s.as_str()).eq(["one", "two"]));
    /// # Ok::<_, lib::input::IStrError>(())
    /// ```
    #[inline]
    pub fn try_line<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput<'a>,
    {
        let Some(mut line) = self.split_once(NL) else {
            return Ok(None);
        };

        line.trim_cr();
        line.try_next()
    }

    /// Split once at the given byte or until the end of string, returning the
    /// new IStr associated with the split.
    fn split_once(&mut self, b: u8) -> Option<IStr<'a>> {
        if self.data.is_empty() {
            return None;
        }

        let index = self.index;

        let Some(at) = memchr::memchr(b, self.data) else {
            let data = mem::take(&mut self.data);
            self.index = index.saturating_add(data.len());
            return Some(IStr { data, index });
        };

        let data = self.data.get(..at)?;
        self.advance(at.checked_add(1)?);
        Some(IStr { data, index })
    }

    /// Strip a trailing carriage return.
    #[inline]
    fn trim_cr(&mut self) {
        if let [rest @ .., b'\r'] = self.data {
            self.data = rest;
        }
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.data = self.data.get(n..).unwrap_or_default();
        self.index = self.index.saturating_add(n);
    }

    /// The span covering the remaining data.
    #[inline]
    fn span(&self) -> Range<usize> {
        self.index..self.index.saturating_add(self.data.len())
    }
}

/// A value that can be parsed from input.
pub trait FromInput<'a>: Sized {
    /// Custom error kind to use.
    #[inline]
    fn error_kind() -> ErrorKind {
        ErrorKind::UnexpectedEof
    }

    /// Try to parse a value, returning `None` if there is no input left.
    fn try_from_input(p: &mut IStr<'a>) -> Result<Option<Self>>;

    /// Parse a value from a given input.
    #[inline]
    fn from_input(p: &mut IStr<'a>) -> Result<Self> {
        let index = p.index;

        let Some(value) = Self::try_from_input(p)? else {
            return Err(IStrError::new(index..p.index, Self::error_kind()));
        };

        Ok(value)
    }
}

impl<'a> FromInput<'a> for IStr<'a> {
    #[inline]
    fn try_from_input(p: &mut IStr<'a>) -> Result<Option<Self>> {
        let index = p.index;
        let data = mem::take(&mut p.data);
        p.index = index.saturating_add(data.len());
        Ok(Some(IStr { data, index }))
    }
}

impl<'a> FromInput<'a> for &'a [u8] {
    #[inline]
    fn try_from_input(p: &mut IStr<'a>) -> Result<Option<Self>> {
        let IStr { data, .. } = IStr::try_from_input(p)?.unwrap_or(IStr::new(&[]));
        Ok(Some(data))
    }
}

impl<'a> FromInput<'a> for &'a str {
    #[inline]
    fn try_from_input(p: &mut IStr<'a>) -> Result<Option<Self>> {
        let span = p.span();
        let data = <&[u8]>::from_input(p)?;

        let Ok(data) = from_utf8(data) else {
            return Err(IStrError::new(span, ErrorKind::NotUtf8));
        };

        Ok(Some(data))
    }
}

impl<'a> FromInput<'a> for &'a BStr {
    #[inline]
    fn try_from_input(p: &mut IStr<'a>) -> Result<Option<Self>> {
        Ok(Some(BStr::new(<&[u8]>::from_input(p)?)))
    }
}

impl<'a, const N: usize> FromInput<'a> for ArrayString<N> {
    #[inline]
    fn try_from_input(p: &mut IStr<'a>) -> Result<Option<Self>> {
        let span = p.span();
        let string = <&str>::from_input(p)?;

        let Ok(string) = ArrayString::from(string) else {
            return Err(IStrError::new(span, ErrorKind::StringCapacity(N)));
        };

        Ok(Some(string))
    }
}

/// Consumes the rest of the input as a grid, one row per line.
impl<'a> FromInput<'a> for Grid {
    #[inline]
    fn try_from_input(p: &mut IStr<'a>) -> Result<Option<Self>> {
        if p.is_empty() {
            return Ok(None);
        }

        let span = p.span();
        let data = <&[u8]>::from_input(p)?;
        let grid = Grid::load(data).map_err(|e| grid_error(span, data, e))?;
        Ok(Some(grid))
    }
}

/// Consumes the rest of the input as a validated schematic.
impl<'a> FromInput<'a> for Schematic {
    #[inline]
    fn try_from_input(p: &mut IStr<'a>) -> Result<Option<Self>> {
        if p.is_empty() {
            return Ok(None);
        }

        let span = p.span();
        let data = <&[u8]>::from_input(p)?;

        let schematic = Grid::load(data)
            .and_then(Schematic::new)
            .map_err(|e| grid_error(span, data, e))?;

        Ok(Some(schematic))
    }
}

/// Narrow the span of a grid error down to the cell it refers to.
///
/// Row `n` of the grid starts after the `n`th newline of `data`.
fn grid_error(span: Range<usize>, data: &[u8], error: GridError) -> IStrError {
    let Some((row, column)) = error.position() else {
        return IStrError::new(span, error);
    };

    let line = match row.checked_sub(1) {
        None => Some(0),
        Some(n) => memchr::memchr_iter(NL, data).nth(n).map(|n| n + 1),
    };

    let Some(line) = line else {
        return IStrError::new(span, error);
    };

    let start = span
        .start
        .saturating_add(line)
        .saturating_add(column)
        .min(span.end);

    IStrError::new(start..start.saturating_add(1).min(span.end), error)
}

macro_rules! integer {
    ($ty:ty) => {
        impl<'a> FromInput<'a> for $ty {
            #[inline]
            fn try_from_input(p: &mut IStr<'a>) -> Result<Option<Self>> {
                if p.is_empty() {
                    return Ok(None);
                }

                let span = p.span();
                let string = <&str>::from_input(p)?;

                match str::parse(string.trim()) {
                    Ok(n) => Ok(Some(n)),
                    Err(e) => Err(IStrError::new(span, ErrorKind::NotInteger(e))),
                }
            }
        }
    };
}

integer!(usize);
integer!(u32);
integer!(u64);
integer!(i32);
integer!(i64);

#[cfg(test)]
mod tests {
    use super::{ErrorKind, IStr};
    use crate::grid::{Grid, GridError};
    use crate::schematic::Schematic;

    #[test]
    fn lines_track_index() {
        let mut input = IStr::new(b"ab\ncd\n\nef");
        assert_eq!(input.try_line::<&str>().unwrap(), Some("ab"));
        assert_eq!(input.index(), 3);
        assert_eq!(input.try_line::<&str>().unwrap(), Some("cd"));
        assert_eq!(input.try_line::<&str>().unwrap(), Some(""));
        assert_eq!(input.try_line::<&str>().unwrap(), Some("ef"));
        assert_eq!(input.try_line::<&str>().unwrap(), None);
        assert_eq!(input.index(), 9);
    }

    #[test]
    fn bad_integer_span() {
        let mut input = IStr::new(b"12\nx3\n");
        assert_eq!(input.line::<u32>().unwrap(), 12);

        let error = input.line::<u32>().unwrap_err();
        assert_eq!(error.span(), 3..5);
        assert!(matches!(error.kind(), ErrorKind::NotInteger(..)));
    }

    #[test]
    fn string_capacity() {
        let mut input = IStr::new(b"toolong\n");
        let error = input.line::<arrayvec::ArrayString<4>>().unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::StringCapacity(4)));
    }

    #[test]
    fn grid_from_rest() {
        let mut input = IStr::new(b"header\n12.\n.*.\n");
        assert_eq!(input.line::<&str>().unwrap(), "header");

        let grid = input.next::<Grid>().unwrap();
        assert_eq!(grid.rows_len(), 2);
        assert!(input.is_empty());
        assert!(input.try_next::<Grid>().unwrap().is_none());
    }

    #[test]
    fn ragged_grid_error() {
        let mut input = IStr::new(b"12.\n.*\n");
        let error = input.next::<Grid>().unwrap_err();
        assert_eq!(error.span(), 4..5);
        assert!(matches!(error.kind(), ErrorKind::Grid(GridError::Ragged { row: 1, .. })));
    }

    #[test]
    fn empty_grid_error_covers_rest() {
        let mut input = IStr::new(b"header\n\n");
        assert_eq!(input.line::<&str>().unwrap(), "header");

        let error = input.next::<Grid>().unwrap_err();
        assert_eq!(error.span(), 7..8);
        assert!(matches!(error.kind(), ErrorKind::Grid(GridError::Empty)));
    }

    #[test]
    fn schematic_error_points_at_cell() {
        let mut input = IStr::new(b"header\r\n1..\r\n.7a\r\n");
        assert_eq!(input.line::<&str>().unwrap(), "header");

        let error = input.next::<Schematic>().unwrap_err();
        assert_eq!(error.span(), 15..16);
        assert!(matches!(
            error.kind(),
            ErrorKind::Grid(GridError::UnexpectedChar { row: 1, column: 2, byte: b'a' })
        ));
    }

    #[test]
    fn schematic_from_rest() {
        let mut input = IStr::new(b"467..\n...*.\n..35.\n");
        let schematic = input.next::<Schematic>().unwrap();
        assert_eq!(schematic.part_sum().unwrap(), 467 + 35);
        assert!(input.try_next::<Schematic>().unwrap().is_none());
    }
}
