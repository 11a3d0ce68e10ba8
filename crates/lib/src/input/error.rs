use core::fmt;
use core::ops::Range;
use std::num::ParseIntError;

use crate::grid::GridError;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ErrorKind {
    NotInteger(ParseIntError),
    NotUtf8,
    ExpectedLine,
    Expected(&'static str),
    UnexpectedEof,
    StringCapacity(usize),
    Grid(GridError),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotInteger(..) => write!(f, "not an integer"),
            ErrorKind::NotUtf8 => write!(f, "not utf-8"),
            ErrorKind::ExpectedLine => write!(f, "expected line"),
            ErrorKind::Expected(what) => write!(f, "expected {what}"),
            ErrorKind::UnexpectedEof => write!(f, "unexpected eof"),
            ErrorKind::StringCapacity(cap) => write!(f, "string out of capacity ({cap})"),
            ErrorKind::Grid(..) => write!(f, "bad grid"),
        }
    }
}

impl std::error::Error for ErrorKind {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ErrorKind::NotInteger(e) => Some(e),
            ErrorKind::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseIntError> for ErrorKind {
    #[inline]
    fn from(error: ParseIntError) -> Self {
        Self::NotInteger(error)
    }
}

impl From<GridError> for ErrorKind {
    #[inline]
    fn from(error: GridError) -> Self {
        Self::Grid(error)
    }
}

/// Error raised through string processing.
#[derive(Debug)]
pub struct IStrError {
    pub(crate) span: Range<usize>,
    pub(crate) kind: ErrorKind,
}

impl IStrError {
    /// Construct a new input error.
    #[inline]
    pub fn new(span: Range<usize>, kind: impl Into<ErrorKind>) -> Self {
        Self {
            span,
            kind: kind.into(),
        }
    }

    /// The byte range of the input the error refers to.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for IStrError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for IStrError {
    #[inline]
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
