use core::fmt;
use std::ops::Range;

use crate::env::Input;
use crate::input::IStrError;

/// Associate the location of the failing input with an error.
pub fn error_context(input: &Input, error: anyhow::Error) -> anyhow::Error {
    let pos = find_range(&error).map(|span| crate::env::pos_from(input.as_data(), span));

    error.context(ErrorContext {
        path: input.path().display().to_string(),
        pos,
    })
}

/// A 0-based line and column combination, displayed 1-based.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    line: usize,
    column: usize,
}

impl LineCol {
    pub(crate) const EMPTY: Self = Self::new(0, 0);

    pub(crate) const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Need to be able to unwrap an error fully in case it's threaded through
/// multiple layers of processing.
fn find_range(error: &anyhow::Error) -> Option<Range<usize>> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<IStrError>())
        .map(IStrError::span)
}

#[derive(Debug)]
struct ErrorContext {
    path: String,
    pos: Option<LineCol>,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pos {
            Some(pos) => write!(f, "{path}:{pos}", path = self.path),
            None => write!(f, "{path}", path = self.path),
        }
    }
}
