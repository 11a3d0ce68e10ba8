//! Locating and reading puzzle input.

use core::ops::Range;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};

use crate::cli::error::LineCol;
use crate::input::{IStr, NL};

/// Puzzle input read from disk.
#[derive(Debug)]
pub struct Input {
    path: PathBuf,
    data: Vec<u8>,
    default: bool,
}

impl Input {
    /// Read the input at `path`, or at `default` if no path was given.
    ///
    /// Fails with a usage error if no path was given and the default input
    /// does not exist.
    pub fn open(path: Option<&Path>, default: &str) -> anyhow::Result<Self> {
        let (path, is_default) = match path {
            Some(path) => (path.to_owned(), false),
            None => {
                let path = PathBuf::from(default);

                if !path.is_file() {
                    bail!(
                        "usage: {} [FILE] (no input given and `{}` is missing)",
                        program(),
                        path.display()
                    );
                }

                (path, true)
            }
        };

        let data = fs::read(&path).with_context(|| anyhow!("{}", path.display()))?;
        log::debug!("read {} bytes from {}", data.len(), path.display());

        Ok(Self {
            path,
            data,
            default: is_default,
        })
    }

    /// Construct input from memory.
    pub fn from_bytes(path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
            default: false,
        }
    }

    /// The path the input was read from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Test if this is the default input for the puzzle.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.default
    }

    /// Raw input data.
    #[inline]
    pub fn as_data(&self) -> &[u8] {
        &self.data
    }

    /// Construct a fresh parser over the input.
    #[inline]
    pub fn istr(&self) -> IStr<'_> {
        IStr::new(&self.data)
    }
}

fn program() -> String {
    std::env::args()
        .next()
        .and_then(|arg| {
            let name = Path::new(&arg).file_name()?.to_str()?.to_owned();
            Some(name)
        })
        .unwrap_or_else(|| String::from("aoc"))
}

/// Get the line and column of the start of the given span.
pub(crate) fn pos_from(data: &[u8], span: Range<usize>) -> LineCol {
    let Some(d) = data.get(..span.start) else {
        return LineCol::EMPTY;
    };

    let (line, last) = memchr::memchr_iter(NL, d)
        .enumerate()
        .last()
        .map(|(line, n)| (line + 1, n + 1))
        .unwrap_or_default();

    LineCol::new(line, span.start - last)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{pos_from, Input};

    #[test]
    fn positions() {
        let data = b"abc\ndef\nghi";
        assert_eq!(pos_from(data, 0..1).to_string(), "1:1");
        assert_eq!(pos_from(data, 5..6).to_string(), "2:2");
        assert_eq!(pos_from(data, 8..11).to_string(), "3:1");
        assert_eq!(pos_from(data, 100..101).to_string(), "1:1");
    }

    #[test]
    fn default_input() {
        let input = Input::open(None, concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml")).unwrap();
        assert!(input.is_default());
        assert!(input.as_data().starts_with(b"[package]"));
    }

    #[test]
    fn explicit_input() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let input = Input::open(Some(path), "missing.txt").unwrap();
        assert!(!input.is_default());
        assert_eq!(input.path(), path);
    }

    #[test]
    fn missing_default_is_usage_error() {
        let error = Input::open(None, "does/not/exist.txt").unwrap_err();
        assert!(error.to_string().starts_with("usage: "));
    }

    #[test]
    fn missing_explicit_is_io_error() {
        let error = Input::open(Some(Path::new("does/not/exist.txt")), "missing.txt").unwrap_err();
        assert_eq!(error.to_string(), "does/not/exist.txt");
        assert!(error.root_cause().downcast_ref::<std::io::Error>().is_some());
    }
}
