pub mod cli;
pub mod env;
pub mod grid;
pub mod input;
pub mod schematic;

mod macros;

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::grid::{Grid, GridError};
    pub use crate::input::{FromInput, IStr};
    pub use crate::schematic::{Schematic, Span};
    pub use anyhow::{anyhow, bail, ensure, Context, Result};
    pub use arrayvec::{ArrayString, ArrayVec};
    pub use bstr::{BStr, ByteSlice};
}
