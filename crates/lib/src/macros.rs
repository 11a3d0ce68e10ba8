/// Open the input for a puzzle.
///
/// Uses the path given on the command line if there is one, else the named
/// file under the `inputs` directory of the calling crate.
#[macro_export]
macro_rules! input {
    ($opts:expr, $path:literal) => {
        $crate::env::Input::open(
            $opts.path(),
            concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/", $path),
        )?
    };
}

/// Build the `main` function of a puzzle.
///
/// The solver receives the whole input and returns the answer, which is
/// checked against `expect` when running on the default input.
///
/// ```ignore
/// lib::entry! {
///     input = "d03.txt",
///     expect = (4361, 467835);
///
///     fn solve(input: IStr<'_>) -> Result<(u64, u64)> {
///         /* .. */
///     }
/// }
/// ```
#[macro_export]
macro_rules! entry {
    (
        input = $path:literal,
        expect = $expect:expr;

        $(#[$meta:meta])*
        fn $name:ident($($arg:tt)*) -> $ret:ty $body:block
    ) => {
        $(#[$meta])*
        fn $name($($arg)*) -> $ret $body

        fn main() -> $crate::prelude::Result<()> {
            let opts = $crate::cli::Opts::parse()?;
            let input = $crate::input!(opts, $path);
            $crate::cli::run(&opts, &input, $expect, $name)
        }
    };
}

/// Construct a [FromInput] implementation out of a closure which converts
/// another parseable value.
///
/// [FromInput]: crate::input::FromInput
#[macro_export]
macro_rules! from_input {
    (|$value:ident: $ty:ty| -> $out:ident $block:block) => {
        impl<'a> $crate::input::FromInput<'a> for $out {
            #[inline]
            fn try_from_input(
                p: &mut $crate::input::IStr<'a>,
            ) -> core::result::Result<Option<Self>, $crate::input::IStrError> {
                let span = p.index()..p.index().saturating_add(p.len());

                let Some(value) = <$ty as $crate::input::FromInput<'a>>::try_from_input(p)? else {
                    return Ok(None);
                };

                match (|$value: $ty| -> core::result::Result<$out, $crate::input::ErrorKind> {
                    $block
                })(value)
                {
                    Ok(value) => Ok(Some(value)),
                    Err(kind) => Err($crate::input::IStrError::new(span, kind)),
                }
            }
        }
    };
}
