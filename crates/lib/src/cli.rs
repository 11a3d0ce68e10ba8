//! CLI helpers.

mod bencher;
pub(crate) mod error;
mod output;
mod output_eq;
mod stderr_logger;

use core::fmt;
use core::time::Duration;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, ensure, Context, Result};
use serde::Serialize;

use crate::env::Input;
use crate::input::IStr;

pub use self::error::{error_context, LineCol};
pub use self::output_eq::OutputEq;

use self::bencher::Bencher;
pub(self) use self::output::{Output, OutputKind};

static STDERR_LOGGER: stderr_logger::StderrLogger = stderr_logger::StderrLogger;

/// Run mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Default run mode.
    #[default]
    Default,
    /// Run as benchmark.
    Bench,
}

/// Input options.
#[derive(Debug, Default)]
pub struct Opts {
    /// Run as a benchmark.
    pub mode: Mode,
    /// Run in verbose mode.
    verbose: bool,
    /// Output JSON lines.
    json: bool,
    /// Warmup period.
    warmup: Option<u64>,
    /// Bench period.
    time_limit: Option<u64>,
    /// Number of times to run benches.
    count: Option<usize>,
    /// Input file to use instead of the default one.
    path: Option<PathBuf>,
}

impl Opts {
    /// Parse CLI options and install the logger.
    pub fn parse() -> Result<Self> {
        let opts = Self::parse_from(std::env::args_os().skip(1))?;

        if !opts.json {
            log::set_max_level(if opts.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            });

            log::set_logger(&STDERR_LOGGER)
                .map_err(|error| anyhow!("failed to set log: {error}"))?;
        }

        Ok(opts)
    }

    /// Parse options from the given arguments, excluding the program name.
    pub fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut opts = Self::default();
        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            let Some(arg) = arg.to_str() else {
                bail!("non-utf8 argument");
            };

            match arg {
                "--bench" => {
                    if !matches!(opts.mode, Mode::Default) {
                        bail!("duplicate `--bench` arguments");
                    }

                    opts.mode = Mode::Bench;
                }
                "--verbose" => {
                    opts.verbose = true;
                }
                "--warmup" => {
                    opts.warmup = Some(value(&mut it, "--warmup")?);
                }
                "--time-limit" => {
                    opts.time_limit = Some(value(&mut it, "--time-limit")?);
                }
                "--count" => {
                    opts.count = Some(value(&mut it, "--count")?);
                }
                "--json" => {
                    opts.json = true;
                }
                "--" => {
                    break;
                }
                other if other.starts_with('-') => {
                    bail!("unsupported argument: {other}");
                }
                other => {
                    opts.set_path(PathBuf::from(other))?;
                }
            }
        }

        for arg in it {
            opts.set_path(PathBuf::from(arg))?;
        }

        Ok(opts)
    }

    /// The input path given on the command line, if any.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn set_path(&mut self, path: PathBuf) -> Result<()> {
        if let Some(existing) = &self.path {
            bail!(
                "more than one input: `{}` and `{}`",
                existing.display(),
                path.display()
            );
        }

        self.path = Some(path);
        Ok(())
    }

    fn output_kind(&self) -> OutputKind {
        if self.json {
            OutputKind::Json
        } else {
            OutputKind::Normal
        }
    }
}

fn value<I, T>(it: &mut I, name: &str) -> Result<T>
where
    I: Iterator<Item = OsString>,
    T: core::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = it
        .next()
        .with_context(|| anyhow!("missing argument to `{name}`"))?;

    let value = value
        .to_str()
        .with_context(|| anyhow!("missing string argument to `{name}`"))?;

    value
        .parse()
        .with_context(|| anyhow!("bad argument to `{name}`"))
}

/// Solve the puzzle for the given input and print the answer.
///
/// The answer is compared against `expected` when the default input is used.
pub fn run<F, O, C>(opts: &Opts, input: &Input, expected: C, mut solve: F) -> Result<()>
where
    F: FnMut(IStr<'_>) -> Result<O>,
    O: fmt::Debug + Serialize + OutputEq<C>,
    C: fmt::Debug,
{
    let stdout = std::io::stdout();
    let mut o = Output::new(stdout.lock(), opts.output_kind());
    let expected = input.is_default().then_some(&expected);

    let mut solve = || solve(input.istr()).map_err(|e| error_context(input, e));

    match opts.mode {
        Mode::Default => {
            let value = solve()?;

            if let Some(expect) = expected {
                ensure!(
                    value.output_eq(expect),
                    "{value:?} (value) != {expect:?} (expected)"
                );
            }

            o.answer(&value)?;
        }
        Mode::Bench => {
            if let Err(e) = Bencher::new(opts).iter(&mut o, expected, solve) {
                o.error(format_args!("{e:#}"))?;
                return Err(e);
            }
        }
    }

    Ok(())
}

/// Timing report produced by bench mode.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Report {
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl Report {
    /// Build a report from sorted samples.
    pub(crate) fn from_samples(samples: &[Duration]) -> Self {
        let count = samples.len();
        let sum = samples.iter().sum::<Duration>();

        let avg = match u32::try_from(count) {
            Ok(0) | Err(_) => Duration::default(),
            Ok(n) => sum / n,
        };

        Self {
            count,
            min: samples.first().copied().unwrap_or_default(),
            max: samples.last().copied().unwrap_or_default(),
            avg,
            p50: percentile(samples, 50),
            p95: percentile(samples, 95),
            p99: percentile(samples, 99),
        }
    }
}

/// Get the given percentile out of sorted samples.
fn percentile(samples: &[Duration], p: usize) -> Duration {
    let Some(last) = samples.len().checked_sub(1) else {
        return Duration::default();
    };

    samples
        .get(last * p / 100)
        .copied()
        .unwrap_or_default()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report {
            count,
            min,
            max,
            avg,
            p50,
            p95,
            p99,
        } = self;

        write!(f, "count: {count}, min: {min:?}, max: {max:?}, avg: {avg:?}, 50th: {p50:?}, 95th: {p95:?}, 99th: {p99:?}")
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;
    use std::ffi::OsString;
    use std::path::Path;

    use super::{Mode, Opts, Report};

    fn parse(args: &[&str]) -> anyhow::Result<Opts> {
        Opts::parse_from(args.iter().map(OsString::from))
    }

    #[test]
    fn defaults() {
        let opts = parse(&[]).unwrap();
        assert_eq!(opts.mode, Mode::Default);
        assert!(opts.path().is_none());
        assert!(!opts.json);
    }

    #[test]
    fn path_and_flags() {
        let opts = parse(&["--json", "input.txt", "--bench", "--count", "10"]).unwrap();
        assert_eq!(opts.mode, Mode::Bench);
        assert_eq!(opts.path(), Some(Path::new("input.txt")));
        assert_eq!(opts.count, Some(10));
        assert!(opts.json);
    }

    #[test]
    fn path_after_separator() {
        let opts = parse(&["--", "--weird-name"]).unwrap();
        assert_eq!(opts.path(), Some(Path::new("--weird-name")));
    }

    #[test]
    fn errors() {
        assert!(parse(&["--nope"]).is_err());
        assert!(parse(&["--count"]).is_err());
        assert!(parse(&["--count", "many"]).is_err());
        assert!(parse(&["--bench", "--bench"]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn report() {
        let samples = (1..=100).map(Duration::from_millis).collect::<Vec<_>>();
        let report = Report::from_samples(&samples);

        assert_eq!(report.count, 100);
        assert_eq!(report.min, Duration::from_millis(1));
        assert_eq!(report.max, Duration::from_millis(100));
        assert_eq!(report.p50, Duration::from_millis(50));
        assert_eq!(report.p99, Duration::from_millis(99));
        assert_eq!(report.avg, Duration::from_micros(50_500));
    }

    #[test]
    fn empty_report() {
        let report = Report::from_samples(&[]);
        assert_eq!(report.count, 0);
        assert_eq!(report.avg, Duration::ZERO);
    }
}
