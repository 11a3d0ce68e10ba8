use core::fmt;
use core::time::Duration;
use std::io::Write;
use std::time::Instant;

use anyhow::{ensure, Result};

use crate::cli::{Opts, Output, OutputEq, Report};

/// Default warmup period in milliseconds.
const DEFAULT_WARMUP: u64 = 100;

/// Default time limit in milliseconds.
const DEFAULT_TIME_LIMIT: u64 = 400;

/// Repeatedly runs a solver and reports timings.
pub(crate) struct Bencher<'a> {
    opts: &'a Opts,
}

impl<'a> Bencher<'a> {
    /// Construct a new bencher.
    #[inline]
    pub(crate) fn new(opts: &'a Opts) -> Self {
        Self { opts }
    }

    /// Bench the given fn.
    pub(crate) fn iter<T, O, C>(
        &self,
        o: &mut Output<impl Write>,
        expected: Option<&C>,
        mut iter: T,
    ) -> Result<()>
    where
        T: FnMut() -> Result<O>,
        O: fmt::Debug + OutputEq<C>,
        C: fmt::Debug,
    {
        let warmup = Duration::from_millis(self.opts.warmup.unwrap_or(DEFAULT_WARMUP));
        let time_limit = Duration::from_millis(self.opts.time_limit.unwrap_or(DEFAULT_TIME_LIMIT));

        let mut sample = || -> Result<Duration> {
            let before = Instant::now();
            let value = iter()?;
            let elapsed = before.elapsed();

            if let Some(expect) = expected {
                ensure!(
                    value.output_eq(expect),
                    "{value:?} (value) != {expect:?} (expected)"
                );
            }

            let _ = std::hint::black_box(value);
            Ok(elapsed)
        };

        if !warmup.is_zero() {
            o.info(format_args!("warming up ({warmup:?})..."))?;
            let start = Instant::now();

            while start.elapsed() < warmup {
                sample()?;
            }
        }

        let mut samples = Vec::new();

        if let Some(count) = self.opts.count {
            let count = count.max(1);
            o.info(format_args!("running benches {count} time(s)..."))?;

            for _ in 0..count {
                samples.push(sample()?);
            }
        } else {
            o.info(format_args!("running benches ({time_limit:?})..."))?;
            let start = Instant::now();

            loop {
                samples.push(sample()?);

                if start.elapsed() >= time_limit {
                    break;
                }
            }
        }

        samples.sort();
        o.report(&Report::from_samples(&samples))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::Bencher;
    use crate::cli::{Opts, Output, OutputKind};

    fn opts(count: Option<usize>, warmup: u64) -> Opts {
        Opts {
            count,
            warmup: Some(warmup),
            time_limit: Some(1),
            ..Opts::default()
        }
    }

    fn bench(opts: &Opts, kind: OutputKind, answer: u32) -> (anyhow::Result<()>, usize, String) {
        let calls = Cell::new(0);
        let mut o = Output::new(Vec::new(), kind);

        let result = Bencher::new(opts).iter(&mut o, Some(&7u32), || {
            calls.set(calls.get() + 1);
            Ok(answer)
        });

        let out = String::from_utf8(o.into_inner()).unwrap();
        (result, calls.get(), out)
    }

    #[test]
    fn fixed_count_without_warmup() {
        let (result, calls, out) = bench(&opts(Some(3), 0), OutputKind::Normal, 7);
        result.unwrap();

        assert_eq!(calls, 3);
        assert!(!out.contains("warming up"));
        assert!(out.contains("running benches 3 time(s)..."));
        assert!(out.lines().last().unwrap().starts_with("count: 3, "));
    }

    #[test]
    fn zero_count_runs_once() {
        let (result, calls, out) = bench(&opts(Some(0), 0), OutputKind::Normal, 7);
        result.unwrap();

        assert_eq!(calls, 1);
        assert!(out.lines().last().unwrap().starts_with("count: 1, "));
    }

    #[test]
    fn time_limit_after_warmup() {
        let (result, calls, out) = bench(&opts(None, 1), OutputKind::Normal, 7);
        result.unwrap();

        assert!(calls >= 2);
        assert!(out.starts_with("info: warming up (1ms)...\n"));
        assert!(out.contains("info: running benches (1ms)...\n"));
    }

    #[test]
    fn json_report() {
        let (result, _, out) = bench(&opts(Some(2), 0), OutputKind::Json, 7);
        result.unwrap();

        let report = out.lines().last().unwrap();
        let report: serde_json::Value = serde_json::from_str(report).unwrap();
        assert_eq!(report["type"], "report");
        assert_eq!(report["data"]["count"], 2);
    }

    #[test]
    fn mismatch_is_an_error() {
        let (result, calls, out) = bench(&opts(Some(5), 0), OutputKind::Normal, 8);

        let error = result.unwrap_err();
        assert_eq!(error.to_string(), "8 (value) != 7 (expected)");
        assert_eq!(calls, 1);
        assert!(!out.contains("count:"));
    }
}
