//! Injected span timing
//!
//! The engine reports the start and end of its phases to an optional
//! [`Instrumentation`] it was given at construction. [`SpanTimings`] records the
//! durations and renders a summary table.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Engine phase being measured
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Span {
    /// The initial pass over every unplaced cell
    GlobalPropagation,
    /// Choosing a possibility for one cell
    Observe,
    /// Propagating one placement outward
    LocalPropagation,
}

impl Span {
    /// Every span in report order
    pub const ALL: [Self; 3] = [Self::GlobalPropagation, Self::Observe, Self::LocalPropagation];

    /// Label used in reports
    pub const fn label(self) -> &'static str {
        match self {
            Self::GlobalPropagation => "global propagation",
            Self::Observe => "observe",
            Self::LocalPropagation => "local propagation",
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receiver of span boundaries
pub trait Instrumentation {
    /// A span began
    fn start(&mut self, span: Span);

    /// The most recent span of this kind ended
    fn stop(&mut self, span: Span);

    /// Run `f` inside a span
    fn measure<T>(&mut self, span: Span, f: impl FnOnce() -> T) -> T
    where
        Self: Sized,
    {
        self.start(span);
        let result = f();
        self.stop(span);
        result
    }
}

impl<I: Instrumentation> Instrumentation for Arc<Mutex<I>> {
    fn start(&mut self, span: Span) {
        if let Ok(mut inner) = self.lock() {
            inner.start(span);
        }
    }

    fn stop(&mut self, span: Span) {
        if let Ok(mut inner) = self.lock() {
            inner.stop(span);
        }
    }
}

/// Summary statistics over the samples of one span
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanStats {
    /// Number of samples
    pub count: usize,
    /// Sum of all samples
    pub total: Duration,
    /// Arithmetic mean
    pub mean: Duration,
    /// Shortest sample
    pub min: Duration,
    /// Longest sample
    pub max: Duration,
    /// Median, averaging the middle pair for even counts
    pub median: Duration,
    /// Population standard deviation
    pub std_dev: Duration,
}

impl SpanStats {
    /// Compute statistics, `None` without samples
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let count = samples.len();
        if count == 0 {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let total: Duration = sorted.iter().sum();
        let mean_secs = total.as_secs_f64() / count as f64;
        let variance = sorted
            .iter()
            .map(|sample| (sample.as_secs_f64() - mean_secs).powi(2))
            .sum::<f64>()
            / count as f64;

        let middle = count / 2;
        let median = if count % 2 == 0 {
            let low = sorted.get(middle - 1).copied().unwrap_or_default();
            let high = sorted.get(middle).copied().unwrap_or_default();
            (low + high) / 2
        } else {
            sorted.get(middle).copied().unwrap_or_default()
        };

        Some(Self {
            count,
            total,
            mean: Duration::from_secs_f64(mean_secs),
            min: sorted.first().copied().unwrap_or_default(),
            max: sorted.last().copied().unwrap_or_default(),
            median,
            std_dev: Duration::from_secs_f64(variance.sqrt()),
        })
    }
}

/// Records wall-clock durations per span
#[derive(Clone, Debug, Default)]
pub struct SpanTimings {
    open: BTreeMap<Span, Instant>,
    samples: BTreeMap<Span, Vec<Duration>>,
}

impl SpanTimings {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder shared between the caller and an engine
    pub fn shared() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Add a sample directly
    pub fn record(&mut self, span: Span, duration: Duration) {
        self.samples.entry(span).or_default().push(duration);
    }

    /// Recorded samples of a span
    pub fn samples(&self, span: Span) -> &[Duration] {
        self.samples.get(&span).map_or(&[], Vec::as_slice)
    }

    /// Statistics for a span, `None` when it never ran
    pub fn stats(&self, span: Span) -> Option<SpanStats> {
        SpanStats::from_samples(self.samples(span))
    }

    /// Fixed-width table with one row per recorded span, times in milliseconds
    pub fn report(&self) -> String {
        let mut out = format!(
            "{:<20} {:>8} {:>10} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
            "span", "count", "total", "mean", "min", "max", "median", "stddev"
        );
        for span in Span::ALL {
            let Some(stats) = self.stats(span) else {
                continue;
            };
            let _ = writeln!(
                out,
                "{:<20} {:>8} {:>10.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3}",
                span.label(),
                stats.count,
                millis(stats.total),
                millis(stats.mean),
                millis(stats.min),
                millis(stats.max),
                millis(stats.median),
                millis(stats.std_dev),
            );
        }
        out
    }
}

impl Instrumentation for SpanTimings {
    fn start(&mut self, span: Span) {
        self.open.insert(span, Instant::now());
    }

    fn stop(&mut self, span: Span) {
        if let Some(started) = self.open.remove(&span) {
            self.record(span, started.elapsed());
        }
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
