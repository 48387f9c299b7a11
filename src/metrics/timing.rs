//! Timing statistics for navigator decisions.
//!
//! Each tick records how long the engine took to pick and apply a move. The
//! play mode shows the rolling average, and the headless runner reports the
//! whole distribution at the end of a game.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;

const DEFAULT_WINDOW: usize = 100;

/// Count, extremes and rolling average of a series of durations
#[derive(Debug, Clone)]
pub struct TimingStats {
    count: usize,
    total_time: Duration,
    min_time: Duration,
    max_time: Duration,
    /// Recent timings for the rolling average
    recent_times: VecDeque<Duration>,
    window_size: usize,
}

/// Serializable snapshot in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingSummary {
    pub count: usize,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl TimingStats {
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            count: 0,
            total_time: Duration::ZERO,
            min_time: Duration::MAX,
            max_time: Duration::ZERO,
            recent_times: VecDeque::with_capacity(window_size),
            window_size,
        }
    }

    pub fn record(&mut self, duration: Duration) {
        self.count += 1;
        self.total_time += duration;
        self.min_time = self.min_time.min(duration);
        self.max_time = self.max_time.max(duration);

        if self.recent_times.len() >= self.window_size {
            self.recent_times.pop_front();
        }
        self.recent_times.push_back(duration);
    }

    /// Run `f` and record how long it took
    pub fn time<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        self.record(start.elapsed());
        value
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn min_time(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.min_time
        }
    }

    pub fn max_time(&self) -> Duration {
        self.max_time
    }

    /// Average over the rolling window
    pub fn avg_time(&self) -> Duration {
        if self.recent_times.is_empty() {
            Duration::ZERO
        } else {
            let sum: Duration = self.recent_times.iter().sum();
            sum / self.recent_times.len() as u32
        }
    }

    /// Average over every measurement (total / count)
    pub fn overall_avg_time(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total_time / self.count as u32
        }
    }

    pub fn summary(&self) -> TimingSummary {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        TimingSummary {
            count: self.count,
            avg_ms: ms(self.overall_avg_time()),
            min_ms: ms(self.min_time()),
            max_ms: ms(self.max_time),
        }
    }

    /// One line like `decide: avg=42µs min=30µs max=1.2ms (n=120)`
    pub fn format_summary(&self, label: &str) -> String {
        format!(
            "{label}: avg={} min={} max={} (n={})",
            format_duration(self.avg_time()),
            format_duration(self.min_time()),
            format_duration(self.max_time),
            self.count
        )
    }
}

impl Default for TimingStats {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

/// Compact form, e.g. "42µs", "1.2ms", "1.25s"
pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
