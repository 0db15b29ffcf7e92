//! Shared search state and progress reporting
//!
//! `SearchState` carries the only mutable data shared across workers: the
//! found gate and the tested counter, both plain atomics so the hot
//! per-candidate loop never takes a lock. One instance is created per search
//! invocation and passed by reference to every worker and the progress
//! reporter.

use indicatif::{ProgressBar, ProgressStyle};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Termination and progress signal shared by all workers
#[derive(Debug, Default)]
pub struct SearchState {
    /// Early-exit gate; transitions false -> true at most once
    found: AtomicBool,
    /// Candidates committed for evaluation, summed across workers
    tested: AtomicU64,
    /// The matching candidate; written by the first successful matcher only
    found_value: OnceLock<String>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch's planned size to the tested counter
    pub fn record_tested(&self, count: u64) {
        self.tested.fetch_add(count, Ordering::Relaxed);
    }

    /// Candidates committed so far
    pub fn tested(&self) -> u64 {
        self.tested.load(Ordering::Relaxed)
    }

    /// Whether any worker has matched the target
    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Record a match. The first writer wins; the value is stored before the
    /// gate flips so any observer of the gate also sees the candidate.
    /// Returns whether this call performed the transition.
    pub fn mark_found(&self, candidate: &[u8]) -> bool {
        let value = String::from_utf8_lossy(candidate).into_owned();
        if self.found_value.set(value).is_ok() {
            self.found.store(true, Ordering::Release);
            true
        } else {
            false
        }
    }

    /// The matching candidate, if one was recorded
    pub fn found_value(&self) -> Option<&str> {
        self.found_value.get().map(String::as_str)
    }
}

/// Configuration for the progress reporter
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Whether to draw a live progress line
    pub show_progress_bar: bool,
    /// Interval between counter reads
    pub update_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            show_progress_bar: true,
            update_interval: Duration::from_millis(500),
        }
    }
}

/// Best-effort periodic observer of the tested counter
///
/// Runs on its own thread, reads the counter on a fixed interval for display
/// only, and never blocks the workers producing it.
#[derive(Debug)]
pub struct ProgressMonitor {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProgressMonitor {
    /// Spawn the reporter thread
    pub fn start(state: Arc<SearchState>, config: MonitorConfig) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let stop = Arc::clone(&stop);
            let interval = config.update_interval;
            let bar = config.show_progress_bar.then(|| {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} [{elapsed_precise}] {msg}")
                        .unwrap(),
                );
                pb
            });
            thread::spawn(move || {
                let started = Instant::now();
                while !stop.load(Ordering::Relaxed) {
                    let tested = state.tested();
                    let elapsed = started.elapsed().as_secs_f64();
                    let rate = if elapsed > 0.0 {
                        tested as f64 / elapsed
                    } else {
                        0.0
                    };
                    if let Some(pb) = &bar {
                        pb.set_message(format!(
                            "{} candidates tested ({})",
                            utils::format_number(tested),
                            utils::format_rate(rate)
                        ));
                        pb.tick();
                    } else {
                        debug!(tested, "progress");
                    }
                    thread::sleep(interval);
                }
                if let Some(pb) = &bar {
                    pb.finish_and_clear();
                }
            })
        };
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop the reporter and wait for its thread to exit
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Utility functions for reporting
pub mod utils {
    use super::*;

    /// Projected wall time for a space at an assumed throughput, broken down
    /// into the units a human reaches for
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct TimeProjection {
        pub seconds: f64,
        pub minutes: f64,
        pub hours: f64,
        pub days: f64,
        pub years: f64,
    }

    impl TimeProjection {
        pub fn from_seconds(seconds: f64) -> Self {
            let minutes = seconds / 60.0;
            let hours = minutes / 60.0;
            let days = hours / 24.0;
            let years = days / 365.0;
            Self {
                seconds,
                minutes,
                hours,
                days,
                years,
            }
        }

        /// Projection for testing `total` candidates at `per_second`
        pub fn from_total(total: &BigUint, per_second: u64) -> Self {
            let total = total.to_f64().unwrap_or(f64::INFINITY);
            Self::from_seconds(total / per_second.max(1) as f64)
        }
    }

    /// Render a projection in its dominant unit
    pub fn format_eta(seconds: f64) -> String {
        let p = TimeProjection::from_seconds(seconds);
        if p.years >= 1.0 {
            format!("{:.1} years", p.years)
        } else if p.days >= 1.0 {
            format!("{:.1} days", p.days)
        } else if p.hours >= 1.0 {
            format!("{:.1} hours", p.hours)
        } else if p.minutes >= 1.0 {
            format!("{:.1} minutes", p.minutes)
        } else {
            format!("{:.1}s", p.seconds)
        }
    }

    /// Format duration in human-readable form
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Format large numbers with commas
    pub fn format_number(num: u64) -> String {
        let num_str = num.to_string();
        let mut result = String::new();

        for (i, c) in num_str.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    /// Format rate with appropriate units
    pub fn format_rate(rate: f64) -> String {
        if rate >= 1_000_000.0 {
            format!("{:.1}M/s", rate / 1_000_000.0)
        } else if rate >= 1_000.0 {
            format!("{:.1}K/s", rate / 1_000.0)
        } else {
            format!("{:.0}/s", rate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_starts_empty() {
        let state = SearchState::new();
        assert_eq!(state.tested(), 0);
        assert!(!state.is_found());
        assert!(state.found_value().is_none());
    }

    #[test]
    fn test_tested_counter_accumulates() {
        let state = SearchState::new();
        state.record_tested(100);
        state.record_tested(250);
        assert_eq!(state.tested(), 350);
    }

    #[test]
    fn test_mark_found_first_writer_wins() {
        let state = SearchState::new();
        assert!(state.mark_found(b"first"));
        assert!(!state.mark_found(b"second"));
        assert!(state.is_found());
        assert_eq!(state.found_value(), Some("first"));
    }

    #[test]
    fn test_mark_found_single_winner_under_contention() {
        let state = Arc::new(SearchState::new());
        let winners: usize = thread::scope(|scope| {
            (0..8)
                .map(|i| {
                    let state = Arc::clone(&state);
                    scope.spawn(move || {
                        let candidate = format!("cand{}", i);
                        state.mark_found(candidate.as_bytes())
                    })
                })
                .collect::<Vec<_>>()
                .into_iter()
                .map(|h| usize::from(h.join().unwrap()))
                .sum()
        });
        assert_eq!(winners, 1);
        assert!(state.is_found());
        assert!(state.found_value().is_some());
    }

    #[test]
    fn test_counter_no_loss_under_concurrent_increment() {
        let state = Arc::new(SearchState::new());
        thread::scope(|scope| {
            for _ in 0..4 {
                let state = Arc::clone(&state);
                scope.spawn(move || {
                    for _ in 0..1000 {
                        state.record_tested(3);
                    }
                });
            }
        });
        assert_eq!(state.tested(), 4 * 1000 * 3);
    }

    #[test]
    fn test_monitor_stops_cleanly() {
        let state = Arc::new(SearchState::new());
        let monitor = ProgressMonitor::start(
            Arc::clone(&state),
            MonitorConfig {
                show_progress_bar: false,
                update_interval: Duration::from_millis(10),
            },
        );
        state.record_tested(42);
        thread::sleep(Duration::from_millis(30));
        monitor.stop();
        assert_eq!(state.tested(), 42);
    }

    #[test]
    fn test_utils_formatting() {
        assert_eq!(utils::format_number(1234567), "1,234,567");
        assert_eq!(utils::format_number(123), "123");

        assert_eq!(utils::format_duration(Duration::from_secs(3661)), "1h 1m 1s");
        assert_eq!(utils::format_duration(Duration::from_secs(61)), "1m 1s");
        assert_eq!(utils::format_duration(Duration::from_secs(1)), "1s");

        assert_eq!(utils::format_rate(1_500_000.0), "1.5M/s");
        assert_eq!(utils::format_rate(1_500.0), "1.5K/s");
        assert_eq!(utils::format_rate(150.0), "150/s");
    }

    #[test]
    fn test_time_projection() {
        let p = utils::TimeProjection::from_seconds(86_400.0);
        assert_eq!(p.days, 1.0);
        assert_eq!(p.hours, 24.0);

        let total = BigUint::from(370_000_000u64);
        let p = utils::TimeProjection::from_total(&total, 37_000_000);
        assert!((p.seconds - 10.0).abs() < 1e-9);

        assert_eq!(utils::format_eta(30.0), "30.0s");
        assert_eq!(utils::format_eta(90.0), "1.5 minutes");
        assert_eq!(utils::format_eta(2.0 * 365.0 * 86_400.0), "2.0 years");
    }
}
