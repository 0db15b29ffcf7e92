//! Search orchestration
//!
//! Runs the optional wordlist phase, then escalates candidate length from 1
//! to the configured maximum, partitioning each length's space and feeding
//! the worker pool. One length is fully drained before the next begins, and
//! escalation stops as soon as the shared found gate is set.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::codec;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::monitor::{utils, MonitorConfig, ProgressMonitor, SearchState};
use crate::partition;
use crate::pool::{self, PoolConfig};
use crate::wordlist;

/// Assumed throughput for the pre-search duration projection
pub const PROJECTION_RATE: u64 = 37_000_000;

/// How the wordlist phase concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordlistStatus {
    /// No wordlist was configured
    Skipped,
    /// Target matched at this 1-based line position
    Found { position: u64 },
    /// Scan reached end of input without a match
    NotFound { lines: u64 },
    /// Open or read failure; distinct from a miss
    Failed(String),
}

/// Terminal report of one search invocation
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The recovered candidate, if any
    pub found: Option<String>,
    /// Wordlist phase result
    pub wordlist: WordlistStatus,
    /// Candidates committed across all phases
    pub tested: u64,
    /// Wall time for the whole invocation
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// Average candidates per second over the invocation
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.tested as f64 / secs
        } else {
            0.0
        }
    }
}

/// Run a full recovery with the default progress display
pub fn run(config: &SearchConfig) -> Result<SearchOutcome> {
    run_with_monitor(config, MonitorConfig::default())
}

/// Run a full recovery; the monitor configuration controls the live readout
pub fn run_with_monitor(
    config: &SearchConfig,
    monitor_config: MonitorConfig,
) -> Result<SearchOutcome> {
    config.validate()?;

    // Fresh state per invocation; never shared across runs
    let state = Arc::new(SearchState::new());
    let start = Instant::now();

    let wordlist_status = run_wordlist_phase(config, &state);
    if state.is_found() {
        return Ok(outcome(&state, wordlist_status, start));
    }

    let charset = config.charset();
    let pool_config = PoolConfig {
        workers: config.num_threads,
        batch_size: config.batch_size,
    };
    let monitor = ProgressMonitor::start(Arc::clone(&state), monitor_config);

    for length in 1..=config.max_length {
        if state.is_found() {
            break;
        }
        let total = codec::cardinality(length, charset.len());
        let projection = utils::TimeProjection::from_total(&total, PROJECTION_RATE);
        info!(
            length,
            combinations = %total,
            projected = %utils::format_eta(projection.seconds),
            "searching length"
        );

        let tasks = partition::partition(length, &total, pool_config.workers);
        pool::drain_tasks(tasks, &charset, config.target.as_bytes(), &state, &pool_config);
    }

    monitor.stop();
    Ok(outcome(&state, wordlist_status, start))
}

/// Scan the configured wordlist, if any. Failures are reported distinctly
/// but never abort the invocation; the combinatorial phase still runs.
fn run_wordlist_phase(config: &SearchConfig, state: &SearchState) -> WordlistStatus {
    let Some(path) = &config.wordlist else {
        return WordlistStatus::Skipped;
    };

    info!(path = %path.display(), "scanning wordlist");
    let scan_start = Instant::now();
    match wordlist::scan(path, &config.target, state) {
        Ok(outcome) => {
            let elapsed = scan_start.elapsed().as_secs_f64();
            let rate = if elapsed > 0.0 {
                outcome.lines_examined as f64 / elapsed
            } else {
                0.0
            };
            info!(
                lines = outcome.lines_examined,
                rate = %utils::format_rate(rate),
                "wordlist scan finished"
            );
            match outcome.position {
                Some(position) => WordlistStatus::Found { position },
                None => WordlistStatus::NotFound {
                    lines: outcome.lines_examined,
                },
            }
        }
        Err(err) => {
            error!(%err, "wordlist scan failed");
            WordlistStatus::Failed(err.to_string())
        }
    }
}

fn outcome(state: &SearchState, wordlist: WordlistStatus, start: Instant) -> SearchOutcome {
    SearchOutcome {
        found: state.found_value().map(str::to_owned),
        wordlist,
        tested: state.tested(),
        elapsed: start.elapsed(),
    }
}
