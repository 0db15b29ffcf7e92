//! Fixed worker pool draining a shared task queue
//!
//! Workers pull index-range tasks from a bounded multi-consumer channel,
//! expand each range through the candidate cursor, and compare every
//! candidate to the target. Cancellation is cooperative at batch
//! granularity: a worker re-checks the shared found gate before each task
//! and before each batch, never mid-candidate.

use crossbeam_channel::{bounded, Receiver};
use std::thread;
use tracing::{debug, info};

use crate::codec::CandidateCursor;
use crate::config::Charset;
use crate::monitor::SearchState;
use crate::partition::Task;

/// Worker pool parameters
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads
    pub workers: usize,
    /// Candidates evaluated per inner batch
    pub batch_size: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            batch_size: crate::DEFAULT_BATCH_SIZE,
        }
    }
}

/// Feed `tasks` to a fixed set of workers and block until the queue is
/// drained or the found gate stops the search
///
/// Task pickup order across workers is unspecified; the only guarantee is
/// that every index of every consumed task is either evaluated or skipped
/// behind an already-set found gate.
pub fn drain_tasks(
    tasks: impl Iterator<Item = Task>,
    charset: &Charset,
    target: &[u8],
    state: &SearchState,
    config: &PoolConfig,
) {
    let workers = config.workers.max(1);
    let batch_size = config.batch_size.max(1);
    let (tx, rx) = bounded::<Task>(workers * 2);

    thread::scope(|scope| {
        for worker_id in 0..workers {
            let rx = rx.clone();
            scope.spawn(move || run_worker(worker_id, rx, charset, target, state, batch_size));
        }
        drop(rx);

        for task in tasks {
            if state.is_found() {
                break;
            }
            if tx.send(task).is_err() {
                break;
            }
        }
        // Closing the queue lets workers exit once the remainder is drained
        drop(tx);
    });
}

fn run_worker(
    worker_id: usize,
    tasks: Receiver<Task>,
    charset: &Charset,
    target: &[u8],
    state: &SearchState,
    batch_size: u64,
) {
    for task in tasks.iter() {
        if state.is_found() {
            continue;
        }
        if run_task(&task, charset, target, state, batch_size) {
            info!(worker_id, length = task.length, "target matched");
            return;
        }
    }
    debug!(worker_id, "task queue drained");
}

/// Walk one task's index range in batches. Returns whether this worker
/// recorded the match.
fn run_task(
    task: &Task,
    charset: &Charset,
    target: &[u8],
    state: &SearchState,
    batch_size: u64,
) -> bool {
    let mut cursor = CandidateCursor::new(charset, task.length);
    cursor.seek(&task.start);

    let span = task.span();
    let mut offset = 0u64;
    while offset < span {
        if state.is_found() {
            return false;
        }
        let planned = batch_size.min(span - offset);
        // Committed work is counted up front; a mid-batch match leaves the
        // counter slightly ahead of the candidates actually compared.
        state.record_tested(planned);
        for _ in 0..planned {
            if cursor.current() == target {
                state.mark_found(cursor.current());
                return true;
            }
            cursor.advance();
        }
        offset += planned;
    }
    false
}
