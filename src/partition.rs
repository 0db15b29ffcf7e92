//! Splitting a search space into index-range tasks
//!
//! A length's index domain `[0, total-1]` is walked in contiguous chunks,
//! sized so that small spaces pay for at most one task while huge spaces
//! still produce enough tasks to keep every worker fed. Tasks are emitted
//! lazily; a space too large to enumerate is never materialized as a task
//! list either.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// A contiguous, inclusive index range within one length's search space
///
/// Tasks never overlap, and the union of all tasks for a length is exactly
/// `[0, total-1]`. Boundaries are arbitrary precision, but the partitioner
/// guarantees every span fits `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub length: usize,
    pub start: BigUint,
    pub end: BigUint,
}

impl Task {
    /// Number of indices covered: `end - start + 1`
    pub fn span(&self) -> u64 {
        ((&self.end - &self.start) + 1u32).to_u64().unwrap_or(u64::MAX)
    }
}

/// Lazy iterator over the tasks covering `[0, total-1]`
#[derive(Debug)]
pub struct TaskPartition {
    length: usize,
    total: BigUint,
    next: BigUint,
    chunk: u64,
}

/// Partition one length's index domain for the given worker count
pub fn partition(length: usize, total: &BigUint, parallelism: usize) -> TaskPartition {
    TaskPartition {
        length,
        total: total.clone(),
        next: BigUint::zero(),
        chunk: chunk_size(total, parallelism),
    }
}

/// Chunk sizing policy: `max(MIN_CHUNK_SIZE, total / (CHUNK_FANOUT * workers))`,
/// capped at `MAX_TASK_SPAN` so a task's span always fits native width
fn chunk_size(total: &BigUint, parallelism: usize) -> u64 {
    let fanout = crate::CHUNK_FANOUT * parallelism.max(1) as u64;
    let hint = total / BigUint::from(fanout);
    let hint = hint
        .to_u64()
        .unwrap_or(crate::MAX_TASK_SPAN)
        .min(crate::MAX_TASK_SPAN);
    hint.max(crate::MIN_CHUNK_SIZE)
}

impl TaskPartition {
    /// The chunk size chosen for this partition
    pub fn chunk(&self) -> u64 {
        self.chunk
    }
}

impl Iterator for TaskPartition {
    type Item = Task;

    fn next(&mut self) -> Option<Task> {
        if self.next >= self.total {
            return None;
        }
        let start = self.next.clone();
        let mut end = &start + BigUint::from(self.chunk - 1);
        let last = &self.total - 1u32;
        if end > last {
            end = last;
        }
        self.next = &end + 1u32;
        Some(Task {
            length: self.length,
            start,
            end,
        })
    }
}
