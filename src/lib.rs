//! Plaintext Password Recovery Tool
//!
//! Recovers a known target string by exhaustive enumeration of every candidate
//! over a chosen character set up to a maximum length, optionally checking a
//! line-oriented wordlist first. The search space for each length is split
//! into contiguous index-range tasks consumed by a fixed pool of worker
//! threads sharing lock-free termination and progress state.

pub mod codec;
pub mod config;
pub mod error;
pub mod monitor;
pub mod partition;
pub mod pool;
pub mod search;
pub mod wordlist;

// Re-export main types
pub use config::{Charset, CharsetPreset, SearchConfig};
pub use monitor::{MonitorConfig, ProgressMonitor, SearchState};
pub use partition::{Task, TaskPartition};
pub use pool::PoolConfig;
pub use search::{SearchOutcome, WordlistStatus};
pub use error::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Charset, CharsetPreset, SearchConfig};
    pub use crate::monitor::{MonitorConfig, ProgressMonitor, SearchState};
    pub use crate::partition::{Task, TaskPartition};
    pub use crate::pool::PoolConfig;
    pub use crate::search::{SearchOutcome, WordlistStatus};
    pub use crate::error::*;
    pub use anyhow::{Context, Result};
}


/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of candidates evaluated per inner batch
pub const DEFAULT_BATCH_SIZE: u64 = 10_000;

/// Smallest index range a single task may cover
pub const MIN_CHUNK_SIZE: u64 = 10_000;

/// Fan-out multiplier: target number of tasks per worker for one length
pub const CHUNK_FANOUT: u64 = 10;

/// Largest index range a single task may cover; keeps every task span
/// within native integer width even when the space itself does not fit
pub const MAX_TASK_SPAN: u64 = 1 << 32;
