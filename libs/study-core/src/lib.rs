//! Spaced repetition scheduling for flashcard study sessions.
//!
//! Provides:
//! - SM-2 update rule behind the `SpacedRepetitionAlgorithm` trait
//! - `Scheduler` for grading cards and querying due cards and statistics
//! - `ReviewStore` abstraction with an in-memory implementation
//! - JSON snapshots of a whole record collection

pub mod algorithm;
pub mod calendar;
pub mod error;
pub mod scheduler;
pub mod snapshot;
pub mod store;
pub mod types;

pub use algorithm::{sm2::Sm2, SpacedRepetitionAlgorithm};
pub use error::{Result, SchedulerError};
pub use scheduler::Scheduler;
pub use snapshot::Snapshot;
pub use store::{MemoryStore, ReviewStore};
pub use types::{Performance, ReviewRecord, SchedulerSettings, StudyStatistics};
