//! keytally-core: tally engine for keytally.
//!
//! This crate holds everything with concurrency or durability semantics: the
//! shared [`TallyStore`], the periodic [`PersistenceScheduler`], the
//! [`ShutdownCoordinator`], and the [`IntakeLoop`] that feeds the store from a
//! [`KeySource`].
//!
//! # Architecture
//!
//! ```text
//! KeySource ──► IntakeLoop ──► normalize ──► TallyStore ──► key_counts.json
//!                                               ▲
//!                      PersistenceScheduler ────┤
//!                      ShutdownCoordinator ─────┘
//! ```

pub mod config;
pub mod error;
pub mod intake;
pub mod normalizer;
pub mod scheduler;
pub mod session;
pub mod shutdown;
pub mod signals;
pub mod source;
pub mod store;
pub mod types;

pub use error::{SourceError, StoreError};
pub use intake::{IntakeLoop, IntakeReport};
pub use normalizer::normalize;
pub use scheduler::{PersistenceScheduler, SchedulerReport};
pub use session::{Session, SessionSettings, SessionSummary};
pub use shutdown::{SessionState, ShutdownCoordinator, ShutdownReason};
pub use source::KeySource;
pub use store::{FlushReport, LoadOutcome, Snapshot, Tally, TallyStore};
pub use types::{InputEvent, KeyId, KeyPress};
