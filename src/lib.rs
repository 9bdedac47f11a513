//! keytally: per-key press counter.
//!
//! `keytally track` counts key presses from the terminal into a tally that is
//! saved every few seconds and once more on exit; `keytally stats` renders the
//! saved tally as a ranked list or a keyboard heatmap.
//!
//! # Architecture
//!
//! ```text
//! keytally-input ──► keytally-core ──► key_counts.json ──► keytally-tui
//!  (key sources)     (tally engine)                        (stats views)
//! ```
//!
//! This crate is the binary shell: CLI parsing, logging, and the two
//! commands.

pub mod cli;
pub mod logging;
pub mod stats;
pub mod track;
