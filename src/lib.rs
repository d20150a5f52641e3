//! filehop - Learn which files an agent reads next, and prefetch them
//!
//! This library mines agent session logs (JSONL tool-use records) for
//! consecutive file reads, aggregates them into a first-order transition
//! model, persists the model in a sorted-set store and predicts the next
//! files to read from one or more currently open files.

pub mod cli;
pub mod config;
pub mod parser;
pub mod predict;
pub mod report;
pub mod session;
pub mod stats;
pub mod store;
pub mod sync;
pub mod transition;
