//! Core painting engine stages.
//!
//! # Responsibility
//! - `mapper`: bitmap to per-cell target counts.
//! - `scanner`: repository history to observed per-cell counts.
//! - `scheduler`: target minus observed to ordered commit requests.
//!
//! # Invariants
//! - Every stage is deterministic for identical inputs.
//! - Only the scanner touches the repository, and only for reading.

pub mod mapper;
pub mod scanner;
pub mod scheduler;
