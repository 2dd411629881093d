//! Painting domain model.
//!
//! # Responsibility
//! - Define the bitmap, calendar geometry and progress records shared by the
//!   planning, scanning and scheduling stages.
//!
//! # Invariants
//! - Every in-bounds cell maps to exactly one calendar date for a given anchor.
//! - Models are plain values; repository state never leaks in here.

pub mod calendar;
pub mod matrix;
pub mod progress;
