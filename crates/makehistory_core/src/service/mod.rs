//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate scanning, scheduling and commit creation into one painting
//!   use case.
//! - Keep CLI layers decoupled from repository backends.

pub mod paint_service;
pub mod painter;
