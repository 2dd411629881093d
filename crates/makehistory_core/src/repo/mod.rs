//! Repository port and its backends.
//!
//! # Responsibility
//! - Define the version-control capability the painting pipeline consumes.
//! - Isolate `git2` details from planning, scanning and scheduling.
//!
//! # Invariants
//! - The core only ever sees `CommitId` handles plus accessor calls.
//! - Repository handles are owned by callers (directly or via
//!   `RepositoryRegistry`); there is no process-global repository state.

pub mod git_repo;
pub mod memory_repo;
pub mod port;
pub mod registry;
