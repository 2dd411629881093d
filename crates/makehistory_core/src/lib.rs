//! Core painting engine for MakeHistory.
//! This crate is the single source of truth for calendar-painting invariants.

pub mod config;
pub mod error;
pub mod glyph;
pub mod logging;
pub mod model;
pub mod plan;
pub mod repo;
pub mod service;

pub use config::{
    ConfigError, PaintConfig, DEFAULT_COMMITS_PER_UNIT, DEFAULT_MARKER_PREFIX,
    MAX_COMMITS_PER_UNIT,
};
pub use error::{PaintError, PaintResult};
pub use glyph::{image_names, lookup, named_image, render_text, GlyphError};
pub use logging::{
    default_log_level, init_console_logging, init_logging, logging_status, LogTarget,
};
pub use model::calendar::{
    AnchorOutOfRange, CalendarAnchor, CellPosition, GridCell, PaintingRequest,
};
pub use model::matrix::{IntensityMatrix, MatrixError, GRID_COLUMNS, GRID_ROWS, MAX_INTENSITY};
pub use model::progress::{ProgressRecord, ScanStats};
pub use plan::mapper::map_to_plan;
pub use plan::scanner::{scan, scan_with_stats};
pub use plan::scheduler::PaintingScheduler;
pub use repo::git_repo::GitRepository;
pub use repo::memory_repo::MemoryRepository;
pub use repo::port::{CommitId, RepoError, RepoResult, RepositoryPort, WalkOrder};
pub use repo::registry::RepositoryRegistry;
pub use service::paint_service::{PaintOutcome, PaintService, PendingPaint};
pub use service::painter::{apply_requests, ApplyReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
