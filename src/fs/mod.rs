//! Filesystem module.
//!
//! Provides:
//! - Path probing and directory management
//! - Tweet cache persistence
//! - Filename validation

pub mod cache;
pub mod naming;
pub mod paths;

pub use cache::{load_cache, save_cache};
pub use naming::{check_file_name, partial_path};
pub use paths::{ensure_dir, expect_regular_file, file_status, FileStatus};
