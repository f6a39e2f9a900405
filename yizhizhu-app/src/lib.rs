//! Yizhizhu Desktop Application
//!
//! GTK4/Libadwaita shell around the shared logic in `yizhizhu-common`:
//! - Main window with sidebar navigation
//! - Registration wizard with breadcrumb trail
//! - Code browser with drag-and-drop import and preview
//! - Settings and manual pages

// Re-export from yizhizhu-common for convenience
pub use yizhizhu_common::{config, flow, form, import, notice, paths, preview, revert, validate, wizard};

pub mod ui;
