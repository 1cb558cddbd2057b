//! UI layer for desktop GUI: the single review search window.

pub mod app;

pub use app::{DesktopGuiApp, StartupConfig};
