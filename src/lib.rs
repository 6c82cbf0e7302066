// Export modules for use in tests
pub mod app;
pub mod editor;
pub mod event_source;
pub mod geometry;
pub mod notification;
pub mod panic_handler;
pub mod pdf;
pub mod settings;
pub mod widget;

pub mod test_utils;

// Re-export main app components
pub use app::{App, AppAction, run_app_with_event_source};
