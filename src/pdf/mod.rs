//! Document access: loading, navigation and page rasterisation

mod cache;
mod controller;
mod error;
mod navigator;
mod source;
mod types;

pub use cache::{CacheKey, DEFAULT_CACHE_SIZE, PageCache};
pub use controller::{Document, DocumentController};
pub use error::DocumentError;
pub use navigator::{Location, PageNavigator, ScrollDirection};
#[cfg(feature = "pdf")]
pub use source::MupdfSource;
pub use source::{DocumentLoader, MupdfLoader, PageSource};
pub use types::*;
