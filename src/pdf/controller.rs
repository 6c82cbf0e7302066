//! Document controller: owns the loaded document and its page cursor

use std::path::{Path, PathBuf};

use log::{debug, info};

use super::error::DocumentError;
use super::navigator::{Location, PageNavigator, ScrollDirection};
use super::source::{DocumentLoader, PageSource};

/// A loaded document together with its navigation state
pub struct Document {
    path: PathBuf,
    source: Box<dyn PageSource>,
    navigator: PageNavigator,
}

impl Document {
    #[must_use]
    pub fn new(path: PathBuf, source: Box<dyn PageSource>) -> Self {
        let navigator = PageNavigator::new(source.page_count());
        Self {
            path,
            source,
            navigator,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn source(&self) -> &dyn PageSource {
        self.source.as_ref()
    }

    #[must_use]
    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut PageNavigator {
        &mut self.navigator
    }

    /// Title from metadata, falling back to the file name
    #[must_use]
    pub fn display_name(&self) -> String {
        self.source.title().unwrap_or_else(|| {
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
        })
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("page_count", &self.source.page_count())
            .field("navigator", &self.navigator)
            .finish_non_exhaustive()
    }
}

/// Loads documents and moves between their pages
pub struct DocumentController {
    loader: Box<dyn DocumentLoader>,
    document: Option<Document>,
}

impl DocumentController {
    #[must_use]
    pub fn new(loader: Box<dyn DocumentLoader>) -> Self {
        Self {
            loader,
            document: None,
        }
    }

    /// Load `path`, replacing the current document on success.
    /// On failure the current document is kept.
    pub fn load(&mut self, path: &Path) -> Result<&Document, DocumentError> {
        info!("Loading document {path:?}");
        let source = self.loader.load(path)?;
        info!("Loaded {path:?}: {} pages", source.page_count());
        Ok(&*self.document.insert(Document::new(path.to_path_buf(), source)))
    }

    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    #[must_use]
    pub fn current_page(&self) -> Option<usize> {
        self.document.as_ref().map(|d| d.navigator.current_page())
    }

    #[must_use]
    pub fn page_count(&self) -> Option<usize> {
        self.document.as_ref().map(|d| d.navigator.page_count())
    }

    /// Advance one page. Returns false at the last page or without a document.
    pub fn next_page(&mut self) -> bool {
        let Some(nav) = self.navigator_mut() else {
            return false;
        };
        let current = nav.current_page();
        if current + 1 >= nav.page_count() {
            return false;
        }
        let zoom = nav.current_zoom();
        nav.jump(current + 1, Location::ORIGIN, zoom);
        debug!("Next page: {}", current + 1);
        true
    }

    /// Go back one page. Returns false at the first page or without a document.
    pub fn previous_page(&mut self) -> bool {
        let Some(nav) = self.navigator_mut() else {
            return false;
        };
        let current = nav.current_page();
        if current == 0 {
            return false;
        }
        let zoom = nav.current_zoom();
        nav.jump(current - 1, Location::ORIGIN, zoom);
        debug!("Previous page: {}", current - 1);
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.navigator_mut().map(PageNavigator::step_in).is_some()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.navigator_mut().map(PageNavigator::step_out).is_some()
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.navigator_mut().map(PageNavigator::reset_zoom).is_some()
    }

    pub fn scroll(&mut self, direction: ScrollDirection) -> bool {
        self.navigator_mut().map(|nav| nav.scroll(direction)).is_some()
    }

    fn navigator_mut(&mut self) -> Option<&mut PageNavigator> {
        self.document.as_mut().map(Document::navigator_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::{FailingLoader, FakeLoader};

    fn controller_with_pages(pages: usize) -> DocumentController {
        let mut controller = DocumentController::new(Box::new(FakeLoader::new(pages)));
        controller.load(Path::new("book.pdf")).unwrap();
        controller
    }

    #[test]
    fn navigation_without_document_is_a_noop() {
        let mut controller = DocumentController::new(Box::new(FakeLoader::new(3)));
        assert!(!controller.next_page());
        assert!(!controller.previous_page());
        assert!(!controller.zoom_in());
        assert_eq!(controller.current_page(), None);
    }

    #[test]
    fn previous_at_first_page_stays() {
        let mut controller = controller_with_pages(3);
        assert!(!controller.previous_page());
        assert_eq!(controller.current_page(), Some(0));
    }

    #[test]
    fn next_at_last_page_stays() {
        let mut controller = controller_with_pages(3);
        assert!(controller.next_page());
        assert!(controller.next_page());
        assert!(!controller.next_page());
        assert_eq!(controller.current_page(), Some(2));
    }

    #[test]
    fn single_page_document_never_moves() {
        let mut controller = controller_with_pages(1);
        assert!(!controller.next_page());
        assert!(!controller.previous_page());
        assert_eq!(controller.current_page(), Some(0));
    }

    #[test]
    fn interior_moves_by_one_and_preserves_zoom() {
        let mut controller = controller_with_pages(5);
        controller.next_page();
        controller.next_page();
        controller.zoom_in();
        controller.scroll(ScrollDirection::Down);
        let zoom = controller.document().unwrap().navigator().current_zoom();

        assert!(controller.next_page());
        let nav = controller.document().unwrap().navigator();
        assert_eq!(nav.current_page(), 3);
        assert!((nav.current_zoom() - zoom).abs() < f32::EPSILON);
        assert_eq!(nav.location(), Location::ORIGIN);

        controller.scroll(ScrollDirection::Down);
        assert!(controller.previous_page());
        let nav = controller.document().unwrap().navigator();
        assert_eq!(nav.current_page(), 2);
        assert!((nav.current_zoom() - zoom).abs() < f32::EPSILON);
        assert_eq!(nav.location(), Location::ORIGIN);
    }

    #[test]
    fn failed_load_keeps_current_document() {
        let mut controller = controller_with_pages(4);
        controller.next_page();

        controller.loader = Box::new(FailingLoader);
        assert!(controller.load(Path::new("broken.pdf")).is_err());

        let doc = controller.document().unwrap();
        assert_eq!(doc.path(), Path::new("book.pdf"));
        assert_eq!(controller.current_page(), Some(1));
    }

    #[test]
    fn reload_resets_cursor() {
        let mut controller = controller_with_pages(4);
        controller.next_page();
        controller.load(Path::new("other.pdf")).unwrap();
        assert_eq!(controller.current_page(), Some(0));
        assert_eq!(controller.document().unwrap().display_name(), "other.pdf");
    }
}
