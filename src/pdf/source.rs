//! Page sources: the boundary to the PDF engine
//!
//! Everything above this module only sees [`PageSource`], so the view and
//! controller can be driven by an in-memory source in tests.

use std::path::Path;

use super::error::DocumentError;
use super::types::{PageImage, PageSize};

/// A loaded, paginated document that can rasterise its pages
pub trait PageSource {
    /// Number of pages (always at least one for a loaded document)
    fn page_count(&self) -> usize;

    /// Size of a page in points
    fn page_size(&self, page: usize) -> Result<PageSize, DocumentError>;

    /// Rasterise a page at `scale` pixels per point
    fn render(&self, page: usize, scale: f32) -> Result<PageImage, DocumentError>;

    /// Document title from its metadata, if any
    fn title(&self) -> Option<String> {
        None
    }
}

/// Opens documents from the file system
pub trait DocumentLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn PageSource>, DocumentError>;
}

/// Loader backed by MuPDF
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfLoader;

#[cfg(feature = "pdf")]
impl DocumentLoader for MupdfLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn PageSource>, DocumentError> {
        Ok(Box::new(mupdf_source::MupdfSource::open(path)?))
    }
}

#[cfg(not(feature = "pdf"))]
impl DocumentLoader for MupdfLoader {
    fn load(&self, _path: &Path) -> Result<Box<dyn PageSource>, DocumentError> {
        Err(DocumentError::Unsupported)
    }
}

#[cfg(feature = "pdf")]
pub use mupdf_source::MupdfSource;

#[cfg(feature = "pdf")]
mod mupdf_source {
    use std::path::Path;

    use log::debug;
    use mupdf::{Colorspace, Document, Matrix, Pixmap};

    use super::{DocumentError, PageImage, PageSize, PageSource};

    /// A PDF opened with MuPDF
    pub struct MupdfSource {
        doc: Document,
        page_count: usize,
    }

    impl MupdfSource {
        pub fn open(path: &Path) -> Result<Self, DocumentError> {
            let doc = Document::open(path.to_string_lossy().as_ref())?;
            let page_count = usize::try_from(doc.page_count()?).unwrap_or(0);
            if page_count == 0 {
                return Err(DocumentError::Empty);
            }
            debug!("Opened {path:?} with {page_count} pages");
            Ok(Self { doc, page_count })
        }

        fn load_page(&self, page: usize) -> Result<mupdf::Page, DocumentError> {
            if page >= self.page_count {
                return Err(DocumentError::PageOutOfRange {
                    page,
                    count: self.page_count,
                });
            }
            Ok(self.doc.load_page(page as i32)?)
        }
    }

    impl PageSource for MupdfSource {
        fn page_count(&self) -> usize {
            self.page_count
        }

        fn page_size(&self, page: usize) -> Result<PageSize, DocumentError> {
            let bounds = self.load_page(page)?.bounds()?;
            Ok(PageSize::new(bounds.x1 - bounds.x0, bounds.y1 - bounds.y0))
        }

        fn render(&self, page: usize, scale: f32) -> Result<PageImage, DocumentError> {
            let page = self.load_page(page)?;
            let transform = Matrix::new_scale(scale, scale);
            let rgb = Colorspace::device_rgb();
            let pixmap = page.to_pixmap(&transform, &rgb, false, false)?;
            pixmap_to_image(&pixmap)
        }

        fn title(&self) -> Option<String> {
            self.doc
                .metadata(mupdf::MetadataName::Title)
                .ok()
                .filter(|t| !t.is_empty())
        }
    }

    fn pixmap_to_image(pixmap: &Pixmap) -> Result<PageImage, DocumentError> {
        let n = pixmap.n() as usize;
        if n < 3 {
            return Err(DocumentError::generic(format!(
                "Unsupported pixmap format: {n} channels"
            )));
        }

        let width = pixmap.width() as usize;
        let height = pixmap.height() as usize;
        let stride = pixmap.stride() as usize;
        let samples = pixmap.samples();
        let row_bytes = width * n;
        if samples.len() < stride.saturating_mul(height) || row_bytes > stride {
            return Err(DocumentError::generic("Pixmap buffer size mismatch"));
        }

        let mut out = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            let row = &samples[y * stride..y * stride + row_bytes];
            if n == 3 {
                out.extend_from_slice(row);
            } else {
                for px in row.chunks_exact(n) {
                    out.extend_from_slice(&px[..3]);
                }
            }
        }

        PageImage::from_raw(pixmap.width(), pixmap.height(), out)
            .ok_or_else(|| DocumentError::generic("Pixmap buffer size mismatch"))
    }
}
