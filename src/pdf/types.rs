//! Core types shared by the document and view layers

use image::RgbImage;

/// Rasterised page, 8-bit RGB
pub type PageImage = RgbImage;

/// Page dimensions in PDF points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Viewport size in view pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// How a page is scaled into the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoomMode {
    /// Whole page visible
    #[default]
    FitInView,
    /// Page width matches the viewport width
    FitToWidth,
}

impl ZoomMode {
    /// Scale that maps a page of `page` points onto `viewport` pixels
    #[must_use]
    pub fn fit_scale(self, page: PageSize, viewport: PixelSize) -> f32 {
        if page.width <= 0.0 || page.height <= 0.0 || viewport.is_empty() {
            return 1.0;
        }

        let by_width = viewport.width as f32 / page.width;
        match self {
            ZoomMode::FitToWidth => by_width,
            ZoomMode::FitInView => by_width.min(viewport.height as f32 / page.height),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomMode::FitInView => "fit",
            ZoomMode::FitToWidth => "width",
        }
    }
}
