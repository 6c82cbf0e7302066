//! Page viewer: rasterised page plus the rectangle overlay
//!
//! The viewer owns the [`RectangleEditor`] and calls into it from its own
//! mouse handling and rendering. The page itself comes from the document
//! handed in by the caller at render time.

use std::sync::Arc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use image::{Rgb, RgbImage, imageops};
use log::{debug, error};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::overlay::RectangleOverlay;
use super::pixel_canvas::PixelCanvas;
use crate::editor::{PointerEvent, RectangleEditor};
use crate::geometry::Point;
use crate::pdf::{
    CacheKey, Document, DocumentError, Location, PageCache, PageImage, PixelSize, ZoomMode,
};
use crate::settings::Settings;

/// Largest rasterised page edge in pixels
pub const MAX_RASTER_DIMENSION: f32 = 4096.0;

const NO_DOCUMENT_HINT: &str = "No document. Press o to open";

/// How the viewer occupies its area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Presentation {
    /// Framed with a title
    #[default]
    Normal,
    /// Page uses the whole area
    Maximized,
}

pub struct PageViewer {
    editor: RectangleEditor,
    cache: PageCache,
    zoom_mode: ZoomMode,
    presentation: Presentation,
    overlay_color: [u8; 3],
    background: Rgb<u8>,
    view_area: Rect,
    needs_redraw: bool,
    render_error: Option<String>,
}

impl PageViewer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            editor: RectangleEditor::with_hit_tolerance(settings.hit_tolerance),
            cache: PageCache::new(settings.page_cache_size),
            zoom_mode: ZoomMode::default(),
            presentation: Presentation::default(),
            overlay_color: settings.overlay_color.0,
            background: Rgb(settings.background_color.0),
            view_area: Rect::default(),
            needs_redraw: true,
            render_error: None,
        }
    }

    pub fn editor(&self) -> &RectangleEditor {
        &self.editor
    }

    /// Attach a freshly loaded document. Cached pages of the previous one
    /// are dropped.
    pub fn set_document(&mut self, document: &Document) {
        debug!("Viewer attached to {:?}", document.path());
        self.cache.invalidate_all();
        self.render_error = None;
        self.needs_redraw = true;
    }

    pub fn set_zoom_mode(&mut self, mode: ZoomMode) {
        if self.zoom_mode != mode {
            self.zoom_mode = mode;
            self.needs_redraw = true;
        }
    }

    pub fn zoom_mode(&self) -> ZoomMode {
        self.zoom_mode
    }

    pub fn show_maximized(&mut self) {
        if self.presentation != Presentation::Maximized {
            self.presentation = Presentation::Maximized;
            self.needs_redraw = true;
        }
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Area the page pixels were drawn into on the last render
    pub fn view_area(&self) -> Rect {
        self.view_area
    }

    pub fn render_error(&self) -> Option<&str> {
        self.render_error.as_deref()
    }

    /// Map a terminal cell to view pixel coordinates
    pub fn to_view_point(&self, column: u16, row: u16) -> Point {
        Point::new(
            i32::from(column) - i32::from(self.view_area.x),
            (i32::from(row) - i32::from(self.view_area.y)) * 2,
        )
    }

    /// Route a mouse event to the editor. Returns true when the event was
    /// consumed by the viewer.
    ///
    /// Presses start a gesture only inside the view; once started, the
    /// gesture follows the pointer anywhere until the button is released.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        let inside = self
            .view_area
            .contains(Position::new(event.column, event.row));
        let point = self.to_view_point(event.column, event.row);

        let pointer = match event.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => PointerEvent::Down(point),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved
                if self.editor.is_active() =>
            {
                PointerEvent::Move(point)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let was_active = self.editor.is_active();
                if self.editor.pointer_up(point) {
                    self.needs_redraw = true;
                }
                return inside || was_active;
            }
            _ => return false,
        };

        if self.editor.handle(pointer) {
            self.needs_redraw = true;
        }
        true
    }

    /// Draw the viewer into `area`. The page comes from `document`; its
    /// scroll location is clamped to the page as a side effect.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, document: Option<&mut Document>) {
        let inner = match self.presentation {
            Presentation::Normal => {
                let title = document
                    .as_ref()
                    .map(|doc| format!(" {} ", doc.display_name()))
                    .unwrap_or_else(|| " PDF Viewer ".to_string());
                let block = Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray));
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            Presentation::Maximized => area,
        };
        self.view_area = inner;

        let viewport = PixelSize::new(u32::from(inner.width), u32::from(inner.height) * 2);
        let mut canvas = RgbImage::from_pixel(viewport.width, viewport.height, self.background);

        let has_document = document.is_some();
        if let Some(doc) = document {
            match self.compose_page(doc, viewport, &mut canvas) {
                Ok(()) => self.render_error = None,
                Err(e) => {
                    let message = e.to_string();
                    if self.render_error.as_deref() != Some(message.as_str()) {
                        error!("Failed to render page: {message}");
                    }
                    self.render_error = Some(message);
                }
            }
        }

        if let Some(rect) = self.editor.rectangle() {
            RectangleOverlay::new(rect, self.overlay_color).paint(&mut canvas);
        }

        PixelCanvas::new(&canvas).render(inner, buf);

        let message = match (&self.render_error, has_document) {
            (Some(err), _) => Some(err.as_str()),
            (None, false) => Some(NO_DOCUMENT_HINT),
            (None, true) => None,
        };
        if let Some(message) = message {
            render_centered_message(message, inner, buf);
        }

        self.needs_redraw = false;
    }

    fn compose_page(
        &mut self,
        doc: &mut Document,
        viewport: PixelSize,
        canvas: &mut RgbImage,
    ) -> Result<(), DocumentError> {
        if viewport.is_empty() {
            return Ok(());
        }

        let page = doc.navigator().current_page();
        let image = self.page_image(doc, page, viewport)?;

        let location = doc.navigator().location();
        let (x, clamped_x) = place(image.width(), viewport.width, location.x);
        let (y, clamped_y) = place(image.height(), viewport.height, location.y);
        let clamped = Location {
            x: clamped_x,
            y: clamped_y,
        };
        if clamped != location {
            doc.navigator_mut().set_location(clamped);
        }

        imageops::replace(canvas, &*image, x, y);
        Ok(())
    }

    fn page_image(
        &mut self,
        doc: &Document,
        page: usize,
        viewport: PixelSize,
    ) -> Result<Arc<PageImage>, DocumentError> {
        let size = doc.source().page_size(page)?;
        let mut scale =
            self.zoom_mode.fit_scale(size, viewport) * doc.navigator().current_zoom();

        let longest = size.width.max(size.height) * scale;
        if longest > MAX_RASTER_DIMENSION {
            scale *= MAX_RASTER_DIMENSION / longest;
        }

        let key = CacheKey::new(page, scale);
        if let Some(image) = self.cache.get(&key) {
            return Ok(image);
        }

        debug!("Rasterising page {page} at scale {scale:.3}");
        let image = doc.source().render(page, scale)?;
        Ok(self.cache.insert(key, image))
    }
}

/// Offset of an image edge of `size` pixels inside `view` pixels, and the
/// scroll position clamped to the scrollable range. Smaller images are
/// centred and cannot scroll.
fn place(size: u32, view: u32, scroll: u32) -> (i64, u32) {
    if size <= view {
        (i64::from((view - size) / 2), 0)
    } else {
        let scroll = scroll.min(size - view);
        (-i64::from(scroll), scroll)
    }
}

fn render_centered_message(message: &str, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let line_area = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    Paragraph::new(Line::from(message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray).bg(Color::Black))
        .render(line_area, buf);
}
