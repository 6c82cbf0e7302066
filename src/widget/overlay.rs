//! Rectangle overlay painted on top of the page canvas

use image::{Rgb, RgbImage};

use crate::geometry::{Bounds, Rectangle};

/// Unfilled rectangle with a one pixel stroke
#[derive(Debug, Clone, Copy)]
pub struct RectangleOverlay {
    pub bounds: Bounds,
    pub color: [u8; 3],
}

impl RectangleOverlay {
    #[must_use]
    pub fn new(rect: Rectangle, color: [u8; 3]) -> Self {
        Self {
            bounds: rect.bounds(),
            color,
        }
    }

    /// Paint the outline into `canvas`, clipped to its size.
    /// The interior is left untouched.
    pub fn paint(&self, canvas: &mut RgbImage) {
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        if w == 0 || h == 0 {
            return;
        }

        let Bounds {
            left,
            top,
            right,
            bottom,
        } = self.bounds;
        if right < 0 || bottom < 0 || left >= w || top >= h {
            return;
        }

        let color = Rgb(self.color);
        let x_range = left.max(0)..=right.min(w - 1);
        let y_range = top.max(0)..=bottom.min(h - 1);

        for x in x_range.clone() {
            for y in [top, bottom] {
                if (0..h).contains(&y) {
                    canvas.put_pixel(x as u32, y as u32, color);
                }
            }
        }
        for y in y_range {
            for x in [left, right] {
                if (0..w).contains(&x) {
                    canvas.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}
