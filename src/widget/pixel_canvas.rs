//! Half-block rendering of an RGB canvas
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background.

use image::RgbImage;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

pub const UPPER_HALF_BLOCK: &str = "▀";

/// Draws a canvas of `area.width x 2*area.height` pixels into `area`.
/// Pixels outside the canvas are left as they are in the buffer.
#[derive(Debug, Clone, Copy)]
pub struct PixelCanvas<'a> {
    canvas: &'a RgbImage,
}

impl<'a> PixelCanvas<'a> {
    pub fn new(canvas: &'a RgbImage) -> Self {
        Self { canvas }
    }
}

fn rgb(px: &image::Rgb<u8>) -> Color {
    let [r, g, b] = px.0;
    Color::Rgb(r, g, b)
}

impl Widget for PixelCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        let (w, h) = (self.canvas.width(), self.canvas.height());

        for row in 0..area.height {
            let top_y = u32::from(row) * 2;
            if top_y >= h {
                break;
            }
            for col in 0..area.width {
                let x = u32::from(col);
                if x >= w {
                    break;
                }

                let top = rgb(self.canvas.get_pixel(x, top_y));
                let bottom = if top_y + 1 < h {
                    rgb(self.canvas.get_pixel(x, top_y + 1))
                } else {
                    Color::Reset
                };

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF_BLOCK).set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}
