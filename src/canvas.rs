// The persistent drawing surface.
//
// The canvas raster outlives every frame: draw and erase mutate it in
// place and nothing ever resizes or reallocates it. Background pixels
// stay black; the compositor treats "not black" as ink.

use crate::config::Config;
use crate::draw;
use crate::types::{FrameBuffer, PaletteEntry, Rgb};

pub struct Canvas {
    buffer: FrameBuffer,
    strip: FrameBuffer,
    palette: Vec<PaletteEntry>,
    current: PaletteEntry,
    thickness: i32,
}

impl Canvas {
    /// An empty canvas sized to the frame, with the palette strip
    /// prerendered once. `palette[0]` is the startup color.
    pub fn new(cfg: &Config) -> Self {
        let strip = render_strip(cfg.width, cfg.strip_height, &cfg.palette);
        Self {
            buffer: FrameBuffer::new(cfg.width, cfg.height),
            strip,
            current: cfg.palette[0],
            palette: cfg.palette.clone(),
            thickness: cfg.thickness,
        }
    }

    /// The stroke raster.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// The prerendered palette strip.
    pub fn strip(&self) -> &FrameBuffer {
        &self.strip
    }

    pub fn current_color(&self) -> Rgb {
        self.current.color
    }

    pub fn current_color_name(&self) -> &'static str {
        self.current.name
    }

    /// Pick the palette entry under horizontal pixel coordinate `x`.
    ///
    /// The strip is split into N equal segments by integer division;
    /// an `x` past the last full segment (the division remainder) or
    /// outside the frame changes nothing.
    pub fn select_color(&mut self, x: i32) {
        if x < 0 {
            return;
        }
        let segment = self.buffer.width / self.palette.len();
        let index = x as usize / segment;
        if let Some(entry) = self.palette.get(index) {
            if entry.name != self.current.name {
                log::debug!("color selected: {}", entry.name);
            }
            self.current = *entry;
        }
    }

    /// Rasterize a straight segment of the configured thickness in the
    /// current color. Does nothing when there is no previous point to
    /// connect from (the first frame of a stroke).
    pub fn draw_segment(&mut self, from: Option<(i32, i32)>, to: (i32, i32)) {
        let Some(from) = from else {
            return;
        };
        draw::thick_segment(&mut self.buffer, from, to, self.thickness, self.current.color.pack());
    }

    /// Stamp a background-colored disc of radius 2x thickness at `p`.
    /// Works the same whatever color is selected.
    pub fn erase(&mut self, p: (i32, i32)) {
        draw::fill_circle(&mut self.buffer, p.0, p.1, self.thickness * 2, Rgb::BLACK.pack());
    }
}

/// Render the strip once: N equal-width opaque color blocks. Columns
/// in the integer-division remainder stay background.
fn render_strip(width: usize, height: usize, palette: &[PaletteEntry]) -> FrameBuffer {
    let mut strip = FrameBuffer::new(width, height);
    let segment = width / palette.len();
    for (i, entry) in palette.iter().enumerate() {
        draw::fill_rect(
            &mut strip,
            (i * segment) as i32,
            0,
            segment as i32,
            height as i32,
            entry.color.pack(),
        );
    }
    strip
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: usize, height: usize, palette_len: usize) -> Canvas {
        let all = Config::default().palette;
        let cfg = Config {
            width,
            height,
            palette: all[..palette_len].to_vec(),
            ..Config::default()
        };
        Canvas::new(&cfg)
    }

    fn pixel(c: &Canvas, x: i32, y: i32) -> u32 {
        c.buffer().pixels[y as usize * c.buffer().width + x as usize]
    }

    #[test]
    fn select_color_maps_each_segment_to_its_entry() {
        // 640 / 5 = 128 exactly; probe the middle of each segment.
        let mut c = canvas(640, 480, 5);
        for (i, entry) in Config::default().palette.iter().enumerate() {
            c.select_color((i * 128 + 64) as i32);
            assert_eq!(c.current_color(), entry.color, "segment {i}");
        }
    }

    #[test]
    fn select_color_remainder_is_a_no_op() {
        // 10 / 3 = 3: segments cover x in 0..9, x = 9 is the remainder.
        let mut c = canvas(10, 8, 3);
        let before = c.current_color();
        c.select_color(9);
        assert_eq!(c.current_color(), before);
        // The last full segment still works.
        c.select_color(8);
        assert_eq!(c.current_color(), Config::default().palette[2].color);
    }

    #[test]
    fn select_color_last_pixel_hits_last_entry_when_divisible() {
        let mut c = canvas(640, 480, 5);
        c.select_color(639);
        assert_eq!(c.current_color(), Config::default().palette[4].color);
    }

    #[test]
    fn draw_segment_without_previous_point_changes_nothing() {
        let mut c = canvas(640, 480, 5);
        let before = c.buffer().pixels.clone();
        c.draw_segment(None, (100, 100));
        assert_eq!(c.buffer().pixels, before);
    }

    #[test]
    fn draw_segment_paints_current_color_at_thickness() {
        let mut c = canvas(640, 480, 5);
        let green = Config::default().palette[0].color.pack();
        c.draw_segment(Some((100, 200)), (140, 200));
        // On the segment.
        assert_eq!(pixel(&c, 120, 200), green);
        // Half the 5px thickness above and below.
        assert_eq!(pixel(&c, 120, 198), green);
        assert_eq!(pixel(&c, 120, 202), green);
        // Just past the stroke edge.
        assert_eq!(pixel(&c, 120, 203), 0);
    }

    #[test]
    fn erase_is_idempotent() {
        let mut c = canvas(640, 480, 5);
        c.draw_segment(Some((90, 200)), (130, 200));
        c.erase((110, 200));
        let once = c.buffer().pixels.clone();
        c.erase((110, 200));
        assert_eq!(c.buffer().pixels, once);
    }

    #[test]
    fn erase_clears_ink_regardless_of_selected_color() {
        let mut c = canvas(640, 480, 5);
        c.draw_segment(Some((100, 200)), (120, 200));
        c.select_color(200); // switch to Red
        c.erase((110, 200));
        assert_eq!(pixel(&c, 110, 200), 0);
    }

    #[test]
    fn strip_segments_carry_palette_colors_in_order() {
        let c = canvas(640, 480, 5);
        let strip = c.strip();
        for (i, entry) in Config::default().palette.iter().enumerate() {
            let x = i * 128 + 64;
            assert_eq!(strip.pixels[25 * strip.width + x], entry.color.pack());
        }
    }

    #[test]
    fn strip_remainder_columns_stay_background() {
        let c = canvas(10, 8, 3);
        let strip = c.strip();
        assert_eq!(strip.pixels[9], 0); // row 0, x = 9
    }
}
