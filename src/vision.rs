// Frame operations between the camera and the window: selfie mirror,
// gamma-correct compositing of the canvas over the live feed, and the
// opaque palette-strip overlay.

use crate::error::Error;
use crate::types::FrameBuffer;

/// Canvas pixels equal to this value carry no ink.
const BACKGROUND: u32 = 0;

/// How much of the ink color ends up in a composited pixel.
const INK_WEIGHT: f32 = 0.5;

/// Precomputed sRGB <-> linear tables so compositing does not call
/// powf per channel per pixel.
pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255), quantized to 4096 steps
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, out) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *out = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, out) in l2s.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *out = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    fn to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    fn to_srgb(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }
}

/// Flip the frame left-to-right so the window behaves like a mirror.
/// The flip happens before detection, so canvas coordinates and hand
/// coordinates agree.
pub fn mirror_horizontal(fb: &mut FrameBuffer) {
    for row in fb.pixels.chunks_exact_mut(fb.width) {
        row.reverse();
    }
}

/// Merge the canvas into the live frame, then lay the palette strip
/// over the top rows.
///
/// Where the canvas holds ink, live and ink mix half-and-half in
/// linear light; everywhere else the live pixel passes through
/// untouched. Black ink is indistinguishable from background and so
/// never shows, matching the canvas invariants.
pub fn composite(
    live: &mut FrameBuffer,
    canvas: &FrameBuffer,
    strip: &FrameBuffer,
    lut: &GammaLut,
) -> Result<(), Error> {
    if live.width != canvas.width || live.height != canvas.height {
        return Err(Error::CameraFrame("composite: canvas dimension mismatch".into()));
    }
    if strip.width != live.width {
        return Err(Error::CameraFrame("composite: strip width mismatch".into()));
    }

    let len = live.width * live.height;
    for i in 0..len {
        let ink = canvas.pixels[i];
        if ink == BACKGROUND {
            continue;
        }

        let pl = live.pixels[i];
        let r = blend_channel(lut, (pl >> 16) as u8, (ink >> 16) as u8);
        let g = blend_channel(lut, (pl >> 8) as u8, (ink >> 8) as u8);
        let b = blend_channel(lut, pl as u8, ink as u8);
        live.pixels[i] = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
    }

    // The strip is opaque UI, not part of the scene.
    let rows = strip.height.min(live.height);
    for y in 0..rows {
        let ofs = y * live.width;
        live.pixels[ofs..ofs + live.width]
            .copy_from_slice(&strip.pixels[ofs..ofs + live.width]);
    }

    Ok(())
}

#[inline]
fn blend_channel(lut: &GammaLut, live: u8, ink: u8) -> u8 {
    let mixed = INK_WEIGHT * lut.to_linear(ink) + (1.0 - INK_WEIGHT) * lut.to_linear(live);
    lut.to_srgb(mixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, color: u32) -> FrameBuffer {
        FrameBuffer { width, height, pixels: vec![color; width * height] }
    }

    #[test]
    fn mirror_swaps_columns_and_is_an_involution() {
        let mut fb = FrameBuffer::new(4, 2);
        for (i, px) in fb.pixels.iter_mut().enumerate() {
            *px = i as u32;
        }
        let original = fb.pixels.clone();

        mirror_horizontal(&mut fb);
        assert_eq!(fb.pixels, vec![3, 2, 1, 0, 7, 6, 5, 4]);

        mirror_horizontal(&mut fb);
        assert_eq!(fb.pixels, original);
    }

    #[test]
    fn composite_blends_ink_and_passes_through_the_rest() {
        let lut = GammaLut::new();
        let mut live = solid(4, 4, 0x00FFFFFF);
        let mut canvas = FrameBuffer::new(4, 4);
        canvas.pixels[2 * 4 + 1] = 0x0000FF00; // one green ink pixel
        let strip = FrameBuffer::new(4, 0);

        composite(&mut live, &canvas, &strip, &lut).unwrap();

        // Non-ink pixels are untouched.
        assert_eq!(live.pixels[0], 0x00FFFFFF);
        // The ink pixel keeps full green and loses some red/blue.
        let px = live.pixels[2 * 4 + 1];
        let (r, g, b) = ((px >> 16) & 0xFF, (px >> 8) & 0xFF, px & 0xFF);
        assert_eq!(g, 255);
        assert_eq!(r, b);
        assert!(r > 0 && r < 255);
    }

    #[test]
    fn composite_lays_the_strip_over_the_top_rows() {
        let lut = GammaLut::new();
        let mut live = solid(4, 4, 0x00FFFFFF);
        let canvas = FrameBuffer::new(4, 4);
        let strip = solid(4, 2, 0x000000FF);

        composite(&mut live, &canvas, &strip, &lut).unwrap();

        assert!(live.pixels[..8].iter().all(|&p| p == 0x000000FF));
        assert!(live.pixels[8..].iter().all(|&p| p == 0x00FFFFFF));
    }

    #[test]
    fn composite_rejects_mismatched_canvas() {
        let lut = GammaLut::new();
        let mut live = solid(4, 4, 0);
        let canvas = FrameBuffer::new(5, 4);
        let strip = FrameBuffer::new(4, 1);
        assert!(composite(&mut live, &canvas, &strip, &lut).is_err());
    }
}
