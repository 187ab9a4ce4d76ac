// Application configuration. Everything is overridable at construction;
// the defaults reproduce the stock setup (640x480 feed, 50px palette
// strip, 5px strokes, five-color palette starting on Green).

use std::path::PathBuf;

use crate::types::{PaletteEntry, Rgb};

#[derive(Debug, Clone)]
pub struct Config {
    /// Camera device index (0 = default webcam).
    pub camera_index: u32,
    /// Requested frame width in pixels.
    pub width: usize,
    /// Requested frame height in pixels.
    pub height: usize,
    /// Height of the color-selection strip at the top of the window.
    pub strip_height: usize,
    /// Stroke thickness in pixels.
    pub thickness: i32,
    /// Ordered drawing palette. Must be non-empty; entry 0 is the
    /// startup color and the order fixes the strip layout.
    pub palette: Vec<PaletteEntry>,
    /// Helper script implementing the hand-landmark detector.
    pub detector_script: PathBuf,
    /// Hands below this detector confidence are ignored.
    pub min_confidence: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_index: 0,
            width: 640,
            height: 480,
            strip_height: 50,
            thickness: 5,
            palette: vec![
                PaletteEntry { name: "Green", color: Rgb::new(0, 255, 0) },
                PaletteEntry { name: "Red", color: Rgb::new(255, 0, 0) },
                PaletteEntry { name: "Blue", color: Rgb::new(0, 0, 255) },
                PaletteEntry { name: "Yellow", color: Rgb::new(255, 255, 0) },
                PaletteEntry { name: "Black", color: Rgb::new(0, 0, 0) },
            ],
            detector_script: PathBuf::from("hand_detect.py"),
            min_confidence: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_nonempty_and_starts_green() {
        let cfg = Config::default();
        assert!(!cfg.palette.is_empty());
        assert_eq!(cfg.palette[0].name, "Green");
        assert_eq!(cfg.palette[0].color, Rgb::new(0, 255, 0));
    }

    #[test]
    fn default_strip_fits_inside_frame() {
        let cfg = Config::default();
        assert!(cfg.strip_height < cfg.height);
    }
}
