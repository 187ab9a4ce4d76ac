// Per-frame input routing: turns one classified gesture plus cursor
// into one canvas operation.
//
// The only state carried across frames is the previous cursor point.
// Invariant: a segment is drawn only between two consecutive
// Point-classified frames; any other frame resets continuity.

use crate::canvas::Canvas;
use crate::gesture::Gesture;

/// What the tracked hand contributes this frame.
#[derive(Debug, Clone, Copy)]
pub struct HandInput {
    pub gesture: Gesture,
    /// Index-fingertip position in pixel coordinates.
    pub cursor: (i32, i32),
}

pub struct InputRouter {
    strip_height: i32,
    prev: Option<(i32, i32)>,
    drawing: bool,
}

impl InputRouter {
    pub fn new(strip_height: usize) -> Self {
        Self {
            strip_height: strip_height as i32,
            prev: None,
            drawing: false,
        }
    }

    /// True while a stroke is in progress.
    pub fn drawing(&self) -> bool {
        self.drawing
    }

    /// Route one frame's input to the canvas.
    ///
    /// A cursor inside the palette strip always selects a color, no
    /// matter which gesture was classified.
    pub fn route(&mut self, canvas: &mut Canvas, input: Option<HandInput>) {
        let Some(input) = input else {
            self.reset();
            return;
        };

        let (x, y) = input.cursor;
        if y < self.strip_height {
            canvas.select_color(x);
            self.reset();
            return;
        }

        match input.gesture {
            Gesture::PeaceSign => {
                canvas.select_color(x);
                self.reset();
            }
            Gesture::OpenHand => {
                canvas.erase(input.cursor);
                self.reset();
            }
            Gesture::Point => {
                canvas.draw_segment(self.prev, input.cursor);
                self.prev = Some(input.cursor);
                self.drawing = true;
            }
            Gesture::Unknown => self.reset(),
        }
    }

    fn reset(&mut self) {
        self.prev = None;
        self.drawing = false;
    }
}
