// Hand keypoint data model and the detector boundary.
//
// Keypoints follow the MediaPipe hand-landmark convention: 21 named
// points in normalized image coordinates (x and y in [0,1], growing
// right and down; z is depth relative to the wrist).

use crate::error::Error;
use crate::types::FrameBuffer;

/// Landmark indices into [`HandLandmarks::points`].
#[allow(dead_code)]
pub mod keypoint {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Bone segments of the hand skeleton, as keypoint index pairs.
/// Used by the overlay renderer.
pub const CONNECTIONS: &[(usize, usize)] = {
    use keypoint::*;
    &[
        // Palm outline
        (WRIST, THUMB_CMC),
        (THUMB_CMC, INDEX_FINGER_MCP),
        (INDEX_FINGER_MCP, MIDDLE_FINGER_MCP),
        (MIDDLE_FINGER_MCP, RING_FINGER_MCP),
        (RING_FINGER_MCP, PINKY_MCP),
        (PINKY_MCP, WRIST),
        // Thumb
        (THUMB_CMC, THUMB_MCP),
        (THUMB_MCP, THUMB_IP),
        (THUMB_IP, THUMB_TIP),
        // Index
        (INDEX_FINGER_MCP, INDEX_FINGER_PIP),
        (INDEX_FINGER_PIP, INDEX_FINGER_DIP),
        (INDEX_FINGER_DIP, INDEX_FINGER_TIP),
        // Middle
        (MIDDLE_FINGER_MCP, MIDDLE_FINGER_PIP),
        (MIDDLE_FINGER_PIP, MIDDLE_FINGER_DIP),
        (MIDDLE_FINGER_DIP, MIDDLE_FINGER_TIP),
        // Ring
        (RING_FINGER_MCP, RING_FINGER_PIP),
        (RING_FINGER_PIP, RING_FINGER_DIP),
        (RING_FINGER_DIP, RING_FINGER_TIP),
        // Pinky
        (PINKY_MCP, PINKY_PIP),
        (PINKY_PIP, PINKY_DIP),
        (PINKY_DIP, PINKY_TIP),
    ]
};

/// One landmark in normalized coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One detected hand: all 21 keypoints plus what the detector knows
/// about the detection itself.
#[derive(Clone, Debug)]
pub struct HandLandmarks {
    pub points: [Keypoint; 21],
    /// Detector confidence in [0,1].
    pub confidence: f32,
    /// "Left" or "Right", as reported by the detector.
    pub handedness: String,
}

impl HandLandmarks {
    /// The index fingertip scaled to pixel coordinates. This is the
    /// cursor for drawing, erasing and color selection alike.
    pub fn cursor(&self, width: usize, height: usize) -> (i32, i32) {
        let tip = self.points[keypoint::INDEX_FINGER_TIP];
        (
            (tip.x * width as f32) as i32,
            (tip.y * height as f32) as i32,
        )
    }

    /// All keypoints scaled to pixel coordinates, in index order.
    pub fn pixel_points(&self, width: usize, height: usize) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.points.iter().map(move |kp| {
            ((kp.x * width as f32) as i32, (kp.y * height as f32) as i32)
        })
    }
}

/// Anything that can look at a frame and produce at most one hand.
///
/// The detection model itself lives behind this boundary; the rest of
/// the application only sees normalized keypoints.
pub trait LandmarkSource {
    /// Detect a hand in `frame`. `Ok(None)` means no (confident
    /// enough) hand this frame, which is the common idle case.
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<HandLandmarks>, Error>;
}
