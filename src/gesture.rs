// Gesture classification: pure thresholding on keypoint geometry.
// No state, no I/O; one call per frame.

use crate::hand::{HandLandmarks, keypoint};

/// Max horizontal spread (normalized units) between index and middle
/// fingertip for them to count as "raised together".
const PEACE_X_TOLERANCE: f32 = 0.1;

/// What the hand is doing this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Index finger leading: drawing mode.
    Point,
    /// Index and middle fingers raised together: color selection.
    PeaceSign,
    /// Relaxed hand: erasing.
    OpenHand,
    /// No hand in the frame.
    Unknown,
}

/// Classify one frame's detection result.
///
/// The checks run in a fixed order: PeaceSign first, then OpenHand,
/// and anything else with a hand present is Point. The order matters;
/// a peace sign must not be read as an open hand.
pub fn classify(hand: Option<&HandLandmarks>) -> Gesture {
    let Some(hand) = hand else {
        return Gesture::Unknown;
    };

    if is_peace_sign(hand) {
        Gesture::PeaceSign
    } else if is_open_hand(hand) {
        Gesture::OpenHand
    } else {
        Gesture::Point
    }
}

/// Index tip above the middle tip (y grows downward) with both tips
/// roughly on the same vertical: two fingers up, held together.
fn is_peace_sign(hand: &HandLandmarks) -> bool {
    let index = hand.points[keypoint::INDEX_FINGER_TIP];
    let middle = hand.points[keypoint::MIDDLE_FINGER_TIP];
    index.y < middle.y && (index.x - middle.x).abs() < PEACE_X_TOLERANCE
}

/// Index tip below the middle tip and thumb tip below the index tip.
/// A crude stand-in for a relaxed open hand; it only looks at the
/// vertical order of three points, so it is sensitive to hand
/// orientation. Kept as-is.
fn is_open_hand(hand: &HandLandmarks) -> bool {
    let index = hand.points[keypoint::INDEX_FINGER_TIP];
    let middle = hand.points[keypoint::MIDDLE_FINGER_TIP];
    let thumb = hand.points[keypoint::THUMB_TIP];
    index.y > middle.y && thumb.y > index.y
}
