//! Hand-landmark detection via a MediaPipe helper subprocess.
//!
//! The landmark model is a black box on the far side of a pipe. The
//! protocol with `hand_detect.py`:
//!
//! - startup: the child prints `READY` once the model is loaded
//! - per frame: we write a 12-byte header (width, height, channels,
//!   each little-endian u32) followed by the raw RGB bytes, and read
//!   back exactly one JSON line:
//!   `{"hands":[{"handedness":...,"score":...,"landmarks":[{"x":..,"y":..,"z":..}; 21]}]}`
//!
//! # Setup
//!
//! ```text
//! python3 -m venv .venv
//! .venv/bin/pip install mediapipe numpy
//! ```

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use serde::Deserialize;

use crate::error::Error;
use crate::hand::{HandLandmarks, Keypoint, LandmarkSource};
use crate::types::FrameBuffer;

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    handedness: String,
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

pub struct MediaPipeTracker {
    process: Child,
    stdout_reader: BufReader<ChildStdout>,
    min_confidence: f32,
    rgb: Vec<u8>, // reused per-frame staging buffer
}

impl MediaPipeTracker {
    /// Start the detector subprocess and wait for its ready signal.
    /// Prefers the project venv's interpreter when one exists.
    pub fn spawn(script: &Path, min_confidence: f32) -> Result<Self, Error> {
        if !script.exists() {
            return Err(Error::TrackerInit(format!(
                "detector script not found at {}",
                script.display()
            )));
        }

        let venv_python = Path::new(".venv/bin/python");
        let python = if venv_python.exists() {
            venv_python
        } else {
            Path::new("python3")
        };

        log::info!("starting hand detector: {} {}", python.display(), script.display());

        let mut process = Command::new(python)
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::TrackerInit(format!("spawn detector: {e}")))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| Error::TrackerInit("detector stdout unavailable".into()))?;
        let mut stdout_reader = BufReader::new(stdout);

        let mut ready = String::new();
        stdout_reader
            .read_line(&mut ready)
            .map_err(|e| Error::TrackerInit(format!("read ready signal: {e}")))?;
        if ready.trim() != "READY" {
            return Err(Error::TrackerInit(format!(
                "detector did not signal ready, got: {ready:?}"
            )));
        }

        log::info!("hand detector ready");

        Ok(Self {
            process,
            stdout_reader,
            min_confidence,
            rgb: Vec::new(),
        })
    }
}

impl LandmarkSource for MediaPipeTracker {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<HandLandmarks>, Error> {
        // Unpack 0x00RRGGBB into the RGB byte layout the child expects.
        self.rgb.clear();
        self.rgb.reserve(frame.pixels.len() * 3);
        for &px in &frame.pixels {
            self.rgb.push((px >> 16) as u8);
            self.rgb.push((px >> 8) as u8);
            self.rgb.push(px as u8);
        }

        let stdin = self
            .process
            .stdin
            .as_mut()
            .ok_or_else(|| Error::TrackerIo("detector stdin unavailable".into()))?;

        stdin
            .write_all(&(frame.width as u32).to_le_bytes())
            .and_then(|_| stdin.write_all(&(frame.height as u32).to_le_bytes()))
            .and_then(|_| stdin.write_all(&3u32.to_le_bytes()))
            .and_then(|_| stdin.write_all(&self.rgb))
            .and_then(|_| stdin.flush())
            .map_err(|e| Error::TrackerIo(format!("send frame: {e}")))?;

        let mut response = String::new();
        self.stdout_reader
            .read_line(&mut response)
            .map_err(|e| Error::TrackerIo(format!("read detection: {e}")))?;
        if response.is_empty() {
            return Err(Error::TrackerIo("detector closed its pipe".into()));
        }

        parse_detection(&response, self.min_confidence)
    }
}

impl Drop for MediaPipeTracker {
    fn drop(&mut self) {
        let _ = self.process.kill();
    }
}

/// Decode one detection line. Detector-side errors and unusable hands
/// count as "no hand", not as application errors.
fn parse_detection(line: &str, min_confidence: f32) -> Result<Option<HandLandmarks>, Error> {
    let result: DetectionJson = serde_json::from_str(line)
        .map_err(|e| Error::TrackerProtocol(format!("bad detection line: {e}")))?;

    if let Some(error) = result.error {
        log::warn!("detector error: {error}");
        return Ok(None);
    }

    for hand in result.hands {
        if hand.score < min_confidence {
            continue;
        }
        if hand.landmarks.len() != 21 {
            log::warn!("expected 21 landmarks, got {}", hand.landmarks.len());
            continue;
        }

        let mut points = [Keypoint::default(); 21];
        for (point, lm) in points.iter_mut().zip(&hand.landmarks) {
            *point = Keypoint { x: lm.x, y: lm.y, z: lm.z };
        }

        log::debug!(
            "hand detected: {} score={:.2} index_tip=({:.3},{:.3})",
            hand.handedness,
            hand.score,
            points[8].x,
            points[8].y
        );

        return Ok(Some(HandLandmarks {
            points,
            confidence: hand.score,
            handedness: hand.handedness,
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canned_line(score: f32, count: usize) -> String {
        let lm: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"x":0.{i:02},"y":0.5,"z":0.0}}"#))
            .collect();
        format!(
            r#"{{"hands":[{{"handedness":"Right","score":{score},"landmarks":[{}]}}]}}"#,
            lm.join(",")
        )
    }

    #[test]
    fn parses_a_confident_hand() {
        let hand = parse_detection(&canned_line(0.9, 21), 0.5)
            .unwrap()
            .unwrap();
        assert_eq!(hand.handedness, "Right");
        assert_eq!(hand.confidence, 0.9);
        assert!((hand.points[8].x - 0.08).abs() < 1e-6);
        assert!((hand.points[20].x - 0.20).abs() < 1e-6);
    }

    #[test]
    fn rejects_low_confidence_hands() {
        assert!(parse_detection(&canned_line(0.3, 21), 0.5).unwrap().is_none());
    }

    #[test]
    fn rejects_wrong_landmark_counts() {
        assert!(parse_detection(&canned_line(0.9, 20), 0.5).unwrap().is_none());
    }

    #[test]
    fn detector_error_means_no_hand() {
        let got = parse_detection(r#"{"hands":[],"error":"model choked"}"#, 0.5).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn empty_detection_means_no_hand() {
        assert!(parse_detection(r#"{"hands":[]}"#, 0.5).unwrap().is_none());
    }

    #[test]
    fn garbage_is_a_protocol_error() {
        assert!(parse_detection("not json at all", 0.5).is_err());
    }
}
