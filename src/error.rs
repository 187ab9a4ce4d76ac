// One error type for the whole application.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),      // Creating the window failed
    WindowUpdate(String),    // Updating the window buffer failed
    CameraInit(String),      // Opening/starting the camera failed
    CameraFrame(String),     // Grabbing/decoding a frame failed
    TrackerInit(String),     // Spawning or handshaking the detector subprocess failed
    TrackerIo(String),       // Frame exchange with the detector subprocess failed
    TrackerProtocol(String), // The detector answered with something we can't parse
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::CameraFrame(s) => write!(f, "Camera frame error: {s}"),
            Error::TrackerInit(s) => write!(f, "Tracker init error: {s}"),
            Error::TrackerIo(s) => write!(f, "Tracker I/O error: {s}"),
            Error::TrackerProtocol(s) => write!(f, "Tracker protocol error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
