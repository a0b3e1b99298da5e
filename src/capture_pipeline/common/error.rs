use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No active sensing session")]
    NoActiveSession,

    #[error("Timed out acquiring sensor frame: {0}")]
    AcquireTimeout(String),

    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    #[error("Malformed plane: {0}")]
    MalformedPlane(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Failed to encode TIFF page: {0}")]
    EncodeError(String),

    #[error("File is empty or append failed: {0}")]
    SaveFailed(String),

    #[error("A capture is already in progress")]
    Busy,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CaptureError {
    /// Wire-level error code reported to the caller alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            CaptureError::NoActiveSession
            | CaptureError::AcquireTimeout(_)
            | CaptureError::SensorUnavailable(_)
            | CaptureError::MalformedPlane(_)
            | CaptureError::CaptureFailed(_) => "CAPTURE_FAILED",
            CaptureError::EncodeError(_) | CaptureError::IoError(_) => "IO_ERROR",
            CaptureError::SaveFailed(_) => "SAVE_FAILED",
            CaptureError::Busy => "BUSY",
        }
    }
}

pub type Result<T> = std::result::Result<T, CaptureError>;
