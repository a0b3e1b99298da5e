use tracing::debug;

use crate::capture_pipeline::common::error::{CaptureError, Result};
use crate::capture_pipeline::sensor::session::{AcquiredImage, SensorFrame, SensorSession};
use crate::capture_pipeline::sensor::types::Intrinsics;

/// One synchronized snapshot of the three sensor channels.
///
/// Transient: the image handles keep native sensor buffers alive, so a
/// `RawFrame` must be decoded into owned memory and dropped before the
/// acquisition context resumes other work. Dropping releases all three
/// handles regardless of how the capture attempt ends.
pub struct RawFrame<I: AcquiredImage> {
    pub color: I,
    pub depth: I,
    pub confidence: I,
    /// Calibration of the color texture stream, unscaled.
    pub intrinsics: Intrinsics,
}

/// Obtains one synchronized `RawFrame` from a sensing session.
///
/// Must run on the context that owns the session's per-frame update.
pub struct FrameAcquirer;

impl FrameAcquirer {
    pub fn acquire<S: SensorSession>(
        session: &mut S,
    ) -> Result<RawFrame<<S::Frame as SensorFrame>::Image>> {
        let mut frame = session.update()?;

        let color = frame.acquire_camera_image()?;
        let depth = frame.acquire_raw_depth_image16()?;
        let confidence = frame.acquire_raw_depth_confidence_image()?;

        // All three channels must come from the same sensor frame. A mismatch
        // means the runtime handed us buffers from different update cycles;
        // that is a failed capture, not something to paper over. The handles
        // are dropped (released) on the way out.
        if color.timestamp_ns() != depth.timestamp_ns()
            || depth.timestamp_ns() != confidence.timestamp_ns()
        {
            return Err(CaptureError::CaptureFailed(format!(
                "channel timestamps disagree: color={} depth={} confidence={}",
                color.timestamp_ns(),
                depth.timestamp_ns(),
                confidence.timestamp_ns()
            )));
        }

        debug!(
            timestamp_ns = depth.timestamp_ns(),
            color_size = %format!("{}x{}", color.width(), color.height()),
            depth_size = %format!("{}x{}", depth.width(), depth.height()),
            "Acquired synchronized frame"
        );

        let intrinsics = frame.texture_intrinsics();

        Ok(RawFrame {
            color,
            depth,
            confidence,
            intrinsics,
        })
    }
}
