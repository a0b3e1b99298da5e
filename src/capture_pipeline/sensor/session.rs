//! Upstream sensing-session interface.
//!
//! These traits model the sensor stack the pipeline consumes: a session that
//! is driven one frame at a time, frames that hand out native image buffers,
//! and image handles whose backing memory is only valid until the handle is
//! dropped. Implementations own the native release in their `Drop`, so every
//! exit path of the acquiring code frees the sensor buffers.

use crate::capture_pipeline::common::error::Result;
use crate::capture_pipeline::sensor::types::{Intrinsics, PlaneBuffer};

/// A native image handle acquired from a sensor frame.
///
/// Backing buffers belong to the sensing runtime; they must be fully decoded
/// into owned memory before the handle is dropped. Dropping the handle is the
/// release.
pub trait AcquiredImage {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Capture timestamp of the underlying sensor frame, in nanoseconds.
    fn timestamp_ns(&self) -> i64;
    fn plane_count(&self) -> usize;
    /// Borrowed view of plane `index`. Panics if `index >= plane_count()`.
    fn plane(&self, index: usize) -> PlaneBuffer<'_>;
}

/// One frame produced by a session update.
pub trait SensorFrame {
    type Image: AcquiredImage;

    /// YUV420 color image: plane 0 = Y, plane 1 = U, plane 2 = V.
    fn acquire_camera_image(&mut self) -> Result<Self::Image>;
    /// Single-plane 16-bit depth image, little-endian millimeters.
    fn acquire_raw_depth_image16(&mut self) -> Result<Self::Image>;
    /// Single-plane 8-bit depth confidence image.
    fn acquire_raw_depth_confidence_image(&mut self) -> Result<Self::Image>;
    /// Calibration of the color texture stream this frame was drawn from.
    fn texture_intrinsics(&self) -> Intrinsics;
}

/// The sensing session. Exclusively owned and advanced by the acquisition
/// context; `update` moves the session's internal frame counter forward.
pub trait SensorSession {
    type Frame: SensorFrame;

    fn update(&mut self) -> Result<Self::Frame>;
}
