//! Sensor-side data types: raw plane views and camera calibration.

use crate::capture_pipeline::common::error::{CaptureError, Result};

/// Borrowed view of one raw sensor plane.
///
/// The bytes stay owned by the acquiring image handle; a `PlaneBuffer` is only
/// valid while that handle is alive. Rows may carry alignment padding, so
/// consumers must index through `row_stride`/`pixel_stride` and never assume
/// tight packing.
#[derive(Debug, Clone, Copy)]
pub struct PlaneBuffer<'a> {
    /// Raw plane bytes, including any row padding.
    pub data: &'a [u8],
    /// Width of the plane in pixels.
    pub width: usize,
    /// Height of the plane in pixels.
    pub height: usize,
    /// Byte distance between the first bytes of consecutive rows.
    pub row_stride: usize,
    /// Byte distance between the first bytes of consecutive pixels in a row.
    pub pixel_stride: usize,
}

impl<'a> PlaneBuffer<'a> {
    /// Checks the stride invariants and that `data` covers every addressable
    /// sample of `sample_bytes` width. Fails with `MalformedPlane` otherwise;
    /// decoders call this before touching any byte.
    pub fn validate(&self, sample_bytes: usize) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::MalformedPlane(format!(
                "empty plane: {}x{}",
                self.width, self.height
            )));
        }
        if self.pixel_stride < sample_bytes {
            return Err(CaptureError::MalformedPlane(format!(
                "pixel stride {} smaller than sample width {}",
                self.pixel_stride, sample_bytes
            )));
        }
        if self.row_stride < self.width * self.pixel_stride {
            return Err(CaptureError::MalformedPlane(format!(
                "row stride {} smaller than width {} x pixel stride {}",
                self.row_stride, self.width, self.pixel_stride
            )));
        }
        // The last row does not need trailing padding, only its samples.
        let needed = (self.height - 1) * self.row_stride
            + (self.width - 1) * self.pixel_stride
            + sample_bytes;
        if self.data.len() < needed {
            return Err(CaptureError::MalformedPlane(format!(
                "plane buffer has {} bytes, layout requires {}",
                self.data.len(),
                needed
            )));
        }
        Ok(())
    }

    /// Byte offset of pixel (x, y).
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.row_stride + x * self.pixel_stride
    }
}

/// Pinhole camera calibration, tied to the resolution it was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
    /// Width of the stream this calibration is expressed in.
    pub ref_width: u32,
    /// Height of the stream this calibration is expressed in.
    pub ref_height: u32,
}

impl Intrinsics {
    /// Re-expresses the calibration in the pixel space of a stream with a
    /// different resolution, e.g. mapping the color-stream intrinsics onto
    /// the lower-resolution depth stream.
    ///
    /// Scale factors are computed in floating point against the original
    /// reference resolution, so rescaling is not cumulative and is a no-op
    /// when the target matches the reference.
    pub fn rescaled(&self, target_width: u32, target_height: u32) -> Intrinsics {
        let scale_w = target_width as f32 / self.ref_width as f32;
        let scale_h = target_height as f32 / self.ref_height as f32;
        Intrinsics {
            fx: self.fx * scale_w,
            fy: self.fy * scale_h,
            cx: self.cx * scale_w,
            cy: self.cy * scale_h,
            ref_width: target_width,
            ref_height: target_height,
        }
    }

    /// Textual form embedded in the capture file: `fx:<f>,fy:<f>,cx:<f>,cy:<f>`.
    pub fn metadata_string(&self) -> String {
        format!(
            "fx:{},fy:{},cx:{},cy:{}",
            self.fx, self.fy, self.cx, self.cy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_intrinsics() -> Intrinsics {
        Intrinsics {
            fx: 1000.0,
            fy: 1000.0,
            cx: 320.0,
            cy: 240.0,
            ref_width: 640,
            ref_height: 480,
        }
    }

    #[test]
    fn rescale_to_quarter_resolution() {
        let scaled = reference_intrinsics().rescaled(160, 120);
        assert_eq!(scaled.fx, 250.0);
        assert_eq!(scaled.fy, 250.0);
        assert_eq!(scaled.cx, 80.0);
        assert_eq!(scaled.cy, 60.0);
        assert_eq!(scaled.ref_width, 160);
        assert_eq!(scaled.ref_height, 120);
    }

    #[test]
    fn rescale_to_reference_is_identity() {
        let intr = reference_intrinsics();
        assert_eq!(intr.rescaled(640, 480), intr);
    }

    #[test]
    fn rescale_is_not_cumulative() {
        let intr = reference_intrinsics();
        let direct = intr.rescaled(160, 120);
        let via_intermediate = intr.rescaled(320, 240).rescaled(160, 120);
        assert_eq!(via_intermediate, direct);
    }

    #[test]
    fn metadata_string_format() {
        let scaled = reference_intrinsics().rescaled(160, 120);
        assert_eq!(scaled.metadata_string(), "fx:250,fy:250,cx:80,cy:60");
    }

    #[test]
    fn plane_validation_rejects_short_buffer() {
        let data = [0u8; 7];
        let plane = PlaneBuffer {
            data: &data,
            width: 2,
            height: 2,
            row_stride: 4,
            pixel_stride: 2,
        };
        assert!(matches!(
            plane.validate(2),
            Err(CaptureError::MalformedPlane(_))
        ));
    }

    #[test]
    fn plane_validation_rejects_narrow_row_stride() {
        let data = [0u8; 64];
        let plane = PlaneBuffer {
            data: &data,
            width: 4,
            height: 2,
            row_stride: 3,
            pixel_stride: 1,
        };
        assert!(matches!(
            plane.validate(1),
            Err(CaptureError::MalformedPlane(_))
        ));
    }

    #[test]
    fn plane_validation_allows_untrailed_last_row() {
        // 2x2 of 2-byte samples, row stride 8: last row only needs 6 bytes.
        let data = [0u8; 14];
        let plane = PlaneBuffer {
            data: &data,
            width: 2,
            height: 2,
            row_stride: 8,
            pixel_stride: 2,
        };
        assert!(plane.validate(2).is_ok());
    }
}
