//! Deterministic software sensor session.
//!
//! Stands in for the hardware sensing stack when none is attached, so the
//! pipeline can be exercised end to end from the demo binary and from tests.
//! Planes are generated with row padding beyond the visible width to mimic
//! the aligned buffers real sensor runtimes hand out.

use crate::capture_pipeline::common::error::Result;
use crate::capture_pipeline::sensor::session::{AcquiredImage, SensorFrame, SensorSession};
use crate::capture_pipeline::sensor::types::{Intrinsics, PlaneBuffer};

/// Row padding appended past the last visible pixel of every generated row.
const ROW_PAD_BYTES: usize = 8;
/// Filler written into padding bytes; decoders must never read it.
const PAD_FILL: u8 = 0xAB;

struct OwnedPlane {
    data: Vec<u8>,
    width: usize,
    height: usize,
    row_stride: usize,
    pixel_stride: usize,
}

impl OwnedPlane {
    fn generate(
        width: usize,
        height: usize,
        pixel_stride: usize,
        mut sample: impl FnMut(usize, usize) -> Vec<u8>,
    ) -> Self {
        let row_stride = width * pixel_stride + ROW_PAD_BYTES;
        let mut data = vec![PAD_FILL; row_stride * height];
        for y in 0..height {
            for x in 0..width {
                let offset = y * row_stride + x * pixel_stride;
                for (i, byte) in sample(x, y).into_iter().enumerate() {
                    data[offset + i] = byte;
                }
            }
        }
        Self {
            data,
            width,
            height,
            row_stride,
            pixel_stride,
        }
    }
}

pub struct SyntheticImage {
    planes: Vec<OwnedPlane>,
    width: usize,
    height: usize,
    timestamp_ns: i64,
}

impl AcquiredImage for SyntheticImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn timestamp_ns(&self) -> i64 {
        self.timestamp_ns
    }

    fn plane_count(&self) -> usize {
        self.planes.len()
    }

    fn plane(&self, index: usize) -> PlaneBuffer<'_> {
        let plane = &self.planes[index];
        PlaneBuffer {
            data: &plane.data,
            width: plane.width,
            height: plane.height,
            row_stride: plane.row_stride,
            pixel_stride: plane.pixel_stride,
        }
    }
}

pub struct SyntheticFrame {
    color_size: (usize, usize),
    depth_size: (usize, usize),
    timestamp_ns: i64,
}

impl SensorFrame for SyntheticFrame {
    type Image = SyntheticImage;

    fn acquire_camera_image(&mut self) -> Result<Self::Image> {
        let (w, h) = self.color_size;
        let (cw, ch) = (w.div_ceil(2), h.div_ceil(2));
        let y_plane =
            OwnedPlane::generate(w, h, 1, |x, y| vec![((x * 32 + y * 16) % 256) as u8]);
        // Mild fixed chroma offset so the decoded RGB is not pure gray.
        let u_plane = OwnedPlane::generate(cw, ch, 1, |_, _| vec![120]);
        let v_plane = OwnedPlane::generate(cw, ch, 1, |_, _| vec![136]);
        Ok(SyntheticImage {
            planes: vec![y_plane, u_plane, v_plane],
            width: w,
            height: h,
            timestamp_ns: self.timestamp_ns,
        })
    }

    fn acquire_raw_depth_image16(&mut self) -> Result<Self::Image> {
        let (w, h) = self.depth_size;
        let plane = OwnedPlane::generate(w, h, 2, |x, y| {
            let millimeters = (1000 + (y * w + x) * 250) as u16;
            millimeters.to_le_bytes().to_vec()
        });
        Ok(SyntheticImage {
            planes: vec![plane],
            width: w,
            height: h,
            timestamp_ns: self.timestamp_ns,
        })
    }

    fn acquire_raw_depth_confidence_image(&mut self) -> Result<Self::Image> {
        let (w, h) = self.depth_size;
        let plane = OwnedPlane::generate(w, h, 1, |x, y| vec![((x * 40 + y * 7) % 256) as u8]);
        Ok(SyntheticImage {
            planes: vec![plane],
            width: w,
            height: h,
            timestamp_ns: self.timestamp_ns,
        })
    }

    fn texture_intrinsics(&self) -> Intrinsics {
        let (w, h) = self.color_size;
        Intrinsics {
            fx: w as f32 * 1.25,
            fy: w as f32 * 1.25,
            cx: w as f32 / 2.0,
            cy: h as f32 / 2.0,
            ref_width: w as u32,
            ref_height: h as u32,
        }
    }
}

/// Software session producing deterministic frames at fixed resolutions.
pub struct SyntheticSession {
    color_size: (usize, usize),
    depth_size: (usize, usize),
    frame_counter: i64,
}

impl SyntheticSession {
    pub fn new(color_size: (usize, usize), depth_size: (usize, usize)) -> Self {
        Self {
            color_size,
            depth_size,
            frame_counter: 0,
        }
    }

    pub fn frames_delivered(&self) -> i64 {
        self.frame_counter
    }
}

impl Default for SyntheticSession {
    fn default() -> Self {
        Self::new((640, 480), (160, 120))
    }
}

impl SensorSession for SyntheticSession {
    type Frame = SyntheticFrame;

    fn update(&mut self) -> Result<Self::Frame> {
        self.frame_counter += 1;
        Ok(SyntheticFrame {
            color_size: self.color_size,
            depth_size: self.depth_size,
            timestamp_ns: self.frame_counter * 33_333_333,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_advances_frame_counter() {
        let mut session = SyntheticSession::new((8, 6), (4, 3));
        assert_eq!(session.frames_delivered(), 0);
        let first = session.update().unwrap();
        let second = session.update().unwrap();
        assert_eq!(session.frames_delivered(), 2);
        assert!(second.timestamp_ns > first.timestamp_ns);
    }

    #[test]
    fn color_image_has_three_padded_planes() {
        let mut session = SyntheticSession::new((8, 6), (4, 3));
        let mut frame = session.update().unwrap();
        let image = frame.acquire_camera_image().unwrap();
        assert_eq!(image.plane_count(), 3);
        let y = image.plane(0);
        assert!(y.row_stride > y.width * y.pixel_stride);
        assert!(y.validate(1).is_ok());
    }

    #[test]
    fn channel_timestamps_agree_within_a_frame() {
        let mut session = SyntheticSession::new((8, 6), (4, 3));
        let mut frame = session.update().unwrap();
        let color = frame.acquire_camera_image().unwrap();
        let depth = frame.acquire_raw_depth_image16().unwrap();
        let confidence = frame.acquire_raw_depth_confidence_image().unwrap();
        assert_eq!(color.timestamp_ns(), depth.timestamp_ns());
        assert_eq!(depth.timestamp_ns(), confidence.timestamp_ns());
    }
}
