//! Raw plane decoding.
//!
//! Pure functions turning stride-aware sensor planes into owned dense pixel
//! buffers. Any structural inconsistency between a plane's declared layout
//! and its byte count fails with `MalformedPlane`; there is no best-effort
//! partial decode.

use tracing::debug;

use crate::capture_pipeline::common::error::{CaptureError, Result};
use crate::capture_pipeline::decode::types::{ConfidenceImageData, DepthImageData, RgbImageData};
use crate::capture_pipeline::sensor::types::PlaneBuffer;

/// Decodes a single-plane 16-bit depth buffer. Samples are little-endian
/// unsigned millimeters; row padding past `width` columns is ignored.
pub fn decode_depth16(plane: &PlaneBuffer<'_>) -> Result<DepthImageData> {
    plane.validate(2)?;
    debug!("Decoding depth plane: {}x{}", plane.width, plane.height);

    let mut data = Vec::with_capacity(plane.width * plane.height);
    for y in 0..plane.height {
        for x in 0..plane.width {
            let offset = plane.offset(x, y);
            data.push(u16::from_le_bytes([
                plane.data[offset],
                plane.data[offset + 1],
            ]));
        }
    }
    Ok(DepthImageData {
        width: plane.width,
        height: plane.height,
        data,
    })
}

/// Decodes a single-plane 8-bit confidence buffer. One unsigned byte per
/// pixel, addressed through both strides.
pub fn decode_confidence8(plane: &PlaneBuffer<'_>) -> Result<ConfidenceImageData> {
    plane.validate(1)?;
    debug!("Decoding confidence plane: {}x{}", plane.width, plane.height);

    let mut data = Vec::with_capacity(plane.width * plane.height);
    for y in 0..plane.height {
        for x in 0..plane.width {
            data.push(plane.data[plane.offset(x, y)]);
        }
    }
    Ok(ConfidenceImageData {
        width: plane.width,
        height: plane.height,
        data,
    })
}

/// Decodes a planar YUV420 color image directly to interleaved RGB8.
///
/// Chroma planes are quarter-resolution; each 2x2 luma block shares the
/// chroma sample at (x/2, y/2). The V sample feeds the red term and U the
/// blue term (the same pairing the NV21 V-then-U interleave encodes); swap
/// them and the output comes out tinted. Direct numeric conversion keeps the
/// result lossless and reproducible, with no compressed intermediate.
pub fn decode_color_to_rgb(
    y_plane: &PlaneBuffer<'_>,
    u_plane: &PlaneBuffer<'_>,
    v_plane: &PlaneBuffer<'_>,
) -> Result<RgbImageData> {
    y_plane.validate(1)?;
    u_plane.validate(1)?;
    v_plane.validate(1)?;

    let (width, height) = (y_plane.width, y_plane.height);
    let expected_chroma = (width.div_ceil(2), height.div_ceil(2));
    for (name, plane) in [("U", u_plane), ("V", v_plane)] {
        if (plane.width, plane.height) != expected_chroma {
            return Err(CaptureError::MalformedPlane(format!(
                "{} plane is {}x{}, expected {}x{} for {}x{} luma",
                name, plane.width, plane.height, expected_chroma.0, expected_chroma.1, width, height
            )));
        }
    }
    debug!("Decoding YUV420 color image: {}x{}", width, height);

    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let luma = y_plane.data[y_plane.offset(x, y)] as f32;
            let (cx, cy) = (x / 2, y / 2);
            let u = u_plane.data[u_plane.offset(cx, cy)] as f32 - 128.0;
            let v = v_plane.data[v_plane.offset(cx, cy)] as f32 - 128.0;

            // Full-range BT.601, matching the JPEG-style conversion the
            // sensor stack's own converters apply.
            let r = luma + 1.402 * v;
            let g = luma - 0.344_136 * u - 0.714_136 * v;
            let b = luma + 1.772 * u;

            data.push(r.clamp(0.0, 255.0) as u8);
            data.push(g.clamp(0.0, 255.0) as u8);
            data.push(b.clamp(0.0, 255.0) as u8);
        }
    }
    Ok(RgbImageData {
        width,
        height,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight_plane(data: &[u8], width: usize, height: usize, pixel_stride: usize) -> PlaneBuffer<'_> {
        PlaneBuffer {
            data,
            width,
            height,
            row_stride: width * pixel_stride,
            pixel_stride,
        }
    }

    #[test]
    fn depth_decode_little_endian() {
        // 2x2, samples 1000 2000 / 3000 4000 mm.
        let mut bytes = Vec::new();
        for sample in [1000u16, 2000, 3000, 4000] {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        let decoded = decode_depth16(&tight_plane(&bytes, 2, 2, 2)).unwrap();
        assert_eq!(decoded.data, vec![1000, 2000, 3000, 4000]);
    }

    #[test]
    fn depth_decode_ignores_row_padding() {
        let samples = [1000u16, 2000, 3000, 4000];
        let mut tight = Vec::new();
        for sample in samples {
            tight.extend_from_slice(&sample.to_le_bytes());
        }

        // Same samples with 3 bytes of garbage after each row.
        let mut padded = Vec::new();
        for row in samples.chunks(2) {
            for sample in row {
                padded.extend_from_slice(&sample.to_le_bytes());
            }
            padded.extend_from_slice(&[0xDE, 0xAD, 0xBE]);
        }
        // Last row's padding is present here; trim it to prove it is unused.
        padded.truncate(padded.len() - 3);

        let from_tight = decode_depth16(&tight_plane(&tight, 2, 2, 2)).unwrap();
        let from_padded = decode_depth16(&PlaneBuffer {
            data: &padded,
            width: 2,
            height: 2,
            row_stride: 7,
            pixel_stride: 2,
        })
        .unwrap();
        assert_eq!(from_tight.data, from_padded.data);
    }

    #[test]
    fn depth_decode_rejects_truncated_plane() {
        let bytes = [0u8; 6];
        let result = decode_depth16(&tight_plane(&bytes, 2, 2, 2));
        assert!(matches!(result, Err(CaptureError::MalformedPlane(_))));
    }

    #[test]
    fn confidence_decode_honors_pixel_stride() {
        // 3x2 plane, pixel stride 2, row stride 8: value bytes interleaved
        // with garbage.
        #[rustfmt::skip]
        let bytes = [
            10, 0xFF, 20, 0xFF, 30, 0xFF, 0xEE, 0xEE,
            40, 0xFF, 50, 0xFF, 60, 0xFF,
        ];
        let decoded = decode_confidence8(&PlaneBuffer {
            data: &bytes,
            width: 3,
            height: 2,
            row_stride: 8,
            pixel_stride: 2,
        })
        .unwrap();
        assert_eq!(decoded.data, vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn color_decode_neutral_chroma_is_gray() {
        // 2x2 luma ramp with both chroma samples at 128 decodes to R=G=B=Y.
        let y = [0u8, 64, 128, 255];
        let u = [128u8];
        let v = [128u8];
        let rgb = decode_color_to_rgb(
            &tight_plane(&y, 2, 2, 1),
            &tight_plane(&u, 1, 1, 1),
            &tight_plane(&v, 1, 1, 1),
        )
        .unwrap();
        assert_eq!(rgb.data.len(), 12);
        for (pixel, luma) in rgb.data.chunks(3).zip(y) {
            assert_eq!(pixel, [luma, luma, luma]);
        }
    }

    #[test]
    fn color_decode_chroma_pairing() {
        // V above neutral raises red, U above neutral raises blue. A swapped
        // pairing would invert this.
        let y = [128u8, 128, 128, 128];
        let u = [128u8];
        let v = [200u8];
        let rgb = decode_color_to_rgb(
            &tight_plane(&y, 2, 2, 1),
            &tight_plane(&u, 1, 1, 1),
            &tight_plane(&v, 1, 1, 1),
        )
        .unwrap();
        let pixel = &rgb.data[0..3];
        assert!(pixel[0] > 128, "red should rise with V, got {}", pixel[0]);
        assert!(pixel[2] <= 128, "blue must not rise with V, got {}", pixel[2]);

        let u = [200u8];
        let v = [128u8];
        let rgb = decode_color_to_rgb(
            &tight_plane(&y, 2, 2, 1),
            &tight_plane(&u, 1, 1, 1),
            &tight_plane(&v, 1, 1, 1),
        )
        .unwrap();
        let pixel = &rgb.data[0..3];
        assert!(pixel[2] > 128, "blue should rise with U, got {}", pixel[2]);
        assert!(pixel[0] <= 128, "red must not rise with U, got {}", pixel[0]);
    }

    #[test]
    fn color_decode_rejects_mismatched_chroma_dimensions() {
        let y = [128u8; 16];
        let chroma = [128u8; 16];
        let result = decode_color_to_rgb(
            &tight_plane(&y, 4, 4, 1),
            &tight_plane(&chroma, 4, 4, 1),
            &tight_plane(&chroma, 2, 2, 1),
        );
        assert!(matches!(result, Err(CaptureError::MalformedPlane(_))));
    }
}
