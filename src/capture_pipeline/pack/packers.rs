//! Packing decoded samples into codec-safe RGB8 pages.

use crate::capture_pipeline::common::error::{CaptureError, Result};
use crate::capture_pipeline::decode::types::{ConfidenceImageData, DepthImageData, RgbImageData};
use crate::capture_pipeline::pack::types::{CapturePage, PageFormat, PageRole};

/// Wraps an already-decoded RGB image as the color page.
pub fn pack_color(image: RgbImageData) -> CapturePage {
    CapturePage {
        role: PageRole::Color,
        format: PageFormat::Rgb8,
        width: image.width,
        height: image.height,
        data: image.data,
    }
}

/// Packs 16-bit depth samples into an RGB8 page without losing precision:
/// R carries bits 8-15, G carries bits 0-7, B stays 0. The page survives any
/// 8-bit-per-channel codec and `unpack_depth` restores the exact samples.
pub fn pack_depth(image: &DepthImageData) -> CapturePage {
    let mut data = Vec::with_capacity(image.data.len() * 3);
    for &sample in &image.data {
        data.push((sample >> 8) as u8);
        data.push((sample & 0xFF) as u8);
        data.push(0);
    }
    CapturePage {
        role: PageRole::Depth,
        format: PageFormat::PackedDepth16,
        width: image.width,
        height: image.height,
        data,
    }
}

/// Inverse of `pack_depth`: `depth = (R << 8) | G`.
pub fn unpack_depth(page: &CapturePage) -> Result<DepthImageData> {
    if page.format != PageFormat::PackedDepth16 {
        return Err(CaptureError::MalformedPlane(format!(
            "cannot unpack depth from a {:?} page",
            page.format
        )));
    }
    let data = page
        .data
        .chunks_exact(3)
        .map(|pixel| (u16::from(pixel[0]) << 8) | u16::from(pixel[1]))
        .collect();
    Ok(DepthImageData {
        width: page.width,
        height: page.height,
        data,
    })
}

/// Replicates each 8-bit confidence value into R, G and B: a grayscale page
/// any viewer can inspect directly.
pub fn pack_confidence(image: &ConfidenceImageData) -> CapturePage {
    let mut data = Vec::with_capacity(image.data.len() * 3);
    for &confidence in &image.data {
        data.extend_from_slice(&[confidence, confidence, confidence]);
    }
    CapturePage {
        role: PageRole::Confidence,
        format: PageFormat::Grayscale8,
        width: image.width,
        height: image.height,
        data,
    }
}
