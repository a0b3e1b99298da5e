//! Decoded image data types
//!
//! Owned, densely packed pixel buffers (row-major, no padding), independent
//! of the sensor buffers they were decoded from.

/// Decoded 16-bit depth image, one millimeter sample per pixel.
#[derive(Debug, Clone)]
pub struct DepthImageData {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u16>,
}

/// Decoded 8-bit confidence image, one sample per pixel (0 = no confidence,
/// 255 = full confidence).
#[derive(Debug, Clone)]
pub struct ConfidenceImageData {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Decoded color image, interleaved RGB bytes [R, G, B, R, G, B, ...].
#[derive(Debug, Clone)]
pub struct RgbImageData {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}
