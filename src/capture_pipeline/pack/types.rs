//! Capture page types

/// What a page holds within the multi-page capture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRole {
    Color,
    Depth,
    Confidence,
}

/// How the page's samples map onto its RGB8 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    /// Plain 8-bit-per-channel color.
    Rgb8,
    /// 16-bit sample split across R (high byte) and G (low byte), B = 0.
    PackedDepth16,
    /// Single 8-bit sample replicated into R, G and B.
    Grayscale8,
}

/// One image page ready for serialization: interleaved RGB8 bytes, dense,
/// row-major. Independent of any sensor buffer lifetime.
#[derive(Debug, Clone)]
pub struct CapturePage {
    pub role: PageRole,
    pub format: PageFormat,
    pub width: usize,
    pub height: usize,
    /// Interleaved RGB bytes, `width * height * 3` long.
    pub data: Vec<u8>,
}
