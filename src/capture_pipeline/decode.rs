//! Plane decoding module
//!
//! This module converts raw sensor planes into owned dense pixel buffers.

mod plane_decoder;
pub mod types;

pub use plane_decoder::{decode_color_to_rgb, decode_confidence8, decode_depth16};
pub use types::{ConfidenceImageData, DepthImageData, RgbImageData};
