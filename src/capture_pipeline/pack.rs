//! Page packing module
//!
//! This module encodes single-channel depth/confidence samples into RGB8
//! pages that survive 8-bit-per-channel image codecs.

mod packers;
pub mod types;

pub use packers::{pack_color, pack_confidence, pack_depth, unpack_depth};
pub use types::{CapturePage, PageFormat, PageRole};
