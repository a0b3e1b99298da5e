//! Depth capture pipeline module
//!
//! This module provides a structured approach to capturing synchronized
//! color/depth/confidence sensor frames and serializing them into a single
//! multi-page TIFF file, with separate modules for sensor acquisition, plane
//! decoding, page packing, TIFF writing and capture orchestration.

pub mod common;
pub mod conversions;
pub mod decode;
pub mod pack;
pub mod sensor;
pub mod tiff;

pub use common::{CaptureError, Result};

pub use sensor::{
    AcquiredImage, FrameAcquirer, Intrinsics, PlaneBuffer, RawFrame, SensorFrame, SensorSession,
    SyntheticSession,
};

pub use decode::{
    ConfidenceImageData, DepthImageData, RgbImageData, decode_color_to_rgb, decode_confidence8,
    decode_depth16,
};

pub use pack::{
    CapturePage, PageFormat, PageRole, pack_color, pack_confidence, pack_depth, unpack_depth,
};

pub use tiff::{
    CaptureConfig, CaptureConfigBuilder, PageWriter, StandardTiffWriter, TiffCompression,
};

pub use conversions::{CapturePipeline, CaptureState, CaptureTicket};
