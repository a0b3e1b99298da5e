//! Pipeline orchestration module
//!
//! This module sequences acquisition, decoding, packing and encoding for a
//! single capture request.

mod capture_to_tiff;

pub use capture_to_tiff::{CapturePipeline, CaptureState, CaptureTicket};
