//! TIFF writing module
//!
//! This module provides multi-page TIFF file writing with various
//! compression options and embedded capture metadata.

mod standard_tiff_writer;
mod writer;
pub mod types;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{CaptureConfig, CaptureConfigBuilder, TiffCompression};
pub use writer::{PageWriter, WriteSeek};
