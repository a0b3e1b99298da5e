use std::io::{Seek, Write};

use crate::capture_pipeline::common::error::Result;
use crate::capture_pipeline::pack::types::CapturePage;
use crate::capture_pipeline::tiff::types::CaptureConfig;

/// Seekable sink for page-structured container files.
pub trait WriteSeek: Write + Seek {}
impl<T: Write + Seek> WriteSeek for T {}

/// Serializes an ordered sequence of pages plus a textual metadata string
/// into one multi-page container.
///
/// Pages are appended in the exact order given; `metadata` is attached once
/// so it can be read back regardless of which page a consumer opens.
pub trait PageWriter {
    fn write_pages(
        &self,
        pages: &[CapturePage],
        metadata: &str,
        output: &mut dyn WriteSeek,
        config: &CaptureConfig,
    ) -> Result<()>;
}
