use tracing::debug;

use crate::capture_pipeline::common::error::{CaptureError, Result};
use crate::capture_pipeline::pack::types::CapturePage;
use crate::capture_pipeline::tiff::types::{CaptureConfig, TiffCompression};
use crate::capture_pipeline::tiff::writer::{PageWriter, WriteSeek};

/// Multi-page TIFF writer backed by the `tiff` crate.
///
/// Pages are encoded straight into the output sink one IFD at a time, so the
/// file grows page by page instead of holding the whole container in memory.
/// The metadata string goes into the ImageDescription tag of page 0.
pub struct StandardTiffWriter;

impl StandardTiffWriter {
    fn validate_page(&self, index: usize, page: &CapturePage) -> Result<()> {
        if page.width == 0 || page.height == 0 {
            return Err(CaptureError::EncodeError(format!(
                "page {} has invalid dimensions {}x{}",
                index, page.width, page.height
            )));
        }
        if page.data.len() != page.width * page.height * 3 {
            return Err(CaptureError::EncodeError(format!(
                "page {} has {} bytes, {}x{} RGB8 requires {}",
                index,
                page.data.len(),
                page.width,
                page.height,
                page.width * page.height * 3
            )));
        }
        Ok(())
    }
}

impl PageWriter for StandardTiffWriter {
    fn write_pages(
        &self,
        pages: &[CapturePage],
        metadata: &str,
        output: &mut dyn WriteSeek,
        config: &CaptureConfig,
    ) -> Result<()> {
        if config.validate_dimensions {
            for (index, page) in pages.iter().enumerate() {
                self.validate_page(index, page)?;
            }
        }

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Fast,
            ),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Balanced,
            ),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Best,
            ),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(output)
            .map_err(|e| CaptureError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        for (index, page) in pages.iter().enumerate() {
            debug!(
                "Appending page {} ({:?}): {}x{}",
                index, page.role, page.width, page.height
            );
            let mut image = encoder
                .new_image::<tiff::encoder::colortype::RGB8>(
                    page.width as u32,
                    page.height as u32,
                )
                .map_err(|e| CaptureError::EncodeError(e.to_string()))?;
            if index == 0 {
                image
                    .encoder()
                    .write_tag(tiff::tags::Tag::ImageDescription, metadata)
                    .map_err(|e| CaptureError::EncodeError(e.to_string()))?;
            }
            image
                .write_data(&page.data)
                .map_err(|e| CaptureError::EncodeError(e.to_string()))?;
        }

        debug!("TIFF encoding complete, {} pages", pages.len());
        Ok(())
    }
}
