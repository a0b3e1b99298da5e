use depth_capture_rs::capture_pipeline::{
    CaptureConfig, CapturePipeline, SyntheticSession, TiffCompression,
};
use depth_capture_rs::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting depth capture utility...");

    let config = CaptureConfig::builder()
        .compression(TiffCompression::Lzw)
        .build();
    let mut pipeline = CapturePipeline::new(config);

    info!("Capture pipeline initialized");
    info!("Compression: {:?}", pipeline.config().compression);
    info!(
        "Output directory: {}",
        pipeline.config().output_dir.display()
    );

    // No hardware sensing stack is wired up here; drive the pipeline with the
    // deterministic software session instead.
    pipeline.initialize_session(SyntheticSession::default());

    match pipeline.capture_tiff_blocking() {
        Ok(path) => info!("Capture saved to {}", path.display()),
        Err(e) => error!(code = e.code(), "Capture failed: {}", e),
    }

    pipeline.teardown_session();
    Ok(())
}
