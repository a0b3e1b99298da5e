use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::Utc;
use crossbeam_channel::{Receiver, bounded};
use tracing::{info, instrument, warn};

use crate::capture_pipeline::{
    common::error::{CaptureError, Result},
    decode::{decode_color_to_rgb, decode_confidence8, decode_depth16},
    pack::{CapturePage, pack_color, pack_confidence, pack_depth},
    sensor::{AcquiredImage, FrameAcquirer, RawFrame, SensorSession},
    tiff::{CaptureConfig, PageWriter, StandardTiffWriter},
};

/// Capture request lifecycle. `Done` and `Failed` are terminal per request;
/// the pipeline returns to accepting requests once the in-flight slot clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Acquiring,
    Decoding,
    Encoding,
    Done,
    Failed,
}

/// Single-fire handle to the result of one capture request.
///
/// The encoding context completes it exactly once; consuming `wait` makes a
/// second observation impossible.
pub struct CaptureTicket {
    rx: Receiver<Result<PathBuf>>,
}

impl CaptureTicket {
    /// Blocks until the encoding context delivers the terminal result.
    pub fn wait(self) -> Result<PathBuf> {
        self.rx.recv().unwrap_or_else(|_| {
            Err(CaptureError::CaptureFailed(
                "encoding context dropped without delivering a result".to_string(),
            ))
        })
    }
}

/// Orchestrates one capture: acquire -> decode -> rescale -> pack -> write.
///
/// Acquisition and decoding run synchronously on the caller's context (the
/// one driving the sensing session), so sensor buffers are decoded and
/// released before `capture_tiff` returns. Encoding and file I/O run on a
/// background thread that takes ownership of the decoded pages; the returned
/// ticket is the only channel back. One capture may be in flight at a time;
/// further requests fail with `Busy`.
pub struct CapturePipeline<S: SensorSession, W: PageWriter + Send + Sync + 'static> {
    session: Option<S>,
    writer: Arc<W>,
    config: CaptureConfig,
    state: Arc<Mutex<CaptureState>>,
    in_flight: Arc<AtomicBool>,
}

impl<S: SensorSession> CapturePipeline<S, StandardTiffWriter> {
    pub fn new(config: CaptureConfig) -> Self {
        Self::with_custom(StandardTiffWriter, config)
    }
}

impl<S: SensorSession, W: PageWriter + Send + Sync + 'static> CapturePipeline<S, W> {
    pub fn with_custom(writer: W, config: CaptureConfig) -> Self {
        Self {
            session: None,
            writer: Arc::new(writer),
            config,
            state: Arc::new(Mutex::new(CaptureState::Idle)),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Hands the sensing session to the pipeline. Called by the host when the
    /// sensing surface comes up.
    pub fn initialize_session(&mut self, session: S) {
        self.session = Some(session);
    }

    /// Takes the session back out, returning it so the host can close it.
    pub fn teardown_session(&mut self) -> Option<S> {
        self.session.take()
    }

    pub fn state(&self) -> CaptureState {
        read_state(&self.state)
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Captures one synchronized frame and encodes it to a multi-page TIFF.
    ///
    /// Errors returned directly cover the acquisition/decoding phase (and the
    /// `Busy` rejection); everything after the hand-off arrives through the
    /// ticket. Either way the caller observes exactly one terminal outcome.
    #[instrument(skip(self))]
    pub fn capture_tiff(&mut self) -> Result<CaptureTicket> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            warn!("Rejecting capture request, one is already in flight");
            return Err(CaptureError::Busy);
        }

        match self.run_capture() {
            Ok(ticket) => Ok(ticket),
            Err(e) => {
                set_state(&self.state, CaptureState::Failed);
                self.in_flight.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    /// Convenience wrapper: capture and block until the file is written.
    pub fn capture_tiff_blocking(&mut self) -> Result<PathBuf> {
        self.capture_tiff()?.wait()
    }

    fn run_capture(&mut self) -> Result<CaptureTicket> {
        let session = self
            .session
            .as_mut()
            .ok_or(CaptureError::NoActiveSession)?;

        set_state(&self.state, CaptureState::Acquiring);
        let frame = {
            let _span = tracing::info_span!("acquire_frame").entered();
            FrameAcquirer::acquire(session)?
        };

        set_state(&self.state, CaptureState::Decoding);
        let (pages, metadata) = {
            let _span = tracing::info_span!("decode_planes").entered();
            decode_frame(frame)?
        };

        set_state(&self.state, CaptureState::Encoding);
        let path = self.config.output_dir.join(format!(
            "{}_{}.tiff",
            self.config.file_prefix,
            Utc::now().timestamp_millis()
        ));

        let (tx, rx) = bounded(1);
        let writer = Arc::clone(&self.writer);
        let config = self.config.clone();
        let state = Arc::clone(&self.state);
        let in_flight = Arc::clone(&self.in_flight);

        thread::Builder::new()
            .name("capture-encode".to_string())
            .spawn(move || {
                let outcome = encode_pages(writer.as_ref(), &pages, &metadata, path, &config);
                match &outcome {
                    Ok(path) => {
                        info!(path = %path.display(), "Capture complete");
                        set_state(&state, CaptureState::Done);
                    }
                    Err(e) => {
                        warn!(code = e.code(), "Capture failed during encoding: {}", e);
                        set_state(&state, CaptureState::Failed);
                    }
                }
                in_flight.store(false, Ordering::Release);
                // The ticket may already be gone if the caller lost interest.
                let _ = tx.send(outcome);
            })?;

        Ok(CaptureTicket { rx })
    }
}

/// Decodes all three channels into owned pages and drops the raw frame,
/// releasing the native sensor buffers, before anything crosses to the
/// encoding context. Metadata carries the intrinsics rescaled to the depth
/// stream's resolution.
fn decode_frame<I: AcquiredImage>(frame: RawFrame<I>) -> Result<(Vec<CapturePage>, String)> {
    if frame.color.plane_count() < 3 {
        return Err(CaptureError::MalformedPlane(format!(
            "color image has {} planes, YUV420 requires 3",
            frame.color.plane_count()
        )));
    }

    let rgb = decode_color_to_rgb(
        &frame.color.plane(0),
        &frame.color.plane(1),
        &frame.color.plane(2),
    )?;
    let depth = decode_depth16(&frame.depth.plane(0))?;
    let confidence = decode_confidence8(&frame.confidence.plane(0))?;

    let intrinsics = frame
        .intrinsics
        .rescaled(depth.width as u32, depth.height as u32);
    drop(frame);

    info!(
        depth_size = %format!("{}x{}", depth.width, depth.height),
        metadata = %intrinsics.metadata_string(),
        "Frame decoded, sensor buffers released"
    );

    let pages = vec![pack_color(rgb), pack_depth(&depth), pack_confidence(&confidence)];
    Ok((pages, intrinsics.metadata_string()))
}

/// Runs on the encoding thread. A page append that errors out leaves the
/// partial file on disk for diagnostics and reports `SaveFailed`; only
/// filesystem-level failures surface as `IoError`.
fn encode_pages<W: PageWriter + ?Sized>(
    writer: &W,
    pages: &[CapturePage],
    metadata: &str,
    path: PathBuf,
    config: &CaptureConfig,
) -> Result<PathBuf> {
    let _span = tracing::info_span!("encode_tiff", path = %path.display()).entered();

    let mut file = File::create(&path)?;
    writer
        .write_pages(pages, metadata, &mut file, config)
        .map_err(|e| match e {
            CaptureError::IoError(io) => CaptureError::IoError(io),
            other => CaptureError::SaveFailed(other.to_string()),
        })?;

    let size = file.metadata()?.len();
    if size == 0 {
        return Err(CaptureError::SaveFailed(
            "writer reported success but the file is empty".to_string(),
        ));
    }
    Ok(path)
}

fn set_state(state: &Mutex<CaptureState>, next: CaptureState) {
    *state.lock().unwrap_or_else(|e| e.into_inner()) = next;
}

fn read_state(state: &Mutex<CaptureState>) -> CaptureState {
    *state.lock().unwrap_or_else(|e| e.into_inner())
}
