//! Sensor acquisition module
//!
//! This module models the upstream sensing session and the acquisition of
//! synchronized raw frames from it.

mod acquirer;
mod session;
pub mod synthetic;
pub mod types;

pub use acquirer::{FrameAcquirer, RawFrame};
pub use session::{AcquiredImage, SensorFrame, SensorSession};
pub use synthetic::SyntheticSession;
pub use types::{Intrinsics, PlaneBuffer};
