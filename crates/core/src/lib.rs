//! Photo-based color calibration and personal-color classification.
//!
//! A strict five-stage pipeline over one photo: quality gate → face
//! geometry → color calibration → lighting uniformity → twelve-tone
//! classification. Each stage gates the next; failures surface as typed
//! [`error::AnalysisError`] values with matching user feedback messages.
//!
//! Landmark detection and the optional vision oracle are injected
//! capabilities ([`geometry::provider::LandmarkProvider`],
//! [`pipeline::vision_fallback::VisionFallback`]), so the whole pipeline
//! is deterministic and unit-testable with stubs.

pub mod calibration;
pub mod classify;
pub mod color;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod quality;
pub mod shared;
pub mod uniformity;

pub use error::AnalysisError;
pub use pipeline::analyze_photo_use_case::{AnalyzePhotoUseCase, Classification, PhotoAnalysis};
pub use shared::frame::Frame;
pub use shared::lab::LabColor;
