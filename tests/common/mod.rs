mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from faceblur for tests
pub use faceblur::{BlurConfig, Detector, Pipeline, RecordedDetections, Rectangle};
