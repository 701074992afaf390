pub mod compositing;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod preprocessing;

pub use config::BlurConfig;
pub use detection::{Detector, RecordedDetections};
pub use error::{FaceBlurError, Warning};
pub use models::{Circle, Ellipse, EyePair, Rectangle, Shape};
pub use pipeline::{OutputPaths, Pipeline, PipelineOutput};
