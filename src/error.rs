use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceBlurError {
    #[error("failed to decode input image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no face detected in input image")]
    NoFaceDetected,

    #[error("invalid detections file {path}: {reason}")]
    Detections { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("debug directory is not empty: {0}")]
    DebugDirNotEmpty(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FaceBlurError {
    /// The run cannot start: the input is unreadable or holds no face.
    pub fn is_fatal_input(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::NoFaceDetected)
    }
}

/// Recoverable conditions. The run still produces every output.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Fewer than two eyes survived filtering; overlay placement was skipped.
    DegradedDetection { eyes_kept: usize },
    /// The overlay graphic could not be loaded; overlay placement was skipped.
    OverlayAssetFailure { path: PathBuf, reason: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DegradedDetection { eyes_kept } => write!(
                f,
                "only {} eye(s) detected, overlay skipped",
                eyes_kept
            ),
            Warning::OverlayAssetFailure { path, reason } => write!(
                f,
                "could not load overlay {}: {}",
                path.display(),
                reason
            ),
        }
    }
}
