pub mod recorded;

use image::GrayImage;
use tracing::debug;

use crate::error::FaceBlurError;
use crate::models::Rectangle;

pub use recorded::RecordedDetections;

/// Pluggable face and eye detection backend.
///
/// Faces are reported in the coordinates of the full grayscale image. Eyes are
/// reported relative to the top-left corner of the face sub-image they were found in.
pub trait Detector {
    fn detect_faces(&self, gray: &GrayImage) -> Vec<Rectangle>;

    fn detect_eyes(&self, face: &GrayImage) -> Vec<Rectangle>;
}

/// Pick the largest face. Ties keep the earlier detection.
pub fn principal_face(faces: &[Rectangle]) -> Result<Rectangle, FaceBlurError> {
    faces
        .iter()
        .copied()
        .reduce(|best, f| if f.area() > best.area() { f } else { best })
        .ok_or(FaceBlurError::NoFaceDetected)
}

/// Keep eyes whose vertical center sits in the upper `band` fraction of the face.
/// Lower detections are usually nostrils or mouth corners.
pub fn filter_eyes(eyes: &[Rectangle], face: &Rectangle, band: f64) -> Vec<Rectangle> {
    let limit = face.height as f64 * band;
    eyes.iter()
        .filter(|e| {
            let keep = e.y as f64 + e.height as f64 / 2.0 < limit;
            if !keep {
                debug!("Dropping eye candidate {:?} below {:.1}px", e, limit);
            }
            keep
        })
        .copied()
        .collect()
}

/// Crop the face region from the grayscale frame, clamped to the image.
pub fn face_subimage(gray: &GrayImage, face: &Rectangle) -> GrayImage {
    let x = face.x.min(gray.width());
    let y = face.y.min(gray.height());
    let width = face.width.min(gray.width() - x);
    let height = face.height.min(gray.height() - y);
    image::imageops::crop_imm(gray, x, y, width, height).to_image()
}

/// Run face detection, pick the principal face and its filtered eyes.
pub fn locate(
    detector: &dyn Detector,
    gray: &GrayImage,
    eye_band_fraction: f64,
) -> Result<(Rectangle, Vec<Rectangle>), FaceBlurError> {
    let faces = detector.detect_faces(gray);
    debug!("Detected {} face(s)", faces.len());
    let face = principal_face(&faces)?;

    let roi = face_subimage(gray, &face);
    let eyes = detector.detect_eyes(&roi);
    let kept = filter_eyes(&eyes, &face, eye_band_fraction);
    debug!("Detected {} eye(s), kept {}", eyes.len(), kept.len());

    Ok((face, kept))
}
