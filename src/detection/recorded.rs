use image::GrayImage;
use serde::Deserialize;
use std::path::Path;

use super::Detector;
use crate::error::FaceBlurError;
use crate::models::Rectangle;

/// Detector that replays detections produced elsewhere.
///
/// JSON layout: `{ "faces": [{ "x", "y", "width", "height" }, ...], "eyes": [...] }`.
/// Eyes are relative to the principal (largest) face.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordedDetections {
    #[serde(default)]
    pub faces: Vec<Rectangle>,
    #[serde(default)]
    pub eyes: Vec<Rectangle>,
}

impl RecordedDetections {
    pub fn new(faces: Vec<Rectangle>, eyes: Vec<Rectangle>) -> Self {
        Self { faces, eyes }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, FaceBlurError> {
        let text = std::fs::read_to_string(path).map_err(|e| FaceBlurError::Detections {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| FaceBlurError::Detections {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl Detector for RecordedDetections {
    fn detect_faces(&self, _gray: &GrayImage) -> Vec<Rectangle> {
        self.faces.clone()
    }

    fn detect_eyes(&self, _face: &GrayImage) -> Vec<Rectangle> {
        self.eyes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_faces_and_eyes() {
        let json = r#"{
            "faces": [{ "x": 10, "y": 20, "width": 100, "height": 120 }],
            "eyes": [{ "x": 20, "y": 30, "width": 25, "height": 25 }]
        }"#;
        let recorded: RecordedDetections = serde_json::from_str(json).unwrap();
        assert_eq!(recorded.faces, vec![Rectangle::new(10, 20, 100, 120)]);
        assert_eq!(recorded.eyes, vec![Rectangle::new(20, 30, 25, 25)]);
    }

    #[test]
    fn eyes_are_optional() {
        let recorded: RecordedDetections =
            serde_json::from_str(r#"{ "faces": [] }"#).unwrap();
        assert!(recorded.eyes.is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RecordedDetections::from_json_file(Path::new("/nonexistent/detections.json"))
            .unwrap_err();
        assert!(matches!(err, FaceBlurError::Detections { .. }));
    }
}
