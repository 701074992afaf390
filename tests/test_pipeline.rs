mod common;

use common::*;
use faceblur::pipeline::{BLURRED_FILE, DEBUG_FILE, OVERLAY_FILE, OutputPaths};
use faceblur::{FaceBlurError, Warning};
use image::{DynamicImage, GrayImage};
use std::cell::RefCell;
use std::rc::Rc;

/// Replays fixed faces and remembers the size of every crop handed to eye detection.
struct CropRecorder {
    faces: Vec<Rectangle>,
    crops: Rc<RefCell<Vec<(u32, u32)>>>,
}

impl Detector for CropRecorder {
    fn detect_faces(&self, _gray: &GrayImage) -> Vec<Rectangle> {
        self.faces.clone()
    }

    fn detect_eyes(&self, face: &GrayImage) -> Vec<Rectangle> {
        self.crops.borrow_mut().push(face.dimensions());
        vec![]
    }
}

fn portrait() -> DynamicImage {
    DynamicImage::ImageRgb8(checkerboard_portrait())
}

#[test]
fn full_run_writes_three_outputs() -> anyhow::Result<()> {
    let input = save_png(&portrait());
    let graphic = save_png(&DynamicImage::ImageRgba8(glasses_graphic()));
    let out_dir = tempfile::TempDir::new()?;

    let pipeline = Pipeline::new(Box::new(two_eye_detections())).with_overlay(graphic.path());
    let output = pipeline.process_file(input.path(), &OutputPaths::in_dir(out_dir.path()))?;

    assert!(output.warnings.is_empty());
    assert_eq!(output.eyes.len(), 2);
    for name in [DEBUG_FILE, BLURRED_FILE, OVERLAY_FILE] {
        assert!(out_dir.path().join(name).exists(), "{} missing", name);
    }

    // Glasses cover the anchor point between the eyes
    let anchor = output.with_overlay.get_pixel(200, 172);
    assert!(anchor.0.iter().all(|&c| c < 30), "overlay missing: {:?}", anchor);
    // Far from the overlay the two results agree
    assert_eq!(output.with_overlay.get_pixel(5, 5), output.blurred.get_pixel(5, 5));
    Ok(())
}

#[test]
fn zero_faces_is_fatal_and_writes_nothing() -> anyhow::Result<()> {
    let input = save_png(&portrait());
    let out_dir = tempfile::TempDir::new()?;

    let pipeline = Pipeline::new(Box::new(RecordedDetections::new(vec![], vec![LEFT_EYE])));
    let err = pipeline
        .process_file(input.path(), &OutputPaths::in_dir(out_dir.path()))
        .unwrap_err();

    assert!(matches!(err, FaceBlurError::NoFaceDetected));
    assert!(err.is_fatal_input());
    assert_eq!(std::fs::read_dir(out_dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn undecodable_input_is_fatal() -> anyhow::Result<()> {
    let input = tempfile::Builder::new().suffix(".jpg").tempfile()?;
    std::fs::write(input.path(), b"not an image")?;
    let out_dir = tempfile::TempDir::new()?;

    let pipeline = Pipeline::new(Box::new(two_eye_detections()));
    let err = pipeline
        .process_file(input.path(), &OutputPaths::in_dir(out_dir.path()))
        .unwrap_err();

    assert!(matches!(err, FaceBlurError::Decode { .. }));
    assert!(err.is_fatal_input());
    assert_eq!(std::fs::read_dir(out_dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn single_eye_degrades_and_skips_overlay() -> anyhow::Result<()> {
    let graphic = save_png(&DynamicImage::ImageRgba8(glasses_graphic()));
    let detections = RecordedDetections::new(vec![FACE], vec![LEFT_EYE]);

    let output = Pipeline::new(Box::new(detections))
        .with_overlay(graphic.path())
        .run(&portrait())?;

    assert_eq!(output.warnings, vec![Warning::DegradedDetection { eyes_kept: 1 }]);
    assert_eq!(output.with_overlay, output.blurred);
    Ok(())
}

#[test]
fn missing_overlay_asset_falls_back_to_blur() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let missing = dir.path().join("sunglasses.png");

    let output = Pipeline::new(Box::new(two_eye_detections()))
        .with_overlay(&missing)
        .run(&portrait())?;

    assert_eq!(output.with_overlay, output.blurred);
    assert_eq!(output.warnings.len(), 1);
    assert!(matches!(
        &output.warnings[0],
        Warning::OverlayAssetFailure { path, .. } if path == &missing
    ));
    Ok(())
}

#[test]
fn eyes_in_lower_face_are_ignored() -> anyhow::Result<()> {
    // Third candidate sits at the mouth
    let mouth = Rectangle::new(80, 150, 40, 30);
    let detections = RecordedDetections::new(vec![FACE], vec![LEFT_EYE, RIGHT_EYE, mouth]);

    let output = Pipeline::new(Box::new(detections)).run(&portrait())?;

    assert_eq!(output.eyes, vec![LEFT_EYE, RIGHT_EYE]);
    Ok(())
}

#[test]
fn largest_face_is_processed() -> anyhow::Result<()> {
    let small = Rectangle::new(10, 10, 50, 50);
    let detections = RecordedDetections::new(vec![small, FACE], vec![LEFT_EYE, RIGHT_EYE]);

    let output = Pipeline::new(Box::new(detections)).run(&portrait())?;

    assert_eq!(output.face, FACE);
    Ok(())
}

#[test]
fn debug_dir_receives_masks() -> anyhow::Result<()> {
    let debug_dir = tempfile::TempDir::new()?;
    let pipeline = Pipeline::new(Box::new(two_eye_detections()))
        .with_debug(debug_dir.path().join("masks"))?;

    pipeline.run(&portrait())?;

    for name in ["face_mask.png", "eyes_mask.png", "blur_mask.png"] {
        assert!(debug_dir.path().join("masks").join(name).exists(), "{} missing", name);
    }
    Ok(())
}

#[test]
fn debug_dir_must_be_empty() -> anyhow::Result<()> {
    let debug_dir = tempfile::TempDir::new()?;
    std::fs::write(debug_dir.path().join("stale.png"), b"x")?;

    let result = Pipeline::new(Box::new(two_eye_detections()))
        .with_debug(debug_dir.path().to_path_buf());

    assert!(matches!(result, Err(FaceBlurError::DebugDirNotEmpty(_))));
    Ok(())
}

#[test]
fn invalid_config_is_rejected() {
    let config = BlurConfig {
        blur_kernel_size: 4,
        ..BlurConfig::default()
    };
    let result = Pipeline::new(Box::new(two_eye_detections())).with_config(config);
    assert!(matches!(result, Err(FaceBlurError::InvalidConfig(_))));
}

#[test]
fn eye_detection_sees_the_principal_face_crop() -> anyhow::Result<()> {
    let crops = Rc::new(RefCell::new(Vec::new()));
    let small = Rectangle::new(10, 10, 50, 50);
    let detector = CropRecorder {
        faces: vec![small, FACE],
        crops: Rc::clone(&crops),
    };

    let output = Pipeline::new(Box::new(detector)).run(&portrait())?;

    assert_eq!(output.face, FACE);
    assert_eq!(*crops.borrow(), vec![(200, 200)]);
    Ok(())
}

#[test]
fn eye_detection_crop_is_clamped_to_the_frame() -> anyhow::Result<()> {
    let crops = Rc::new(RefCell::new(Vec::new()));
    // Largest face hangs off the bottom-right corner of the 400x400 frame
    let edge_face = Rectangle::new(300, 320, 150, 150);
    let detector = CropRecorder {
        faces: vec![Rectangle::new(0, 0, 60, 60), edge_face],
        crops: Rc::clone(&crops),
    };

    let output = Pipeline::new(Box::new(detector)).run(&portrait())?;

    assert_eq!(output.face, edge_face);
    assert_eq!(*crops.borrow(), vec![(100, 80)]);
    Ok(())
}

#[test]
fn verbose_reporting_does_not_change_results() -> anyhow::Result<()> {
    let quiet = Pipeline::new(Box::new(two_eye_detections())).run(&portrait())?;
    let verbose = Pipeline::new(Box::new(two_eye_detections()))
        .with_verbose(true)
        .run(&portrait())?;

    assert_eq!(verbose.blurred, quiet.blurred);
    assert_eq!(verbose.debug, quiet.debug);
    Ok(())
}

#[test]
fn write_outputs_encodes_every_image() -> anyhow::Result<()> {
    let out_dir = tempfile::TempDir::new()?;
    let paths = OutputPaths {
        debug: out_dir.path().join("shapes.png"),
        blurred: out_dir.path().join("nested").join("blurred.png"),
        with_overlay: out_dir.path().join("overlay.png"),
    };

    let output = Pipeline::new(Box::new(two_eye_detections())).run(&portrait())?;
    output.write_outputs(&paths)?;

    let reread = image::open(&paths.blurred)?.to_rgb8();
    assert_eq!(reread, output.blurred);
    assert!(paths.debug.exists());
    assert!(paths.with_overlay.exists());
    Ok(())
}

#[test]
fn non_finite_tunables_are_rejected() {
    let config = BlurConfig {
        overlay_width_factor: f64::INFINITY,
        ..BlurConfig::default()
    };
    let result = Pipeline::new(Box::new(two_eye_detections())).with_config(config);
    assert!(matches!(result, Err(FaceBlurError::InvalidConfig(_))));
}
