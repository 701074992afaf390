use image::{DynamicImage, GrayImage, ImageReader, RgbImage};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::compositing::{blur_face_except_eyes, draw_debug_shapes, overlay, FaceMasks};
use crate::config::BlurConfig;
use crate::detection::{self, Detector};
use crate::error::{FaceBlurError, Warning};
use crate::models::Rectangle;

/// Default file names for the three outputs
pub const DEBUG_FILE: &str = "debug_shapes.jpg";
pub const BLURRED_FILE: &str = "result_blur_no_glasses.jpg";
pub const OVERLAY_FILE: &str = "result_blur_with_glasses.jpg";

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Directory receiving the intermediate masks
    pub output_dir: PathBuf,
}

/// Where each output image is written
#[derive(Clone, Debug)]
pub struct OutputPaths {
    pub debug: PathBuf,
    pub blurred: PathBuf,
    pub with_overlay: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            debug: dir.join(DEBUG_FILE),
            blurred: dir.join(BLURRED_FILE),
            with_overlay: dir.join(OVERLAY_FILE),
        }
    }
}

/// Everything one run produces, held in memory until written
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub debug: RgbImage,
    pub blurred: RgbImage,
    pub with_overlay: RgbImage,
    pub face: Rectangle,
    pub eyes: Vec<Rectangle>,
    pub warnings: Vec<Warning>,
}

impl PipelineOutput {
    /// Encode all three images. The format follows each path's extension.
    pub fn write_outputs(&self, paths: &OutputPaths) -> Result<(), FaceBlurError> {
        for (image, path) in [
            (&self.debug, &paths.debug),
            (&self.blurred, &paths.blurred),
            (&self.with_overlay, &paths.with_overlay),
        ] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            image.save(path).map_err(|source| FaceBlurError::Encode {
                path: path.clone(),
                source,
            })?;
            debug!("Wrote {}", path.display());
        }
        Ok(())
    }
}

/// Face blur pipeline: detect, mask, blend, then place the overlay.
pub struct Pipeline {
    detector: Box<dyn Detector>,
    config: BlurConfig,
    overlay: Option<PathBuf>,
    debug: Option<DebugConfig>,
    verbose: bool,
}

impl Pipeline {
    pub fn new(detector: Box<dyn Detector>) -> Self {
        Self {
            detector,
            config: BlurConfig::default(),
            overlay: None,
            debug: None,
            verbose: false,
        }
    }

    pub fn with_config(mut self, config: BlurConfig) -> Result<Self, FaceBlurError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Overlay graphic (PNG with alpha) placed over the eyes
    pub fn with_overlay(mut self, path: impl Into<PathBuf>) -> Self {
        self.overlay = Some(path.into());
        self
    }

    /// Report per-stage summaries at info level instead of debug
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self, FaceBlurError> {
        if output_dir.exists() {
            if std::fs::read_dir(&output_dir)?.next().is_some() {
                return Err(FaceBlurError::DebugDirNotEmpty(output_dir));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }
        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Run on a decoded image. Nothing is written to disk except debug masks.
    pub fn run(&self, input: &DynamicImage) -> Result<PipelineOutput, FaceBlurError> {
        let original = input.to_rgb8();
        let gray = input.to_luma8();
        self.report(format_args!("Processing {}x{} image", original.width(), original.height()));

        let (face, eyes) = detection::locate(self.detector.as_ref(), &gray, self.config.eye_band_fraction)?;
        self.report(format_args!(
            "Principal face at ({}, {}) {}x{}, {} eye(s)",
            face.x, face.y, face.width, face.height, eyes.len()
        ));

        let mut warnings = Vec::new();
        if eyes.len() < 2 {
            let warning = Warning::DegradedDetection { eyes_kept: eyes.len() };
            warn!("{}", warning);
            warnings.push(warning);
        }

        let debug_image = draw_debug_shapes(&original, &face, &eyes, &self.config);
        let (blurred, masks) = blur_face_except_eyes(&original, &face, &eyes, &self.config);
        self.save_masks(&masks)?;

        let with_overlay = match &self.overlay {
            None => blurred.clone(),
            Some(_) if eyes.len() < 2 => blurred.clone(),
            Some(path) => match overlay::load_graphic(path) {
                Ok(graphic) => overlay::place_overlay(&blurred, &face, &eyes, &graphic, &self.config),
                Err(e) => {
                    let warning = Warning::OverlayAssetFailure {
                        path: path.clone(),
                        reason: e.to_string(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                    blurred.clone()
                }
            },
        };

        Ok(PipelineOutput {
            debug: debug_image,
            blurred,
            with_overlay,
            face,
            eyes,
            warnings,
        })
    }

    /// Decode, run, and write all outputs. A fatal error leaves no output files behind.
    pub fn process_file(&self, input: &Path, paths: &OutputPaths) -> Result<PipelineOutput, FaceBlurError> {
        let decode_err = |source: image::ImageError| FaceBlurError::Decode {
            path: input.to_path_buf(),
            source,
        };
        let image = ImageReader::open(input)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_err(image::ImageError::IoError(e)))?
            .decode()
            .map_err(decode_err)?;

        let output = self.run(&image)?;
        output.write_outputs(paths)?;
        Ok(output)
    }

    fn report(&self, message: std::fmt::Arguments<'_>) {
        if self.verbose {
            info!("{}", message);
        } else {
            debug!("{}", message);
        }
    }

    fn save_masks(&self, masks: &FaceMasks) -> Result<(), FaceBlurError> {
        let Some(debug_config) = &self.debug else {
            return Ok(());
        };
        let named: [(&str, &GrayImage); 3] = [
            ("face_mask.png", &masks.face),
            ("eyes_mask.png", &masks.eyes),
            ("blur_mask.png", &masks.blur),
        ];
        for (name, mask) in named {
            let path = debug_config.output_dir.join(name);
            mask.save(&path).map_err(|source| FaceBlurError::Encode {
                path: path.clone(),
                source,
            })?;
            debug!("Debug: saved {}", path.display());
        }
        Ok(())
    }
}
