use serde::Deserialize;
use std::path::Path;

use crate::error::FaceBlurError;

/// Tunables for every stage. Built once and passed by reference; never mutated mid-run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Ellipse width relative to the face width
    pub ellipse_scale_x: f64,
    /// Ellipse height relative to the face height
    pub ellipse_scale_y: f64,
    /// Downward shift of the ellipse center, as a fraction of face height
    pub ellipse_shift_y: f64,
    /// Eye circle radius as a fraction of the larger eye box side
    pub eye_radius_factor: f64,
    /// Nominal Gaussian kernel size, odd. Only used to derive sigma when
    /// `blur_sigma` is 0; the blur picks its own kernel extent from sigma.
    pub blur_kernel_size: u32,
    /// Gaussian sigma; 0 derives it from the kernel size
    pub blur_sigma: f32,
    /// Eyes must have their center within this upper fraction of the face
    pub eye_band_fraction: f64,
    /// Overlay width as a multiple of the eye distance
    pub overlay_width_factor: f64,
    /// Upward anchor shift as a fraction of overlay height
    pub overlay_lift_fraction: f64,
    /// Debug outline stroke width in pixels
    pub outline_thickness: u32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            ellipse_scale_x: 1.05,
            ellipse_scale_y: 1.20,
            ellipse_shift_y: 0.05,
            eye_radius_factor: 0.25,
            blur_kernel_size: 55,
            blur_sigma: 0.0,
            eye_band_fraction: 0.65,
            overlay_width_factor: 2.2,
            overlay_lift_fraction: 0.15,
            outline_thickness: 2,
        }
    }
}

impl BlurConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, FaceBlurError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| FaceBlurError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FaceBlurError> {
        let invalid = |msg: &str| Err(FaceBlurError::InvalidConfig(msg.to_string()));

        let floats = [
            self.ellipse_scale_x,
            self.ellipse_scale_y,
            self.ellipse_shift_y,
            self.eye_radius_factor,
            self.eye_band_fraction,
            self.overlay_width_factor,
            self.overlay_lift_fraction,
        ];
        if !floats.iter().all(|v| v.is_finite()) || !self.blur_sigma.is_finite() {
            return invalid("tunables must be finite numbers");
        }

        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return invalid("blur_kernel_size must be a positive odd number");
        }
        if self.blur_sigma < 0.0 {
            return invalid("blur_sigma must not be negative");
        }
        if self.ellipse_scale_x <= 0.0 || self.ellipse_scale_y <= 0.0 {
            return invalid("ellipse scales must be positive");
        }
        if self.eye_radius_factor <= 0.0 || self.overlay_width_factor <= 0.0 {
            return invalid("eye_radius_factor and overlay_width_factor must be positive");
        }
        if !(self.eye_band_fraction > 0.0 && self.eye_band_fraction <= 1.0) {
            return invalid("eye_band_fraction must be in (0, 1]");
        }
        if self.outline_thickness == 0 {
            return invalid("outline_thickness must be at least 1");
        }
        Ok(())
    }

    /// Sigma actually handed to the blur primitive.
    pub fn effective_sigma(&self) -> f32 {
        if self.blur_sigma > 0.0 {
            return self.blur_sigma;
        }
        let k = self.blur_kernel_size as f32;
        0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
    }
}
