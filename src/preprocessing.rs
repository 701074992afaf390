use image::RgbImage;
use imageproc::filter::gaussian_blur_f32;

/// Apply an isotropic Gaussian blur over the whole frame
pub fn apply_blur(img: &RgbImage, sigma: f32) -> RgbImage {
    gaussian_blur_f32(img, sigma)
}
