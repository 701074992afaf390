use image::{GrayImage, Luma, RgbImage};

use super::geometry::{eye_circle, face_ellipse};
use crate::config::BlurConfig;
use crate::models::{Rectangle, SELECTED, Shape};
use crate::preprocessing;

/// The three masks behind one blend, kept for debug output
#[derive(Debug, Clone)]
pub struct FaceMasks {
    pub face: GrayImage,
    pub eyes: GrayImage,
    pub blur: GrayImage,
}

/// Face ellipse followed by one circle per eye.
pub fn shapes_for(face: &Rectangle, eyes: &[Rectangle], config: &BlurConfig) -> (Shape, Vec<Shape>) {
    let ellipse = face_ellipse(
        face,
        config.ellipse_scale_x,
        config.ellipse_scale_y,
        config.ellipse_shift_y,
    );
    let circles = eyes
        .iter()
        .map(|eye| Shape::Circle(eye_circle(eye, face, config.eye_radius_factor)))
        .collect();
    (Shape::Ellipse(ellipse), circles)
}

fn rasterize(width: u32, height: u32, shapes: &[Shape]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    for shape in shapes {
        shape.rasterize_onto(&mut mask);
    }
    mask
}

/// face AND NOT eyes, pixel-wise
pub fn subtract(face: &GrayImage, eyes: &GrayImage) -> GrayImage {
    GrayImage::from_fn(face.width(), face.height(), |x, y| {
        if face.get_pixel(x, y)[0] != 0 && eyes.get_pixel(x, y)[0] == 0 {
            SELECTED
        } else {
            Luma([0])
        }
    })
}

pub fn build_masks(
    width: u32,
    height: u32,
    face: &Rectangle,
    eyes: &[Rectangle],
    config: &BlurConfig,
) -> FaceMasks {
    let (ellipse, circles) = shapes_for(face, eyes, config);
    let face_mask = rasterize(width, height, &[ellipse]);
    let eyes_mask = rasterize(width, height, &circles);
    let blur = subtract(&face_mask, &eyes_mask);
    FaceMasks {
        face: face_mask,
        eyes: eyes_mask,
        blur,
    }
}

/// Take `blurred` where the mask is selected and `original` elsewhere.
/// All channels of a pixel follow the same mask value.
pub fn blend(original: &RgbImage, blurred: &RgbImage, mask: &GrayImage) -> RgbImage {
    let mut out = original.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if mask.get_pixel(x, y)[0] != 0 {
            *pixel = *blurred.get_pixel(x, y);
        }
    }
    out
}

/// Blur the face ellipse while keeping each eye circle sharp.
///
/// The blur runs over the whole frame before masking so the ellipse boundary
/// samples real neighbours rather than a cut-out.
pub fn blur_face_except_eyes(
    original: &RgbImage,
    face: &Rectangle,
    eyes: &[Rectangle],
    config: &BlurConfig,
) -> (RgbImage, FaceMasks) {
    let (width, height) = original.dimensions();
    let masks = build_masks(width, height, face, eyes, config);
    let blurred = preprocessing::apply_blur(original, config.effective_sigma());
    (blend(original, &blurred, &masks.blur), masks)
}
