use image::{Rgb, RgbImage};

use super::mask::shapes_for;
use crate::config::BlurConfig;
use crate::models::Rectangle;

pub const ELLIPSE_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
pub const EYE_COLOR: Rgb<u8> = Rgb([255, 128, 0]);

/// Outline the face ellipse and eye circles on a copy of `original`.
pub fn draw_debug_shapes(
    original: &RgbImage,
    face: &Rectangle,
    eyes: &[Rectangle],
    config: &BlurConfig,
) -> RgbImage {
    let mut canvas = original.clone();
    let (ellipse, circles) = shapes_for(face, eyes, config);
    ellipse.outline_onto(&mut canvas, ELLIPSE_COLOR, config.outline_thickness);
    for circle in &circles {
        circle.outline_onto(&mut canvas, EYE_COLOR, config.outline_thickness);
    }
    canvas
}
