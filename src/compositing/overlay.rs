use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, Rgba, Rgba32FImage, RgbaImage};
use std::path::Path;

use crate::config::BlurConfig;
use crate::models::{EyePair, Rectangle};

/// Where and how large the overlay lands on the destination image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub width: u32,
    pub height: u32,
    /// Point the overlay is centered on
    pub anchor: (f64, f64),
    /// Top-left corner; may be negative or past the image edge
    pub x: i64,
    pub y: i64,
}

/// Size the overlay from the eye distance and lift it slightly above the eye line.
///
/// Returns `None` when the overlay would collapse to zero pixels.
pub fn compute_placement(
    eyes: &EyePair,
    graphic_size: (u32, u32),
    config: &BlurConfig,
) -> Option<OverlayPlacement> {
    let (graphic_w, graphic_h) = graphic_size;
    if graphic_w == 0 || graphic_h == 0 {
        return None;
    }

    let width = (eyes.distance() * config.overlay_width_factor).round();
    let height = (width * graphic_h as f64 / graphic_w as f64).round();
    if width < 1.0 || height < 1.0 {
        return None;
    }

    let (mid_x, mid_y) = eyes.midpoint();
    let anchor = (mid_x, mid_y - config.overlay_lift_fraction * height);

    Some(OverlayPlacement {
        width: width as u32,
        height: height as u32,
        anchor,
        x: (anchor.0 - width / 2.0).round() as i64,
        y: (anchor.1 - height / 2.0).round() as i64,
    })
}

/// Load an overlay graphic; opaque formats gain a full alpha channel.
pub fn load_graphic(path: &Path) -> Result<RgbaImage, image::ImageError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Resize in premultiplied space so colour under transparent pixels never
/// bleeds into the filtered edge. Channels stay in 0..=1 while filtering.
pub fn resize_premultiplied(graphic: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(graphic.width(), graphic.height(), |x, y| {
        let p = graphic.get_pixel(x, y);
        let a = p[3] as f32 / 255.0;
        let c = |v: u8| v as f32 / 255.0 * a;
        Rgba([c(p[0]), c(p[1]), c(p[2]), a])
    });
    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    RgbaImage::from_fn(width, height, |x, y| {
        let p = resized.get_pixel(x, y);
        let a = p[3].clamp(0.0, 1.0);
        if a * 255.0 < 0.5 {
            return Rgba([0, 0, 0, 0]);
        }
        let channel = |v: f32| (v / a * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba([channel(p[0]), channel(p[1]), channel(p[2]), (a * 255.0).round() as u8])
    })
}

fn source_over(dst: &mut Rgb<u8>, src: &Rgba<u8>) {
    let alpha = src[3] as u32;
    for c in 0..3 {
        let blended = src[c] as u32 * alpha + dst[c] as u32 * (255 - alpha);
        dst[c] = ((blended + 127) / 255) as u8;
    }
}

/// Source-over composite with clipping. Fully transparent pixels leave the destination untouched.
pub fn composite(base: &mut RgbImage, graphic: &RgbaImage, x: i64, y: i64) {
    let (base_w, base_h) = (base.width() as i64, base.height() as i64);
    for (gx, gy, src) in graphic.enumerate_pixels() {
        if src[3] == 0 {
            continue;
        }
        let (tx, ty) = (x + gx as i64, y + gy as i64);
        if tx < 0 || ty < 0 || tx >= base_w || ty >= base_h {
            continue;
        }
        source_over(base.get_pixel_mut(tx as u32, ty as u32), src);
    }
}

/// Place the graphic over the eyes of `face`. Fewer than two eyes returns a plain copy.
pub fn place_overlay(
    base: &RgbImage,
    face: &Rectangle,
    eyes: &[Rectangle],
    graphic: &RgbaImage,
    config: &BlurConfig,
) -> RgbImage {
    let mut out = base.clone();
    let Some(pair) = EyePair::select(face, eyes) else {
        return out;
    };
    let Some(placement) = compute_placement(&pair, graphic.dimensions(), config) else {
        return out;
    };

    let resized;
    let sized = if graphic.dimensions() == (placement.width, placement.height) {
        graphic
    } else {
        resized = resize_premultiplied(graphic, placement.width, placement.height);
        &resized
    };
    composite(&mut out, sized, placement.x, placement.y);
    out
}
