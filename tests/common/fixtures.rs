use faceblur::{RecordedDetections, Rectangle};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::NamedTempFile;

/// Face box used across tests
pub const FACE: Rectangle = Rectangle {
    x: 100,
    y: 100,
    width: 200,
    height: 200,
};

/// Face-relative eyes centered at (150, 180) and (250, 180) in image coordinates
pub const LEFT_EYE: Rectangle = Rectangle {
    x: 30,
    y: 60,
    width: 40,
    height: 40,
};
pub const RIGHT_EYE: Rectangle = Rectangle {
    x: 130,
    y: 60,
    width: 40,
    height: 40,
};

/// 400x400 high-frequency checkerboard: blurring it visibly changes every pixel.
pub fn checkerboard_portrait() -> RgbImage {
    ImageBuffer::from_fn(400, 400, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([240u8, 200u8, 180u8])
        } else {
            Rgb([20u8, 40u8, 60u8])
        }
    })
}

pub fn two_eye_detections() -> RecordedDetections {
    RecordedDetections::new(vec![FACE], vec![LEFT_EYE, RIGHT_EYE])
}

/// Opaque black bar with a transparent border row, 400x100.
pub fn glasses_graphic() -> RgbaImage {
    ImageBuffer::from_fn(400, 100, |_, y| {
        if y == 0 {
            Rgba([0u8, 0u8, 0u8, 0u8])
        } else {
            Rgba([0u8, 0u8, 0u8, 255u8])
        }
    })
}

/// Saves an image as PNG to a temp file that is removed on drop.
pub fn save_png(img: &DynamicImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}
