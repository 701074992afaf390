use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_ellipse_mut, draw_hollow_circle_mut,
    draw_hollow_ellipse_mut,
};
use serde::Deserialize;

/// Mask value for a selected pixel
pub const SELECTED: Luma<u8> = Luma([255]);

/// Axis-aligned detection box, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Center relative to this rectangle's own coordinate frame
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Center of a face-relative rectangle translated into image coordinates
    pub fn center_in(&self, origin: &Rectangle) -> (f64, f64) {
        let (cx, cy) = self.center();
        (origin.x as f64 + cx, origin.y as f64 + cy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center_x: f64,
    pub center_y: f64,
    pub semi_axis_x: f64,
    pub semi_axis_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

/// A region that can be filled onto a mask or outlined onto an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Ellipse(Ellipse),
    Circle(Circle),
}

impl Shape {
    fn center(&self) -> (i32, i32) {
        let (x, y) = match self {
            Shape::Ellipse(e) => (e.center_x, e.center_y),
            Shape::Circle(c) => (c.center_x, c.center_y),
        };
        (x.round() as i32, y.round() as i32)
    }

    fn radii(&self) -> (i32, i32) {
        match self {
            Shape::Ellipse(e) => (e.semi_axis_x as i32, e.semi_axis_y as i32),
            Shape::Circle(c) => {
                let r = c.radius as i32;
                (r, r)
            }
        }
    }

    /// Fill the shape as selected pixels. Anything outside the mask is clipped.
    pub fn rasterize_onto(&self, mask: &mut GrayImage) {
        let center = self.center();
        let (rx, ry) = self.radii();
        match self {
            Shape::Circle(_) => draw_filled_circle_mut(mask, center, rx, SELECTED),
            Shape::Ellipse(_) => draw_filled_ellipse_mut(mask, center, rx, ry, SELECTED),
        }
    }

    /// Draw an unfilled outline `thickness` pixels wide, centered on the boundary.
    pub fn outline_onto(&self, image: &mut RgbImage, color: Rgb<u8>, thickness: u32) {
        let center = self.center();
        let (rx, ry) = self.radii();
        let inner = thickness as i32 / 2;
        for step in 0..thickness as i32 {
            let offset = step - inner;
            let (sx, sy) = ((rx + offset).max(0), (ry + offset).max(0));
            match self {
                Shape::Circle(_) => draw_hollow_circle_mut(image, center, sx, color),
                Shape::Ellipse(_) => draw_hollow_ellipse_mut(image, center, sx, sy, color),
            }
        }
    }
}

/// The two eyes used for overlay placement, in image coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePair {
    pub left: (f64, f64),
    pub right: (f64, f64),
}

impl EyePair {
    /// Leftmost and rightmost of the face-relative eyes, by x. Ties keep detection order.
    pub fn select(face: &Rectangle, eyes: &[Rectangle]) -> Option<Self> {
        if eyes.len() < 2 {
            return None;
        }
        let mut sorted = eyes.to_vec();
        sorted.sort_by_key(|e| e.x);
        let left = sorted.first()?.center_in(face);
        let right = sorted.last()?.center_in(face);
        Some(Self { left, right })
    }

    pub fn distance(&self) -> f64 {
        (self.right.0 - self.left.0).hypot(self.right.1 - self.left.1)
    }

    pub fn midpoint(&self) -> (f64, f64) {
        (
            (self.left.0 + self.right.0) / 2.0,
            (self.left.1 + self.right.1) / 2.0,
        )
    }
}
