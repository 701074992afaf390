use crate::models::{Circle, Ellipse, Rectangle};

/// Blur region for a face: centered horizontally, shifted down by `shift_y` of the height.
pub fn face_ellipse(face: &Rectangle, scale_x: f64, scale_y: f64, shift_y: f64) -> Ellipse {
    let (w, h) = (face.width as f64, face.height as f64);
    Ellipse {
        center_x: face.x as f64 + w / 2.0,
        center_y: face.y as f64 + h * (0.5 + shift_y),
        semi_axis_x: w * scale_x / 2.0,
        semi_axis_y: h * scale_y / 2.0,
    }
}

/// Sharp region for a face-relative eye box, in image coordinates.
pub fn eye_circle(eye: &Rectangle, face_origin: &Rectangle, radius_factor: f64) -> Circle {
    let (center_x, center_y) = eye.center_in(face_origin);
    Circle {
        center_x,
        center_y,
        radius: radius_factor * eye.width.max(eye.height) as f64,
    }
}
