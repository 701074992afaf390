pub mod debug;
pub mod geometry;
pub mod mask;
pub mod overlay;

pub use debug::draw_debug_shapes;
pub use geometry::{eye_circle, face_ellipse};
pub use mask::{FaceMasks, blend, blur_face_except_eyes, build_masks};
pub use overlay::{OverlayPlacement, compute_placement, place_overlay};
