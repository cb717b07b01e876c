//! Affine helpers on top of `tiny_skia::Transform`.
//!
//! Canvas-style `translate / rotate / translate back` sequences are expressed
//! as a single transform value that the caller composes onto the context
//! transform with `pre_concat`.

use tiny_skia::Transform;

/// Rotation by `angle` radians around `(cx, cy)`.
pub fn rotate_about(cx: f32, cy: f32, angle: f64) -> Transform {
    Transform::from_translate(cx, cy)
        .pre_concat(Transform::from_rotate(angle.to_degrees() as f32))
        .pre_concat(Transform::from_translate(-cx, -cy))
}

/// Rotation angle (radians) encoded in a rotation/translation transform.
pub fn rotation_of(transform: &Transform) -> f64 {
    (transform.ky as f64).atan2(transform.sx as f64)
}
