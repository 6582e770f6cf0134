//! This module contains the math utils that mainly comes from `cgmath`.

pub use cgmath::*;

pub mod color;
pub use self::color::Color;

pub mod prelude {
    pub use super::color::Color;
    pub use cgmath::prelude::*;
    pub use cgmath::{Deg, Matrix4, Rad, Vector2, Vector3, Vector4};
}

/// Returns the translation column of an affine transform.
#[inline]
pub fn translation_of(m: &Matrix4<f32>) -> Vector3<f32> {
    m.w.truncate()
}

/// Returns a transform rotating `angle` radians around the up (y) axis.
#[inline]
pub fn y_rotation(angle: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Rad(angle))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn translation() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_nonuniform_scale(2.0, 3.0, 4.0);
        assert_eq!(translation_of(&m), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn rotation() {
        let p = y_rotation(::std::f32::consts::PI * 0.5) * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 0.0).abs() < 1e-6);
        assert!((p.z + 1.0).abs() < 1e-6);
    }
}
