//! Per-frame motion rules of scene nodes.
//!
//! A node either spins around its own up axis by a constant increment per tick, or
//! travels along an ellipse at a speed scaled by the elapsed time. Spinning is not
//! scaled by the elapsed time, so its speed depends on the frame rate. A tick with
//! zero elapsed time is not a frame, and moves nothing.

pub mod ellipse;
pub use self::ellipse::{Ellipse, Orbit, Steps};

pub mod prelude {
    pub use super::{Ellipse, Motion, Orbit, Spin};
}

use crate::errors::*;
use crate::math::prelude::*;
use crate::math::{translation_of, y_rotation};

/// Rotates about the local up axis by `angular_speed` radians every tick with a
/// non-zero time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub angular_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    SelfRotation(Spin),
    OrbitalEllipse(Orbit),
}

impl From<Spin> for Motion {
    fn from(spin: Spin) -> Self {
        Motion::SelfRotation(spin)
    }
}

impl From<Orbit> for Motion {
    fn from(orbit: Orbit) -> Self {
        Motion::OrbitalEllipse(orbit)
    }
}

impl Motion {
    #[inline]
    pub fn spin(angular_speed: f32) -> Self {
        Motion::SelfRotation(Spin { angular_speed })
    }

    /// Creates an orbit around the parent origin, starting at phase zero.
    pub fn orbit(semi_major: f32, semi_minor: f32, angular_speed: f32) -> Result<Self> {
        let ellipse = Ellipse::new(semi_major, semi_minor)?;
        Ok(Motion::OrbitalEllipse(Orbit::new(ellipse, angular_speed)))
    }

    /// Checks the parameters of this motion.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Motion::SelfRotation(spin) => {
                if spin.angular_speed.is_finite() {
                    Ok(())
                } else {
                    Err(Error::NonFiniteParameter("angular_speed"))
                }
            }
            Motion::OrbitalEllipse(ref orbit) => orbit.validate(),
        }
    }

    /// Returns the orbit state if this is an orbital motion.
    #[inline]
    pub fn as_orbit(&self) -> Option<&Orbit> {
        match *self {
            Motion::OrbitalEllipse(ref orbit) => Some(orbit),
            _ => None,
        }
    }

    /// Advances the motion by `dt` and applies it to the local transform.
    ///
    /// Orbits only move the translation by the delta towards the new target, so the
    /// rotation and scale baked into `local` are kept.
    pub fn apply(&mut self, local: &mut Matrix4<f32>, dt: f32) {
        match *self {
            Motion::SelfRotation(spin) => {
                if dt > 0.0 {
                    *local = y_rotation(spin.angular_speed) * *local;
                }
            }
            Motion::OrbitalEllipse(ref mut orbit) => {
                let target = orbit.advance(dt);
                translate_to(local, target);
            }
        }
    }

    /// Moves an orbiting transform onto its orbit at the current phase, without
    /// advancing it. Spinning transforms are left untouched.
    pub fn place(&self, local: &mut Matrix4<f32>) {
        if let Motion::OrbitalEllipse(ref orbit) = *self {
            translate_to(local, orbit.position());
        }
    }
}

#[inline]
fn translate_to(local: &mut Matrix4<f32>, target: Vector3<f32>) {
    let delta = target - translation_of(local);
    *local = Matrix4::from_translation(delta) * *local;
}
