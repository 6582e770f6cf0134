use std::f32::consts::PI;

use crate::errors::*;
use crate::math::prelude::*;

const TWO_PI: f32 = 2.0 * PI;

/// An axis-aligned ellipse in the orbit plane (the xz plane, orthogonal to the
/// up axis).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    semi_major: f32,
    semi_minor: f32,
}

impl Ellipse {
    /// Creates an ellipse with semi-axis `semi_major` along x and `semi_minor`
    /// along z. Both must be finite positive numbers.
    pub fn new(semi_major: f32, semi_minor: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(semi_major) || !valid(semi_minor) {
            return Err(Error::InvalidSemiAxes(semi_major, semi_minor));
        }

        Ok(Ellipse {
            semi_major,
            semi_minor,
        })
    }

    #[inline]
    pub fn semi_major(&self) -> f32 {
        self.semi_major
    }

    #[inline]
    pub fn semi_minor(&self) -> f32 {
        self.semi_minor
    }

    /// Maps a phase angle in radians to the point `(a cos θ, b sin θ)`, returned as
    /// `(x, z)`.
    #[inline]
    pub fn point(&self, phase: f32) -> Vector2<f32> {
        Vector2::new(
            self.semi_major * phase.cos(),
            self.semi_minor * phase.sin(),
        )
    }

    /// Samples a closed polyline of `steps + 1` points in the y=0 plane. The first
    /// and the last point are the same.
    pub fn sample(&self, steps: usize) -> Result<Vec<Vector3<f32>>> {
        if steps == 0 {
            return Err(Error::InvalidPathSteps);
        }

        let points = (0..=steps)
            .map(|i| {
                let phase = TWO_PI * (i % steps) as f32 / steps as f32;
                let p = self.point(phase);
                Vector3::new(p.x, 0.0, p.y)
            })
            .collect();

        Ok(points)
    }
}

/// The phase state of a body travelling along an ellipse. Every `advance` moves the
/// phase forward by `angular_speed * dt` and yields the new target position, forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    ellipse: Ellipse,
    angular_speed: f32,
    center_offset: Vector3<f32>,
    phase: f32,
}

impl Orbit {
    pub fn new(ellipse: Ellipse, angular_speed: f32) -> Self {
        Orbit {
            ellipse,
            angular_speed,
            center_offset: Vector3::zero(),
            phase: 0.0,
        }
    }

    /// Moves the center of the ellipse away from the parent origin.
    pub fn with_center_offset<T>(mut self, offset: T) -> Self
    where
        T: Into<Vector3<f32>>,
    {
        self.center_offset = offset.into();
        self
    }

    /// Starts the orbit at `phase` radians instead of zero.
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = wrap(phase);
        self
    }

    /// Checks that every parameter is a finite number.
    pub fn validate(&self) -> Result<()> {
        Ellipse::new(self.ellipse.semi_major, self.ellipse.semi_minor)?;

        if !self.angular_speed.is_finite() {
            return Err(Error::NonFiniteParameter("angular_speed"));
        }

        let o = self.center_offset;
        if !(o.x.is_finite() && o.y.is_finite() && o.z.is_finite()) {
            return Err(Error::NonFiniteParameter("center_offset"));
        }

        if !self.phase.is_finite() {
            return Err(Error::NonFiniteParameter("phase"));
        }

        Ok(())
    }

    #[inline]
    pub fn ellipse(&self) -> Ellipse {
        self.ellipse
    }

    #[inline]
    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    #[inline]
    pub fn center_offset(&self) -> Vector3<f32> {
        self.center_offset
    }

    /// The current phase, in `[0, 2π)`.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Returns the time it takes to go around once, or `None` if the body is at rest.
    pub fn period(&self) -> Option<f32> {
        if self.angular_speed == 0.0 {
            None
        } else {
            Some(TWO_PI / self.angular_speed.abs())
        }
    }

    /// Target position at the current phase, in the parent space.
    #[inline]
    pub fn position(&self) -> Vector3<f32> {
        let p = self.ellipse.point(self.phase);
        Vector3::new(p.x, 0.0, p.y) + self.center_offset
    }

    /// Advances the phase by `angular_speed * dt` and returns the new target position.
    pub fn advance(&mut self, dt: f32) -> Vector3<f32> {
        self.phase = wrap(self.phase + self.angular_speed * dt);
        self.position()
    }

    /// Restarts the orbit from phase zero.
    #[inline]
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Returns an endless iterator which advances this orbit by `dt` per item.
    #[inline]
    pub fn steps(&mut self, dt: f32) -> Steps {
        Steps { orbit: self, dt }
    }
}

/// An endless iterator of orbit positions, created by `Orbit::steps`.
pub struct Steps<'a> {
    orbit: &'a mut Orbit,
    dt: f32,
}

impl<'a> Iterator for Steps<'a> {
    type Item = Vector3<f32>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.orbit.advance(self.dt))
    }
}

// Wraps an angle into [0, 2π).
fn wrap(phase: f32) -> f32 {
    let v = phase % TWO_PI;
    let v = if v < 0.0 { v + TWO_PI } else { v };
    if v >= TWO_PI {
        0.0
    } else {
        v
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wrap_phase() {
        assert_eq!(wrap(0.0), 0.0);
        assert_eq!(wrap(1.0), 1.0);
        assert!((wrap(TWO_PI + 1.0) - 1.0).abs() < 1e-5);
        assert!((wrap(-1.0) - (TWO_PI - 1.0)).abs() < 1e-5);
        assert!(wrap(-1e-9) < TWO_PI);
    }

    #[test]
    fn zero_delta() {
        let mut orbit = Orbit::new(Ellipse::new(3.0, 2.0).unwrap(), 1.0).with_phase(0.5);
        let before = orbit.position();
        assert_eq!(orbit.advance(0.0), before);
        assert_eq!(orbit.phase(), 0.5);
    }
}
