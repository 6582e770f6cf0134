/// Linear RGBA color of a body or an orbit path. Components stay in `[0, 1]`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Creates a color, saturating every component into `[0, 1]`. NaN becomes 0.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        let saturate = |v: f32| v.max(0.0).min(1.0);
        Color {
            r: saturate(r),
            g: saturate(g),
            b: saturate(b),
            a: saturate(a),
        }
    }

    /// Component-wise product, used to shade a base color with a multiplier.
    #[inline]
    pub fn modulate(self, rhs: Color) -> Color {
        Color {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
            a: self.a * rhs.a,
        }
    }
}

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Color::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}
