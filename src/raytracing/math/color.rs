use std::ops;

/// RGBA color with unbounded channels; only clamped right before export.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ops::Add<Color> for Color {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Color) -> Self::Output {
        Color {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}

impl ops::AddAssign<Color> for Color {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
        self.a += rhs.a;
    }
}

impl ops::Sub<Color> for Color {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Color) -> Self::Output {
        Color {
            r: self.r - rhs.r,
            g: self.g - rhs.g,
            b: self.b - rhs.b,
            a: self.a - rhs.a,
        }
    }
}

impl ops::Mul<f64> for Color {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: f64) -> Self::Output {
        Color {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
            a: self.a * rhs,
        }
    }
}

impl ops::Mul<Color> for Color {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Color) -> Self::Output {
        Color {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
            a: self.a * rhs.a,
        }
    }
}

impl ops::Div<f64> for Color {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: f64) -> Self::Output {
        Color {
            r: self.r / rhs,
            g: self.g / rhs,
            b: self.b / rhs,
            a: self.a / rhs,
        }
    }
}

impl ops::Div<Color> for Color {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Color) -> Self::Output {
        Color {
            r: self.r / rhs.r,
            g: self.g / rhs.g,
            b: self.b / rhs.b,
            a: self.a / rhs.a,
        }
    }
}

impl Color {
    #[inline(always)]
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    /// Opaque color.
    #[inline(always)]
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color::new(r, g, b, 1.0)
    }

    #[inline(always)]
    pub fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    pub fn clamped(self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Clamp to [0, 1], scale by 255 and truncate.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamped();
        [
            (c.r * 255.0) as u8,
            (c.g * 255.0) as u8,
            (c.b * 255.0) as u8,
        ]
    }
}
