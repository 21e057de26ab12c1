/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::from_premul(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::from_premul(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight-alpha linear components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Opaque color from a `0xRRGGBB` sRGB literal (CSS / three.js style hex).
    ///
    /// Channels are decoded with the sRGB transfer function into linear space.
    #[inline]
    pub fn from_hex(rgb: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((rgb >> shift) & 0xff) as f32 / 255.0);
        Self::from_premul(channel(16), channel(8), channel(0), 1.0)
    }

    /// Returns the straight-alpha linear `[r, g, b, a]`.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> [f32; 4] {
        if self.a <= 0.0 {
            [0.0; 4]
        } else {
            let inv = 1.0 / self.a;
            [self.r * inv, self.g * inv, self.b * inv, self.a]
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

/// sRGB electro-optical transfer function (IEC 61966-2-1).
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hex_white_and_black_are_exact() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
    }

    #[test]
    fn hex_decodes_srgb_to_linear() {
        // 0x44 = 68/255 ≈ 0.2667 sRGB ≈ 0.0578 linear
        let c = Color::from_hex(0x44aa88);
        assert_relative_eq!(c.r, 0.057805, epsilon = 1e-4);
        assert_relative_eq!(c.g, 0.401978, epsilon = 1e-4);
        assert_relative_eq!(c.b, 0.246201, epsilon = 1e-4);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn straight_round_trip_preserves_rgb() {
        let c = Color::from_straight(0.5, 0.25, 1.0, 0.5);
        let [r, g, b, a] = c.to_straight();
        assert_relative_eq!(r, 0.5);
        assert_relative_eq!(g, 0.25);
        assert_relative_eq!(b, 1.0);
        assert_relative_eq!(a, 0.5);
    }
}
