//! Piecewise-linear mapping from animated scalars to visual ranges.

use serde::{Serialize, Serializer};

/// What to do with inputs outside the first/last breakpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extrapolation {
    /// Continue the outermost segment's slope. Spring overshoot passes
    /// straight through.
    #[default]
    Extend,
    /// Pin to the outermost output.
    Clamp,
}

#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    (end - start).mul_add(t, start)
}

/// Map `value` through the breakpoints `input` -> `output`.
///
/// `input` must be ascending and have at least two entries. A zero-width
/// segment resolves to its right-hand output.
pub fn interpolate<const N: usize>(
    value: f32,
    input: [f32; N],
    output: [f32; N],
    extrapolation: Extrapolation,
) -> f32 {
    debug_assert!(N >= 2, "interpolation needs at least two breakpoints");

    if extrapolation == Extrapolation::Clamp {
        if value <= input[0] {
            return output[0];
        }
        if value >= input[N - 1] {
            return output[N - 1];
        }
    }

    let mut segment = N - 2;
    for i in 1..N - 1 {
        if value < input[i] {
            segment = i - 1;
            break;
        }
    }

    let (lo, hi) = (input[segment], input[segment + 1]);
    let width = hi - lo;
    if width == 0.0 {
        return output[segment + 1];
    }
    let t = (value - lo) / width;
    lerp(output[segment], output[segment + 1], t)
}

/// Two-point shorthand for [`interpolate`] with the default extrapolation.
#[inline]
pub fn map_range(value: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    interpolate(value, [from.0, from.1], [to.0, to.1], Extrapolation::Extend)
}

/// 8-bit sRGB color, serialized as `#rrggbb` (or `#rrggbbaa` when not opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channel-wise blend; `t` is clamped to [0, 1].
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| lerp(a as f32, b as f32, t).round() as u8;
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: channel(self.a, other.a),
        }
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
