//! Fixed-point world coordinates.
//!
//! World positions go through fixed-point arithmetic so that cell lookups,
//! footprint centroids and position matching on undo are exact. Vector
//! arithmetic saturates at the range of [`Fixed`] instead of overflowing.

use fixed::types::I32F32;
use serde::{Deserialize, Serialize};

/// Fixed-point number type for all world-space math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Fixed-point 2D vector in world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec2Fixed {
    /// X coordinate.
    #[serde(with = "fixed_serde")]
    pub x: Fixed,
    /// Y coordinate.
    #[serde(with = "fixed_serde")]
    pub y: Fixed,
}

/// Serde support for fixed-point numbers.
///
/// Human-readable formats (RON, JSON) get a plain decimal so level files stay
/// editable by hand; binary formats keep the raw bits.
pub mod fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            value.to_num::<f64>().serialize(serializer)
        } else {
            value.to_bits().serialize(serializer)
        }
    }

    /// Deserialize a fixed-point number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let value = f64::deserialize(deserializer)?;
            Fixed::checked_from_num(value)
                .ok_or_else(|| serde::de::Error::custom(format!("{value} is out of range")))
        } else {
            let bits = i64::deserialize(deserializer)?;
            Ok(Fixed::from_bits(bits))
        }
    }
}

impl Vec2Fixed {
    /// Create a new fixed-point vector.
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    /// Build a vector from integer world units.
    #[must_use]
    pub fn from_ints(x: i32, y: i32) -> Self {
        Self::new(Fixed::from_num(x), Fixed::from_num(y))
    }

    /// Build a vector from floats. Only for host-side conversions.
    #[must_use]
    pub fn from_f32(x: f32, y: f32) -> Self {
        Self::new(Fixed::from_num(x), Fixed::from_num(y))
    }

    /// Convert to floats for rendering.
    #[must_use]
    pub fn to_f32(self) -> (f32, f32) {
        (self.x.to_num(), self.y.to_num())
    }

    /// Component-wise product, saturating.
    #[must_use]
    pub fn mul_components(self, other: Self) -> Self {
        Self::new(self.x.saturating_mul(other.x), self.y.saturating_mul(other.y))
    }

    /// Divide both components by the same non-zero scalar, saturating.
    #[must_use]
    pub fn div_scalar(self, divisor: Fixed) -> Self {
        Self::new(self.x.saturating_div(divisor), self.y.saturating_div(divisor))
    }

    /// Half of this vector.
    #[must_use]
    pub fn half(self) -> Self {
        self.div_scalar(Fixed::from_num(2))
    }
}

impl std::ops::Add for Vec2Fixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl std::ops::Sub for Vec2Fixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_components() {
        let a = Vec2Fixed::from_ints(2, 3);
        let b = Vec2Fixed::from_ints(8, 8);
        assert_eq!(a.mul_components(b), Vec2Fixed::from_ints(16, 24));
    }

    #[test]
    fn test_half_keeps_fraction() {
        let v = Vec2Fixed::from_ints(3, 8).half();
        assert_eq!(v.x, Fixed::from_num(1.5));
        assert_eq!(v.y, Fixed::from_num(4));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Vec2Fixed::new(Fixed::MAX, Fixed::MIN);
        assert_eq!(big + big, big);
        assert_eq!(
            big.mul_components(Vec2Fixed::from_ints(8, 8)),
            Vec2Fixed::new(Fixed::MAX, Fixed::MIN)
        );
        assert_eq!(
            big - Vec2Fixed::from_ints(-1, 1),
            Vec2Fixed::new(Fixed::MAX, Fixed::MIN)
        );
        let quarter = Fixed::from_num(0.25);
        assert_eq!(big.div_scalar(quarter), big);
    }

    #[test]
    fn test_fixed_serde_ron_is_decimal() {
        let v = Vec2Fixed::new(Fixed::from_num(12.5), Fixed::from_num(-4));
        let text = ron::to_string(&v).unwrap();
        assert!(text.contains("12.5"), "unexpected RON: {text}");
        let back: Vec2Fixed = ron::from_str(&text).unwrap();
        assert_eq!(back, v);
    }
}
