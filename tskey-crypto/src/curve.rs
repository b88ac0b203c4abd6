//! Short Weierstrass curve arithmetic over arbitrary-precision integers.
//!
//! The key protocol runs over bespoke curves y² = x³ + ax + b (mod p) whose
//! domain parameters do not match any named curve, so the point operations
//! are implemented here directly: affine addition and doubling with modular
//! inversion by Fermat's little theorem, and double-and-add scalar
//! multiplication. Scalars are reduced modulo the group order `n`.

use crate::error::{CryptoError, CryptoResult};
use num_bigint::BigUint;
use num_traits::Zero;

/// A point on the curve: either the group identity or an affine pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    /// The point at infinity (group identity).
    Infinity,
    /// An affine point with coordinates reduced modulo p.
    Affine {
        /// x-coordinate.
        x: BigUint,
        /// y-coordinate.
        y: BigUint,
    },
}

impl Point {
    /// Constructs an affine point.
    pub fn affine(x: BigUint, y: BigUint) -> Self {
        Self::Affine { x, y }
    }

    /// Returns the affine coordinates, or an error for the identity.
    pub fn coordinates(&self) -> CryptoResult<(&BigUint, &BigUint)> {
        match self {
            Self::Infinity => Err(CryptoError::PointAtInfinity),
            Self::Affine { x, y } => Ok((x, y)),
        }
    }
}

/// Curve domain: y² = x³ + ax + b over F_p, with group order n.
#[derive(Clone, Debug)]
pub struct Curve {
    p: BigUint,
    a: BigUint,
    b: BigUint,
    n: BigUint,
}

impl Curve {
    /// Creates a curve from its domain parameters. `p` must be prime and
    /// `n` must be the order of the working subgroup.
    pub fn new(p: BigUint, a: BigUint, b: BigUint, n: BigUint) -> Self {
        Self { p, a, b, n }
    }

    /// Returns the group order n.
    pub fn order(&self) -> &BigUint {
        &self.n
    }

    /// Checks curve membership: y² ≡ x³ + ax + b (mod p).
    ///
    /// The identity is trivially a member.
    pub fn check_on_curve(&self, point: &Point) -> CryptoResult<()> {
        let (x, y) = match point {
            Point::Infinity => return Ok(()),
            Point::Affine { x, y } => (x, y),
        };
        let lhs = (y * y) % &self.p;
        let rhs = (x * x * x + &self.a * x + &self.b) % &self.p;
        if lhs == rhs && x < &self.p && y < &self.p {
            Ok(())
        } else {
            Err(CryptoError::PointNotOnCurve(x.to_string(), y.to_string()))
        }
    }

    /// Adds two points.
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        let (x1, y1) = match lhs {
            Point::Infinity => return rhs.clone(),
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match rhs {
            Point::Infinity => return lhs.clone(),
            Point::Affine { x, y } => (x, y),
        };

        if x1 == x2 {
            // Either P + (-P) = O, or a doubling.
            if (y1 + y2) % &self.p == BigUint::zero() {
                return Point::Infinity;
            }
            return self.double(lhs);
        }

        let lambda = self.field_mul(
            &self.field_sub(y2, y1),
            &self.field_inv(&self.field_sub(x2, x1)),
        );
        self.chord_tangent(&lambda, x1, y1, x2)
    }

    /// Doubles a point.
    pub fn double(&self, point: &Point) -> Point {
        let (x, y) = match point {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        if y.is_zero() {
            return Point::Infinity;
        }

        // λ = (3x² + a) / 2y
        let numerator = (BigUint::from(3u32) * x * x + &self.a) % &self.p;
        let denominator = self.field_inv(&((BigUint::from(2u32) * y) % &self.p));
        let lambda = self.field_mul(&numerator, &denominator);
        self.chord_tangent(&lambda, x, y, x)
    }

    /// Computes k·P by double-and-add, reducing k modulo the group order.
    pub fn mul(&self, point: &Point, k: &BigUint) -> Point {
        let k = k % &self.n;
        if k.is_zero() {
            return Point::Infinity;
        }

        let mut acc = Point::Infinity;
        let bits = k.bits();
        for i in (0..bits).rev() {
            acc = self.double(&acc);
            if k.bit(i) {
                acc = self.add(&acc, point);
            }
        }
        acc
    }

    /// Completes addition/doubling from the line slope:
    /// x3 = λ² − x1 − x2, y3 = λ(x1 − x3) − y1.
    fn chord_tangent(&self, lambda: &BigUint, x1: &BigUint, y1: &BigUint, x2: &BigUint) -> Point {
        let x3 = self.field_sub(&self.field_sub(&self.field_mul(lambda, lambda), x1), x2);
        let y3 = self.field_sub(&self.field_mul(lambda, &self.field_sub(x1, &x3)), y1);
        Point::Affine { x: x3, y: y3 }
    }

    fn field_sub(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        ((lhs % &self.p) + &self.p - (rhs % &self.p)) % &self.p
    }

    fn field_mul(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        (lhs * rhs) % &self.p
    }

    /// Modular inverse via Fermat: x^(p−2) mod p. Requires x ≠ 0 mod p.
    fn field_inv(&self, x: &BigUint) -> BigUint {
        let exponent = &self.p - BigUint::from(2u32);
        x.modpow(&exponent, &self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    // Tiny test curve: y² = x³ + x over F_23, subgroup order 6.
    fn toy_curve() -> Curve {
        Curve::new(
            BigUint::from(23u32),
            BigUint::one(),
            BigUint::zero(),
            BigUint::from(6u32),
        )
    }

    #[test]
    fn identity_is_neutral() {
        let curve = toy_curve();
        let p = Point::affine(BigUint::from(9u32), BigUint::from(5u32));
        assert_eq!(curve.add(&p, &Point::Infinity), p);
        assert_eq!(curve.add(&Point::Infinity, &p), p);
    }

    #[test]
    fn point_plus_negation_is_identity() {
        let curve = toy_curve();
        let p = Point::affine(BigUint::from(9u32), BigUint::from(5u32));
        let neg = Point::affine(BigUint::from(9u32), BigUint::from(18u32));
        assert_eq!(curve.add(&p, &neg), Point::Infinity);
    }

    #[test]
    fn scalar_multiple_stays_on_curve() {
        let curve = toy_curve();
        let p = Point::affine(BigUint::from(9u32), BigUint::from(5u32));
        curve.check_on_curve(&p).unwrap();
        for k in 1u32..6 {
            let q = curve.mul(&p, &BigUint::from(k));
            curve.check_on_curve(&q).unwrap();
        }
    }

    #[test]
    fn zero_scalar_gives_identity() {
        let curve = toy_curve();
        let p = Point::affine(BigUint::from(9u32), BigUint::from(5u32));
        assert_eq!(curve.mul(&p, &BigUint::zero()), Point::Infinity);
    }
}
