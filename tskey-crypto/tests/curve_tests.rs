use num_bigint::BigUint;
use tskey_crypto::{Curve, CryptoError, Point};

// Test curve: y² = x³ + x over F_23 (same a=1, b=0 shape the protocol
// curves use). (9, 5) is a point on it.
fn curve() -> Curve {
    Curve::new(
        BigUint::from(23u32),
        BigUint::from(1u32),
        BigUint::from(0u32),
        BigUint::from(24u32),
    )
}

fn base_point() -> Point {
    Point::affine(BigUint::from(9u32), BigUint::from(5u32))
}

// ── Membership ───────────────────────────────────────────────────

#[test]
fn base_point_is_on_curve() {
    curve().check_on_curve(&base_point()).unwrap();
}

#[test]
fn identity_is_on_curve() {
    curve().check_on_curve(&Point::Infinity).unwrap();
}

#[test]
fn off_curve_point_is_rejected() {
    let bogus = Point::affine(BigUint::from(9u32), BigUint::from(6u32));
    assert!(matches!(
        curve().check_on_curve(&bogus),
        Err(CryptoError::PointNotOnCurve(_, _))
    ));
}

#[test]
fn out_of_field_coordinates_are_rejected() {
    // (9 + 23, 5 + 23) satisfies the equation mod p but is not reduced.
    let unreduced = Point::affine(BigUint::from(32u32), BigUint::from(28u32));
    assert!(curve().check_on_curve(&unreduced).is_err());
}

// ── Group laws ───────────────────────────────────────────────────

#[test]
fn addition_is_commutative() {
    let curve = curve();
    let p = base_point();
    let q = curve.double(&p);
    assert_eq!(curve.add(&p, &q), curve.add(&q, &p));
}

#[test]
fn addition_is_associative() {
    let curve = curve();
    let p = base_point();
    let q = curve.double(&p);
    let r = curve.add(&p, &q);
    assert_eq!(curve.add(&curve.add(&p, &q), &r), curve.add(&p, &curve.add(&q, &r)));
}

#[test]
fn double_matches_self_addition() {
    let curve = curve();
    let p = base_point();
    assert_eq!(curve.double(&p), curve.add(&p, &p));
}

#[test]
fn scalar_multiplication_distributes() {
    let curve = curve();
    let p = base_point();
    for k1 in 0u32..8 {
        for k2 in 0u32..8 {
            let lhs = curve.mul(&p, &BigUint::from(k1 + k2));
            let rhs = curve.add(
                &curve.mul(&p, &BigUint::from(k1)),
                &curve.mul(&p, &BigUint::from(k2)),
            );
            assert_eq!(lhs, rhs, "k1={k1} k2={k2}");
        }
    }
}

#[test]
fn coordinates_of_identity_is_an_error() {
    assert!(matches!(
        Point::Infinity.coordinates(),
        Err(CryptoError::PointAtInfinity)
    ));
}
