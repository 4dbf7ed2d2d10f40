//! Curve arithmetic adapter
//!
//! Precompile handlers talk to BW6-761 through [`CurveArithmetic`], which
//! takes and returns wire bytes. [`ArkworksBw6761`] is the implementation
//! backed by `ark-bw6-761`.

use ark_bw6_761::{Fq, BW6_761};
use ark_ec::pairing::Pairing;
use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::One;

use crate::codec::{decode_point, decode_scalar_word, encode_point};
use crate::errors::{CurveError, Group, PrecompileError};
use crate::types::PointBytes;

type G1Config = ark_bw6_761::g1::Config;
type G2Config = ark_bw6_761::g2::Config;

/// Byte-level BW6-761 operations used by the precompile handlers.
pub trait CurveArithmetic: Send + Sync {
    /// `a + b` in G1. Both inputs are 192-byte points.
    fn g1_add(&self, a: &[u8], b: &[u8]) -> Result<PointBytes, PrecompileError>;

    /// `a + b` in G2.
    fn g2_add(&self, a: &[u8], b: &[u8]) -> Result<PointBytes, PrecompileError>;

    /// `k · p` in G1, `k` a 32-byte big-endian word.
    fn g1_scalar_mul(&self, point: &[u8], scalar: &[u8]) -> Result<PointBytes, PrecompileError>;

    /// `k · p` in G2.
    fn g2_scalar_mul(&self, point: &[u8], scalar: &[u8]) -> Result<PointBytes, PrecompileError>;

    /// Whether `e(p, q)` is the identity of the target group.
    fn pairing_check(&self, p: &[u8], q: &[u8]) -> Result<bool, PrecompileError>;
}

/// arkworks-backed BW6-761 arithmetic
#[derive(Debug, Default, Clone, Copy)]
pub struct ArkworksBw6761;

impl CurveArithmetic for ArkworksBw6761 {
    fn g1_add(&self, a: &[u8], b: &[u8]) -> Result<PointBytes, PrecompileError> {
        add::<G1Config>(a, b, Group::G1)
    }

    fn g2_add(&self, a: &[u8], b: &[u8]) -> Result<PointBytes, PrecompileError> {
        add::<G2Config>(a, b, Group::G2)
    }

    fn g1_scalar_mul(&self, point: &[u8], scalar: &[u8]) -> Result<PointBytes, PrecompileError> {
        scalar_mul::<G1Config>(point, scalar, Group::G1)
    }

    fn g2_scalar_mul(&self, point: &[u8], scalar: &[u8]) -> Result<PointBytes, PrecompileError> {
        scalar_mul::<G2Config>(point, scalar, Group::G2)
    }

    fn pairing_check(&self, p: &[u8], q: &[u8]) -> Result<bool, PrecompileError> {
        let p = decode_point::<G1Config>(p)?;
        let q = decode_point::<G2Config>(q)?;
        ensure_in_subgroup(&p, Group::G1)?;
        ensure_in_subgroup(&q, Group::G2)?;

        Ok(BW6_761::pairing(p, q).0.is_one())
    }
}

/// Reject points that do not satisfy the curve equation. The identity passes.
pub fn ensure_on_curve<P>(point: &Affine<P>, group: Group) -> Result<(), CurveError>
where
    P: SWCurveConfig<BaseField = Fq>,
{
    if point.is_on_curve() {
        Ok(())
    } else {
        Err(CurveError::PointNotOnCurve(group))
    }
}

/// On-curve check followed by the prime-order subgroup check.
pub fn ensure_in_subgroup<P>(point: &Affine<P>, group: Group) -> Result<(), CurveError>
where
    P: SWCurveConfig<BaseField = Fq>,
{
    ensure_on_curve(point, group)?;
    if point.is_in_correct_subgroup_assuming_on_curve() {
        Ok(())
    } else {
        Err(CurveError::PointNotInSubgroup(group))
    }
}

fn add<P>(a: &[u8], b: &[u8], group: Group) -> Result<PointBytes, PrecompileError>
where
    P: SWCurveConfig<BaseField = Fq>,
{
    let a = decode_point::<P>(a)?;
    let b = decode_point::<P>(b)?;
    ensure_on_curve(&a, group)?;
    ensure_on_curve(&b, group)?;

    let sum = a.into_group() + b;
    Ok(encode_point(&sum.into_affine()))
}

fn scalar_mul<P>(point: &[u8], scalar: &[u8], group: Group) -> Result<PointBytes, PrecompileError>
where
    P: SWCurveConfig<BaseField = Fq>,
{
    let point = decode_point::<P>(point)?;
    ensure_on_curve(&point, group)?;
    let limbs = decode_scalar_word(scalar)?;

    Ok(encode_point(&point.mul_bigint(limbs).into_affine()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_g1_point, encode_g2_point};
    use crate::types::POINT_AT_INFINITY;
    use ark_bw6_761::{Fr, G1Affine, G1Projective, G2Affine};
    use ark_ff::{AdditiveGroup, UniformRand};
    use ark_std::test_rng;

    fn random_g1(rng: &mut impl ark_std::rand::Rng) -> PointBytes {
        encode_g1_point(&(G1Affine::generator() * Fr::rand(rng)).into_affine())
    }

    fn random_g2(rng: &mut impl ark_std::rand::Rng) -> PointBytes {
        encode_g2_point(&(G2Affine::generator() * Fr::rand(rng)).into_affine())
    }

    fn word(value: u64) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[24..].copy_from_slice(&value.to_be_bytes());
        out
    }

    fn off_curve_point() -> PointBytes {
        let mut bytes = [0u8; 192];
        bytes[95] = 1;
        bytes[191] = 1;
        bytes
    }

    #[test]
    fn test_g1_add_commutative_and_associative() {
        let mut rng = test_rng();
        let curve = ArkworksBw6761;
        for _ in 0..4 {
            let (a, b, c) = (random_g1(&mut rng), random_g1(&mut rng), random_g1(&mut rng));
            assert_eq!(curve.g1_add(&a, &b).unwrap(), curve.g1_add(&b, &a).unwrap());

            let ab = curve.g1_add(&a, &b).unwrap();
            let bc = curve.g1_add(&b, &c).unwrap();
            assert_eq!(
                curve.g1_add(&ab, &c).unwrap(),
                curve.g1_add(&a, &bc).unwrap()
            );
        }
    }

    #[test]
    fn test_g2_add_commutative_and_associative() {
        let mut rng = test_rng();
        let curve = ArkworksBw6761;
        let (a, b, c) = (random_g2(&mut rng), random_g2(&mut rng), random_g2(&mut rng));
        assert_eq!(curve.g2_add(&a, &b).unwrap(), curve.g2_add(&b, &a).unwrap());

        let ab = curve.g2_add(&a, &b).unwrap();
        let bc = curve.g2_add(&b, &c).unwrap();
        assert_eq!(
            curve.g2_add(&ab, &c).unwrap(),
            curve.g2_add(&a, &bc).unwrap()
        );
    }

    #[test]
    fn test_add_identity_operand() {
        let mut rng = test_rng();
        let curve = ArkworksBw6761;
        let a = random_g1(&mut rng);
        assert_eq!(curve.g1_add(&a, &POINT_AT_INFINITY).unwrap(), a);
        assert_eq!(curve.g1_add(&POINT_AT_INFINITY, &a).unwrap(), a);
        assert_eq!(
            curve.g1_add(&POINT_AT_INFINITY, &POINT_AT_INFINITY).unwrap(),
            POINT_AT_INFINITY
        );

        let q = random_g2(&mut rng);
        assert_eq!(curve.g2_add(&q, &POINT_AT_INFINITY).unwrap(), q);
    }

    #[test]
    fn test_add_inverse_gives_identity() {
        let curve = ArkworksBw6761;
        let g = G1Affine::generator();
        let sum = curve
            .g1_add(&encode_g1_point(&g), &encode_g1_point(&(-g)))
            .unwrap();
        assert_eq!(sum, POINT_AT_INFINITY);
    }

    #[test]
    fn test_add_rejects_off_curve() {
        let curve = ArkworksBw6761;
        let g = encode_g1_point(&G1Affine::generator());
        assert_eq!(
            curve.g1_add(&g, &off_curve_point()),
            Err(PrecompileError::Curve(CurveError::PointNotOnCurve(Group::G1)))
        );
        assert_eq!(
            curve.g2_add(&off_curve_point(), &POINT_AT_INFINITY),
            Err(PrecompileError::Curve(CurveError::PointNotOnCurve(Group::G2)))
        );
    }

    #[test]
    fn test_scalar_mul_laws() {
        let mut rng = test_rng();
        let curve = ArkworksBw6761;
        let p = random_g1(&mut rng);

        assert_eq!(curve.g1_scalar_mul(&p, &word(0)).unwrap(), POINT_AT_INFINITY);
        assert_eq!(curve.g1_scalar_mul(&p, &word(1)).unwrap(), p);
        assert_eq!(
            curve.g1_scalar_mul(&p, &word(2)).unwrap(),
            curve.g1_add(&p, &p).unwrap()
        );

        // (a + b)·P == a·P + b·P
        let (a, b) = (0x1234_5678u64, 0x9abc_def0u64);
        let lhs = curve.g1_scalar_mul(&p, &word(a + b)).unwrap();
        let rhs = curve
            .g1_add(
                &curve.g1_scalar_mul(&p, &word(a)).unwrap(),
                &curve.g1_scalar_mul(&p, &word(b)).unwrap(),
            )
            .unwrap();
        assert_eq!(lhs, rhs);

        assert_eq!(
            curve.g1_scalar_mul(&POINT_AT_INFINITY, &word(42)).unwrap(),
            POINT_AT_INFINITY
        );
    }

    #[test]
    fn test_g2_scalar_mul_matches_addition() {
        let mut rng = test_rng();
        let curve = ArkworksBw6761;
        let q = random_g2(&mut rng);
        let three_q = curve
            .g2_add(&curve.g2_add(&q, &q).unwrap(), &q)
            .unwrap();
        assert_eq!(curve.g2_scalar_mul(&q, &word(3)).unwrap(), three_q);
    }

    #[test]
    fn test_scalar_mul_max_word_matches_double_and_add() {
        let curve = ArkworksBw6761;
        let g = G1Affine::generator();

        let mut expected = G1Projective::default();
        for _ in 0..256 {
            expected.double_in_place();
            expected += g;
        }

        let result = curve
            .g1_scalar_mul(&encode_g1_point(&g), &[0xff; 32])
            .unwrap();
        assert_eq!(result, encode_g1_point(&expected.into_affine()));
    }

    #[test]
    fn test_scalar_mul_rejects_off_curve() {
        let curve = ArkworksBw6761;
        assert_eq!(
            curve.g1_scalar_mul(&off_curve_point(), &word(1)),
            Err(PrecompileError::Curve(CurveError::PointNotOnCurve(Group::G1)))
        );
    }

    #[test]
    fn test_pairing_generators_is_not_identity() {
        let curve = ArkworksBw6761;
        let p = encode_g1_point(&G1Affine::generator());
        let q = encode_g2_point(&G2Affine::generator());
        assert!(!curve.pairing_check(&p, &q).unwrap());
    }

    #[test]
    fn test_pairing_with_identity_is_identity() {
        let curve = ArkworksBw6761;
        let q = encode_g2_point(&G2Affine::generator());
        assert!(curve.pairing_check(&POINT_AT_INFINITY, &q).unwrap());

        let p = encode_g1_point(&G1Affine::generator());
        assert!(curve.pairing_check(&p, &POINT_AT_INFINITY).unwrap());
    }

    #[test]
    fn test_pairing_rejects_off_curve() {
        let curve = ArkworksBw6761;
        let q = encode_g2_point(&G2Affine::generator());
        assert_eq!(
            curve.pairing_check(&off_curve_point(), &q),
            Err(PrecompileError::Curve(CurveError::PointNotOnCurve(Group::G1)))
        );
    }
}
