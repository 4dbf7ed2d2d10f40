//! Wire codec for BW6-761 field elements and points
//!
//! External form: fixed-width big-endian integers in normal (non-Montgomery)
//! form. Internal form: arkworks field elements, which live in Montgomery
//! form. Nothing in the internal representation is ever observed across this
//! boundary; every decoder accepts only the unique canonical encoding.
//!
//! ## Layouts
//!
//! - `Fq`: 96 bytes, value in `[0, p)`
//! - `Fr`: 48 bytes, value in `[0, r)`
//! - G1/G2 affine point: `X (96) ‖ Y (96)`, `(0, 0)` is the point at infinity
//! - scalar multiplier: 32-byte EVM word, any value

use ark_bw6_761::{Fq, Fr, G1Affine, G2Affine};
use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::{BigInteger, PrimeField, Zero};

use crate::errors::CodecError;
use crate::types::{
    FieldBytes, PointBytes, ScalarFieldBytes, AFFINE_POINT_SIZE, EVM_WORD_SIZE,
    FIELD_ELEMENT_SIZE, SCALAR_FIELD_SIZE,
};

/// Decode a 96-byte big-endian base field element.
///
/// Fails when the slice is not exactly 96 bytes or the value is not below the
/// field modulus.
pub fn decode_field_element(bytes: &[u8]) -> Result<Fq, CodecError> {
    if bytes.len() != FIELD_ELEMENT_SIZE {
        return Err(CodecError::InvalidFieldElementLength);
    }
    decode_canonical(bytes).ok_or(CodecError::InvalidFieldElementLength)
}

/// Encode a base field element as 96 big-endian bytes (normal form).
pub fn encode_field_element(element: &Fq) -> FieldBytes {
    let mut out = [0u8; FIELD_ELEMENT_SIZE];
    out.copy_from_slice(&element.into_bigint().to_bytes_be());
    out
}

/// Decode a 48-byte big-endian scalar field element.
pub fn decode_scalar_field(bytes: &[u8]) -> Result<Fr, CodecError> {
    if bytes.len() != SCALAR_FIELD_SIZE {
        return Err(CodecError::InvalidScalarField);
    }
    decode_canonical(bytes).ok_or(CodecError::InvalidScalarField)
}

/// Encode a scalar field element as 48 big-endian bytes.
pub fn encode_scalar_field(element: &Fr) -> ScalarFieldBytes {
    let mut out = [0u8; SCALAR_FIELD_SIZE];
    out.copy_from_slice(&element.into_bigint().to_bytes_be());
    out
}

/// Reducing and re-encoding reproduces the input only when it was already below the modulus.
fn decode_canonical<F: PrimeField>(bytes: &[u8]) -> Option<F> {
    let value = F::from_be_bytes_mod_order(bytes);
    (value.into_bigint().to_bytes_be() == bytes).then_some(value)
}

/// Decode a 192-byte affine point, X then Y.
///
/// Curve membership is NOT checked here; whoever consumes the point is
/// responsible for that.
pub fn decode_point<P>(bytes: &[u8]) -> Result<Affine<P>, CodecError>
where
    P: SWCurveConfig<BaseField = Fq>,
{
    if bytes.len() != AFFINE_POINT_SIZE {
        return Err(CodecError::InvalidInputLength {
            expected: AFFINE_POINT_SIZE,
            actual: bytes.len(),
        });
    }

    let (x_bytes, y_bytes) = bytes.split_at(FIELD_ELEMENT_SIZE);
    let x = decode_field_element(x_bytes)?;
    let y = decode_field_element(y_bytes)?;

    if x.is_zero() && y.is_zero() {
        return Ok(Affine::identity());
    }
    Ok(Affine::new_unchecked(x, y))
}

/// Encode an affine point as `X ‖ Y`; the point at infinity encodes as zeros.
pub fn encode_point<P>(point: &Affine<P>) -> PointBytes
where
    P: SWCurveConfig<BaseField = Fq>,
{
    let mut out = [0u8; AFFINE_POINT_SIZE];
    if point.infinity {
        return out;
    }
    out[..FIELD_ELEMENT_SIZE].copy_from_slice(&encode_field_element(&point.x));
    out[FIELD_ELEMENT_SIZE..].copy_from_slice(&encode_field_element(&point.y));
    out
}

pub fn decode_g1_point(bytes: &[u8]) -> Result<G1Affine, CodecError> {
    decode_point(bytes)
}

pub fn decode_g2_point(bytes: &[u8]) -> Result<G2Affine, CodecError> {
    decode_point(bytes)
}

pub fn encode_g1_point(point: &G1Affine) -> PointBytes {
    encode_point(point)
}

pub fn encode_g2_point(point: &G2Affine) -> PointBytes {
    encode_point(point)
}

/// Decode a 32-byte big-endian word into little-endian u64 limbs.
pub fn decode_scalar_word(bytes: &[u8]) -> Result<[u64; 4], CodecError> {
    if bytes.len() != EVM_WORD_SIZE {
        return Err(CodecError::InvalidInputLength {
            expected: EVM_WORD_SIZE,
            actual: bytes.len(),
        });
    }

    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
    }
    Ok(limbs)
}

/// Sequential reader over a buffer of self-delimiting objects.
///
/// Each object reads exactly what it needs; the next one starts at
/// [`ByteReader::position`].
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::UnexpectedEof {
                needed: len - remaining,
            });
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        let mut word = [0u8; 4];
        word.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(word))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let mut word = [0u8; 8];
        word.copy_from_slice(self.take(8)?);
        Ok(u64::from_be_bytes(word))
    }

    pub fn read_scalar_field(&mut self) -> Result<Fr, CodecError> {
        decode_scalar_field(self.take(SCALAR_FIELD_SIZE)?)
    }

    pub fn read_point<P>(&mut self) -> Result<Affine<P>, CodecError>
    where
        P: SWCurveConfig<BaseField = Fq>,
    {
        decode_point(self.take(AFFINE_POINT_SIZE)?)
    }
}

/// Append the encoding of a point to `out`.
pub fn put_point<P>(out: &mut Vec<u8>, point: &Affine<P>)
where
    P: SWCurveConfig<BaseField = Fq>,
{
    out.extend_from_slice(&encode_point(point));
}

/// Append the encoding of a scalar field element to `out`.
pub fn put_scalar_field(out: &mut Vec<u8>, element: &Fr) {
    out.extend_from_slice(&encode_scalar_field(element));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::{One, UniformRand};

    fn modulus_bytes() -> Vec<u8> {
        <Fq as PrimeField>::MODULUS.to_bytes_be()
    }

    #[test]
    fn test_field_element_round_trip() {
        let mut rng = ark_std::test_rng();
        for _ in 0..8 {
            let fe = Fq::rand(&mut rng);
            let bytes = encode_field_element(&fe);
            assert_eq!(decode_field_element(&bytes).unwrap(), fe);
        }
    }

    #[test]
    fn test_field_element_encoding_is_normal_form() {
        let bytes = encode_field_element(&Fq::one());
        let mut expected = [0u8; 96];
        expected[95] = 1;
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_field_element_rejects_modulus_and_above() {
        let modulus = modulus_bytes();
        assert_eq!(modulus.len(), 96);
        assert_eq!(
            decode_field_element(&modulus),
            Err(CodecError::InvalidFieldElementLength)
        );
        assert_eq!(
            decode_field_element(&[0xff; 96]),
            Err(CodecError::InvalidFieldElementLength)
        );

        // p - 1 is the largest canonical value
        let p_minus_one = -Fq::one();
        let bytes = encode_field_element(&p_minus_one);
        assert_eq!(decode_field_element(&bytes).unwrap(), p_minus_one);
    }

    #[test]
    fn test_field_element_wrong_length() {
        assert_eq!(
            decode_field_element(&[0u8; 95]),
            Err(CodecError::InvalidFieldElementLength)
        );
        assert_eq!(
            decode_field_element(&[0u8; 97]),
            Err(CodecError::InvalidFieldElementLength)
        );
    }

    #[test]
    fn test_point_round_trip_g1_g2() {
        let mut rng = ark_std::test_rng();
        for _ in 0..4 {
            let p1 = (G1Affine::generator() * Fr::rand(&mut rng)).into_affine();
            let bytes = encode_g1_point(&p1);
            assert_eq!(decode_g1_point(&bytes).unwrap(), p1);
            assert_eq!(encode_g1_point(&decode_g1_point(&bytes).unwrap()), bytes);

            let p2 = (G2Affine::generator() * Fr::rand(&mut rng)).into_affine();
            let bytes = encode_g2_point(&p2);
            assert_eq!(decode_g2_point(&bytes).unwrap(), p2);
            assert_eq!(encode_g2_point(&decode_g2_point(&bytes).unwrap()), bytes);
        }
    }

    #[test]
    fn test_identity_encoding() {
        assert_eq!(encode_g1_point(&G1Affine::identity()), [0u8; 192]);
        assert!(decode_g1_point(&[0u8; 192]).unwrap().infinity);
        assert!(decode_g2_point(&[0u8; 192]).unwrap().infinity);
    }

    #[test]
    fn test_decode_does_not_check_curve_membership() {
        let mut bytes = [0u8; 192];
        bytes[95] = 1;
        bytes[191] = 1;
        let point = decode_g1_point(&bytes).unwrap();
        assert!(!point.is_on_curve());
    }

    #[test]
    fn test_point_wrong_length() {
        assert_eq!(
            decode_g1_point(&[0u8; 191]),
            Err(CodecError::InvalidInputLength {
                expected: 192,
                actual: 191
            })
        );
    }

    #[test]
    fn test_point_non_canonical_y() {
        let mut bytes = encode_g1_point(&G1Affine::generator()).to_vec();
        bytes[96..].copy_from_slice(&modulus_bytes());
        assert_eq!(
            decode_g1_point(&bytes),
            Err(CodecError::InvalidFieldElementLength)
        );
    }

    #[test]
    fn test_scalar_word_limbs() {
        let mut word = [0u8; 32];
        word[31] = 2;
        word[0] = 0x80;
        let limbs = decode_scalar_word(&word).unwrap();
        assert_eq!(limbs, [2, 0, 0, 0x8000_0000_0000_0000]);

        assert_eq!(decode_scalar_word(&[0xff; 32]).unwrap(), [u64::MAX; 4]);
        assert!(decode_scalar_word(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_scalar_field_round_trip_and_range() {
        let mut rng = ark_std::test_rng();
        let fr = Fr::rand(&mut rng);
        assert_eq!(decode_scalar_field(&encode_scalar_field(&fr)).unwrap(), fr);

        let modulus = <Fr as PrimeField>::MODULUS.to_bytes_be();
        assert_eq!(
            decode_scalar_field(&modulus),
            Err(CodecError::InvalidScalarField)
        );
    }

    #[test]
    fn test_byte_reader_sequential() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&7u32.to_be_bytes());
        buf.extend_from_slice(&9u64.to_be_bytes());
        put_scalar_field(&mut buf, &Fr::from(5u64));
        put_point(&mut buf, &G1Affine::generator());

        let mut reader = ByteReader::new(&buf);
        assert_eq!(reader.read_u32().unwrap(), 7);
        assert_eq!(reader.read_u64().unwrap(), 9);
        assert_eq!(reader.read_scalar_field().unwrap(), Fr::from(5u64));
        let point: G1Affine = reader.read_point().unwrap();
        assert_eq!(point, G1Affine::generator());
        assert_eq!(reader.position(), buf.len());
        assert_eq!(reader.remaining(), 0);

        assert_eq!(
            reader.read_u32(),
            Err(CodecError::UnexpectedEof { needed: 4 })
        );
    }
}
