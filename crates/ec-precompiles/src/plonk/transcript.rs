//! Fiat-Shamir transcript using Keccak256
//!
//! Each challenge is the Keccak256 digest of everything absorbed since the
//! previous challenge, read big-endian and reduced mod r. The hasher is then
//! reset and the challenge itself absorbed, chaining rounds together.

use ark_bw6_761::{Fr, G1Affine, G2Affine};
use ark_ff::PrimeField;
use sha3::{Digest, Keccak256};

use crate::codec::{encode_g1_point, encode_g2_point, encode_scalar_field};

/// Transcript for Fiat-Shamir challenge generation
pub struct Transcript {
    hasher: Keccak256,
}

impl Transcript {
    /// Create a new empty transcript
    pub fn new() -> Self {
        Self {
            hasher: Keccak256::new(),
        }
    }

    /// Append a u64 value (8 bytes big-endian)
    pub fn append_u64(&mut self, val: u64) {
        self.hasher.update(val.to_be_bytes());
    }

    /// Append a G1 point in its 192-byte wire encoding
    pub fn append_g1(&mut self, point: &G1Affine) {
        self.hasher.update(encode_g1_point(point));
    }

    pub fn append_g2(&mut self, point: &G2Affine) {
        self.hasher.update(encode_g2_point(point));
    }

    /// Append a scalar field element (48 bytes big-endian)
    pub fn append_scalar(&mut self, scalar: &Fr) {
        self.hasher.update(encode_scalar_field(scalar));
    }

    /// Append raw bytes to the transcript
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Generate a challenge scalar from the current transcript state.
    pub fn challenge(&mut self) -> Fr {
        let hash = self.hasher.finalize_reset();

        crate::trace!("transcript raw_hash = {:02x?}", &hash[0..8]);

        // 256-bit digest is always below the 377-bit modulus
        let challenge = Fr::from_be_bytes_mod_order(&hash);

        self.append_scalar(&challenge);
        challenge
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
