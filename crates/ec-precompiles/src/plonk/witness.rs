//! Public witness
//!
//! ## Format
//! - nb_public as u32 big-endian
//! - nb_secret as u32 big-endian, always 0 for a public witness
//! - vector length as u32 big-endian, equal to nb_public
//! - `len` scalar field elements, 48 bytes each

use ark_bw6_761::Fr;

use crate::codec::{put_scalar_field, ByteReader};
use crate::errors::WitnessError;
use crate::types::SCALAR_FIELD_SIZE;

/// Size of the three u32 header fields
pub const WITNESS_HEADER_SIZE: usize = 12;

/// Public inputs of a proof, in circuit order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublicWitness {
    pub values: Vec<Fr>,
}

impl PublicWitness {
    pub fn new(values: Vec<Fr>) -> Self {
        Self { values }
    }

    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, WitnessError> {
        let nb_public = reader.read_u32()?;
        let nb_secret = reader.read_u32()?;
        if nb_secret != 0 {
            return Err(WitnessError::SecretPartNotEmpty(nb_secret));
        }

        let len = reader.read_u32()?;
        if len != nb_public {
            return Err(WitnessError::LengthMismatch {
                len,
                public: nb_public,
            });
        }

        // Check before allocating
        let available = reader.remaining();
        if (len as usize).saturating_mul(SCALAR_FIELD_SIZE) > available {
            return Err(WitnessError::Truncated {
                declared: len,
                available,
            });
        }

        let mut values = Vec::with_capacity(len as usize);
        for _ in 0..len {
            values.push(reader.read_scalar_field()?);
        }
        Ok(Self { values })
    }

    /// Parse a standalone witness, rejecting trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WitnessError> {
        let mut reader = ByteReader::new(bytes);
        let witness = Self::read(&mut reader)?;
        match reader.remaining() {
            0 => Ok(witness),
            extra => Err(WitnessError::TrailingBytes(extra)),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let count = self.values.len() as u32;
        let mut out = Vec::with_capacity(WITNESS_HEADER_SIZE + self.values.len() * SCALAR_FIELD_SIZE);
        out.extend_from_slice(&count.to_be_bytes());
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&count.to_be_bytes());
        for value in &self.values {
            put_scalar_field(&mut out, value);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
