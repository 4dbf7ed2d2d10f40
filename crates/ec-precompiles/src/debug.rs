//! Debug utilities for tracing the verifier
//!
//! Enable with `--features debug`. Output goes through `log::trace!`.

use ark_bw6_761::{Fr, G1Affine};

use crate::codec::{encode_g1_point, encode_scalar_field};

/// Format Fr as a big-endian hex string
pub fn fr_to_hex(fr: &Fr) -> String {
    format!("0x{}", hex::encode(encode_scalar_field(fr)))
}

/// Format a G1 point as `(0x…, 0x…)`
pub fn g1_to_hex(point: &G1Affine) -> String {
    let bytes = encode_g1_point(point);
    format!(
        "(0x{}, 0x{})",
        hex::encode(&bytes[..96]),
        hex::encode(&bytes[96..])
    )
}

/// Trace an Fr value (only when debug feature enabled)
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! dbg_fr {
    ($name:expr, $fr:expr) => {
        log::trace!("{} = {}", $name, $crate::debug::fr_to_hex($fr));
    };
}

/// Trace an Fr value (noop when debug feature disabled)
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! dbg_fr {
    ($name:expr, $fr:expr) => {};
}

/// Trace a G1 point
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! dbg_g1 {
    ($name:expr, $g1:expr) => {
        log::trace!("{} = {}", $name, $crate::debug::g1_to_hex($g1));
    };
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! dbg_g1 {
    ($name:expr, $g1:expr) => {};
}

/// Debug trace macro
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        log::trace!($($arg)*);
    };
}

/// Debug trace macro (noop when debug feature disabled)
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::AffineRepr;

    #[test]
    fn test_fr_to_hex() {
        let s = fr_to_hex(&Fr::from(255u64));
        assert_eq!(s.len(), 2 + 96);
        assert!(s.ends_with("ff"));
        assert!(s.starts_with("0x00"));
    }

    #[test]
    fn test_g1_to_hex_identity() {
        let s = g1_to_hex(&G1Affine::identity());
        assert_eq!(s, format!("(0x{}, 0x{})", "0".repeat(192), "0".repeat(192)));
    }
}
