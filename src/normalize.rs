//! Decoded field normalization
//!
//! Downstream storage only handles strings, so every decoded value is mapped
//! into a closed set of [`FieldValue`] variants and rendered from there.
//! Anything outside that set is a conversion error, never a silent drop.

use crate::error::{Error, Result};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, I256, U256};

/// A decoded event field of a supported type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// `uint<N>`
    Uint(U256),
    /// `int<N>`
    Int(I256),
    Address(Address),
    /// `bytes32`, and indexed dynamic values (which arrive hashed)
    Hash(B256),
    Text(String),
    Boolean(bool),
    Bytes(Vec<u8>),
    /// `bytes1`
    Byte(u8),
}

impl FieldValue {
    /// Map a decoded value into a supported variant.
    ///
    /// `field` and `ty` only label the error.
    pub fn from_decoded(value: DynSolValue, field: &str, ty: &str) -> Result<Self> {
        let value = match value {
            DynSolValue::Uint(v, _) => Self::Uint(v),
            DynSolValue::Int(v, _) => Self::Int(v),
            DynSolValue::Address(a) => Self::Address(a),
            DynSolValue::FixedBytes(word, 32) => Self::Hash(word),
            DynSolValue::FixedBytes(word, 1) => Self::Byte(word[0]),
            DynSolValue::String(s) => Self::Text(s),
            DynSolValue::Bool(b) => Self::Boolean(b),
            DynSolValue::Bytes(b) => Self::Bytes(b),
            _ => {
                return Err(Error::Conversion {
                    field: field.to_string(),
                    ty: ty.to_string(),
                })
            }
        };
        Ok(value)
    }

    /// Address carried by this value, if any.
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Canonical string form.
    pub fn normalize(&self) -> String {
        match self {
            Self::Uint(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Address(a) => a.to_checksum(None),
            Self::Hash(h) => format!("0x{}", hex::encode(h)),
            Self::Text(s) => s.clone(),
            Self::Boolean(b) => b.to_string(),
            Self::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Self::Byte(b) => char::from(*b).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    fn norm(value: DynSolValue) -> String {
        FieldValue::from_decoded(value, "f", "t").unwrap().normalize()
    }

    #[test]
    fn test_large_integers_render_base10() {
        assert_eq!(
            norm(DynSolValue::Uint(U256::MAX, 256)),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        assert_eq!(norm(DynSolValue::Uint(U256::from(18u64), 8)), "18");
        assert_eq!(norm(DynSolValue::Int("-42".parse::<I256>().unwrap(), 256)), "-42");
    }

    #[test]
    fn test_address_is_checksummed() {
        let addr = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
        assert_eq!(
            norm(DynSolValue::Address(addr)),
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
        );
    }

    #[test]
    fn test_hash_text_bool_bytes() {
        let h = b256!("135391a0962a63944e5908e6fedfff90fb4be3e3290a21017861099bad6546ae");
        assert_eq!(
            norm(DynSolValue::FixedBytes(h, 32)),
            "0x135391a0962a63944e5908e6fedfff90fb4be3e3290a21017861099bad6546ae"
        );
        assert_eq!(norm(DynSolValue::String("hello".into())), "hello");
        assert_eq!(norm(DynSolValue::Bool(true)), "true");
        assert_eq!(norm(DynSolValue::Bool(false)), "false");
        assert_eq!(norm(DynSolValue::Bytes(b"raw text".to_vec())), "raw text");
    }

    #[test]
    fn test_single_byte_is_one_char() {
        let mut word = B256::ZERO;
        word[0] = b'A';
        assert_eq!(norm(DynSolValue::FixedBytes(word, 1)), "A");
    }

    #[test]
    fn test_unhandled_types_fail() {
        let cases = vec![
            (DynSolValue::Array(vec![DynSolValue::Bool(true)]), "bool[]"),
            (DynSolValue::Tuple(vec![DynSolValue::Bool(true)]), "(bool)"),
            (DynSolValue::FixedBytes(B256::ZERO, 4), "bytes4"),
        ];
        for (value, ty) in cases {
            match FieldValue::from_decoded(value, "field", ty) {
                Err(Error::Conversion { field, ty: got }) => {
                    assert_eq!(field, "field");
                    assert_eq!(got, ty);
                }
                other => panic!("expected conversion error, got {:?}", other),
            }
        }
    }
}
