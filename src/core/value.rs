//! # Value Codec
//!
//! Fixed-width binary encoding for field values.
//!
//! Every type storable in a packet field implements [`FieldValue`]: a
//! deterministic encoding of exactly [`FieldValue::WIRE_SIZE`] bytes, and the
//! exact inverse decode. The layout is explicit little-endian for every
//! numeric type, independent of the host platform, so both peers agree on
//! the bytes regardless of architecture.
//!
//! A byte slice whose length differs from the target type's wire size is a
//! [`ProtocolError::SizeMismatch`] — never a truncation or zero-pad.

use crate::error::{ProtocolError, Result};

/// A fixed-size value encodable into a packet field.
///
/// Implementations must be deterministic: `encode_to` always appends exactly
/// [`Self::WIRE_SIZE`] bytes, and `decode` inverts it for inputs of that
/// exact length.
pub trait FieldValue: Sized {
    /// Exact encoded length in bytes.
    const WIRE_SIZE: usize;

    /// Append the encoded form to `out`.
    fn encode_to(&self, out: &mut Vec<u8>);

    /// Decode from a slice of exactly [`Self::WIRE_SIZE`] bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::SizeMismatch`] for any other length.
    fn decode(bytes: &[u8]) -> Result<Self>;

    /// Encode into a fresh buffer.
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::WIRE_SIZE);
        self.encode_to(&mut out);
        out
    }
}

macro_rules! le_field_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl FieldValue for $ty {
            const WIRE_SIZE: usize = std::mem::size_of::<$ty>();

            fn encode_to(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            fn decode(bytes: &[u8]) -> Result<Self> {
                let raw: [u8; std::mem::size_of::<$ty>()] =
                    bytes.try_into().map_err(|_| ProtocolError::SizeMismatch {
                        have: bytes.len(),
                        need: Self::WIRE_SIZE,
                    })?;
                Ok(<$ty>::from_le_bytes(raw))
            }
        }
    )+};
}

le_field_value!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl FieldValue for bool {
    const WIRE_SIZE: usize = 1;

    fn encode_to(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [b] => Ok(*b != 0),
            _ => Err(ProtocolError::SizeMismatch {
                have: bytes.len(),
                need: 1,
            }),
        }
    }
}

/// Fixed-size byte arrays pass through verbatim. Arrays longer than 255
/// bytes exist as values but can never be stored in a field.
impl<const N: usize> FieldValue for [u8; N] {
    const WIRE_SIZE: usize = N;

    fn encode_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        bytes.try_into().map_err(|_| ProtocolError::SizeMismatch {
            have: bytes.len(),
            need: N,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn integers_encode_little_endian() {
        assert_eq!(42u32.encode(), vec![0x2A, 0x00, 0x00, 0x00]);
        assert_eq!(0x0102u16.encode(), vec![0x02, 0x01]);
        assert_eq!((-1i64).encode(), vec![0xFF; 8]);
    }

    #[test]
    fn encode_length_matches_wire_size() {
        assert_eq!(7u8.encode().len(), u8::WIRE_SIZE);
        assert_eq!(7u64.encode().len(), u64::WIRE_SIZE);
        assert_eq!(1.5f64.encode().len(), f64::WIRE_SIZE);
        assert_eq!([0u8; 13].encode().len(), <[u8; 13]>::WIRE_SIZE);
    }

    #[test]
    fn decode_inverts_encode() {
        assert_eq!(u32::decode(&42u32.encode()).unwrap(), 42);
        assert_eq!(i16::decode(&(-300i16).encode()).unwrap(), -300);
        assert_eq!(f32::decode(&3.25f32.encode()).unwrap(), 3.25);
        assert!(bool::decode(&true.encode()).unwrap());
        assert_eq!(<[u8; 4]>::decode(&[9, 8, 7, 6]).unwrap(), [9, 8, 7, 6]);
    }

    #[test]
    fn wrong_length_is_size_mismatch() {
        let err = u32::decode(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, ProtocolError::SizeMismatch { have: 3, need: 4 });

        let err = bool::decode(&[]).unwrap_err();
        assert_eq!(err, ProtocolError::SizeMismatch { have: 0, need: 1 });
    }
}
