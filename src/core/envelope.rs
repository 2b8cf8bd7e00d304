//! # Encryption Envelope
//!
//! Whole-packet encryption layered on the packet format itself.
//!
//! [`seal`] frames a packet, encrypts the bytes under the crate's static
//! pre-shared key, and stores `nonce ‖ ciphertext` as raw field 0 of a fresh
//! `(0, 0)` packet that frames itself with the envelope magic. [`unseal`]
//! reverses the process and marks the recovered packet as protected.
//!
//! The parser hands envelope frames here automatically, so a caller feeding
//! `Packet::from_bytes` never sees the carrier packet — only the decrypted
//! inner packet, or `None` when the ciphertext does not verify.

use crate::config::{NONCE_LEN, SHARED_KEY};
use crate::core::packet::Packet;
use crate::error::Result;
use crate::utils::crypto::Crypto;
use tracing::{debug, trace};

/// Id of the single field an envelope carries.
const CIPHERTEXT_FIELD: u8 = 0;

/// Wrap `packet` in an encrypted envelope.
///
/// The ciphertext must fit a single field, which caps the inner frame at
/// [`crate::config::MAX_SEALED_INNER_LEN`] bytes.
///
/// # Errors
/// - [`crate::ProtocolError::ValueTooLarge`] when the sealed payload exceeds
///   the 255-byte field limit
/// - [`crate::ProtocolError::EncryptionFailure`] on cipher or entropy failure
pub fn seal(packet: &Packet) -> Result<Packet> {
    let plain = packet.to_bytes();

    let crypto = Crypto::new(&SHARED_KEY);
    let nonce = Crypto::generate_nonce()?;
    let ciphertext = crypto.encrypt(&plain, &nonce)?;

    let mut payload = nonce.to_vec();
    payload.extend(ciphertext);

    let mut sealed = Packet::new(0, 0);
    sealed.set_value_raw(CIPHERTEXT_FIELD, &payload)?;
    sealed.sealed_header = true;

    debug!(inner_len = plain.len(), "sealed packet");
    Ok(sealed)
}

/// Unwrap an envelope packet back into the inner packet it carries.
///
/// Returns `None` when the envelope has no field 0, when the ciphertext does
/// not decrypt under the shared key, or when the decrypted bytes are not a
/// valid frame themselves. The recovered packet reports
/// [`Packet::protected`] as true.
pub fn unseal(packet: &Packet) -> Option<Packet> {
    let payload = &packet.get_field(CIPHERTEXT_FIELD)?.content;

    if payload.len() < NONCE_LEN {
        trace!(len = payload.len(), "envelope payload shorter than nonce");
        return None;
    }

    let (nonce_bytes, ciphertext) = payload.split_at(NONCE_LEN);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(nonce_bytes);

    let crypto = Crypto::new(&SHARED_KEY);
    let plain = match crypto.decrypt(ciphertext, &nonce) {
        Ok(plain) => plain,
        Err(_) => {
            trace!("envelope ciphertext failed to verify");
            return None;
        }
    };

    Packet::parse(&plain, true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::SEALED_MAGIC;

    #[test]
    fn seal_then_unseal_recovers_the_packet() {
        let mut packet = Packet::new(3, 1);
        packet.set_value(5, &42u32).unwrap();

        let sealed = seal(&packet).unwrap();
        assert_eq!(sealed.ptype(), 0);
        assert_eq!(sealed.subtype(), 0);
        assert!(sealed.has_field(CIPHERTEXT_FIELD));

        let inner = unseal(&sealed).unwrap();
        assert!(inner.protected());
        assert_eq!(inner.ptype(), 3);
        assert_eq!(inner.subtype(), 1);
        assert_eq!(inner.get_value::<u32>(5).unwrap(), 42);
    }

    #[test]
    fn sealed_bytes_open_with_the_envelope_magic() {
        let sealed = seal(&Packet::new(1, 0)).unwrap();
        let bytes = sealed.to_bytes();
        assert_eq!(&bytes[..3], &SEALED_MAGIC);
    }

    #[test]
    fn envelope_without_field_zero_is_not_decryptable() {
        let mut bogus = Packet::new(0, 0);
        bogus.set_value_raw(1, &[1, 2, 3]).unwrap();
        assert!(unseal(&bogus).is_none());
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let mut packet = Packet::new(1, 0);
        packet.set_value(2, &7u16).unwrap();

        let sealed = seal(&packet).unwrap();
        let mut payload = sealed.get_value_raw(CIPHERTEXT_FIELD).unwrap().to_vec();
        let last = payload.len() - 1;
        payload[last] ^= 0xFF;

        let mut tampered = Packet::new(0, 0);
        tampered.set_value_raw(CIPHERTEXT_FIELD, &payload).unwrap();
        assert!(unseal(&tampered).is_none());
    }

    #[test]
    fn oversized_inner_packet_cannot_be_sealed() {
        let mut packet = Packet::new(1, 0);
        packet.set_value_raw(1, &[0xAB; 255]).unwrap();
        assert!(seal(&packet).is_err());
    }
}
