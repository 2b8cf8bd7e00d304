//! XChaCha20-Poly1305 AEAD wrapper used by the encryption envelope.
//!
//! The extended 24-byte nonce is large enough to draw at random per message
//! without coordination between peers.

use crate::config::NONCE_LEN;
use crate::error::{ProtocolError, Result};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};

/// Symmetric cipher bound to one 32-byte key.
pub struct Crypto {
    cipher: XChaCha20Poly1305,
}

impl Crypto {
    /// Build a cipher from a 32-byte key.
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: XChaCha20Poly1305::new(key.into()),
        }
    }

    /// Draw a fresh random nonce from the OS entropy source.
    ///
    /// # Errors
    /// Returns [`ProtocolError::EncryptionFailure`] if the OS refuses to
    /// provide entropy.
    pub fn generate_nonce() -> Result<[u8; NONCE_LEN]> {
        let mut nonce = [0u8; NONCE_LEN];
        getrandom::fill(&mut nonce).map_err(|_| ProtocolError::EncryptionFailure)?;
        Ok(nonce)
    }

    /// Encrypt and authenticate `plaintext`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::EncryptionFailure`] on cipher failure.
    pub fn encrypt(&self, plaintext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>> {
        self.cipher
            .encrypt(XNonce::from_slice(nonce), plaintext)
            .map_err(|_| ProtocolError::EncryptionFailure)
    }

    /// Decrypt and verify `ciphertext`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::DecryptionFailure`] when the tag does not
    /// verify, which covers both tampering and a wrong key.
    pub fn decrypt(&self, ciphertext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>> {
        self.cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| ProtocolError::DecryptionFailure)
    }
}
