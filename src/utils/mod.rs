//! # Utility Modules
//!
//! Supporting utilities used by the protocol core.
//!
//! ## Components
//! - **Crypto**: XChaCha20-Poly1305 AEAD encryption for the envelope
//!
//! ## Security
//! - Cryptographically secure RNG (getrandom) for nonces
//! - Authenticated encryption; tampered ciphertext never decrypts

pub mod crypto;
