//! # Error Types
//!
//! Contract-violation errors for packet operations.
//!
//! Two distinct failure channels exist in this crate:
//! - **Structural rejection**: a byte buffer that is not a valid packet makes
//!   [`crate::Packet::from_bytes`] return `None`. That is a routine signal,
//!   never an error value, and the caller simply discards the input.
//! - **Contract errors** (this module): caller misuse or inconsistent schema —
//!   a missing field, a size mismatch, a duplicate kind registration. These
//!   propagate as [`ProtocolError`] and are not recoverable inside the core.
//!
//! All errors implement `std::error::Error` for interoperability.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primary error type for all packet, registry, and mapping operations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolError {
    /// No field with the requested identifier exists in the packet.
    #[error("field {0} not found")]
    FieldNotFound(u8),

    /// A stored field length differs from the exact wire size of the
    /// requested value type. Never silently truncated or padded.
    #[error("size mismatch: have {have} bytes, need exactly {need}")]
    SizeMismatch { have: usize, need: usize },

    /// An encoded value exceeds the 255-byte field content limit.
    #[error("value too large: {0} bytes (field contents are capped at 255)")]
    ValueTooLarge(usize),

    /// A logical packet kind was registered twice.
    #[error("packet kind {0} is already registered")]
    DuplicateKind(String),

    /// A logical packet kind was resolved before being registered.
    #[error("packet kind {0} is not registered")]
    UnknownKind(String),

    /// Two mapping declarations on one record share a field id (strict mode).
    #[error("field id {0} is bound by more than one record field")]
    DuplicateFieldId(u8),

    /// A declared record field has no backing packet field (strict mode).
    #[error("packet has no field {id} for record field `{name}`")]
    MissingField { name: String, id: u8 },

    /// A declared record field is present but undecodable (strict mode).
    #[error("could not decode field {id} into record field `{name}`")]
    MissingValue { name: String, id: u8 },

    /// The envelope cipher failed to encrypt, or no entropy was available
    /// for the nonce.
    #[error("encryption failed")]
    EncryptionFailure,

    /// The envelope cipher rejected the ciphertext.
    #[error("decryption failed")]
    DecryptionFailure,
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
