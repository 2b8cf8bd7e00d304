//! # Wire Constants
//!
//! Centralized constants for the packet wire format and the encryption
//! envelope. Everything a peer needs to recognize a frame lives here.
//!
//! ## Wire Format
//! ```text
//! [magic(3)] [type(1)] [subtype(1)] ([id(1)][len(1)][content(len)])* [trailer(2)]
//! ```
//!
//! Two magic sequences share the same frame layout: [`PLAIN_MAGIC`] opens an
//! ordinary packet, [`SEALED_MAGIC`] opens an envelope whose single field
//! (id 0) holds the ciphertext of a complete inner frame.

/// Magic bytes opening an unencrypted packet.
pub const PLAIN_MAGIC: [u8; 3] = [0xC0, 0xFF, 0xEE];

/// Magic bytes opening an encryption envelope.
pub const SEALED_MAGIC: [u8; 3] = [0x95, 0xAA, 0xFF];

/// Fixed two-byte trailer closing every packet.
pub const TRAILER: [u8; 2] = [0xFF, 0x00];

/// Smallest possible frame: magic (3) + type (1) + subtype (1) + trailer (2).
pub const MIN_PACKET_LEN: usize = 7;

/// Maximum field content length; the wire length occupies a single byte.
pub const MAX_FIELD_LEN: usize = u8::MAX as usize;

/// XChaCha20-Poly1305 nonce length, prepended to envelope ciphertext.
pub const NONCE_LEN: usize = 24;

/// Poly1305 authentication tag length appended by the cipher.
pub const TAG_LEN: usize = 16;

/// Largest inner frame that still fits an envelope's single field:
/// nonce and tag share the 255-byte field budget with the ciphertext.
pub const MAX_SEALED_INNER_LEN: usize = MAX_FIELD_LEN - NONCE_LEN - TAG_LEN;

/// Static pre-shared envelope key.
///
/// Both endpoints ship the same key; anyone holding the binary can decrypt
/// traffic. The envelope hides payloads from passive observers only and makes
/// no stronger claim.
pub const SHARED_KEY: [u8; 32] = [
    0x6d, 0x64, 0x37, 0x35, 0x32, 0x76, 0x32, 0x62, 0x77, 0x79, 0x76, 0x6e, 0x36, 0x38, 0x64,
    0x72, 0x6b, 0x71, 0x67, 0x79, 0x33, 0x70, 0x78, 0x65, 0x30, 0x1f, 0x8c, 0x42, 0xd9, 0x07,
    0x5e, 0xb3,
];
