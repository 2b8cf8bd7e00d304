//! # Core Protocol Components
//!
//! Low-level packet framing, field access, and the encryption envelope.
//!
//! This module provides the foundation for the protocol: the self-framing
//! wire format, typed field-value accessors, and whole-packet encryption.
//!
//! ## Components
//! - **Packet**: field-addressed binary packet with magic bytes and trailer
//! - **Value**: fixed-width little-endian value codec
//! - **Envelope**: encrypted carrier packet for a complete inner frame
//!
//! ## Wire Format
//! ```text
//! [Magic(3)] [Type(1)] [Subtype(1)] ([Id(1)][Len(1)][Content(Len)])* [Trailer(2)]
//! ```
//!
//! ## Safety
//! - Field contents are length-checked before every slice; malformed input
//!   is rejected, never read out of bounds
//! - Magic bytes prevent accidental misinterpretation
//! - Structural rejection is `None`, never a panic

pub mod envelope;
pub mod packet;
pub mod value;
