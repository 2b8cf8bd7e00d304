//! # fieldwire
//!
//! Compact, self-framing binary packet format for point-to-point messaging.
//!
//! A packet is a `(type, subtype)` pair plus a list of fields addressed by a
//! one-byte identifier. Each field carries up to 255 bytes of fixed-width
//! encoded value data. Packets frame themselves on the wire with magic bytes
//! and a trailer, so a receiver can validate a delimited buffer without any
//! out-of-band length information.
//!
//! ## Layers
//! - **[`core::value`]**: fixed-width little-endian value codec ([`FieldValue`])
//! - **[`core::packet`]**: packet framing and typed field access
//! - **[`core::envelope`]**: whole-packet encryption under a pre-shared key
//! - **[`protocol::kind`]**: logical packet-kind registry
//! - **[`protocol::convert`]**: declarative record ↔ packet mapping
//!
//! ## Example
//! ```rust
//! use fieldwire::Packet;
//!
//! # fn main() -> fieldwire::Result<()> {
//! let mut packet = Packet::new(1, 0);
//! packet.set_value(5, &42u32)?;
//!
//! let bytes = packet.to_bytes();
//! let parsed = Packet::from_bytes(&bytes).expect("valid frame");
//! assert_eq!(parsed.get_value::<u32>(5)?, 42);
//! # Ok(())
//! # }
//! ```
//!
//! The core is transport-agnostic: callers hand `from_bytes` one
//! already-delimited buffer and write the output of `to_bytes` verbatim to
//! their stream. No I/O happens inside this crate.

#![deny(clippy::unwrap_used, clippy::panic)]

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::envelope;
pub use crate::core::packet::{Field, Packet};
pub use crate::core::value::FieldValue;
pub use crate::error::{ProtocolError, Result};
pub use crate::protocol::convert::{deserialize, serialize, serialize_as, FieldBinding, Mapped};
pub use crate::protocol::kind::KindRegistry;
