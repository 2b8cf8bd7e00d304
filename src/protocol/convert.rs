//! # Record Mapping
//!
//! Declarative correspondence between the fields of an application record
//! and packet field identifiers, with bulk [`serialize`] / [`deserialize`]
//! between the two.
//!
//! There is no runtime introspection: a record type implements [`Mapped`] by
//! exposing a static table of [`FieldBinding`]s, one per mapped field. The
//! [`crate::bind_fields!`] macro writes that table from a compact
//! declaration:
//!
//! ```rust
//! use fieldwire::{bind_fields, serialize_as, deserialize};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Handshake {
//!     token: u32,
//!     attempt: u16,
//! }
//!
//! bind_fields!(Handshake {
//!     token => 1,
//!     attempt => 2,
//! });
//!
//! # fn main() -> fieldwire::Result<()> {
//! let original = Handshake { token: 99, attempt: 3 };
//! let packet = serialize_as(1, 0, &original, false)?;
//! let restored: Handshake = deserialize(&packet, false)?;
//! assert_eq!(restored, original);
//! # Ok(())
//! # }
//! ```
//!
//! In non-strict mode a packet field missing for a declared record field
//! leaves that record field at its default; strict mode turns the same
//! situation into an error.

use crate::core::packet::Packet;
use crate::error::{ProtocolError, Result};
use crate::protocol::kind::KindRegistry;
use std::fmt::Debug;

/// One record field's mapping: its name (for diagnostics), the packet field
/// id it travels under, and non-capturing accessors bridging record and
/// packet. Plain static data, built once per record type.
pub struct FieldBinding<T> {
    /// Record field name, used in strict-mode error messages.
    pub name: &'static str,
    /// Packet field identifier the record field maps to.
    pub id: u8,
    /// Encode the record field into the packet under `id`.
    pub write: fn(&T, u8, &mut Packet) -> Result<()>,
    /// Decode the packet field under `id` into the record.
    pub read: fn(&mut T, u8, &Packet) -> Result<()>,
}

/// A record type with a declared packet mapping.
///
/// Usually implemented via [`crate::bind_fields!`] rather than by hand.
pub trait Mapped: Default {
    /// The static binding table for this record type.
    fn bindings() -> &'static [FieldBinding<Self>];
}

/// Serialize `record` into a packet framed as `kind`.
///
/// # Errors
/// - [`ProtocolError::UnknownKind`] if `kind` is not registered
/// - [`ProtocolError::DuplicateFieldId`] in strict mode when two bindings
///   share an id (checked before anything is written)
/// - any [`Packet::set_value`] failure, e.g. an oversized value
pub fn serialize<K, T>(
    registry: &KindRegistry<K>,
    kind: K,
    record: &T,
    strict: bool,
) -> Result<Packet>
where
    K: Copy + PartialEq + Debug,
    T: Mapped + 'static,
{
    let (ptype, subtype) = registry.resolve(kind)?;
    serialize_as(ptype, subtype, record, strict)
}

/// Serialize `record` into a packet with an explicit byte pair, bypassing
/// the registry.
///
/// # Errors
/// Same as [`serialize`], minus the kind resolution.
pub fn serialize_as<T: Mapped + 'static>(ptype: u8, subtype: u8, record: &T, strict: bool) -> Result<Packet> {
    let bindings = T::bindings();

    if strict {
        for (checked, binding) in bindings.iter().enumerate() {
            if bindings[..checked].iter().any(|b| b.id == binding.id) {
                return Err(ProtocolError::DuplicateFieldId(binding.id));
            }
        }
    }

    let mut packet = Packet::new(ptype, subtype);
    for binding in bindings {
        (binding.write)(record, binding.id, &mut packet)?;
    }

    Ok(packet)
}

/// Deserialize a packet into a fresh instance of `T`.
///
/// Each declared field is read from the packet field it is bound to. A
/// missing packet field leaves the record field at its default (non-strict)
/// or fails (strict); a present but undecodable field is skipped (non-strict)
/// or fails (strict).
///
/// # Errors
/// - [`ProtocolError::MissingField`] in strict mode for an absent field
/// - [`ProtocolError::MissingValue`] in strict mode for an undecodable field
pub fn deserialize<T: Mapped + 'static>(packet: &Packet, strict: bool) -> Result<T> {
    let mut record = T::default();

    for binding in T::bindings() {
        if !packet.has_field(binding.id) {
            if strict {
                return Err(ProtocolError::MissingField {
                    name: binding.name.to_string(),
                    id: binding.id,
                });
            }
            continue;
        }

        if (binding.read)(&mut record, binding.id, packet).is_err() && strict {
            return Err(ProtocolError::MissingValue {
                name: binding.name.to_string(),
                id: binding.id,
            });
        }
    }

    Ok(record)
}

/// Declare the packet mapping for a record type.
///
/// Each `field => id` pair binds a named record field to a one-byte packet
/// field identifier. The field's type must implement
/// [`crate::FieldValue`], and the record must implement `Default`.
///
/// ```rust
/// #[derive(Default)]
/// struct Status {
///     code: u8,
///     uptime_secs: u64,
/// }
///
/// fieldwire::bind_fields!(Status {
///     code => 0,
///     uptime_secs => 1,
/// });
/// ```
#[macro_export]
macro_rules! bind_fields {
    ($record:ty { $($field:ident => $id:expr),+ $(,)? }) => {
        impl $crate::protocol::convert::Mapped for $record {
            fn bindings() -> &'static [$crate::protocol::convert::FieldBinding<Self>] {
                const BINDINGS: &[$crate::protocol::convert::FieldBinding<$record>] = &[
                    $(
                        $crate::protocol::convert::FieldBinding {
                            name: stringify!($field),
                            id: $id,
                            write: |record, id, packet| packet.set_value(id, &record.$field),
                            read: |record, id, packet| {
                                record.$field = packet.get_value(id)?;
                                Ok(())
                            },
                        }
                    ),+
                ];
                BINDINGS
            }
        }
    };
}
