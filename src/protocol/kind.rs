//! # Packet Kind Registry
//!
//! Maps an application-level kind (any `Copy + Eq` enum) to the physical
//! `(type, subtype)` byte pair it travels as, and back.
//!
//! The registry is an explicit object: construct it during startup, register
//! every kind, then share it by reference. Entries are never mutated or
//! removed, so once registration is done concurrent reads are safe without
//! locking.

use crate::core::packet::Packet;
use crate::error::{ProtocolError, Result};
use std::fmt::Debug;
use tracing::debug;

/// Registry of logical packet kinds.
///
/// ```rust
/// use fieldwire::KindRegistry;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Kind { Handshake, Ping }
///
/// # fn main() -> fieldwire::Result<()> {
/// let mut registry = KindRegistry::new();
/// registry.register(Kind::Handshake, 1, 0)?;
/// registry.register(Kind::Ping, 1, 1)?;
///
/// assert_eq!(registry.resolve(Kind::Ping)?, (1, 1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KindRegistry<K> {
    entries: Vec<(K, u8, u8)>,
}

impl<K> Default for KindRegistry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq + Debug> KindRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind with its physical byte pair.
    ///
    /// # Errors
    /// Returns [`ProtocolError::DuplicateKind`] if `kind` is already
    /// registered.
    pub fn register(&mut self, kind: K, ptype: u8, subtype: u8) -> Result<()> {
        if self.entries.iter().any(|&(k, _, _)| k == kind) {
            return Err(ProtocolError::DuplicateKind(format!("{kind:?}")));
        }

        debug!(kind = ?kind, ptype, subtype, "registered packet kind");
        self.entries.push((kind, ptype, subtype));
        Ok(())
    }

    /// Look up the physical byte pair for a kind.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnknownKind`] if `kind` was never registered.
    pub fn resolve(&self, kind: K) -> Result<(u8, u8)> {
        self.entries
            .iter()
            .find(|&&(k, _, _)| k == kind)
            .map(|&(_, ptype, subtype)| (ptype, subtype))
            .ok_or_else(|| ProtocolError::UnknownKind(format!("{kind:?}")))
    }

    /// Classify a packet by its `(type, subtype)` pair.
    ///
    /// `None` means "unknown kind" and is a perfectly valid outcome — an
    /// unmapped pair from a newer or misbehaving peer is not an error.
    pub fn classify(&self, packet: &Packet) -> Option<K> {
        self.entries
            .iter()
            .find(|&&(_, ptype, subtype)| ptype == packet.ptype() && subtype == packet.subtype())
            .map(|&(kind, _, _)| kind)
    }

    /// Create an empty packet framed as the given kind.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnknownKind`] if `kind` was never registered.
    pub fn new_packet(&self, kind: K) -> Result<Packet> {
        let (ptype, subtype) = self.resolve(kind)?;
        Ok(Packet::new(ptype, subtype))
    }
}
