//! # Packet Framing and Field Access
//!
//! The packet is the unit of exchange: a `(type, subtype)` pair plus an
//! ordered list of identifier-addressed fields, each holding up to 255 bytes
//! of encoded value data.
//!
//! ## Wire Format
//! ```text
//! [magic(3)] [type(1)] [subtype(1)] ([id(1)][len(1)][content(len)])* [trailer(2)]
//! ```
//!
//! [`Packet::to_bytes`] always emits fields in ascending id order — a
//! deliberate canonicalization so two packets with the same field set frame
//! identically regardless of insertion order. [`Packet::from_bytes`] accepts
//! a single already-delimited buffer and returns `None` for anything that is
//! not a valid frame; malformed input is never a panic and never an `Err`.

use crate::config::{MAX_FIELD_LEN, MIN_PACKET_LEN, PLAIN_MAGIC, SEALED_MAGIC, TRAILER};
use crate::core::envelope;
use crate::core::value::FieldValue;
use crate::error::{ProtocolError, Result};
use bytes::{BufMut, BytesMut};
use tracing::trace;

/// A single identifier-addressed field inside a packet.
///
/// The wire length byte is derived from `content.len()`, which is kept at or
/// below 255 by every construction path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// One-byte field identifier.
    pub id: u8,
    /// Encoded value bytes; empty for zero-length fields.
    pub content: Vec<u8>,
}

/// A self-framing binary packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    ptype: u8,
    subtype: u8,
    fields: Vec<Field>,
    protected: bool,
    /// Emit the envelope magic instead of the plain magic. Set only by
    /// [`envelope::seal`]; ordinary packets never touch this.
    pub(crate) sealed_header: bool,
}

impl Packet {
    /// Create an empty packet with the given physical type and subtype.
    pub fn new(ptype: u8, subtype: u8) -> Self {
        Self {
            ptype,
            subtype,
            fields: Vec::new(),
            protected: false,
            sealed_header: false,
        }
    }

    /// Physical packet type byte.
    pub fn ptype(&self) -> u8 {
        self.ptype
    }

    /// Physical packet subtype byte.
    pub fn subtype(&self) -> u8 {
        self.subtype
    }

    /// All fields, in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// True when this packet came out of a successfully decrypted envelope.
    /// Informational: nothing downstream enforces it.
    pub fn protected(&self) -> bool {
        self.protected
    }

    /// First field whose id matches, scanning in insertion order.
    pub fn get_field(&self, id: u8) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Whether any field carries the given id.
    pub fn has_field(&self, id: u8) -> bool {
        self.get_field(id).is_some()
    }

    /// Decode the value stored under `id`.
    ///
    /// # Errors
    /// - [`ProtocolError::FieldNotFound`] if no field carries `id`
    /// - [`ProtocolError::SizeMismatch`] if the stored length differs from
    ///   `V::WIRE_SIZE`
    pub fn get_value<V: FieldValue>(&self, id: u8) -> Result<V> {
        let field = self
            .get_field(id)
            .ok_or(ProtocolError::FieldNotFound(id))?;
        V::decode(&field.content)
    }

    /// Encode `value` into the field `id`, creating and appending the field
    /// if it does not exist yet.
    ///
    /// # Errors
    /// Returns [`ProtocolError::ValueTooLarge`] if the encoded form exceeds
    /// 255 bytes.
    pub fn set_value<V: FieldValue>(&mut self, id: u8, value: &V) -> Result<()> {
        self.set_value_raw(id, &value.encode())
    }

    /// Raw bytes stored under `id`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::FieldNotFound`] if no field carries `id`.
    pub fn get_value_raw(&self, id: u8) -> Result<&[u8]> {
        self.get_field(id)
            .map(|field| field.content.as_slice())
            .ok_or(ProtocolError::FieldNotFound(id))
    }

    /// Store raw bytes under `id`, creating and appending the field if it
    /// does not exist yet.
    ///
    /// # Errors
    /// Returns [`ProtocolError::ValueTooLarge`] if `content` exceeds 255
    /// bytes.
    pub fn set_value_raw(&mut self, id: u8, content: &[u8]) -> Result<()> {
        if content.len() > MAX_FIELD_LEN {
            return Err(ProtocolError::ValueTooLarge(content.len()));
        }

        if let Some(pos) = self.fields.iter().position(|field| field.id == id) {
            self.fields[pos].content = content.to_vec();
        } else {
            self.fields.push(Field {
                id,
                content: content.to_vec(),
            });
        }

        Ok(())
    }

    /// Frame this packet into a byte buffer.
    ///
    /// Fields are emitted in ascending id order; duplicate ids (possible on
    /// packets built from parsed wire data) keep their relative order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let body: usize = self.fields.iter().map(|f| 2 + f.content.len()).sum();
        let mut buf = BytesMut::with_capacity(MIN_PACKET_LEN + body);

        buf.put_slice(if self.sealed_header {
            &SEALED_MAGIC
        } else {
            &PLAIN_MAGIC
        });
        buf.put_u8(self.ptype);
        buf.put_u8(self.subtype);

        let mut ordered: Vec<&Field> = self.fields.iter().collect();
        ordered.sort_by_key(|field| field.id);

        for field in ordered {
            buf.put_u8(field.id);
            buf.put_u8(field.content.len() as u8);
            buf.put_slice(&field.content);
        }

        buf.put_slice(&TRAILER);
        buf.to_vec()
    }

    /// Parse one already-delimited buffer into a packet.
    ///
    /// Returns `None` for anything that is not a valid frame: short buffers,
    /// unknown magic, a corrupted trailer, field lengths overrunning the
    /// buffer, or an envelope that does not decrypt. A buffer opening with
    /// the envelope magic is transparently unsealed; the returned inner
    /// packet reports [`Packet::protected`] as true.
    pub fn from_bytes(buf: &[u8]) -> Option<Packet> {
        Self::parse(buf, false)
    }

    pub(crate) fn parse(buf: &[u8], protected: bool) -> Option<Packet> {
        if buf.len() < MIN_PACKET_LEN {
            trace!(len = buf.len(), "rejecting frame: too short");
            return None;
        }

        // Both magic sequences must match in full; a partial match is noise.
        let sealed = if buf[..3] == PLAIN_MAGIC {
            false
        } else if buf[..3] == SEALED_MAGIC {
            true
        } else {
            trace!("rejecting frame: unrecognized magic");
            return None;
        };

        if buf[buf.len() - 2..] != TRAILER {
            trace!("rejecting frame: bad trailer");
            return None;
        }

        let mut packet = Packet::new(buf[3], buf[4]);
        packet.protected = protected;

        // Interior (id, len, content) triples between header and trailer.
        // Every declared length is checked against the remaining bytes, so a
        // lying length byte rejects the frame instead of overrunning it.
        let mut rest = &buf[5..buf.len() - 2];
        while !rest.is_empty() {
            if rest.len() < 2 {
                trace!("rejecting frame: dangling field header");
                return None;
            }

            let id = rest[0];
            let len = rest[1] as usize;
            if rest.len() < 2 + len {
                trace!(id, len, "rejecting frame: field overruns buffer");
                return None;
            }

            packet.fields.push(Field {
                id,
                content: rest[2..2 + len].to_vec(),
            });
            rest = &rest[2 + len..];
        }

        if sealed {
            envelope::unseal(&packet)
        } else {
            Some(packet)
        }
    }

    /// Wrap this packet in an encrypted envelope. See [`envelope::seal`].
    ///
    /// # Errors
    /// Propagates [`envelope::seal`] failures.
    pub fn seal(&self) -> Result<Packet> {
        envelope::seal(self)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn set_then_get_roundtrips() {
        let mut packet = Packet::new(1, 2);
        packet.set_value(7, &0xDEAD_BEEFu32).unwrap();
        assert_eq!(packet.get_value::<u32>(7).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn set_value_overwrites_in_place() {
        let mut packet = Packet::new(0, 0);
        packet.set_value(1, &10u16).unwrap();
        packet.set_value(1, &20u16).unwrap();
        assert_eq!(packet.fields().len(), 1);
        assert_eq!(packet.get_value::<u16>(1).unwrap(), 20);
    }

    #[test]
    fn get_field_returns_first_match() {
        // Duplicate ids only arise from parsed wire data; lookup is defined
        // as first match in insertion order.
        let bytes = [
            0xC0, 0xFF, 0xEE, 1, 0, /* fields */ 3, 1, 0xAA, 3, 1, 0xBB, /* end */ 0xFF,
            0x00,
        ];
        let packet = Packet::from_bytes(&bytes).unwrap();
        assert_eq!(packet.fields().len(), 2);
        assert_eq!(packet.get_value_raw(3).unwrap(), &[0xAA]);
    }

    #[test]
    fn missing_field_is_field_not_found() {
        let packet = Packet::new(1, 0);
        assert_eq!(
            packet.get_value::<u32>(9).unwrap_err(),
            ProtocolError::FieldNotFound(9)
        );
        assert_eq!(
            packet.get_value_raw(9).unwrap_err(),
            ProtocolError::FieldNotFound(9)
        );
    }

    #[test]
    fn stored_size_must_match_exactly() {
        let mut packet = Packet::new(1, 0);
        packet.set_value(5, &1u16).unwrap();
        assert_eq!(
            packet.get_value::<u32>(5).unwrap_err(),
            ProtocolError::SizeMismatch { have: 2, need: 4 }
        );
    }

    #[test]
    fn oversized_raw_value_is_rejected() {
        let mut packet = Packet::new(1, 0);
        let err = packet.set_value_raw(5, &[0u8; 256]).unwrap_err();
        assert_eq!(err, ProtocolError::ValueTooLarge(256));
        assert!(!packet.has_field(5));
    }

    #[test]
    fn wire_fields_are_canonically_ordered() {
        let mut packet = Packet::new(1, 0);
        packet.set_value(9, &1u8).unwrap();
        packet.set_value(2, &2u8).unwrap();
        packet.set_value(5, &3u8).unwrap();

        let parsed = Packet::from_bytes(&packet.to_bytes()).unwrap();
        let ids: Vec<u8> = parsed.fields().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn framing_roundtrip_preserves_everything() {
        let mut packet = Packet::new(4, 7);
        packet.set_value(1, &42u32).unwrap();
        packet.set_value_raw(2, b"abc").unwrap();
        packet.set_value_raw(3, &[]).unwrap();

        let parsed = Packet::from_bytes(&packet.to_bytes()).unwrap();
        assert_eq!(parsed.ptype(), 4);
        assert_eq!(parsed.subtype(), 7);
        assert_eq!(parsed.get_value::<u32>(1).unwrap(), 42);
        assert_eq!(parsed.get_value_raw(2).unwrap(), b"abc");
        assert_eq!(parsed.get_value_raw(3).unwrap(), &[] as &[u8]);
        assert!(!parsed.protected());
    }

    #[test]
    fn zero_length_field_survives_the_wire() {
        let mut packet = Packet::new(0, 1);
        packet.set_value_raw(8, &[]).unwrap();

        let bytes = packet.to_bytes();
        assert_eq!(bytes.len(), MIN_PACKET_LEN + 2);

        let parsed = Packet::from_bytes(&bytes).unwrap();
        assert!(parsed.has_field(8));
        assert!(parsed.get_field(8).unwrap().content.is_empty());
    }
}
