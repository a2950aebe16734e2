//! Codec traits and the shared field codecs.
//!
//! Every wire-shaped type implements [`CellCodec`]: a `store`/`load` pair over
//! the cell substrate. Opcode-tagged message bodies additionally implement
//! [`MsgBody`], which carries the 32-bit opcode constant and the
//! [`Namespace`] the opcode lives in, and derives [`MsgBody::to_cell`] from
//! `store`.
//!
//! The `Maybe ^Cell` and `Either Cell ^Cell` field encodings shared by all
//! three protocol families live here as [`store_maybe_ref`] /
//! [`load_maybe_ref`] and the [`Payload`] type.

use crate::cell::{Builder, Cell, Slice};
use crate::error::CodecError;
use std::fmt;

/// Which opcode table a message body belongs to.
///
/// Opcodes must be unique within a namespace; the same value may appear in
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Body of a contract-to-contract internal message.
    Internal,
    /// Payload forwarded inside a jetton transfer / transfer notification.
    JettonPayload,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Internal => f.write_str("internal"),
            Namespace::JettonPayload => f.write_str("jetton-payload"),
        }
    }
}

/// Encode/decode pair over the cell substrate.
///
/// `store` appends this value's wire form to a builder; `load` consumes
/// exactly that form from a cursor. Neither touches anything beyond the
/// value's own fields.
pub trait CellCodec: Sized {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError>;
    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError>;
}

/// An opcode-tagged message body.
///
/// `store` writes the opcode before the fields; `load` reads it back and
/// fails with [`CodecError::OpcodeMismatch`] when it is not `OPCODE`, so
/// decoders stay self-contained even when reached through dispatch.
pub trait MsgBody: CellCodec {
    const OPCODE: u32;
    const NAMESPACE: Namespace;

    /// Encode into a finished cell.
    fn to_cell(&self) -> Result<Cell, CodecError> {
        let mut b = Builder::new();
        self.store(&mut b)?;
        Ok(b.finish())
    }

    /// Consume the leading 32 bits and check them against `OPCODE`.
    fn expect_opcode(s: &mut Slice<'_>) -> Result<(), CodecError> {
        let found = s.read_uint(32)? as u32;
        if found != Self::OPCODE {
            return Err(CodecError::OpcodeMismatch {
                expected: Self::OPCODE,
                found,
            });
        }
        Ok(())
    }
}

/// Write a `Maybe ^Cell` field: presence bit, then the cell by reference.
pub fn store_maybe_ref(b: &mut Builder, payload: Option<&Cell>) -> Result<(), CodecError> {
    match payload {
        Some(cell) => {
            b.write_bit(true)?;
            b.write_ref(cell.clone())?;
        }
        None => {
            b.write_bit(false)?;
        }
    }
    Ok(())
}

/// Read a `Maybe ^Cell` field. A set presence bit without a remaining
/// reference is a structural error.
pub fn load_maybe_ref(s: &mut Slice<'_>) -> Result<Option<Cell>, CodecError> {
    if s.read_bit()? {
        Ok(Some(s.read_ref_cell()?))
    } else {
        Ok(None)
    }
}

/// Read a `Maybe ^Cell` field, tolerating a set presence bit with no
/// reference behind it (decodes as absent). This is a known
/// protocol-compatibility quirk of jetton burn bodies seen on chain; every
/// other `Maybe` field uses the strict [`load_maybe_ref`].
pub fn load_maybe_ref_relaxed(s: &mut Slice<'_>) -> Result<Option<Cell>, CodecError> {
    if s.read_bit()? && s.remaining_refs() > 0 {
        Ok(Some(s.read_ref_cell()?))
    } else {
        Ok(None)
    }
}

/// An `Either Cell ^Cell` field.
///
/// The wire form is one discriminator bit: 0 means the payload is the
/// remainder of the current cell (possibly nothing at all), 1 means it is the
/// next child reference. `Empty` and `Inline` share the 0 bit; decoding a
/// zero bit over an exhausted remainder yields `Empty`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    /// No payload: a lone 0 bit.
    #[default]
    Empty,
    /// Payload spliced into the current cell after the 0 bit.
    Inline(Cell),
    /// Payload stored as the next child reference after the 1 bit.
    Ref(Cell),
}

impl Payload {
    /// The carried cell, if any. `Inline` and `Ref` holding the same cell are
    /// the same logical payload.
    pub fn cell(&self) -> Option<&Cell> {
        match self {
            Payload::Empty => None,
            Payload::Inline(cell) | Payload::Ref(cell) => Some(cell),
        }
    }
}

impl CellCodec for Payload {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        match self {
            Payload::Empty => {
                b.write_bit(false)?;
            }
            Payload::Inline(cell) => {
                b.write_bit(false)?;
                b.write_cell(cell)?;
            }
            Payload::Ref(cell) => {
                b.write_bit(true)?;
                b.write_ref(cell.clone())?;
            }
        }
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        if s.read_bit()? {
            Ok(Payload::Ref(s.read_ref_cell()?))
        } else if s.remaining_bits() == 0 && s.remaining_refs() == 0 {
            Ok(Payload::Empty)
        } else {
            Ok(Payload::Inline(s.take_remainder()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_cell(value: u64) -> Cell {
        let mut b = Builder::new();
        b.write_uint(value, 16).expect("write");
        b.finish()
    }

    #[test]
    fn maybe_ref_both_branches() {
        let cell = marker_cell(0xbeef);
        let mut b = Builder::new();
        store_maybe_ref(&mut b, Some(&cell)).expect("store");
        store_maybe_ref(&mut b, None).expect("store");
        let built = b.finish();
        let mut s = built.begin_parse();
        assert_eq!(load_maybe_ref(&mut s).expect("load"), Some(cell));
        assert_eq!(load_maybe_ref(&mut s).expect("load"), None);
    }

    #[test]
    fn maybe_ref_strict_vs_relaxed() {
        // presence bit set, but no reference attached
        let mut b = Builder::new();
        b.write_bit(true).expect("bit");
        let built = b.finish();
        assert!(matches!(
            load_maybe_ref(&mut built.begin_parse()),
            Err(CodecError::Structural(_))
        ));
        assert_eq!(
            load_maybe_ref_relaxed(&mut built.begin_parse()).expect("load"),
            None
        );
    }

    #[test]
    fn payload_three_states_roundtrip() {
        let cell = marker_cell(0xcafe);
        for payload in [
            Payload::Empty,
            Payload::Inline(cell.clone()),
            Payload::Ref(cell),
        ] {
            let mut b = Builder::new();
            payload.store(&mut b).expect("store");
            let built = b.finish();
            assert_eq!(Payload::load(&mut built.begin_parse()).expect("load"), payload);
        }
    }

    #[test]
    fn payload_ref_bit_without_ref_fails() {
        let mut b = Builder::new();
        b.write_bit(true).expect("bit");
        let built = b.finish();
        assert!(matches!(
            Payload::load(&mut built.begin_parse()),
            Err(CodecError::Structural(_))
        ));
    }
}
