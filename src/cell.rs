//! Cell substrate: bounded bit strings with child references.
//!
//! A [`Cell`] is the storage unit of the TON ledger: up to 1023 bits of
//! payload plus up to 4 references to child cells. Cells are immutable once
//! built and children are shared (`Arc`), so one cell may hang off several
//! parents.
//!
//! Writing goes through a single-use [`Builder`]: typed appends, capacity
//! checked on every write, [`Builder::finish`] seals the cell. Reading goes
//! through a [`Slice`]: a forward-only cursor with independent bit and ref
//! positions that never rewinds. [`Slice::read_ref`] opens the next child as
//! a fresh cursor.
//!
//! Beyond fixed-width integers the substrate knows the composite encodings
//! the message layer leans on: variable-width coin amounts (4-bit length
//! nibble + big-endian magnitude bytes) and snake strings (byte payloads
//! chained across child cells).

use crate::error::CodecError;
use byteorder::{BigEndian, ByteOrder};
use std::sync::Arc;

/// Maximum payload bits in one cell.
pub const MAX_BITS: usize = 1023;
/// Maximum child references in one cell.
pub const MAX_REFS: usize = 4;
/// Maximum magnitude bytes in a coins encoding (length nibble 0..=15).
pub const MAX_COIN_BYTES: usize = 15;

/// Immutable tree node: a bit string plus up to four shared child cells.
///
/// Bits are packed MSB-first; unused trailing bits of the last byte are zero,
/// so structural equality is plain field equality.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl Cell {
    /// Number of payload bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Packed payload bytes (`bit_len` bits, MSB-first, zero-padded).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Child cells, in reference order.
    pub fn refs(&self) -> &[Arc<Cell>] {
        &self.refs
    }

    /// Open a read cursor over this cell.
    pub fn begin_parse(&self) -> Slice<'_> {
        Slice {
            cell: self,
            bit_pos: 0,
            ref_pos: 0,
        }
    }
}

/// Single-use cell writer. Capacity is enforced per write, so
/// [`Builder::finish`] cannot fail.
#[derive(Debug, Default)]
pub struct Builder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits still writable before hitting the 1023-bit limit.
    pub fn free_bits(&self) -> usize {
        MAX_BITS - self.bit_len
    }

    /// Reference slots still available.
    pub fn free_refs(&self) -> usize {
        MAX_REFS - self.refs.len()
    }

    fn ensure_bits(&self, need: usize) -> Result<(), CodecError> {
        if need > self.free_bits() {
            return Err(CodecError::Structural(format!(
                "cell overflow: {} bits written, {} more requested (limit {})",
                self.bit_len, need, MAX_BITS
            )));
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<&mut Self, CodecError> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Append `bits` (1..=64) of `value`, big-endian.
    pub fn write_uint(&mut self, value: u64, bits: u32) -> Result<&mut Self, CodecError> {
        debug_assert!(bits >= 1 && bits <= 64);
        if bits < 64 && value >> bits != 0 {
            return Err(CodecError::Range(format!(
                "{value} does not fit in {bits} unsigned bits"
            )));
        }
        self.ensure_bits(bits as usize)?;
        for i in (0..bits).rev() {
            self.push_bit(value >> i & 1 != 0);
        }
        Ok(self)
    }

    /// Append `bits` (1..=64) of `value`, two's-complement big-endian.
    pub fn write_int(&mut self, value: i64, bits: u32) -> Result<&mut Self, CodecError> {
        debug_assert!(bits >= 1 && bits <= 64);
        if bits < 64 {
            let min = -(1i64 << (bits - 1));
            let max = (1i64 << (bits - 1)) - 1;
            if value < min || value > max {
                return Err(CodecError::Range(format!(
                    "{value} does not fit in {bits} signed bits"
                )));
            }
        }
        self.ensure_bits(bits as usize)?;
        for i in (0..bits).rev() {
            self.push_bit((value as u64) >> i & 1 != 0);
        }
        Ok(self)
    }

    /// Append whole bytes (8 bits each, any current alignment).
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CodecError> {
        self.ensure_bits(bytes.len() * 8)?;
        for &byte in bytes {
            for i in (0..8).rev() {
                self.push_bit(byte >> i & 1 != 0);
            }
        }
        Ok(self)
    }

    /// Append a variable-width coin amount: a 4-bit byte-length nibble
    /// followed by that many big-endian magnitude bytes. Zero is a lone
    /// zero nibble.
    pub fn write_coins(&mut self, value: u128) -> Result<&mut Self, CodecError> {
        let len = 16 - value.leading_zeros() as usize / 8;
        if len > MAX_COIN_BYTES {
            return Err(CodecError::Range(format!(
                "coin amount {value} exceeds {MAX_COIN_BYTES} bytes"
            )));
        }
        self.write_uint(len as u64, 4)?;
        let mut buf = [0u8; 16];
        BigEndian::write_u128(&mut buf, value);
        self.write_bytes(&buf[16 - len..])
    }

    /// Attach `cell` as the next child reference.
    pub fn write_ref(&mut self, cell: Cell) -> Result<&mut Self, CodecError> {
        if self.refs.len() == MAX_REFS {
            return Err(CodecError::Structural(format!(
                "cell overflow: all {MAX_REFS} reference slots used"
            )));
        }
        self.refs.push(Arc::new(cell));
        Ok(self)
    }

    /// Splice another cell inline: its bits and its references are appended
    /// to this builder (no new child is created for the bits).
    pub fn write_cell(&mut self, cell: &Cell) -> Result<&mut Self, CodecError> {
        self.ensure_bits(cell.bit_len)?;
        if cell.refs.len() > self.free_refs() {
            return Err(CodecError::Structural(format!(
                "cell overflow: {} reference slots free, {} requested",
                self.free_refs(),
                cell.refs.len()
            )));
        }
        for i in 0..cell.bit_len {
            self.push_bit(cell.data[i / 8] & (0x80 >> (i % 8)) != 0);
        }
        self.refs.extend(cell.refs.iter().cloned());
        Ok(self)
    }

    /// Append a snake string: as many whole bytes as fit in this cell, the
    /// rest chained through single child references.
    pub fn write_snake_string(&mut self, text: &str) -> Result<&mut Self, CodecError> {
        self.write_snake_bytes(text.as_bytes())
    }

    fn write_snake_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CodecError> {
        let fit = (self.free_bits() / 8).min(bytes.len());
        self.write_bytes(&bytes[..fit])?;
        let rest = &bytes[fit..];
        if !rest.is_empty() {
            if self.free_refs() == 0 {
                return Err(CodecError::Structural(
                    "snake string continuation needs a free reference slot".into(),
                ));
            }
            let mut child = Builder::new();
            child.write_snake_bytes(rest)?;
            self.write_ref(child.finish())?;
        }
        Ok(self)
    }

    /// Seal the builder into an immutable cell.
    pub fn finish(self) -> Cell {
        Cell {
            data: self.data,
            bit_len: self.bit_len,
            refs: self.refs,
        }
    }
}

/// Forward-only read cursor over one cell.
///
/// Tracks a bit position and a reference position independently; both only
/// advance. Cloning a slice is cheap and is how lookahead ([`Slice::peek_uint`])
/// is implemented.
#[derive(Debug, Clone)]
pub struct Slice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> Slice<'a> {
    /// Bits left to read.
    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len - self.bit_pos
    }

    /// Child references left to consume.
    pub fn remaining_refs(&self) -> usize {
        self.cell.refs.len() - self.ref_pos
    }

    /// Read one bit.
    pub fn read_bit(&mut self) -> Result<bool, CodecError> {
        if self.remaining_bits() == 0 {
            return Err(CodecError::Structural(
                "cell underflow: read past end of bit string".into(),
            ));
        }
        let bit = self.cell.data[self.bit_pos / 8] & (0x80 >> (self.bit_pos % 8)) != 0;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read `bits` (1..=64) as a big-endian unsigned integer.
    pub fn read_uint(&mut self, bits: u32) -> Result<u64, CodecError> {
        debug_assert!(bits >= 1 && bits <= 64);
        if (bits as usize) > self.remaining_bits() {
            return Err(CodecError::Structural(format!(
                "cell underflow: {bits} bits requested, {} remain",
                self.remaining_bits()
            )));
        }
        let mut value = 0u64;
        for _ in 0..bits {
            value = value << 1 | self.read_bit()? as u64;
        }
        Ok(value)
    }

    /// Read `bits` without advancing the cursor.
    pub fn peek_uint(&self, bits: u32) -> Result<u64, CodecError> {
        self.clone().read_uint(bits)
    }

    /// Read `bits` (1..=64) as a two's-complement signed integer.
    pub fn read_int(&mut self, bits: u32) -> Result<i64, CodecError> {
        let raw = self.read_uint(bits)?;
        if bits < 64 && raw >> (bits - 1) & 1 == 1 {
            Ok((raw | u64::MAX << bits) as i64)
        } else {
            Ok(raw as i64)
        }
    }

    /// Read `len` whole bytes (any alignment).
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.read_uint(8)? as u8);
        }
        Ok(out)
    }

    /// Read a variable-width coin amount (see [`Builder::write_coins`]).
    pub fn read_coins(&mut self) -> Result<u128, CodecError> {
        let len = self.read_uint(4)? as usize;
        let mut value = 0u128;
        for byte in self.read_bytes(len)? {
            value = value << 8 | byte as u128;
        }
        Ok(value)
    }

    /// Consume the next child reference and open it as a new cursor.
    pub fn read_ref(&mut self) -> Result<Slice<'a>, CodecError> {
        if self.remaining_refs() == 0 {
            return Err(CodecError::Structural(
                "cell underflow: no child reference remains".into(),
            ));
        }
        let child: &'a Cell = &self.cell.refs[self.ref_pos];
        self.ref_pos += 1;
        Ok(child.begin_parse())
    }

    /// Consume the next child reference as an owned cell.
    pub fn read_ref_cell(&mut self) -> Result<Cell, CodecError> {
        if self.remaining_refs() == 0 {
            return Err(CodecError::Structural(
                "cell underflow: no child reference remains".into(),
            ));
        }
        let cell = self.cell.refs[self.ref_pos].as_ref().clone();
        self.ref_pos += 1;
        Ok(cell)
    }

    /// Snapshot everything not yet consumed (bits re-packed from position
    /// zero, plus the unread references) as an owned cell, and advance the
    /// cursor to the end.
    pub fn take_remainder(&mut self) -> Cell {
        let rem = self.remaining_bits();
        let mut data = vec![0u8; (rem + 7) / 8];
        for i in 0..rem {
            let src = self.bit_pos + i;
            if self.cell.data[src / 8] & (0x80 >> (src % 8)) != 0 {
                data[i / 8] |= 0x80 >> (i % 8);
            }
        }
        let refs = self.cell.refs[self.ref_pos..].to_vec();
        self.bit_pos = self.cell.bit_len;
        self.ref_pos = self.cell.refs.len();
        Cell {
            data,
            bit_len: rem,
            refs,
        }
    }

    /// Read a snake string: the byte-aligned remainder of this cell, then
    /// each chained child in turn. Consumes one reference per continuation.
    pub fn read_snake_string(&mut self) -> Result<String, CodecError> {
        if self.remaining_bits() % 8 != 0 {
            return Err(CodecError::Structural(format!(
                "snake string remainder is not byte-aligned ({} bits)",
                self.remaining_bits()
            )));
        }
        let mut bytes = self.read_bytes(self.remaining_bits() / 8)?;
        let mut next: Option<&'a Cell> = if self.remaining_refs() > 0 {
            let child: &'a Cell = &self.cell.refs[self.ref_pos];
            self.ref_pos += 1;
            Some(child)
        } else {
            None
        };
        while let Some(cell) = next {
            if cell.bit_len % 8 != 0 {
                return Err(CodecError::Structural(format!(
                    "snake string continuation is not byte-aligned ({} bits)",
                    cell.bit_len
                )));
            }
            bytes.extend_from_slice(&cell.data[..cell.bit_len / 8]);
            next = cell.refs.first().map(|r| r.as_ref());
        }
        String::from_utf8(bytes)
            .map_err(|e| CodecError::Structural(format!("snake string is not UTF-8: {e}")))
    }
}
