//! MsgAddress wire codec.
//!
//! Only the two shapes that occur in message bodies are supported:
//! `addr_none$00` and `addr_std$10` without anycast. Text parsing and
//! formatting of addresses belong to the caller, not this crate; an
//! [`Address`] is built from a workchain and a 32-byte account hash.

use crate::cell::{Builder, Slice};
use crate::error::CodecError;

/// A TON message address: absent, or workchain + 256-bit account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Address {
    /// `addr_none$00`: two zero bits on the wire.
    #[default]
    None,
    /// `addr_std$10`: anycast-free standard address.
    Std { workchain: i8, hash: [u8; 32] },
}

impl Address {
    /// Standard address in the given workchain.
    pub fn std(workchain: i8, hash: [u8; 32]) -> Self {
        Address::Std { workchain, hash }
    }
}

impl Builder {
    /// Append an address in MsgAddress wire format.
    pub fn write_address(&mut self, address: &Address) -> Result<&mut Self, CodecError> {
        match address {
            Address::None => self.write_uint(0b00, 2),
            Address::Std { workchain, hash } => {
                self.write_uint(0b10, 2)?;
                self.write_bit(false)?; // no anycast
                self.write_int(*workchain as i64, 8)?;
                self.write_bytes(hash)
            }
        }
    }
}

impl<'a> Slice<'a> {
    /// Read an address in MsgAddress wire format.
    pub fn read_address(&mut self) -> Result<Address, CodecError> {
        match self.read_uint(2)? {
            0b00 => Ok(Address::None),
            0b10 => {
                if self.read_bit()? {
                    return Err(CodecError::Structural(
                        "anycast addresses are not supported".into(),
                    ));
                }
                let workchain = self.read_int(8)? as i8;
                let bytes = self.read_bytes(32)?;
                let mut hash = [0u8; 32];
                hash.copy_from_slice(&bytes);
                Ok(Address::Std { workchain, hash })
            }
            tag => Err(CodecError::Structural(format!(
                "unsupported address tag {tag:#04b}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_address_roundtrip() {
        let addr = Address::std(0, [0x42; 32]);
        let mut b = Builder::new();
        b.write_address(&addr).expect("write");
        let cell = b.finish();
        assert_eq!(cell.bit_len(), 2 + 1 + 8 + 256);
        assert_eq!(cell.begin_parse().read_address().expect("read"), addr);

        let addr = Address::std(-1, [0xff; 32]); // masterchain
        let mut b = Builder::new();
        b.write_address(&addr).expect("write");
        assert_eq!(b.finish().begin_parse().read_address().expect("read"), addr);
    }

    #[test]
    fn none_address_is_two_bits() {
        let mut b = Builder::new();
        b.write_address(&Address::None).expect("write");
        let cell = b.finish();
        assert_eq!(cell.bit_len(), 2);
        assert_eq!(
            cell.begin_parse().read_address().expect("read"),
            Address::None
        );
    }

    #[test]
    fn unsupported_tags_fail() {
        // addr_extern$01 is not a message-body address
        let mut b = Builder::new();
        b.write_uint(0b01, 2).expect("write");
        let cell = b.finish();
        assert!(matches!(
            cell.begin_parse().read_address(),
            Err(CodecError::Structural(_))
        ));
    }
}
