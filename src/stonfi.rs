//! STON.fi message bodies: the v1 jetton payloads, the v2 cross-swap, and
//! the v2 proxy-TON transfer.
//!
//! The v1 status bodies (`swap_success`, the error codes) carry nothing but
//! their opcode.

use crate::address::Address;
use crate::cell::{Builder, Cell, Slice};
use crate::error::CodecError;
use crate::scheme::{load_maybe_ref, store_maybe_ref, CellCodec, MsgBody, Namespace};

/// ```text
/// swap#25938561 token_wallet:MsgAddress min_out:Coins to_address:MsgAddress
///     referral_address:(Maybe MsgAddress) = JettonPayload;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Swap {
    pub token_wallet: Address,
    pub min_out: u128,
    pub to_address: Address,
    /// Maybe-bit followed by an inline address (not a reference).
    pub referral_address: Option<Address>,
}

impl CellCodec for Swap {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_address(&self.token_wallet)?
            .write_coins(self.min_out)?
            .write_address(&self.to_address)?;
        match &self.referral_address {
            Some(addr) => {
                b.write_bit(true)?;
                b.write_address(addr)?;
            }
            None => {
                b.write_bit(false)?;
            }
        }
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            token_wallet: s.read_address()?,
            min_out: s.read_coins()?,
            to_address: s.read_address()?,
            referral_address: if s.read_bit()? {
                Some(s.read_address()?)
            } else {
                None
            },
        })
    }
}

impl MsgBody for Swap {
    const OPCODE: u32 = 0x25938561;
    const NAMESPACE: Namespace = Namespace::JettonPayload;
}

/// `provide_liquidity#fcf9e58f token_wallet:MsgAddress min_lp_out:Coins = JettonPayload;`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProvideLiquidity {
    pub token_wallet: Address,
    pub min_lp_out: u128,
}

impl CellCodec for ProvideLiquidity {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_address(&self.token_wallet)?
            .write_coins(self.min_lp_out)?;
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            token_wallet: s.read_address()?,
            min_lp_out: s.read_coins()?,
        })
    }
}

impl MsgBody for ProvideLiquidity {
    const OPCODE: u32 = 0xfcf9e58f;
    const NAMESPACE: Namespace = Namespace::JettonPayload;
}

macro_rules! status_body {
    ($(#[$doc:meta])* $name:ident, $opcode:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl CellCodec for $name {
            fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
                b.write_uint(Self::OPCODE as u64, 32)?;
                Ok(())
            }

            fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
                Self::expect_opcode(s)?;
                Ok(Self)
            }
        }

        impl MsgBody for $name {
            const OPCODE: u32 = $opcode;
            const NAMESPACE: Namespace = Namespace::JettonPayload;
        }
    };
}

status_body!(
    /// `swap_success#c64370e5 = JettonPayload;`
    SwapSuccess,
    0xc64370e5
);
status_body!(
    /// `swap_success_referal#45078540 = JettonPayload;`
    SwapSuccessReferral,
    0x45078540
);
status_body!(
    /// `swap_error_no_liquidity#5ffe1295 = JettonPayload;`
    SwapErrorNoLiquidity,
    0x5ffe1295
);
status_body!(
    /// `swap_error_reserve_error#38976e9b = JettonPayload;`
    SwapErrorReserveError,
    0x38976e9b
);

/// ```text
/// swap#6664de2a token_wallet1:MsgAddress refund_address:MsgAddress
///     excesses_address:MsgAddress tx_deadline:uint64
///     cross_swap_body:^[min_out:Coins receiver:MsgAddress fwd_gas:Coins
///         custom_payload:(Maybe ^Cell) refund_fwd_gas:Coins
///         refund_payload:(Maybe ^Cell) ref_fee:uint16
///         ref_address:MsgAddress] = JettonPayload;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwapV2 {
    pub token_wallet1: Address,
    pub refund_address: Address,
    pub excesses_address: Address,
    pub tx_deadline: u64,
    pub min_out: u128,
    pub receiver: Address,
    pub fwd_gas: u128,
    pub custom_payload: Option<Cell>,
    pub refund_fwd_gas: u128,
    pub refund_payload: Option<Cell>,
    pub ref_fee: u16,
    pub ref_address: Address,
}

impl CellCodec for SwapV2 {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        let mut body = Builder::new();
        body.write_coins(self.min_out)?
            .write_address(&self.receiver)?
            .write_coins(self.fwd_gas)?;
        store_maybe_ref(&mut body, self.custom_payload.as_ref())?;
        body.write_coins(self.refund_fwd_gas)?;
        store_maybe_ref(&mut body, self.refund_payload.as_ref())?;
        body.write_uint(self.ref_fee as u64, 16)?
            .write_address(&self.ref_address)?;

        b.write_uint(Self::OPCODE as u64, 32)?
            .write_address(&self.token_wallet1)?
            .write_address(&self.refund_address)?
            .write_address(&self.excesses_address)?
            .write_uint(self.tx_deadline, 64)?
            .write_ref(body.finish())?;
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        let token_wallet1 = s.read_address()?;
        let refund_address = s.read_address()?;
        let excesses_address = s.read_address()?;
        let tx_deadline = s.read_uint(64)?;
        let mut body = s.read_ref()?;
        Ok(Self {
            token_wallet1,
            refund_address,
            excesses_address,
            tx_deadline,
            min_out: body.read_coins()?,
            receiver: body.read_address()?,
            fwd_gas: body.read_coins()?,
            custom_payload: load_maybe_ref(&mut body)?,
            refund_fwd_gas: body.read_coins()?,
            refund_payload: load_maybe_ref(&mut body)?,
            ref_fee: body.read_uint(16)? as u16,
            ref_address: body.read_address()?,
        })
    }
}

impl MsgBody for SwapV2 {
    const OPCODE: u32 = 0x6664de2a;
    const NAMESPACE: Namespace = Namespace::JettonPayload;
}

/// ```text
/// ton_transfer#01f3835d query_id:uint64 ton_amount:Coins
///     refund_address:MsgAddress forward_payload:(Either Cell ^Cell)
///     = InternalMsgBody;
/// ```
///
/// Proxy-TON encodes a present forward payload with a set bit followed by an
/// inline splice, the opposite inline convention from the jetton transfer
/// bodies; an absent payload is a lone zero bit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PtonTransfer {
    pub query_id: u64,
    pub ton_amount: u128,
    pub refund_address: Address,
    pub forward_payload: Option<Cell>,
}

impl CellCodec for PtonTransfer {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?
            .write_coins(self.ton_amount)?
            .write_address(&self.refund_address)?;
        match &self.forward_payload {
            Some(cell) => {
                b.write_bit(true)?;
                b.write_cell(cell)?;
            }
            None => {
                b.write_bit(false)?;
            }
        }
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            ton_amount: s.read_coins()?,
            refund_address: s.read_address()?,
            forward_payload: if s.read_bit()? {
                Some(s.take_remainder())
            } else {
                None
            },
        })
    }
}

impl MsgBody for PtonTransfer {
    const OPCODE: u32 = 0x01f3835d;
    const NAMESPACE: Namespace = Namespace::Internal;
}
