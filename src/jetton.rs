//! Jetton (TEP-74 fungible token) message bodies.
//!
//! Field order follows the TL-B definitions quoted on each type. All bodies
//! live in the `internal` namespace except [`Comment`], which is a forwarded
//! jetton payload.

use crate::address::Address;
use crate::cell::{Builder, Cell, Slice};
use crate::error::CodecError;
use crate::scheme::{
    load_maybe_ref, load_maybe_ref_relaxed, store_maybe_ref, CellCodec, MsgBody, Namespace,
    Payload,
};

/// ```text
/// transfer#0f8a7ea5 query_id:uint64 amount:Coins destination:MsgAddress
///     response_destination:MsgAddress custom_payload:(Maybe ^Cell)
///     forward_ton_amount:Coins forward_payload:(Either Cell ^Cell)
///     = InternalMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transfer {
    pub query_id: u64,
    pub amount: u128,
    pub destination: Address,
    pub response_destination: Address,
    pub custom_payload: Option<Cell>,
    pub forward_ton_amount: u128,
    pub forward_payload: Payload,
}

impl CellCodec for Transfer {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?
            .write_coins(self.amount)?
            .write_address(&self.destination)?
            .write_address(&self.response_destination)?;
        store_maybe_ref(b, self.custom_payload.as_ref())?;
        b.write_coins(self.forward_ton_amount)?;
        self.forward_payload.store(b)
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            amount: s.read_coins()?,
            destination: s.read_address()?,
            response_destination: s.read_address()?,
            custom_payload: load_maybe_ref(s)?,
            forward_ton_amount: s.read_coins()?,
            forward_payload: Payload::load(s)?,
        })
    }
}

impl MsgBody for Transfer {
    const OPCODE: u32 = 0x0f8a7ea5;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// ```text
/// transfer_notification#7362d09c query_id:uint64 amount:Coins
///     sender:MsgAddress forward_payload:(Either Cell ^Cell)
///     = InternalMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferNotification {
    pub query_id: u64,
    pub amount: u128,
    pub sender: Address,
    pub forward_payload: Payload,
}

impl CellCodec for TransferNotification {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?
            .write_coins(self.amount)?
            .write_address(&self.sender)?;
        self.forward_payload.store(b)
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            amount: s.read_coins()?,
            sender: s.read_address()?,
            forward_payload: Payload::load(s)?,
        })
    }
}

impl MsgBody for TransferNotification {
    const OPCODE: u32 = 0x7362d09c;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// `excesses#d53276db query_id:uint64 = InternalMsgBody;`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Excesses {
    pub query_id: u64,
}

impl CellCodec for Excesses {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?;
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
        })
    }
}

impl MsgBody for Excesses {
    const OPCODE: u32 = 0xd53276db;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// ```text
/// burn#595f07bc query_id:uint64 amount:Coins
///     response_destination:MsgAddress custom_payload:(Maybe ^Cell)
///     = InternalMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Burn {
    pub query_id: u64,
    pub amount: u128,
    pub response_destination: Address,
    pub custom_payload: Option<Cell>,
}

impl CellCodec for Burn {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?
            .write_coins(self.amount)?
            .write_address(&self.response_destination)?;
        store_maybe_ref(b, self.custom_payload.as_ref())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            amount: s.read_coins()?,
            response_destination: s.read_address()?,
            // Formally incorrect encodings (presence bit set, no reference)
            // occur on chain for burns; decode them as absent.
            custom_payload: load_maybe_ref_relaxed(s)?,
        })
    }
}

impl MsgBody for Burn {
    const OPCODE: u32 = 0x595f07bc;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// ```text
/// internal_transfer#178d4519 query_id:uint64 amount:Coins from:MsgAddress
///     response_address:MsgAddress forward_ton_amount:Coins
///     forward_payload:(Either Cell ^Cell)
///     = InternalMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InternalTransfer {
    pub query_id: u64,
    pub amount: u128,
    pub from: Address,
    pub response_address: Address,
    pub forward_ton_amount: u128,
    pub forward_payload: Payload,
}

impl CellCodec for InternalTransfer {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?
            .write_coins(self.amount)?
            .write_address(&self.from)?
            .write_address(&self.response_address)?
            .write_coins(self.forward_ton_amount)?;
        self.forward_payload.store(b)
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            amount: s.read_coins()?,
            from: s.read_address()?,
            response_address: s.read_address()?,
            forward_ton_amount: s.read_coins()?,
            forward_payload: Payload::load(s)?,
        })
    }
}

impl MsgBody for InternalTransfer {
    const OPCODE: u32 = 0x178d4519;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// ```text
/// burn_notification#7bdd97de query_id:uint64 amount:Coins
///     sender:MsgAddress response_destination:MsgAddress
///     = InternalMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BurnNotification {
    pub query_id: u64,
    pub amount: u128,
    pub sender: Address,
    pub response_destination: Address,
}

impl CellCodec for BurnNotification {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?
            .write_coins(self.amount)?
            .write_address(&self.sender)?
            .write_address(&self.response_destination)?;
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            amount: s.read_coins()?,
            sender: s.read_address()?,
            response_destination: s.read_address()?,
        })
    }
}

impl MsgBody for BurnNotification {
    const OPCODE: u32 = 0x7bdd97de;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// Plain-text comment forwarded as a jetton payload: a zero opcode followed
/// by a snake string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comment {
    pub text: String,
}

impl CellCodec for Comment {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_snake_string(&self.text)?;
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            text: s.read_snake_string()?,
        })
    }
}

impl MsgBody for Comment {
    const OPCODE: u32 = 0x0;
    const NAMESPACE: Namespace = Namespace::JettonPayload;
}
