//! DeDust v2 message bodies and composite structures.
//!
//! TL-B definitions: <https://docs.dedust.io/reference/tlb-schemes>.
//! Composites ([`Asset`], [`SwapStep`], [`PoolParams`], ...) carry no opcode
//! and only implement [`CellCodec`]; the message bodies at the bottom of the
//! file are opcode-tagged. Swap routes recurse through
//! [`SwapStepParams::next`], one referenced cell per hop.

use crate::address::Address;
use crate::cell::{Builder, Cell, Slice};
use crate::error::CodecError;
use crate::scheme::{load_maybe_ref, store_maybe_ref, CellCodec, MsgBody, Namespace};

/// `given_in$0 = SwapKind; given_out$1 = SwapKind;`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapKind {
    #[default]
    GivenIn,
    GivenOut,
}

impl CellCodec for SwapKind {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_bit(matches!(self, SwapKind::GivenOut))?;
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Ok(if s.read_bit()? {
            SwapKind::GivenOut
        } else {
            SwapKind::GivenIn
        })
    }
}

/// `volatile$0 = PoolType; stable$1 = PoolType;`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolType {
    #[default]
    Volatile,
    Stable,
}

impl CellCodec for PoolType {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_bit(matches!(self, PoolType::Stable))?;
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Ok(if s.read_bit()? {
            PoolType::Stable
        } else {
            PoolType::Volatile
        })
    }
}

/// ```text
/// native$0000 = Asset;
/// jetton$0001 workchain_id:int8 address:uint256 = Asset;
/// extra_currency$0010 currency_id:int32 = Asset;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Asset {
    #[default]
    Native,
    Jetton { workchain: i8, hash: [u8; 32] },
    ExtraCurrency { currency_id: i32 },
}

impl CellCodec for Asset {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        match self {
            Asset::Native => {
                b.write_uint(0, 4)?;
            }
            Asset::Jetton { workchain, hash } => {
                b.write_uint(1, 4)?;
                b.write_int(*workchain as i64, 8)?;
                b.write_bytes(hash)?;
            }
            Asset::ExtraCurrency { currency_id } => {
                b.write_uint(2, 4)?;
                b.write_int(*currency_id as i64, 32)?;
            }
        }
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        match s.read_uint(4)? {
            0 => Ok(Asset::Native),
            1 => {
                let workchain = s.read_int(8)? as i8;
                let bytes = s.read_bytes(32)?;
                let mut hash = [0u8; 32];
                hash.copy_from_slice(&bytes);
                Ok(Asset::Jetton { workchain, hash })
            }
            2 => Ok(Asset::ExtraCurrency {
                currency_id: s.read_int(32)? as i32,
            }),
            tag => Err(CodecError::Structural(format!("unknown asset tag {tag}"))),
        }
    }
}

/// `pool_params#_ pool_type:PoolType asset0:Asset asset1:Asset = PoolParams;`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolParams {
    pub pool_type: PoolType,
    pub asset0: Asset,
    pub asset1: Asset,
}

impl CellCodec for PoolParams {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        self.pool_type.store(b)?;
        self.asset0.store(b)?;
        self.asset1.store(b)
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            pool_type: PoolType::load(s)?,
            asset0: Asset::load(s)?,
            asset1: Asset::load(s)?,
        })
    }
}

/// ```text
/// swap_params#_ deadline:Timestamp recipient_addr:MsgAddressInt
///     referral_addr:MsgAddress fulfill_payload:(Maybe ^Cell)
///     reject_payload:(Maybe ^Cell) = SwapParams;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwapParams {
    pub deadline: u32,
    pub recipient_addr: Address,
    pub referral_addr: Address,
    pub fulfill_payload: Option<Cell>,
    pub reject_payload: Option<Cell>,
}

impl CellCodec for SwapParams {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(self.deadline as u64, 32)?
            .write_address(&self.recipient_addr)?
            .write_address(&self.referral_addr)?;
        store_maybe_ref(b, self.fulfill_payload.as_ref())?;
        store_maybe_ref(b, self.reject_payload.as_ref())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            deadline: s.read_uint(32)? as u32,
            recipient_addr: s.read_address()?,
            referral_addr: s.read_address()?,
            fulfill_payload: load_maybe_ref(s)?,
            reject_payload: load_maybe_ref(s)?,
        })
    }
}

/// `step_params#_ kind:SwapKind limit:Coins next:(Maybe ^SwapStep) = SwapStepParams;`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwapStepParams {
    pub kind: SwapKind,
    pub limit: u128,
    /// Next hop of a multi-hop route, stored by reference.
    pub next: Option<Box<SwapStep>>,
}

impl CellCodec for SwapStepParams {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        self.kind.store(b)?;
        b.write_coins(self.limit)?;
        match &self.next {
            Some(step) => {
                b.write_bit(true)?;
                let mut child = Builder::new();
                step.store(&mut child)?;
                b.write_ref(child.finish())?;
            }
            None => {
                b.write_bit(false)?;
            }
        }
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        let kind = SwapKind::load(s)?;
        let limit = s.read_coins()?;
        let next = if s.read_bit()? {
            let mut child = s.read_ref()?;
            Some(Box::new(SwapStep::load(&mut child)?))
        } else {
            None
        };
        Ok(Self { kind, limit, next })
    }
}

/// `step#_ pool_addr:MsgAddressInt params:SwapStepParams = SwapStep;`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwapStep {
    pub pool_addr: Address,
    pub params: SwapStepParams,
}

impl CellCodec for SwapStep {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_address(&self.pool_addr)?;
        self.params.store(b)
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            pool_addr: s.read_address()?,
            params: SwapStepParams::load(s)?,
        })
    }
}

/// `swap#ea06185d query_id:uint64 amount:Coins _:SwapStep swap_params:^SwapParams = InMsgBody;`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Swap {
    pub query_id: u64,
    pub amount: u128,
    pub step: SwapStep,
    pub swap_params: SwapParams,
}

impl CellCodec for Swap {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?
            .write_coins(self.amount)?;
        self.step.store(b)?;
        let mut params = Builder::new();
        self.swap_params.store(&mut params)?;
        b.write_ref(params.finish())?;
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        let query_id = s.read_uint(64)?;
        let amount = s.read_coins()?;
        let step = SwapStep::load(s)?;
        let mut params = s.read_ref()?;
        let swap_params = SwapParams::load(&mut params)?;
        Ok(Self {
            query_id,
            amount,
            step,
            swap_params,
        })
    }
}

impl MsgBody for Swap {
    const OPCODE: u32 = 0xea06185d;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// ```text
/// deposit_liquidity#d55e4686 query_id:uint64 amount:Coins
///     pool_params:PoolParams min_lp_amount:Coins
///     asset0_target_balance:Coins asset1_target_balance:Coins
///     fulfill_payload:(Maybe ^Cell) reject_payload:(Maybe ^Cell) = InMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepositLiquidity {
    pub query_id: u64,
    pub amount: u128,
    pub pool_params: PoolParams,
    pub min_lp_amount: u128,
    pub asset0_target_balance: u128,
    pub asset1_target_balance: u128,
    pub fulfill_payload: Option<Cell>,
    pub reject_payload: Option<Cell>,
}

impl CellCodec for DepositLiquidity {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?
            .write_coins(self.amount)?;
        self.pool_params.store(b)?;
        b.write_coins(self.min_lp_amount)?
            .write_coins(self.asset0_target_balance)?
            .write_coins(self.asset1_target_balance)?;
        store_maybe_ref(b, self.fulfill_payload.as_ref())?;
        store_maybe_ref(b, self.reject_payload.as_ref())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            amount: s.read_coins()?,
            pool_params: PoolParams::load(s)?,
            min_lp_amount: s.read_coins()?,
            asset0_target_balance: s.read_coins()?,
            asset1_target_balance: s.read_coins()?,
            fulfill_payload: load_maybe_ref(s)?,
            reject_payload: load_maybe_ref(s)?,
        })
    }
}

impl MsgBody for DepositLiquidity {
    const OPCODE: u32 = 0xd55e4686;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// ```text
/// pay_out_from_pool#ad4eb6f5 query_id:uint64 proof:^Cell amount:Coins
///     recipient_addr:MsgAddress payload:(Maybe ^Cell) = InMsgBody;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PayoutFromPool {
    pub query_id: u64,
    /// Required reference: proof of the pool's state.
    pub proof: Cell,
    pub amount: u128,
    pub recipient_addr: Address,
    pub payload: Option<Cell>,
}

impl CellCodec for PayoutFromPool {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?
            .write_ref(self.proof.clone())?
            .write_coins(self.amount)?
            .write_address(&self.recipient_addr)?;
        store_maybe_ref(b, self.payload.as_ref())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            proof: s.read_ref_cell()?,
            amount: s.read_coins()?,
            recipient_addr: s.read_address()?,
            payload: load_maybe_ref(s)?,
        })
    }
}

impl MsgBody for PayoutFromPool {
    const OPCODE: u32 = 0xad4eb6f5;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// `payout#474f86cf query_id:uint64 payload:(Maybe ^Cell) = InMsgBody;`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Payout {
    pub query_id: u64,
    pub payload: Option<Cell>,
}

impl CellCodec for Payout {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?;
        store_maybe_ref(b, self.payload.as_ref())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            payload: load_maybe_ref(s)?,
        })
    }
}

impl MsgBody for Payout {
    const OPCODE: u32 = 0x474f86cf;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// `cancel_deposit#166cedee query_id:uint64 payload:(Maybe ^Cell) = InMsgBody;`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CancelDeposit {
    pub query_id: u64,
    pub payload: Option<Cell>,
}

impl CellCodec for CancelDeposit {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?
            .write_uint(self.query_id, 64)?;
        store_maybe_ref(b, self.payload.as_ref())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            query_id: s.read_uint(64)?,
            payload: load_maybe_ref(s)?,
        })
    }
}

impl MsgBody for CancelDeposit {
    const OPCODE: u32 = 0x166cedee;
    const NAMESPACE: Namespace = Namespace::Internal;
}

/// `swap#e3a0d482 _:SwapStep swap_params:^SwapParams = ForwardPayload;`
///
/// Same shape as [`Swap`] minus query id and amount, delivered inside a
/// jetton transfer notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PayloadSwap {
    pub step: SwapStep,
    pub swap_params: SwapParams,
}

impl CellCodec for PayloadSwap {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?;
        self.step.store(b)?;
        let mut params = Builder::new();
        self.swap_params.store(&mut params)?;
        b.write_ref(params.finish())?;
        Ok(())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        let step = SwapStep::load(s)?;
        let mut params = s.read_ref()?;
        let swap_params = SwapParams::load(&mut params)?;
        Ok(Self { step, swap_params })
    }
}

impl MsgBody for PayloadSwap {
    const OPCODE: u32 = 0xe3a0d482;
    const NAMESPACE: Namespace = Namespace::JettonPayload;
}

/// ```text
/// deposit_liquidity#40e108d6 pool_params:PoolParams min_lp_amount:Coins
///     asset0_target_balance:Coins asset1_target_balance:Coins
///     fulfill_payload:(Maybe ^Cell) reject_payload:(Maybe ^Cell)
///     = ForwardPayload;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PayloadDepositLiquidity {
    pub pool_params: PoolParams,
    pub min_lp_amount: u128,
    pub asset0_target_balance: u128,
    pub asset1_target_balance: u128,
    pub fulfill_payload: Option<Cell>,
    pub reject_payload: Option<Cell>,
}

impl CellCodec for PayloadDepositLiquidity {
    fn store(&self, b: &mut Builder) -> Result<(), CodecError> {
        b.write_uint(Self::OPCODE as u64, 32)?;
        self.pool_params.store(b)?;
        b.write_coins(self.min_lp_amount)?
            .write_coins(self.asset0_target_balance)?
            .write_coins(self.asset1_target_balance)?;
        store_maybe_ref(b, self.fulfill_payload.as_ref())?;
        store_maybe_ref(b, self.reject_payload.as_ref())
    }

    fn load(s: &mut Slice<'_>) -> Result<Self, CodecError> {
        Self::expect_opcode(s)?;
        Ok(Self {
            pool_params: PoolParams::load(s)?,
            min_lp_amount: s.read_coins()?,
            asset0_target_balance: s.read_coins()?,
            asset1_target_balance: s.read_coins()?,
            fulfill_payload: load_maybe_ref(s)?,
            reject_payload: load_maybe_ref(s)?,
        })
    }
}

impl MsgBody for PayloadDepositLiquidity {
    const OPCODE: u32 = 0x40e108d6;
    const NAMESPACE: Namespace = Namespace::JettonPayload;
}
