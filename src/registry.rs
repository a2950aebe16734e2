//! Opcode registry and decode dispatch.
//!
//! Every message body the crate knows is listed once in [`entries`]; the
//! process-wide [`registry`] partitions them into the two namespace tables at
//! first use. A duplicate opcode inside one namespace is a build defect:
//! [`Registry::build`] reports both offending entries and the global registry
//! panics instead of coming up.
//!
//! Decoding an unidentified body goes through [`decode_body`]: peek the
//! leading 32 bits, look the opcode up in the namespace's table, and hand the
//! cursor to the matched parser. Parsers re-read and re-validate the opcode
//! themselves, so they behave identically when called directly. Encoding has
//! no dispatch step; callers construct the body type they want and call
//! [`MsgBody::to_cell`](crate::scheme::MsgBody::to_cell).

use crate::cell::Slice;
use crate::error::CodecError;
use crate::scheme::{CellCodec, MsgBody, Namespace};
use crate::{dedust, jetton, stonfi};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Every decodable message body, across all three protocol families.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    JettonTransfer(jetton::Transfer),
    JettonTransferNotification(jetton::TransferNotification),
    JettonExcesses(jetton::Excesses),
    JettonBurn(jetton::Burn),
    JettonInternalTransfer(jetton::InternalTransfer),
    JettonBurnNotification(jetton::BurnNotification),
    Comment(jetton::Comment),
    DedustSwap(dedust::Swap),
    DedustDepositLiquidity(dedust::DepositLiquidity),
    DedustPayoutFromPool(dedust::PayoutFromPool),
    DedustPayout(dedust::Payout),
    DedustCancelDeposit(dedust::CancelDeposit),
    DedustPayloadSwap(dedust::PayloadSwap),
    DedustPayloadDepositLiquidity(dedust::PayloadDepositLiquidity),
    StonfiSwap(stonfi::Swap),
    StonfiProvideLiquidity(stonfi::ProvideLiquidity),
    StonfiSwapSuccess(stonfi::SwapSuccess),
    StonfiSwapSuccessReferral(stonfi::SwapSuccessReferral),
    StonfiSwapErrorNoLiquidity(stonfi::SwapErrorNoLiquidity),
    StonfiSwapErrorReserveError(stonfi::SwapErrorReserveError),
    StonfiSwapV2(stonfi::SwapV2),
    StonfiPtonTransfer(stonfi::PtonTransfer),
}

/// Parser signature stored in the registry tables.
pub type ParseFn = fn(&mut Slice<'_>) -> Result<Message, CodecError>;

/// One registered message body: its opcode, namespace, a display name for
/// diagnostics, and its parser.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub opcode: u32,
    pub namespace: Namespace,
    pub name: &'static str,
    pub parse: ParseFn,
}

fn entry<T: MsgBody>(name: &'static str, parse: ParseFn) -> Entry {
    Entry {
        opcode: T::OPCODE,
        namespace: T::NAMESPACE,
        name,
        parse,
    }
}

/// The full entry list the global registry is built from.
pub fn entries() -> Vec<Entry> {
    vec![
        entry::<jetton::Transfer>("jetton::Transfer", |s| {
            jetton::Transfer::load(s).map(Message::JettonTransfer)
        }),
        entry::<jetton::TransferNotification>("jetton::TransferNotification", |s| {
            jetton::TransferNotification::load(s).map(Message::JettonTransferNotification)
        }),
        entry::<jetton::Excesses>("jetton::Excesses", |s| {
            jetton::Excesses::load(s).map(Message::JettonExcesses)
        }),
        entry::<jetton::Burn>("jetton::Burn", |s| {
            jetton::Burn::load(s).map(Message::JettonBurn)
        }),
        entry::<jetton::InternalTransfer>("jetton::InternalTransfer", |s| {
            jetton::InternalTransfer::load(s).map(Message::JettonInternalTransfer)
        }),
        entry::<jetton::BurnNotification>("jetton::BurnNotification", |s| {
            jetton::BurnNotification::load(s).map(Message::JettonBurnNotification)
        }),
        entry::<jetton::Comment>("jetton::Comment", |s| {
            jetton::Comment::load(s).map(Message::Comment)
        }),
        entry::<dedust::Swap>("dedust::Swap", |s| {
            dedust::Swap::load(s).map(Message::DedustSwap)
        }),
        entry::<dedust::DepositLiquidity>("dedust::DepositLiquidity", |s| {
            dedust::DepositLiquidity::load(s).map(Message::DedustDepositLiquidity)
        }),
        entry::<dedust::PayoutFromPool>("dedust::PayoutFromPool", |s| {
            dedust::PayoutFromPool::load(s).map(Message::DedustPayoutFromPool)
        }),
        entry::<dedust::Payout>("dedust::Payout", |s| {
            dedust::Payout::load(s).map(Message::DedustPayout)
        }),
        entry::<dedust::CancelDeposit>("dedust::CancelDeposit", |s| {
            dedust::CancelDeposit::load(s).map(Message::DedustCancelDeposit)
        }),
        entry::<dedust::PayloadSwap>("dedust::PayloadSwap", |s| {
            dedust::PayloadSwap::load(s).map(Message::DedustPayloadSwap)
        }),
        entry::<dedust::PayloadDepositLiquidity>("dedust::PayloadDepositLiquidity", |s| {
            dedust::PayloadDepositLiquidity::load(s).map(Message::DedustPayloadDepositLiquidity)
        }),
        entry::<stonfi::Swap>("stonfi::Swap", |s| {
            stonfi::Swap::load(s).map(Message::StonfiSwap)
        }),
        entry::<stonfi::ProvideLiquidity>("stonfi::ProvideLiquidity", |s| {
            stonfi::ProvideLiquidity::load(s).map(Message::StonfiProvideLiquidity)
        }),
        entry::<stonfi::SwapSuccess>("stonfi::SwapSuccess", |s| {
            stonfi::SwapSuccess::load(s).map(Message::StonfiSwapSuccess)
        }),
        entry::<stonfi::SwapSuccessReferral>("stonfi::SwapSuccessReferral", |s| {
            stonfi::SwapSuccessReferral::load(s).map(Message::StonfiSwapSuccessReferral)
        }),
        entry::<stonfi::SwapErrorNoLiquidity>("stonfi::SwapErrorNoLiquidity", |s| {
            stonfi::SwapErrorNoLiquidity::load(s).map(Message::StonfiSwapErrorNoLiquidity)
        }),
        entry::<stonfi::SwapErrorReserveError>("stonfi::SwapErrorReserveError", |s| {
            stonfi::SwapErrorReserveError::load(s).map(Message::StonfiSwapErrorReserveError)
        }),
        entry::<stonfi::SwapV2>("stonfi::SwapV2", |s| {
            stonfi::SwapV2::load(s).map(Message::StonfiSwapV2)
        }),
        entry::<stonfi::PtonTransfer>("stonfi::PtonTransfer", |s| {
            stonfi::PtonTransfer::load(s).map(Message::StonfiPtonTransfer)
        }),
    ]
}

/// Immutable opcode tables, one per namespace. Built once, read-only after,
/// safe for unsynchronized concurrent reads.
#[derive(Debug)]
pub struct Registry {
    internal: HashMap<u32, Entry>,
    jetton_payload: HashMap<u32, Entry>,
}

impl Registry {
    /// Partition `entries` into namespace tables, rejecting duplicate
    /// opcodes within a namespace.
    pub fn build(entries: Vec<Entry>) -> Result<Self, CodecError> {
        let mut registry = Registry {
            internal: HashMap::new(),
            jetton_payload: HashMap::new(),
        };
        for entry in entries {
            let table = match entry.namespace {
                Namespace::Internal => &mut registry.internal,
                Namespace::JettonPayload => &mut registry.jetton_payload,
            };
            if let Some(existing) = table.get(&entry.opcode) {
                return Err(CodecError::RegistryConflict {
                    namespace: entry.namespace,
                    opcode: entry.opcode,
                    first: existing.name,
                    second: entry.name,
                });
            }
            table.insert(entry.opcode, entry);
        }
        tracing::debug!(
            internal = registry.internal.len(),
            jetton_payload = registry.jetton_payload.len(),
            "opcode registry built"
        );
        Ok(registry)
    }

    /// Look up the entry registered for `opcode` in `namespace`.
    pub fn get(&self, namespace: Namespace, opcode: u32) -> Option<&Entry> {
        self.table(namespace).get(&opcode)
    }

    /// The full opcode table of one namespace, for introspection and listing.
    pub fn table(&self, namespace: Namespace) -> &HashMap<u32, Entry> {
        match namespace {
            Namespace::Internal => &self.internal,
            Namespace::JettonPayload => &self.jetton_payload,
        }
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| match Registry::build(entries()) {
    Ok(registry) => registry,
    // A conflict here is a defect in the entry list, not a runtime
    // condition; refuse to come up.
    Err(e) => panic!("opcode registry: {e}"),
});

/// The process-wide registry over [`entries`].
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Decode a message body of unknown kind: peek the leading opcode, dispatch
/// to the parser registered for it in `namespace`.
pub fn decode_body(namespace: Namespace, s: &mut Slice<'_>) -> Result<Message, CodecError> {
    let opcode = s.peek_uint(32)? as u32;
    match registry().get(namespace, opcode) {
        Some(entry) => {
            tracing::trace!(name = entry.name, opcode = format_args!("{opcode:#010x}"), "dispatch");
            (entry.parse)(s)
        }
        None => {
            tracing::debug!(
                %namespace,
                opcode = format_args!("{opcode:#010x}"),
                "no handler registered"
            );
            Err(CodecError::UnknownOpcode { namespace, opcode })
        }
    }
}
