//! # tondefi — binary codecs for TON jetton and DEX message bodies
//!
//! Bidirectional, bit-exact codecs between TON cell trees and typed records
//! for three protocol families sharing one opcode space per namespace:
//!
//! - **[`jetton`]** — TEP-74 fungible token bodies (transfer, burn,
//!   notifications, excesses, text comment)
//! - **[`dedust`]** — DeDust v2 (swaps with multi-hop routes, liquidity
//!   deposit, payouts)
//! - **[`stonfi`]** — STON.fi v1 payloads and v2 cross-swap / proxy-TON
//!   transfer
//!
//! ## Model
//!
//! Messages live in [cells](cell::Cell): immutable nodes of up to 1023 bits
//! plus up to 4 child references. Each body type implements
//! [`CellCodec`](scheme::CellCodec) (a `store`/`load` pair) and
//! [`MsgBody`](scheme::MsgBody) (its 32-bit opcode and
//! [`Namespace`](scheme::Namespace)). Encoding is explicit: build the record,
//! call [`MsgBody::to_cell`](scheme::MsgBody::to_cell). Decoding a body of
//! unknown kind goes through [`registry::decode_body`], which dispatches on
//! the leading opcode.
//!
//! ## Example
//!
//! ```
//! use tondefi::jetton::Transfer;
//! use tondefi::registry::{decode_body, Message};
//! use tondefi::{Address, MsgBody, Namespace};
//!
//! let body = Transfer {
//!     query_id: 7,
//!     amount: 1_000_000_000,
//!     destination: Address::std(0, [0x11; 32]),
//!     response_destination: Address::std(0, [0x22; 32]),
//!     ..Default::default()
//! };
//! let cell = body.to_cell().unwrap();
//!
//! let decoded = decode_body(Namespace::Internal, &mut cell.begin_parse()).unwrap();
//! assert_eq!(decoded, Message::JettonTransfer(body));
//! ```
//!
//! Errors are never swallowed: opcode mismatches, out-of-range field values,
//! and malformed cell structure all surface as [`CodecError`], except the one
//! documented burn-body relaxation (see [`scheme::load_maybe_ref_relaxed`]).

pub mod address;
pub mod cell;
pub mod dedust;
pub mod error;
pub mod jetton;
pub mod registry;
pub mod scheme;
pub mod stonfi;

pub use address::Address;
pub use cell::{Builder, Cell, Slice};
pub use error::CodecError;
pub use registry::{decode_body, registry, Message, Registry};
pub use scheme::{CellCodec, MsgBody, Namespace, Payload};
