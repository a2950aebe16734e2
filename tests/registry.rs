//! Registry construction and opcode dispatch: uniqueness enforcement,
//! namespace separation, and decode-by-opcode over the full entry table.

use tondefi::registry::{decode_body, entries, registry, Entry, Message, Registry};
use tondefi::{dedust, jetton, stonfi};
use tondefi::{Address, Builder, CellCodec, CodecError, MsgBody, Namespace};

fn addr(byte: u8) -> Address {
    Address::std(0, [byte; 32])
}

#[test]
fn full_table_builds_without_conflicts() {
    let registry = Registry::build(entries()).expect("registry");
    assert_eq!(registry.table(Namespace::Internal).len(), 12);
    assert_eq!(registry.table(Namespace::JettonPayload).len(), 10);
}

#[test]
fn global_registry_lists_known_opcodes() {
    let r = registry();
    assert!(r.get(Namespace::Internal, 0x0f8a7ea5).is_some());
    assert!(r.get(Namespace::Internal, 0xea06185d).is_some());
    assert!(r.get(Namespace::JettonPayload, 0x0).is_some());
    assert!(r.get(Namespace::JettonPayload, 0x6664de2a).is_some());
    // registered in the other namespace only
    assert!(r.get(Namespace::JettonPayload, 0x0f8a7ea5).is_none());
    assert!(r.get(Namespace::Internal, 0x25938561).is_none());
}

#[test]
fn duplicate_opcode_in_namespace_is_a_conflict() {
    let parse: fn(&mut tondefi::Slice<'_>) -> Result<Message, CodecError> =
        |s| jetton::Excesses::load(s).map(Message::JettonExcesses);
    let clash = vec![
        Entry {
            opcode: 0xd53276db,
            namespace: Namespace::Internal,
            name: "first",
            parse,
        },
        Entry {
            opcode: 0xd53276db,
            namespace: Namespace::Internal,
            name: "second",
            parse,
        },
    ];
    let err = Registry::build(clash).expect_err("must conflict");
    assert_eq!(
        err,
        CodecError::RegistryConflict {
            namespace: Namespace::Internal,
            opcode: 0xd53276db,
            first: "first",
            second: "second",
        }
    );
}

#[test]
fn same_opcode_across_namespaces_coexists() {
    let parse: fn(&mut tondefi::Slice<'_>) -> Result<Message, CodecError> =
        |s| jetton::Excesses::load(s).map(Message::JettonExcesses);
    let shared = vec![
        Entry {
            opcode: 0x1234_5678,
            namespace: Namespace::Internal,
            name: "internal_side",
            parse,
        },
        Entry {
            opcode: 0x1234_5678,
            namespace: Namespace::JettonPayload,
            name: "payload_side",
            parse,
        },
    ];
    let registry = Registry::build(shared).expect("no conflict across namespaces");
    assert!(registry.get(Namespace::Internal, 0x1234_5678).is_some());
    assert!(registry.get(Namespace::JettonPayload, 0x1234_5678).is_some());
}

#[test]
fn unknown_opcode_carries_raw_value() {
    let mut b = Builder::new();
    b.write_uint(0xdeadbeef, 32)
        .and_then(|b| b.write_uint(0, 64))
        .expect("build");
    let cell = b.finish();
    let err = decode_body(Namespace::Internal, &mut cell.begin_parse()).expect_err("must fail");
    assert_eq!(
        err,
        CodecError::UnknownOpcode {
            namespace: Namespace::Internal,
            opcode: 0xdeadbeef,
        }
    );
}

#[test]
fn opcode_registered_elsewhere_is_unknown_here() {
    // a jetton-payload comment is not an internal message body
    let cell = jetton::Comment {
        text: "hi".into(),
    }
    .to_cell()
    .expect("encode");
    let err = decode_body(Namespace::Internal, &mut cell.begin_parse()).expect_err("must fail");
    assert_eq!(
        err,
        CodecError::UnknownOpcode {
            namespace: Namespace::Internal,
            opcode: 0x0,
        }
    );
}

#[test]
fn dispatch_decodes_internal_bodies() {
    let transfer = jetton::Transfer {
        query_id: 1,
        amount: 10,
        destination: addr(0x01),
        response_destination: addr(0x02),
        ..Default::default()
    };
    let cell = transfer.to_cell().expect("encode");
    assert_eq!(
        decode_body(Namespace::Internal, &mut cell.begin_parse()).expect("dispatch"),
        Message::JettonTransfer(transfer)
    );

    let swap = dedust::Swap {
        query_id: 2,
        amount: 20,
        step: dedust::SwapStep {
            pool_addr: addr(0x03),
            ..Default::default()
        },
        swap_params: dedust::SwapParams {
            deadline: 100,
            recipient_addr: addr(0x04),
            ..Default::default()
        },
    };
    let cell = swap.to_cell().expect("encode");
    assert_eq!(
        decode_body(Namespace::Internal, &mut cell.begin_parse()).expect("dispatch"),
        Message::DedustSwap(swap)
    );

    let pton = stonfi::PtonTransfer {
        query_id: 3,
        ton_amount: 30,
        refund_address: addr(0x05),
        forward_payload: None,
    };
    let cell = pton.to_cell().expect("encode");
    assert_eq!(
        decode_body(Namespace::Internal, &mut cell.begin_parse()).expect("dispatch"),
        Message::StonfiPtonTransfer(pton)
    );
}

#[test]
fn dispatch_decodes_jetton_payloads() {
    let comment = jetton::Comment {
        text: "gm".into(),
    };
    let cell = comment.to_cell().expect("encode");
    assert_eq!(
        decode_body(Namespace::JettonPayload, &mut cell.begin_parse()).expect("dispatch"),
        Message::Comment(comment)
    );

    let swap = stonfi::Swap {
        token_wallet: addr(0x06),
        min_out: 40,
        to_address: addr(0x07),
        referral_address: None,
    };
    let cell = swap.to_cell().expect("encode");
    assert_eq!(
        decode_body(Namespace::JettonPayload, &mut cell.begin_parse()).expect("dispatch"),
        Message::StonfiSwap(swap)
    );

    let cell = stonfi::SwapSuccess.to_cell().expect("encode");
    assert_eq!(
        decode_body(Namespace::JettonPayload, &mut cell.begin_parse()).expect("dispatch"),
        Message::StonfiSwapSuccess(stonfi::SwapSuccess)
    );
}

#[test]
fn every_entry_dispatches_its_own_encoding() {
    // one record per registered body; dispatch must give back the same kind
    let bodies: Vec<(Namespace, tondefi::Cell, Message)> = vec![
        body(jetton::Transfer::default(), Message::JettonTransfer),
        body(
            jetton::TransferNotification::default(),
            Message::JettonTransferNotification,
        ),
        body(jetton::Excesses::default(), Message::JettonExcesses),
        body(jetton::Burn::default(), Message::JettonBurn),
        body(
            jetton::InternalTransfer::default(),
            Message::JettonInternalTransfer,
        ),
        body(
            jetton::BurnNotification::default(),
            Message::JettonBurnNotification,
        ),
        body(jetton::Comment::default(), Message::Comment),
        body(dedust::Swap::default(), Message::DedustSwap),
        body(
            dedust::DepositLiquidity::default(),
            Message::DedustDepositLiquidity,
        ),
        body(
            dedust::PayoutFromPool::default(),
            Message::DedustPayoutFromPool,
        ),
        body(dedust::Payout::default(), Message::DedustPayout),
        body(dedust::CancelDeposit::default(), Message::DedustCancelDeposit),
        body(dedust::PayloadSwap::default(), Message::DedustPayloadSwap),
        body(
            dedust::PayloadDepositLiquidity::default(),
            Message::DedustPayloadDepositLiquidity,
        ),
        body(stonfi::Swap::default(), Message::StonfiSwap),
        body(
            stonfi::ProvideLiquidity::default(),
            Message::StonfiProvideLiquidity,
        ),
        body(stonfi::SwapSuccess, Message::StonfiSwapSuccess),
        body(
            stonfi::SwapSuccessReferral,
            Message::StonfiSwapSuccessReferral,
        ),
        body(
            stonfi::SwapErrorNoLiquidity,
            Message::StonfiSwapErrorNoLiquidity,
        ),
        body(
            stonfi::SwapErrorReserveError,
            Message::StonfiSwapErrorReserveError,
        ),
        body(stonfi::SwapV2::default(), Message::StonfiSwapV2),
        body(stonfi::PtonTransfer::default(), Message::StonfiPtonTransfer),
    ];
    assert_eq!(bodies.len(), entries().len());
    for (namespace, cell, expected) in bodies {
        let decoded = decode_body(namespace, &mut cell.begin_parse()).expect("dispatch");
        assert_eq!(decoded, expected);
    }
}

fn body<T: MsgBody + Clone>(
    value: T,
    wrap: fn(T) -> Message,
) -> (Namespace, tondefi::Cell, Message) {
    let cell = value.to_cell().expect("encode");
    (T::NAMESPACE, cell, wrap(value))
}
