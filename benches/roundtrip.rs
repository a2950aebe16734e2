//! Encode/decode throughput for a representative jetton transfer and a
//! multi-hop DeDust swap.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tondefi::registry::decode_body;
use tondefi::{dedust, jetton};
use tondefi::{Address, CellCodec, MsgBody, Namespace, Payload};

fn transfer() -> jetton::Transfer {
    jetton::Transfer {
        query_id: 42,
        amount: 1_000_000_000,
        destination: Address::std(0, [0x11; 32]),
        response_destination: Address::std(0, [0x22; 32]),
        custom_payload: None,
        forward_ton_amount: 1,
        forward_payload: Payload::Empty,
    }
}

fn swap() -> dedust::Swap {
    dedust::Swap {
        query_id: 7,
        amount: 2_000_000_000,
        step: dedust::SwapStep {
            pool_addr: Address::std(0, [0x33; 32]),
            params: dedust::SwapStepParams {
                kind: dedust::SwapKind::GivenIn,
                limit: 100,
                next: Some(Box::new(dedust::SwapStep {
                    pool_addr: Address::std(0, [0x44; 32]),
                    params: dedust::SwapStepParams::default(),
                })),
            },
        },
        swap_params: dedust::SwapParams {
            deadline: 1_700_000_000,
            recipient_addr: Address::std(0, [0x55; 32]),
            ..Default::default()
        },
    }
}

fn bench_roundtrip(c: &mut Criterion) {
    let transfer = transfer();
    let swap = swap();
    let transfer_cell = transfer.to_cell().expect("encode");
    let swap_cell = swap.to_cell().expect("encode");

    c.bench_function("encode_jetton_transfer", |b| {
        b.iter(|| black_box(&transfer).to_cell().expect("encode"))
    });
    c.bench_function("decode_jetton_transfer", |b| {
        b.iter(|| {
            jetton::Transfer::load(&mut black_box(&transfer_cell).begin_parse()).expect("decode")
        })
    });
    c.bench_function("dispatch_jetton_transfer", |b| {
        b.iter(|| {
            decode_body(Namespace::Internal, &mut black_box(&transfer_cell).begin_parse())
                .expect("dispatch")
        })
    });
    c.bench_function("roundtrip_dedust_swap", |b| {
        b.iter(|| {
            let cell = black_box(&swap).to_cell().expect("encode");
            dedust::Swap::load(&mut cell.begin_parse()).expect("decode")
        })
    });
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
