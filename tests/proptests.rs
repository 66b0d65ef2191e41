// Property tests for the header width ladder, byte order, and nesting
// balance over arbitrary bounded operation sequences.
#![allow(clippy::unwrap_used)]

use micro_cbor::{ContainerKind, EncodeContext};
use proptest::prelude::*;

fn minimal_width_len(argument: u64) -> usize {
    if argument <= 23 {
        1
    } else if argument <= 0xff {
        2
    } else if argument <= 0xffff {
        3
    } else if argument <= 0xffff_ffff {
        5
    } else {
        9
    }
}

fn decode_argument(bytes: &[u8]) -> (u8, u64, usize) {
    let initial = bytes[0];
    let additional_info = initial & 0x1f;
    match additional_info {
        0..=23 => (initial >> 5, u64::from(additional_info), 1),
        24 => (initial >> 5, u64::from(bytes[1]), 2),
        25 => (
            initial >> 5,
            u64::from(u16::from_be_bytes([bytes[1], bytes[2]])),
            3,
        ),
        26 => (
            initial >> 5,
            u64::from(u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]])),
            5,
        ),
        27 => (
            initial >> 5,
            u64::from_be_bytes([
                bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7], bytes[8],
            ]),
            9,
        ),
        _ => unreachable!("additional info {additional_info} not produced by this encoder"),
    }
}

proptest! {
    #[test]
    fn uint_header_is_minimum_length_and_big_endian(value in any::<u64>()) {
        let mut storage = [0u8; 16];
        let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
        ctx.add_uint(value).unwrap();
        let out = ctx.finish().unwrap();

        prop_assert_eq!(out.len(), minimal_width_len(value));
        let (major, argument, consumed) = decode_argument(out);
        prop_assert_eq!(major, 0);
        prop_assert_eq!(argument, value);
        prop_assert_eq!(consumed, out.len());
    }

    #[test]
    fn negative_int_header_matches_minus_one_minus_n_convention(value in i64::MIN..0i64) {
        let mut storage = [0u8; 16];
        let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
        ctx.add_int(value).unwrap();
        let out = ctx.finish().unwrap();

        let magnitude = (-1_i128 - i128::from(value)) as u64;
        prop_assert_eq!(out.len(), minimal_width_len(magnitude));
        let (major, argument, _) = decode_argument(out);
        prop_assert_eq!(major, 1);
        prop_assert_eq!(argument, magnitude);
    }

    #[test]
    fn byte_string_header_argument_equals_payload_length(payload in proptest::collection::vec(any::<u8>(), 0..300)) {
        let mut storage = vec![0u8; payload.len() + 9];
        let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
        ctx.add_bytes(micro_cbor::BytesKind::ByteString, &payload).unwrap();
        let out = ctx.finish().unwrap();

        let (major, argument, header_len) = decode_argument(out);
        prop_assert_eq!(major, 2);
        prop_assert_eq!(argument, payload.len() as u64);
        prop_assert_eq!(&out[header_len..], payload.as_slice());
    }
}

#[derive(Debug, Clone)]
enum Op {
    Uint(u64),
    Array(Vec<Op>),
    Map(Vec<Op>),
}

fn arb_op() -> impl Strategy<Value = Op> {
    let leaf = any::<u64>().prop_map(Op::Uint);
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Op::Array),
            proptest::collection::vec(inner, 0..6).prop_map(|mut v| {
                if v.len() % 2 != 0 {
                    v.pop();
                }
                Op::Map(v)
            }),
        ]
    })
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(arb_op(), 1..6)
}

fn apply(ctx: &mut EncodeContext<'_>, op: &Op) {
    match op {
        Op::Uint(v) => {
            ctx.add_uint(*v).unwrap();
        }
        Op::Array(children) => {
            ctx.open_container(ContainerKind::Array).unwrap();
            for child in children {
                apply(ctx, child);
            }
            ctx.close_container(ContainerKind::Array).unwrap();
        }
        Op::Map(children) => {
            ctx.open_container(ContainerKind::Map).unwrap();
            for child in children {
                apply(ctx, child);
            }
            ctx.close_container(ContainerKind::Map).unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]
    #[test]
    fn well_formed_op_trees_always_close_every_container(ops in arb_ops()) {
        let mut storage = vec![0u8; 1 << 16];
        let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
        for op in &ops {
            apply(&mut ctx, op);
        }
        prop_assert!(ctx.finish().is_ok());
        prop_assert_eq!(ctx.nesting_depth(), 0);
    }
}
