use micro_cbor::{ContainerKind, EncodeContext, ErrorCode};

#[test]
fn error_latches_and_every_later_call_returns_the_same_error() {
    let mut storage = [0u8; 2];
    let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
    let first = ctx.add_uint(0xffff_ffff).unwrap_err();
    assert_eq!(first.code, ErrorCode::BufferTooSmall);

    let second = ctx.add_uint(0).unwrap_err();
    let third = ctx.open_container(ContainerKind::Array).unwrap_err();
    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn overflow_never_partially_writes_a_header() {
    let mut storage = [0u8; 1];
    let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
    // Value needs a 2-byte header; only 1 byte of capacity exists.
    ctx.add_uint(24).unwrap_err();
    assert_eq!(ctx.bytes_written(), 0);
}

#[test]
fn map_with_odd_child_count_is_not_rejected_at_close() {
    // This encoder tracks nesting and byte layout only; it does not enforce
    // that a closed map received an even number of children.
    let mut storage = [0u8; 8];
    let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
    ctx.open_container(ContainerKind::Map).unwrap();
    ctx.add_uint(1).unwrap();
    ctx.close_container(ContainerKind::Map).unwrap();
    assert!(ctx.finish().is_ok());
}

#[test]
fn close_with_nothing_open_is_too_many_closes() {
    let mut storage = [0u8; 8];
    let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
    let err = ctx.close_container(ContainerKind::Array).unwrap_err();
    assert_eq!(err.code, ErrorCode::TooManyCloses);
}

#[test]
fn close_of_wrong_kind_is_rejected_and_leaves_nesting_untouched_but_poisoned() {
    let mut storage = [0u8; 8];
    let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
    ctx.open_container(ContainerKind::Map).unwrap();
    let err = ctx.close_container(ContainerKind::Array).unwrap_err();
    assert_eq!(err.code, ErrorCode::CloseMismatch);
    // Poisoned: nesting_depth still reflects the unclosed frame, and any
    // further operation returns the same latched error.
    assert_eq!(ctx.nesting_depth(), 1);
    assert_eq!(ctx.add_uint(0).unwrap_err(), err);
}

#[test]
fn nesting_depth_limit_is_exact() {
    let mut storage = [0u8; 256];
    let mut ctx: EncodeContext<'_, 3> = EncodeContext::new(&mut storage);
    ctx.open_container(ContainerKind::Array).unwrap();
    ctx.open_container(ContainerKind::Array).unwrap();
    ctx.open_container(ContainerKind::Array).unwrap();
    let err = ctx.open_container(ContainerKind::Array).unwrap_err();
    assert_eq!(err.code, ErrorCode::NestingTooDeep);
}

#[test]
fn array_item_count_ceiling_is_enforced_per_frame() {
    let mut storage = [0u8; 1 << 20];
    let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
    ctx.open_container(ContainerKind::Array).unwrap();
    for _ in 0..65_534 {
        ctx.add_null().unwrap();
    }
    let err = ctx.add_null().unwrap_err();
    assert_eq!(err.code, ErrorCode::ArrayTooLong);
}

#[test]
fn negative_integers_use_the_minus_one_minus_n_argument_convention() {
    let mut storage = [0u8; 4];
    let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
    ctx.add_int(-1).unwrap();
    assert_eq!(ctx.finish().unwrap(), &[0x20]);
}

#[test]
fn reset_allows_reuse_after_a_latched_error() {
    let mut storage = [0u8; 1];
    let mut ctx: EncodeContext<'_> = EncodeContext::new(&mut storage);
    ctx.add_uint(1000).unwrap_err();

    let mut storage2 = [0u8; 4];
    ctx.reset(&mut storage2);
    ctx.add_uint(1).unwrap();
    assert_eq!(ctx.finish().unwrap(), &[0x01]);
}
