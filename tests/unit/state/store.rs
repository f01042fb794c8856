use super::*;

#[test]
fn pop_restores_the_exact_pre_push_view() {
    let mut store = AttrStore::new();
    store.record_scalar(Attr::FillColor, OpIndex(0));
    store.record_scalar(Attr::LineWidth, OpIndex(1));

    store.push_scope();
    store.record_scalar(Attr::FillColor, OpIndex(2));
    store.record_scalar(Attr::Dash, OpIndex(3));
    assert_eq!(store.lookup_scalar(Attr::FillColor), Some(OpIndex(2)));
    assert_eq!(store.lookup_scalar(Attr::Dash), Some(OpIndex(3)));
    // Values the child never overwrote stay visible.
    assert_eq!(store.lookup_scalar(Attr::LineWidth), Some(OpIndex(1)));

    store.pop_scope().unwrap();
    assert_eq!(store.lookup_scalar(Attr::FillColor), Some(OpIndex(0)));
    assert_eq!(store.lookup_scalar(Attr::LineWidth), Some(OpIndex(1)));
    // The child's own bindings are discarded entirely.
    assert_eq!(store.lookup_scalar(Attr::Dash), None);
}

#[test]
fn incremental_union_puts_ancestors_first() {
    let mut store = AttrStore::new();
    store.record_incremental(Attr::Transform, OpIndex(5));
    store.push_scope();
    store.record_incremental(Attr::Transform, OpIndex(9));
    assert_eq!(
        store.lookup_incremental(Attr::Transform),
        vec![OpIndex(5), OpIndex(9)]
    );

    store.pop_scope().unwrap();
    assert_eq!(store.lookup_incremental(Attr::Transform), vec![OpIndex(5)]);
}

#[test]
fn incremental_append_order_is_stable_within_a_scope() {
    let mut store = AttrStore::new();
    for i in [3_u64, 1, 2] {
        store.record_incremental(Attr::MoveText, OpIndex(i));
    }
    assert_eq!(
        store.lookup_incremental(Attr::MoveText),
        vec![OpIndex(3), OpIndex(1), OpIndex(2)]
    );
}

#[test]
fn named_bindings_ignore_scoping() {
    let mut store = AttrStore::new();
    store.push_scope();
    store.record_named("currentPath", OpIndex(4));
    store.pop_scope().unwrap();
    assert_eq!(store.lookup_named("currentPath"), Some(OpIndex(4)));
    assert_eq!(store.lookup_named("missing"), None);
}

#[test]
fn popping_the_root_scope_is_fatal() {
    let mut store = AttrStore::new();
    assert!(matches!(
        store.pop_scope(),
        Err(crate::foundation::error::OpweaveError::Usage(_))
    ));

    // Depth tracking survives a balanced sequence.
    store.push_scope();
    store.push_scope();
    assert_eq!(store.depth(), 2);
    store.pop_scope().unwrap();
    store.pop_scope().unwrap();
    assert_eq!(store.depth(), 0);
    assert!(store.pop_scope().is_err());
}

#[test]
fn deep_nesting_keeps_sibling_scopes_independent() {
    let mut store = AttrStore::new();
    store.record_scalar(Attr::StrokeAlpha, OpIndex(0));

    store.push_scope();
    store.record_scalar(Attr::StrokeAlpha, OpIndex(1));
    store.pop_scope().unwrap();

    store.push_scope();
    // The sibling scope's write must not leak in here.
    assert_eq!(store.lookup_scalar(Attr::StrokeAlpha), Some(OpIndex(0)));
    store.pop_scope().unwrap();
}
