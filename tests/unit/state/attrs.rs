use super::*;

#[test]
fn transform_and_move_text_are_incremental() {
    assert_eq!(Attr::Transform.kind(), AttrKind::Incremental);
    assert_eq!(Attr::MoveText.kind(), AttrKind::Incremental);
    assert_eq!(Attr::LineWidth.kind(), AttrKind::Scalar);
    assert_eq!(Attr::Path.kind(), AttrKind::Scalar);
}

#[test]
fn dependency_groups_carry_the_transform() {
    for group in [Attr::FILL, Attr::STROKE, Attr::TEXT] {
        assert!(group.contains(&Attr::Transform));
        assert!(group.contains(&Attr::CompositeOp));
    }
    assert!(Attr::STROKE.contains(&Attr::LineWidth));
    assert!(!Attr::FILL.contains(&Attr::LineWidth));
    assert!(Attr::TEXT.contains(&Attr::MoveText));
}
