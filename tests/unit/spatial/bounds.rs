use super::*;

fn size(w: u32, h: u32) -> SurfaceSize {
    SurfaceSize::new(w, h).unwrap()
}

#[test]
fn identity_box_keeps_its_corners() {
    let b = Bounds::transformed_box(Affine::IDENTITY, 0.0, 10.0, 2.0, 8.0);
    assert_eq!(b.min_x, 0.0);
    assert_eq!(b.max_x, 10.0);
    assert_eq!(b.min_y, 2.0);
    assert_eq!(b.max_y, 8.0);
}

#[test]
fn quarter_turn_swaps_axes_independently() {
    // Rotate 90 deg counterclockwise in screen coordinates: (x, y) -> (-y, x).
    // X corner ordering inverts, Y ordering does not.
    let rot = Affine::rotate(std::f64::consts::FRAC_PI_2);
    let b = Bounds::transformed_box(rot, 0.0, 10.0, 0.0, 10.0);
    assert!((b.min_x + 10.0).abs() < 1e-9);
    assert!(b.max_x.abs() < 1e-9);
    assert!(b.min_y.abs() < 1e-9);
    assert!((b.max_y - 10.0).abs() < 1e-9);
}

#[test]
fn half_turn_preserves_extent() {
    let rot = Affine::rotate(std::f64::consts::PI);
    let b = Bounds::transformed_box(rot, 0.0, 4.0, 0.0, 6.0);
    assert!((b.max_x - b.min_x - 4.0).abs() < 1e-9);
    assert!((b.max_y - b.min_y - 6.0).abs() < 1e-9);
    assert!((b.min_x + 4.0).abs() < 1e-9);
    assert!((b.min_y + 6.0).abs() < 1e-9);
}

#[test]
fn translation_moves_the_box() {
    let b = Bounds::transformed_box(Affine::translate((5.0, -3.0)), 0.0, 1.0, 0.0, 1.0);
    assert_eq!(b.min_x, 5.0);
    assert_eq!(b.max_x, 6.0);
    assert_eq!(b.min_y, -3.0);
    assert_eq!(b.max_y, -2.0);
}

#[test]
fn point_is_a_degenerate_box() {
    let p = Bounds::transformed_point(Affine::scale(2.0), 3.0, 4.0);
    assert_eq!(p.min_x, 6.0);
    assert_eq!(p.max_x, 6.0);
    assert_eq!(p.min_y, 8.0);
    assert_eq!(p.max_y, 8.0);
    assert!(!p.is_empty());
}

#[test]
fn union_grows_and_ignores_empty() {
    let mut b = Bounds::EMPTY;
    assert!(b.is_empty());
    b.union(Bounds::transformed_box(Affine::IDENTITY, 1.0, 2.0, 1.0, 2.0));
    b.union(Bounds::EMPTY);
    b.union(Bounds::transformed_box(Affine::IDENTITY, -1.0, 0.5, 3.0, 9.0));
    assert_eq!(b.min_x, -1.0);
    assert_eq!(b.max_x, 2.0);
    assert_eq!(b.min_y, 1.0);
    assert_eq!(b.max_y, 9.0);
}

#[test]
fn unbounded_extends_to_infinity() {
    let mut b = Bounds::transformed_box(Affine::IDENTITY, 2.0, 3.0, 2.0, 3.0);
    b.union(Bounds::UNBOUNDED);
    assert_eq!(b.min_x, 0.0);
    assert_eq!(b.max_x, f64::INFINITY);
    assert_eq!(b.min_y, 0.0);
    assert_eq!(b.max_y, f64::INFINITY);
}

#[test]
fn normalization_divides_by_surface_size() {
    let b = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 50.0,
        max_y: 25.0,
    };
    let n = b.normalized(size(100, 100));
    assert_eq!(n.min_x, 0.0);
    assert_eq!(n.max_x, 0.5);
    assert_eq!(n.max_y, 0.25);
}

#[test]
fn empty_bounds_normalize_to_the_unit_box() {
    assert_eq!(Bounds::EMPTY.normalized(size(100, 100)), NormBox::UNIT);
}

#[test]
fn rotated_quarter_turn_normalizes_to_swapped_extents() {
    // (0,0)-(10,10) rotated 90 deg lands at (-10,0)-(0,10); translating by
    // +10 in x puts it back on a 20x20 surface at (0,0)-(10,10) again, so
    // the normalized box reflects the transformed, not the local, extents.
    let m = Affine::translate((10.0, 0.0)) * Affine::rotate(std::f64::consts::FRAC_PI_2);
    let b = Bounds::transformed_box(m, 0.0, 10.0, 0.0, 10.0);
    let n = b.normalized(size(20, 20));
    assert!((n.min_x - 0.0).abs() < 1e-9);
    assert!((n.max_x - 0.5).abs() < 1e-9);
    assert!((n.min_y - 0.0).abs() < 1e-9);
    assert!((n.max_y - 0.5).abs() < 1e-9);
}
