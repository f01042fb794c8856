use super::*;

#[test]
fn op_index_orders_by_value() {
    assert!(OpIndex(0) < OpIndex(1));
    assert_eq!(OpIndex(7), OpIndex(7));
}

#[test]
fn surface_size_rejects_zero_axes() {
    assert!(SurfaceSize::new(0, 100).is_err());
    assert!(SurfaceSize::new(100, 0).is_err());
    let size = SurfaceSize::new(640, 480).unwrap();
    assert_eq!(size.width, 640);
    assert_eq!(size.height, 480);
}
