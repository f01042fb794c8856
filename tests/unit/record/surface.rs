use super::*;

#[test]
fn null_surface_tracks_a_scoped_transform() {
    let mut s = NullSurface::new(200, 100);
    assert_eq!(s.width(), 200);
    assert_eq!(s.height(), 100);
    assert_eq!(s.current_transform(), Affine::IDENTITY);

    s.translate(5.0, 7.0);
    s.save();
    s.scale(2.0, 2.0);
    assert_eq!(
        s.current_transform(),
        Affine::translate((5.0, 7.0)) * Affine::scale_non_uniform(2.0, 2.0)
    );

    s.restore();
    assert_eq!(s.current_transform(), Affine::translate((5.0, 7.0)));

    // Restoring past the root keeps the root transform.
    s.restore();
    s.restore();
    assert_eq!(s.current_transform(), Affine::translate((5.0, 7.0)));
}

#[test]
fn null_surface_metrics_scale_with_text_length() {
    let s = NullSurface::new(10, 10);
    let m = s.measure_text("abcd");
    assert_eq!(m.width, 4.0 * NullSurface::GLYPH_WIDTH);
    assert_eq!(m.ascent, NullSurface::ASCENT);
    assert_eq!(m.descent, NullSurface::DESCENT);
    assert_eq!(s.measure_text("").width, 0.0);
}
