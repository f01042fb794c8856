use crate::foundation::core::{Affine, BezPath};

/// Stroke cap style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineCap {
    /// Flat cap at the endpoint.
    Butt,
    /// Semicircular cap.
    Round,
    /// Square cap extending past the endpoint.
    Square,
}

/// Stroke join style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineJoin {
    /// Sharp corner, subject to the miter limit.
    Miter,
    /// Rounded corner.
    Round,
    /// Beveled corner.
    Bevel,
}

/// Metrics for a text run, queried from the surface before drawing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextMetrics {
    /// Advance width of the run.
    pub width: f64,
    /// Distance from the baseline to the top of the ink extent.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the ink extent.
    pub descent: f64,
}

/// The fixed capability interface of a 2D drawing surface.
///
/// The original integration wrapped every method of the surface object
/// reflectively; here the forwarded call surface is an explicit trait, and
/// integrators route all surface calls through it. The tracker treats an
/// implementation as an opaque sink: it forwards calls and queries the
/// live transform and text metrics, but never inspects pixels.
pub trait Canvas2d {
    /// Fixed surface width in pixels.
    fn width(&self) -> u32;
    /// Fixed surface height in pixels.
    fn height(&self) -> u32;
    /// The surface's current affine transform, queried at call time.
    fn current_transform(&self) -> Affine;
    /// Measure a text run under the current text state.
    fn measure_text(&self, text: &str) -> TextMetrics;

    /// Set the stroke width.
    fn set_line_width(&mut self, width: f64);
    /// Set the stroke cap style.
    fn set_line_cap(&mut self, cap: LineCap);
    /// Set the stroke join style.
    fn set_line_join(&mut self, join: LineJoin);
    /// Set the miter limit.
    fn set_miter_limit(&mut self, limit: f64);
    /// Set the dash pattern and offset.
    fn set_dash(&mut self, segments: &[f64], offset: f64);
    /// Set the stroke alpha.
    fn set_stroke_alpha(&mut self, alpha: f64);
    /// Set the fill color or paint.
    fn set_fill_color(&mut self, color: &str);
    /// Set the fill alpha.
    fn set_fill_alpha(&mut self, alpha: f64);
    /// Set the global composite operation.
    fn set_composite_op(&mut self, op: &str);

    /// Concatenate an affine transform onto the current one.
    fn transform(&mut self, m: Affine);
    /// Concatenate a translation.
    fn translate(&mut self, dx: f64, dy: f64);
    /// Concatenate a rotation, in radians.
    fn rotate(&mut self, angle: f64);
    /// Concatenate a scale.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Push the graphics state.
    fn save(&mut self);
    /// Pop the graphics state.
    fn restore(&mut self);

    /// Replace the staged path.
    fn set_path(&mut self, path: &BezPath);
    /// Fill the staged path.
    fn fill(&mut self);
    /// Stroke the staged path.
    fn stroke(&mut self);
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Stroke an axis-aligned rectangle.
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Fill a text run at a baseline position, optionally clamped to a
    /// maximum advance width.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>);
    /// Draw an image into the destination rectangle.
    fn draw_image(&mut self, dx: f64, dy: f64, dw: f64, dh: f64);
    /// Intersect the clip region with the staged path.
    fn clip(&mut self);
}

/// A surface that draws nothing.
///
/// Tracks only the state the tracker queries back (dimensions and the
/// current transform, with a save/restore stack) and synthesizes crude text
/// metrics. Useful for dry-running an integration and as a stand-in in
/// tests.
#[derive(Clone, Debug)]
pub struct NullSurface {
    width: u32,
    height: u32,
    transforms: Vec<Affine>,
}

impl NullSurface {
    /// Glyph advance used by the synthetic text metrics.
    pub const GLYPH_WIDTH: f64 = 8.0;
    /// Ascent used by the synthetic text metrics.
    pub const ASCENT: f64 = 8.0;
    /// Descent used by the synthetic text metrics.
    pub const DESCENT: f64 = 2.0;

    /// Create a surface of the given pixel size with an identity transform.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transforms: vec![Affine::IDENTITY],
        }
    }

    fn current_mut(&mut self) -> &mut Affine {
        let last = self.transforms.len() - 1;
        &mut self.transforms[last]
    }
}

impl Canvas2d for NullSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn current_transform(&self) -> Affine {
        *self.transforms.last().unwrap_or(&Affine::IDENTITY)
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f64 * Self::GLYPH_WIDTH,
            ascent: Self::ASCENT,
            descent: Self::DESCENT,
        }
    }

    fn set_line_width(&mut self, _width: f64) {}
    fn set_line_cap(&mut self, _cap: LineCap) {}
    fn set_line_join(&mut self, _join: LineJoin) {}
    fn set_miter_limit(&mut self, _limit: f64) {}
    fn set_dash(&mut self, _segments: &[f64], _offset: f64) {}
    fn set_stroke_alpha(&mut self, _alpha: f64) {}
    fn set_fill_color(&mut self, _color: &str) {}
    fn set_fill_alpha(&mut self, _alpha: f64) {}
    fn set_composite_op(&mut self, _op: &str) {}

    fn transform(&mut self, m: Affine) {
        let current = self.current_mut();
        *current = *current * m;
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform(Affine::translate((dx, dy)));
    }

    fn rotate(&mut self, angle: f64) {
        self.transform(Affine::rotate(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform(Affine::scale_non_uniform(sx, sy));
    }

    fn save(&mut self) {
        self.transforms.push(self.current_transform());
    }

    fn restore(&mut self) {
        if self.transforms.len() > 1 {
            self.transforms.pop();
        }
    }

    fn set_path(&mut self, _path: &BezPath) {}
    fn fill(&mut self) {}
    fn stroke(&mut self) {}
    fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {}
    fn stroke_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {}
    fn fill_text(&mut self, _text: &str, _x: f64, _y: f64, _max_width: Option<f64>) {}
    fn draw_image(&mut self, _dx: f64, _dy: f64, _dw: f64, _dh: f64) {}
    fn clip(&mut self) {}
}

#[cfg(test)]
#[path = "../../tests/unit/record/surface.rs"]
mod tests;
