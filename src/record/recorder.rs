use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, OpIndex, Rect, SurfaceSize};
use crate::foundation::error::OpweaveResult;
use crate::record::surface::{Canvas2d, LineCap, LineJoin};
use crate::state::attrs::Attr;
use crate::track::tracker::{GroupRecord, Recording, Tracker, TrackerPolicy};

/// Intercepting proxy over a drawing surface.
///
/// Owns the surface and a [`Tracker`], and mirrors the surface's call
/// surface one method at a time: state setters record attribute bindings
/// before delegating, drawing calls stage a transform-aware bounding box
/// and resolve the attributes relevant to their visual effect, and
/// anything whose footprint cannot be bounded falls back to the maximal
/// extent. Route every call to the surface through the recorder; calls
/// that bypass it are invisible to the dependency graph.
#[derive(Debug)]
pub struct CanvasRecorder<S, D> {
    surface: S,
    tracker: Tracker<D>,
    // Shadow of the numeric stroke width, save/restore scoped, so stroke
    // bounds can be inflated by half the width at draw time.
    line_widths: Vec<f64>,
    // Local-space bounds of the staged path, if one is staged.
    path_bounds: Option<Rect>,
}

impl<S: Canvas2d, D: Clone> CanvasRecorder<S, D> {
    /// Wrap a surface, reading its fixed dimensions once for
    /// normalization.
    pub fn new(surface: S, policy: TrackerPolicy) -> OpweaveResult<Self> {
        let size = SurfaceSize::new(surface.width(), surface.height())?;
        Ok(Self {
            surface,
            tracker: Tracker::new(size, policy),
            line_widths: vec![1.0],
            path_bounds: None,
        })
    }

    /// The wrapped surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The underlying tracker, for group payloads, named dependencies, and
    /// direct registration from call sites the recorder does not model.
    pub fn tracker_mut(&mut self) -> &mut Tracker<D> {
        &mut self.tracker
    }

    /// Open a logical group; everything recorded until the matching
    /// [`CanvasRecorder::finish_group`] accumulates into it.
    pub fn begin_group(&mut self, tag: impl Into<String>, payload: D) -> OpweaveResult<()> {
        self.tracker.start_group(tag, payload)
    }

    /// Close the innermost group. See [`Tracker::end_group`] for the
    /// mismatched-tag semantics.
    pub fn finish_group(&mut self, expected_tag: Option<&str>) -> OpweaveResult<Option<GroupRecord<D>>> {
        self.tracker.end_group(expected_tag)
    }

    /// End the recording pass, returning the surface and the exported
    /// records.
    pub fn finish(mut self) -> OpweaveResult<(S, Recording<D>)> {
        let recording = self.tracker.take()?;
        Ok((self.surface, recording))
    }

    /// Set the stroke width.
    pub fn set_line_width(&mut self, width: f64) -> OpweaveResult<()> {
        self.scalar_write(Attr::LineWidth)?;
        if let Some(top) = self.line_widths.last_mut() {
            *top = width;
        }
        self.surface.set_line_width(width);
        Ok(())
    }

    /// Set the stroke cap style.
    pub fn set_line_cap(&mut self, cap: LineCap) -> OpweaveResult<()> {
        self.scalar_write(Attr::LineCap)?;
        self.surface.set_line_cap(cap);
        Ok(())
    }

    /// Set the stroke join style.
    pub fn set_line_join(&mut self, join: LineJoin) -> OpweaveResult<()> {
        self.scalar_write(Attr::LineJoin)?;
        self.surface.set_line_join(join);
        Ok(())
    }

    /// Set the miter limit.
    pub fn set_miter_limit(&mut self, limit: f64) -> OpweaveResult<()> {
        self.scalar_write(Attr::MiterLimit)?;
        self.surface.set_miter_limit(limit);
        Ok(())
    }

    /// Set the dash pattern and offset.
    pub fn set_dash(&mut self, segments: &[f64], offset: f64) -> OpweaveResult<()> {
        self.scalar_write(Attr::Dash)?;
        self.surface.set_dash(segments, offset);
        Ok(())
    }

    /// Set the stroke alpha.
    pub fn set_stroke_alpha(&mut self, alpha: f64) -> OpweaveResult<()> {
        self.scalar_write(Attr::StrokeAlpha)?;
        self.surface.set_stroke_alpha(alpha);
        Ok(())
    }

    /// Set the fill color or paint.
    pub fn set_fill_color(&mut self, color: &str) -> OpweaveResult<()> {
        self.scalar_write(Attr::FillColor)?;
        self.surface.set_fill_color(color);
        Ok(())
    }

    /// Set the fill alpha.
    pub fn set_fill_alpha(&mut self, alpha: f64) -> OpweaveResult<()> {
        self.scalar_write(Attr::FillAlpha)?;
        self.surface.set_fill_alpha(alpha);
        Ok(())
    }

    /// Set the global composite operation.
    pub fn set_composite_op(&mut self, op: &str) -> OpweaveResult<()> {
        self.scalar_write(Attr::CompositeOp)?;
        self.surface.set_composite_op(op);
        Ok(())
    }

    /// Concatenate an affine transform.
    pub fn transform(&mut self, m: Affine) -> OpweaveResult<()> {
        self.transform_write()?;
        self.surface.transform(m);
        Ok(())
    }

    /// Concatenate a translation.
    pub fn translate(&mut self, dx: f64, dy: f64) -> OpweaveResult<()> {
        self.transform_write()?;
        self.surface.translate(dx, dy);
        Ok(())
    }

    /// Concatenate a rotation, in radians.
    pub fn rotate(&mut self, angle: f64) -> OpweaveResult<()> {
        self.transform_write()?;
        self.surface.rotate(angle);
        Ok(())
    }

    /// Concatenate a scale.
    pub fn scale(&mut self, sx: f64, sy: f64) -> OpweaveResult<()> {
        self.transform_write()?;
        self.surface.scale(sx, sy);
        Ok(())
    }

    /// Push the graphics state, opening a save/restore bracket.
    pub fn save(&mut self) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        // The save's own record is taken before its bracket opens so the
        // operation does not depend on its own restore.
        self.tracker.record_operation(idx)?;
        self.tracker.save(idx)?;
        let width = self.current_line_width();
        self.line_widths.push(width);
        self.surface.save();
        Ok(())
    }

    /// Pop the graphics state, closing the innermost bracket. More
    /// restores than saves is a fatal usage error.
    pub fn restore(&mut self) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        self.tracker.restore(idx)?;
        self.tracker.record_operation(idx)?;
        if self.line_widths.len() > 1 {
            self.line_widths.pop();
        }
        self.surface.restore();
        Ok(())
    }

    /// Replace the staged path.
    pub fn set_path(&mut self, path: &BezPath) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        self.tracker.record_scalar(Attr::Path, idx)?;
        self.tracker.record_operation(idx)?;
        self.path_bounds = Some(path.bounding_box());
        self.surface.set_path(path);
        Ok(())
    }

    /// Fill the staged path.
    pub fn fill(&mut self) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        match self.path_bounds {
            Some(rect) => self.register_rect(idx, rect)?,
            None => self.tracker.mark_unbounded(idx)?,
        }
        self.tracker.resolve_by_names(idx, Attr::FILL)?;
        self.tracker.resolve_by_names(idx, &[Attr::Path])?;
        self.tracker.record_operation(idx)?;
        self.surface.fill();
        Ok(())
    }

    /// Stroke the staged path; bounds are inflated by half the current
    /// stroke width.
    pub fn stroke(&mut self) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        match self.path_bounds {
            Some(rect) => {
                let half = self.current_line_width() / 2.0;
                self.register_rect(idx, rect.inflate(half, half))?;
            }
            None => self.tracker.mark_unbounded(idx)?,
        }
        self.tracker.resolve_by_names(idx, Attr::STROKE)?;
        self.tracker.resolve_by_names(idx, &[Attr::Path])?;
        self.tracker.record_operation(idx)?;
        self.surface.stroke();
        Ok(())
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        let transform = self.surface.current_transform();
        self.tracker.register_box(idx, transform, x, x + w, y, y + h)?;
        self.tracker.resolve_by_names(idx, Attr::FILL)?;
        self.tracker.record_operation(idx)?;
        self.surface.fill_rect(x, y, w, h);
        Ok(())
    }

    /// Stroke an axis-aligned rectangle, inflated by half the stroke
    /// width.
    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        let half = self.current_line_width() / 2.0;
        let transform = self.surface.current_transform();
        self.tracker
            .register_box(idx, transform, x - half, x + w + half, y - half, y + h + half)?;
        self.tracker.resolve_by_names(idx, Attr::STROKE)?;
        self.tracker.record_operation(idx)?;
        self.surface.stroke_rect(x, y, w, h);
        Ok(())
    }

    /// Fill a text run at a baseline position, measuring it through the
    /// surface to bound its ink extent.
    pub fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        let metrics = self.surface.measure_text(text);
        let advance = match max_width {
            Some(limit) => metrics.width.min(limit),
            None => metrics.width,
        };
        let transform = self.surface.current_transform();
        self.tracker.register_box(
            idx,
            transform,
            x,
            x + advance,
            y - metrics.ascent,
            y + metrics.descent,
        )?;
        self.tracker.resolve_by_names(idx, Attr::TEXT)?;
        self.tracker.record_operation(idx)?;
        self.surface.fill_text(text, x, y, max_width);
        Ok(())
    }

    /// Draw an image into the destination rectangle.
    pub fn draw_image(&mut self, dx: f64, dy: f64, dw: f64, dh: f64) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        let transform = self.surface.current_transform();
        self.tracker
            .register_box(idx, transform, dx, dx + dw, dy, dy + dh)?;
        self.tracker
            .resolve_by_names(idx, &[Attr::CompositeOp, Attr::FillAlpha, Attr::Transform])?;
        self.tracker.record_operation(idx)?;
        self.surface.draw_image(dx, dy, dw, dh);
        Ok(())
    }

    /// Intersect the clip region with the staged path. The footprint of
    /// everything drawn after a clip cannot be bounded from here, so this
    /// takes the conservative unbounded fallback.
    pub fn clip(&mut self) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        self.tracker.mark_unbounded(idx)?;
        self.tracker.resolve_by_names(idx, &[Attr::Path, Attr::Transform])?;
        self.tracker.record_operation(idx)?;
        self.surface.clip();
        Ok(())
    }

    fn scalar_write(&mut self, attr: Attr) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        self.tracker.record_scalar(attr, idx)?;
        self.tracker.record_operation(idx)?;
        Ok(())
    }

    fn transform_write(&mut self) -> OpweaveResult<()> {
        let idx = self.tracker.next_index()?;
        self.tracker.record_incremental(Attr::Transform, idx)?;
        self.tracker.record_operation(idx)?;
        Ok(())
    }

    fn register_rect(&mut self, idx: OpIndex, rect: Rect) -> OpweaveResult<()> {
        let transform = self.surface.current_transform();
        self.tracker
            .register_box(idx, transform, rect.x0, rect.x1, rect.y0, rect.y1)
    }

    fn current_line_width(&self) -> f64 {
        self.line_widths.last().copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/recorder.rs"]
mod tests;
