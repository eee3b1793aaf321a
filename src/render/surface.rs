use kurbo::{BezPath, Point, Rect};

use crate::foundation::core::ImageHandle;
use crate::foundation::error::GlimmerResult;
use crate::render::style::{
    CompositeMode, FontSpec, LineCap, LineJoin, Paint, TextAlign, TextBaseline,
};

/// Host drawing context driven by the engine.
///
/// The engine funnels every attribute write through its
/// [`StateCache`](crate::StateCache), so setters are only invoked when a
/// value actually changed. Gradient and pattern paints arrive as
/// descriptions and should be resolved to live paint objects on each call.
///
/// Implementations report failures as surface errors; the engine logs them
/// and drops the frame rather than halting the loop.
pub trait Surface {
    fn set_fill_paint(&mut self, paint: &Paint) -> GlimmerResult<()>;
    fn set_stroke_paint(&mut self, paint: &Paint) -> GlimmerResult<()>;
    fn set_global_alpha(&mut self, alpha: f32) -> GlimmerResult<()>;
    fn set_composite_mode(&mut self, mode: CompositeMode) -> GlimmerResult<()>;
    fn set_filter(&mut self, filter: Option<&str>) -> GlimmerResult<()>;
    fn set_line_width(&mut self, width: f64) -> GlimmerResult<()>;
    fn set_line_cap(&mut self, cap: LineCap) -> GlimmerResult<()>;
    fn set_line_join(&mut self, join: LineJoin) -> GlimmerResult<()>;
    fn set_line_dash(&mut self, dash: &[f64]) -> GlimmerResult<()>;
    fn set_dash_offset(&mut self, offset: f64) -> GlimmerResult<()>;
    fn set_font(&mut self, font: &FontSpec) -> GlimmerResult<()>;
    fn set_text_align(&mut self, align: TextAlign) -> GlimmerResult<()>;
    fn set_text_baseline(&mut self, baseline: TextBaseline) -> GlimmerResult<()>;

    fn fill_path(&mut self, path: &BezPath) -> GlimmerResult<()>;
    fn stroke_path(&mut self, path: &BezPath) -> GlimmerResult<()>;
    fn fill_text(&mut self, text: &str, at: Point) -> GlimmerResult<()>;
    fn stroke_text(&mut self, text: &str, at: Point) -> GlimmerResult<()>;
    fn draw_image(
        &mut self,
        image: ImageHandle,
        src: Option<Rect>,
        dst: Rect,
    ) -> GlimmerResult<()>;

    /// Erase a region of the persistent surface (the engine never clears on
    /// its own; trails are a feature).
    fn clear(&mut self, region: Rect) -> GlimmerResult<()>;
}

/// No-op surface for headless hosts and timing-only tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn set_fill_paint(&mut self, _paint: &Paint) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_stroke_paint(&mut self, _paint: &Paint) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_global_alpha(&mut self, _alpha: f32) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_composite_mode(&mut self, _mode: CompositeMode) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_filter(&mut self, _filter: Option<&str>) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_line_width(&mut self, _width: f64) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_line_cap(&mut self, _cap: LineCap) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_line_join(&mut self, _join: LineJoin) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_line_dash(&mut self, _dash: &[f64]) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_dash_offset(&mut self, _offset: f64) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_font(&mut self, _font: &FontSpec) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_text_align(&mut self, _align: TextAlign) -> GlimmerResult<()> {
        Ok(())
    }

    fn set_text_baseline(&mut self, _baseline: TextBaseline) -> GlimmerResult<()> {
        Ok(())
    }

    fn fill_path(&mut self, _path: &BezPath) -> GlimmerResult<()> {
        Ok(())
    }

    fn stroke_path(&mut self, _path: &BezPath) -> GlimmerResult<()> {
        Ok(())
    }

    fn fill_text(&mut self, _text: &str, _at: Point) -> GlimmerResult<()> {
        Ok(())
    }

    fn stroke_text(&mut self, _text: &str, _at: Point) -> GlimmerResult<()> {
        Ok(())
    }

    fn draw_image(
        &mut self,
        _image: ImageHandle,
        _src: Option<Rect>,
        _dst: Rect,
    ) -> GlimmerResult<()> {
        Ok(())
    }

    fn clear(&mut self, _region: Rect) -> GlimmerResult<()> {
        Ok(())
    }
}
