use crate::foundation::core::Rgba8;
use crate::foundation::error::GlimmerResult;
use crate::render::style::{
    CompositeMode, FillStyle, FontSpec, LineCap, LineJoin, Paint, StrokeStyle, TextAlign,
    TextBaseline, TextStyle,
};
use crate::render::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq)]
enum CachedPaint {
    Solid(Rgba8),
}

/// Last value written per surface attribute; gates every context write.
///
/// A write happens iff the new value differs from the cached one. This holds
/// identically for the batched flush path and immediate draws, since both
/// funnel through the same cache instance.
///
/// Only solid paints are cached by value. Gradient and pattern paints are
/// deliberately never cached: their geometry may be dynamic, so they are
/// re-resolved by the surface on every application.
///
/// Out-of-band context mutation (a host resize handler resetting state, for
/// example) must be followed by [`invalidate`](Self::invalidate); the cache
/// cannot detect it.
#[derive(Debug, Default)]
pub struct StateCache {
    fill_paint: Option<CachedPaint>,
    stroke_paint: Option<CachedPaint>,
    alpha: Option<u32>,
    composite: Option<CompositeMode>,
    filter: Option<Option<String>>,
    line_width: Option<u64>,
    line_cap: Option<LineCap>,
    line_join: Option<LineJoin>,
    dash: Option<Vec<u64>>,
    dash_offset: Option<u64>,
    font: Option<FontSpec>,
    text_align: Option<TextAlign>,
    text_baseline: Option<TextBaseline>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every cached value; the next applications rewrite everything.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set_fill_paint(
        &mut self,
        surface: &mut dyn Surface,
        paint: &Paint,
    ) -> GlimmerResult<()> {
        if let Paint::Solid(c) = paint {
            if self.fill_paint == Some(CachedPaint::Solid(*c)) {
                return Ok(());
            }
        }
        surface.set_fill_paint(paint)?;
        self.fill_paint = match paint {
            Paint::Solid(c) => Some(CachedPaint::Solid(*c)),
            _ => None,
        };
        Ok(())
    }

    pub(crate) fn set_stroke_paint(
        &mut self,
        surface: &mut dyn Surface,
        paint: &Paint,
    ) -> GlimmerResult<()> {
        if let Paint::Solid(c) = paint {
            if self.stroke_paint == Some(CachedPaint::Solid(*c)) {
                return Ok(());
            }
        }
        surface.set_stroke_paint(paint)?;
        self.stroke_paint = match paint {
            Paint::Solid(c) => Some(CachedPaint::Solid(*c)),
            _ => None,
        };
        Ok(())
    }

    pub(crate) fn set_global_alpha(
        &mut self,
        surface: &mut dyn Surface,
        alpha: f32,
    ) -> GlimmerResult<()> {
        let key = alpha.to_bits();
        if self.alpha == Some(key) {
            return Ok(());
        }
        surface.set_global_alpha(alpha)?;
        self.alpha = Some(key);
        Ok(())
    }

    pub(crate) fn set_composite_mode(
        &mut self,
        surface: &mut dyn Surface,
        mode: CompositeMode,
    ) -> GlimmerResult<()> {
        if self.composite == Some(mode) {
            return Ok(());
        }
        surface.set_composite_mode(mode)?;
        self.composite = Some(mode);
        Ok(())
    }

    pub(crate) fn set_filter(
        &mut self,
        surface: &mut dyn Surface,
        filter: Option<&str>,
    ) -> GlimmerResult<()> {
        if self.filter.as_ref().map(|f| f.as_deref()) == Some(filter) {
            return Ok(());
        }
        surface.set_filter(filter)?;
        self.filter = Some(filter.map(str::to_owned));
        Ok(())
    }

    pub(crate) fn set_line_width(
        &mut self,
        surface: &mut dyn Surface,
        width: f64,
    ) -> GlimmerResult<()> {
        let key = width.to_bits();
        if self.line_width == Some(key) {
            return Ok(());
        }
        surface.set_line_width(width)?;
        self.line_width = Some(key);
        Ok(())
    }

    pub(crate) fn set_line_cap(
        &mut self,
        surface: &mut dyn Surface,
        cap: LineCap,
    ) -> GlimmerResult<()> {
        if self.line_cap == Some(cap) {
            return Ok(());
        }
        surface.set_line_cap(cap)?;
        self.line_cap = Some(cap);
        Ok(())
    }

    pub(crate) fn set_line_join(
        &mut self,
        surface: &mut dyn Surface,
        join: LineJoin,
    ) -> GlimmerResult<()> {
        if self.line_join == Some(join) {
            return Ok(());
        }
        surface.set_line_join(join)?;
        self.line_join = Some(join);
        Ok(())
    }

    pub(crate) fn set_line_dash(
        &mut self,
        surface: &mut dyn Surface,
        dash: &[f64],
    ) -> GlimmerResult<()> {
        let key: Vec<u64> = dash.iter().map(|d| d.to_bits()).collect();
        if self.dash.as_ref() == Some(&key) {
            return Ok(());
        }
        surface.set_line_dash(dash)?;
        self.dash = Some(key);
        Ok(())
    }

    pub(crate) fn set_dash_offset(
        &mut self,
        surface: &mut dyn Surface,
        offset: f64,
    ) -> GlimmerResult<()> {
        let key = offset.to_bits();
        if self.dash_offset == Some(key) {
            return Ok(());
        }
        surface.set_dash_offset(offset)?;
        self.dash_offset = Some(key);
        Ok(())
    }

    pub(crate) fn set_font(
        &mut self,
        surface: &mut dyn Surface,
        font: &FontSpec,
    ) -> GlimmerResult<()> {
        if self.font.as_ref() == Some(font) {
            return Ok(());
        }
        surface.set_font(font)?;
        self.font = Some(font.clone());
        Ok(())
    }

    pub(crate) fn set_text_align(
        &mut self,
        surface: &mut dyn Surface,
        align: TextAlign,
    ) -> GlimmerResult<()> {
        if self.text_align == Some(align) {
            return Ok(());
        }
        surface.set_text_align(align)?;
        self.text_align = Some(align);
        Ok(())
    }

    pub(crate) fn set_text_baseline(
        &mut self,
        surface: &mut dyn Surface,
        baseline: TextBaseline,
    ) -> GlimmerResult<()> {
        if self.text_baseline == Some(baseline) {
            return Ok(());
        }
        surface.set_text_baseline(baseline)?;
        self.text_baseline = Some(baseline);
        Ok(())
    }

    pub(crate) fn apply_fill_style(
        &mut self,
        surface: &mut dyn Surface,
        style: &FillStyle,
    ) -> GlimmerResult<()> {
        self.set_fill_paint(surface, &style.paint)?;
        self.set_global_alpha(surface, style.opacity)?;
        self.set_composite_mode(surface, style.composite)?;
        self.set_filter(surface, style.filter.as_deref())
    }

    pub(crate) fn apply_stroke_style(
        &mut self,
        surface: &mut dyn Surface,
        style: &StrokeStyle,
    ) -> GlimmerResult<()> {
        self.set_stroke_paint(surface, &style.paint)?;
        self.set_global_alpha(surface, style.opacity)?;
        self.set_composite_mode(surface, style.composite)?;
        self.set_filter(surface, style.filter.as_deref())?;
        self.set_line_width(surface, style.width)?;
        self.set_line_cap(surface, style.cap)?;
        self.set_line_join(surface, style.join)?;
        self.set_line_dash(surface, &style.dash)?;
        self.set_dash_offset(surface, style.dash_offset)
    }

    pub(crate) fn apply_text_style(
        &mut self,
        surface: &mut dyn Surface,
        style: &TextStyle,
    ) -> GlimmerResult<()> {
        self.set_font(surface, &style.font)?;
        self.set_text_align(surface, style.align)?;
        self.set_text_baseline(surface, style.baseline)?;
        self.set_fill_paint(surface, &style.paint)?;
        self.set_global_alpha(surface, style.opacity)?;
        self.set_composite_mode(surface, style.composite)?;
        self.set_filter(surface, None)
    }

    pub(crate) fn apply_text_stroke_style(
        &mut self,
        surface: &mut dyn Surface,
        style: &TextStyle,
    ) -> GlimmerResult<()> {
        self.set_font(surface, &style.font)?;
        self.set_text_align(surface, style.align)?;
        self.set_text_baseline(surface, style.baseline)?;
        self.set_stroke_paint(surface, &style.paint)?;
        self.set_global_alpha(surface, style.opacity)?;
        self.set_composite_mode(surface, style.composite)?;
        self.set_filter(surface, None)
    }

    /// Return the visual and stroke attribute groups to engine defaults,
    /// cache-aware like every other write.
    pub(crate) fn reset(&mut self, surface: &mut dyn Surface) -> GlimmerResult<()> {
        self.set_fill_paint(surface, &Paint::default())?;
        self.set_stroke_paint(surface, &Paint::default())?;
        self.set_global_alpha(surface, 1.0)?;
        self.set_composite_mode(surface, CompositeMode::default())?;
        self.set_filter(surface, None)?;
        self.set_line_width(surface, 1.0)?;
        self.set_line_cap(surface, LineCap::default())?;
        self.set_line_join(surface, LineJoin::default())?;
        self.set_line_dash(surface, &[])?;
        self.set_dash_offset(surface, 0.0)
    }
}
