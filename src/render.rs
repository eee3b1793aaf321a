pub mod batch;
pub mod state;
pub mod style;
pub mod surface;

use kurbo::{BezPath, Point, Rect};

use crate::foundation::core::ImageHandle;
use crate::foundation::error::GlimmerResult;
use crate::render::batch::BatchCollector;
use crate::render::state::StateCache;
use crate::render::style::{DrawEffects, FillStyle, StrokeStyle, TextStyle};
use crate::render::surface::Surface;

/// Cache-aware immediate draw access: the surface plus the state cache that
/// arbitrates every write to it.
///
/// Used by the renderer's immediate operations and handed to deferred
/// standalone closures after the batched passes.
pub struct Pass<'a> {
    surface: &'a mut dyn Surface,
    cache: &'a mut StateCache,
}

impl<'a> Pass<'a> {
    pub(crate) fn new(surface: &'a mut dyn Surface, cache: &'a mut StateCache) -> Self {
        Self { surface, cache }
    }

    /// Immediate fill through the state cache.
    pub fn fill(&mut self, path: &BezPath, style: &FillStyle) -> GlimmerResult<()> {
        self.cache.apply_fill_style(&mut *self.surface, style)?;
        self.surface.fill_path(path)
    }

    /// Immediate stroke through the state cache.
    pub fn stroke(&mut self, path: &BezPath, style: &StrokeStyle) -> GlimmerResult<()> {
        self.cache.apply_stroke_style(&mut *self.surface, style)?;
        self.surface.stroke_path(path)
    }

    pub fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> GlimmerResult<()> {
        self.cache.apply_text_style(&mut *self.surface, style)?;
        self.surface.fill_text(text, at)
    }

    pub fn stroke_text(&mut self, text: &str, at: Point, style: &TextStyle) -> GlimmerResult<()> {
        self.cache.apply_text_stroke_style(&mut *self.surface, style)?;
        self.surface.stroke_text(text, at)
    }

    pub fn draw_image(
        &mut self,
        image: ImageHandle,
        src: Option<Rect>,
        dst: Rect,
        effects: DrawEffects,
    ) -> GlimmerResult<()> {
        self.cache.set_global_alpha(&mut *self.surface, effects.alpha)?;
        self.cache
            .set_composite_mode(&mut *self.surface, effects.composite.unwrap_or_default())?;
        self.cache.set_filter(&mut *self.surface, None)?;
        self.surface.draw_image(image, src, dst)
    }

    /// Erase a region of the persistent surface.
    pub fn clear(&mut self, region: Rect) -> GlimmerResult<()> {
        self.surface.clear(region)
    }
}

/// Draw interface handed to drawables each tick.
///
/// `batch_*` calls defer and merge geometry by style; immediate calls go
/// straight to the surface but share the same state cache, so the
/// write-iff-changed invariant holds on both paths. Visibility is checked
/// once, at submission time: a fade crossing the threshold between
/// submission and flush is not re-checked.
pub struct Renderer<'a> {
    pass: Pass<'a>,
    batch: &'a mut BatchCollector,
    threshold: f32,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(
        surface: &'a mut dyn Surface,
        cache: &'a mut StateCache,
        batch: &'a mut BatchCollector,
        threshold: f32,
    ) -> Self {
        Self {
            pass: Pass::new(surface, cache),
            batch,
            threshold,
        }
    }

    fn visible(&self, alpha: f32) -> bool {
        alpha >= self.threshold
    }

    /// Queue geometry for the merged fill pass. Draws below the visibility
    /// threshold are silently dropped.
    pub fn batch_fill(&mut self, path: BezPath, style: &FillStyle, effects: DrawEffects) {
        let style = style.with_effects(effects);
        if !self.visible(style.opacity) {
            return;
        }
        self.batch.add_fill(style, path);
    }

    /// Queue geometry for the merged stroke pass.
    pub fn batch_stroke(&mut self, path: BezPath, style: &StrokeStyle, effects: DrawEffects) {
        let style = style.with_effects(effects);
        if !self.visible(style.opacity) {
            return;
        }
        self.batch.add_stroke(style, path);
    }

    /// Immediate, cache-aware fill.
    pub fn fill(
        &mut self,
        path: &BezPath,
        style: &FillStyle,
        effects: DrawEffects,
    ) -> GlimmerResult<()> {
        let style = style.with_effects(effects);
        if !self.visible(style.opacity) {
            return Ok(());
        }
        self.pass.fill(path, &style)
    }

    /// Immediate, cache-aware stroke.
    pub fn stroke(
        &mut self,
        path: &BezPath,
        style: &StrokeStyle,
        effects: DrawEffects,
    ) -> GlimmerResult<()> {
        let style = style.with_effects(effects);
        if !self.visible(style.opacity) {
            return Ok(());
        }
        self.pass.stroke(path, &style)
    }

    pub fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        style: &TextStyle,
        effects: DrawEffects,
    ) -> GlimmerResult<()> {
        let style = style.with_effects(effects);
        if !self.visible(style.opacity) {
            return Ok(());
        }
        self.pass.fill_text(text, at, &style)
    }

    pub fn stroke_text(
        &mut self,
        text: &str,
        at: Point,
        style: &TextStyle,
        effects: DrawEffects,
    ) -> GlimmerResult<()> {
        let style = style.with_effects(effects);
        if !self.visible(style.opacity) {
            return Ok(());
        }
        self.pass.stroke_text(text, at, &style)
    }

    pub fn draw_image(
        &mut self,
        image: ImageHandle,
        src: Option<Rect>,
        dst: Rect,
        effects: DrawEffects,
    ) -> GlimmerResult<()> {
        if !self.visible(effects.alpha) {
            return Ok(());
        }
        self.pass.draw_image(image, src, dst, effects)
    }

    /// Defer an order-sensitive draw until after the batched passes.
    ///
    /// Standalones run last, in insertion order, against the same cache-aware
    /// [`Pass`] the batched passes used.
    pub fn defer(
        &mut self,
        call: impl FnOnce(&mut Pass<'_>) -> GlimmerResult<()> + 'static,
    ) {
        self.batch.defer(Box::new(call));
    }

    /// Issue all deferred work for this tick: strokes, then fills, then a
    /// cache-aware reset to engine defaults, then standalones. The collector
    /// is emptied up front, so contents never leak into the next tick even
    /// when a surface call fails mid-flush.
    pub(crate) fn flush(&mut self) -> GlimmerResult<()> {
        let drain = self.batch.take();
        tracing::trace!(
            strokes = drain.strokes.len(),
            fills = drain.fills.len(),
            standalones = drain.standalones.len(),
            "flushing deferred draws"
        );

        for (style, path) in &drain.strokes {
            self.pass
                .cache
                .apply_stroke_style(&mut *self.pass.surface, style)?;
            self.pass.surface.stroke_path(path)?;
        }
        for (style, path) in &drain.fills {
            self.pass
                .cache
                .apply_fill_style(&mut *self.pass.surface, style)?;
            self.pass.surface.fill_path(path)?;
        }
        self.pass.cache.reset(&mut *self.pass.surface)?;

        for call in drain.standalones {
            call(&mut self.pass)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/render/flush.rs"]
mod flush_tests;
