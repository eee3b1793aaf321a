use super::*;

use kurbo::Shape;

use crate::foundation::core::Rgba8;
use crate::foundation::error::GlimmerError;
use crate::render::style::{
    CompositeMode, FontSpec, GradientStop, LineCap, LineJoin, LinearGradient, Paint, TextAlign,
    TextBaseline,
};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    FillPaint(Paint),
    StrokePaint(Paint),
    Alpha(f32),
    Composite(CompositeMode),
    Filter(Option<String>),
    LineWidth(f64),
    Cap(LineCap),
    Join(LineJoin),
    Dash(Vec<f64>),
    DashOffset(f64),
    Font(FontSpec),
    Align(TextAlign),
    Baseline(TextBaseline),
    FillPath(usize),
    StrokePath(usize),
    FillText(String),
    StrokeText(String),
    Image(ImageHandle),
    Clear,
}

#[derive(Debug, Default)]
struct RecordingSurface {
    calls: Vec<Call>,
    fail_fill: bool,
}

impl Surface for RecordingSurface {
    fn set_fill_paint(&mut self, paint: &Paint) -> GlimmerResult<()> {
        self.calls.push(Call::FillPaint(paint.clone()));
        Ok(())
    }

    fn set_stroke_paint(&mut self, paint: &Paint) -> GlimmerResult<()> {
        self.calls.push(Call::StrokePaint(paint.clone()));
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f32) -> GlimmerResult<()> {
        self.calls.push(Call::Alpha(alpha));
        Ok(())
    }

    fn set_composite_mode(&mut self, mode: CompositeMode) -> GlimmerResult<()> {
        self.calls.push(Call::Composite(mode));
        Ok(())
    }

    fn set_filter(&mut self, filter: Option<&str>) -> GlimmerResult<()> {
        self.calls.push(Call::Filter(filter.map(str::to_owned)));
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) -> GlimmerResult<()> {
        self.calls.push(Call::LineWidth(width));
        Ok(())
    }

    fn set_line_cap(&mut self, cap: LineCap) -> GlimmerResult<()> {
        self.calls.push(Call::Cap(cap));
        Ok(())
    }

    fn set_line_join(&mut self, join: LineJoin) -> GlimmerResult<()> {
        self.calls.push(Call::Join(join));
        Ok(())
    }

    fn set_line_dash(&mut self, dash: &[f64]) -> GlimmerResult<()> {
        self.calls.push(Call::Dash(dash.to_vec()));
        Ok(())
    }

    fn set_dash_offset(&mut self, offset: f64) -> GlimmerResult<()> {
        self.calls.push(Call::DashOffset(offset));
        Ok(())
    }

    fn set_font(&mut self, font: &FontSpec) -> GlimmerResult<()> {
        self.calls.push(Call::Font(font.clone()));
        Ok(())
    }

    fn set_text_align(&mut self, align: TextAlign) -> GlimmerResult<()> {
        self.calls.push(Call::Align(align));
        Ok(())
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) -> GlimmerResult<()> {
        self.calls.push(Call::Baseline(baseline));
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath) -> GlimmerResult<()> {
        if self.fail_fill {
            return Err(GlimmerError::surface("fill rejected"));
        }
        self.calls.push(Call::FillPath(path.elements().len()));
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath) -> GlimmerResult<()> {
        self.calls.push(Call::StrokePath(path.elements().len()));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, _at: Point) -> GlimmerResult<()> {
        self.calls.push(Call::FillText(text.to_owned()));
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, _at: Point) -> GlimmerResult<()> {
        self.calls.push(Call::StrokeText(text.to_owned()));
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: ImageHandle,
        _src: Option<Rect>,
        _dst: Rect,
    ) -> GlimmerResult<()> {
        self.calls.push(Call::Image(image));
        Ok(())
    }

    fn clear(&mut self, _region: Rect) -> GlimmerResult<()> {
        self.calls.push(Call::Clear);
        Ok(())
    }
}

struct Fixture {
    surface: RecordingSurface,
    cache: StateCache,
    batch: BatchCollector,
}

impl Fixture {
    fn new() -> Self {
        Self {
            surface: RecordingSurface::default(),
            cache: StateCache::new(),
            batch: BatchCollector::new(),
        }
    }

    fn renderer(&mut self) -> Renderer<'_> {
        Renderer::new(&mut self.surface, &mut self.cache, &mut self.batch, 0.05)
    }
}

fn rect_path(x: f64) -> BezPath {
    Rect::new(x, 0.0, x + 10.0, 10.0).to_path(0.1)
}

fn count(calls: &[Call], pred: impl Fn(&Call) -> bool) -> usize {
    calls.iter().filter(|&c| pred(c)).count()
}

#[test]
fn merged_fills_issue_a_single_surface_call() {
    let mut fx = Fixture::new();
    let mut r = fx.renderer();
    let style = FillStyle::solid(Rgba8::BLACK);
    let els = rect_path(0.0).elements().len();

    for i in 0..4 {
        r.batch_fill(rect_path(f64::from(i) * 20.0), &style, DrawEffects::none());
    }
    r.flush().unwrap();

    let fills: Vec<&Call> = fx
        .surface
        .calls
        .iter()
        .filter(|c| matches!(c, Call::FillPath(_)))
        .collect();
    assert_eq!(fills, vec![&Call::FillPath(els * 4)]);
}

#[test]
fn distinct_signatures_issue_one_call_each() {
    let mut fx = Fixture::new();
    let mut r = fx.renderer();
    for rgb in [0x111111u32, 0x222222, 0x333333] {
        r.batch_fill(
            rect_path(0.0),
            &FillStyle::solid(Rgba8::from_rgb_u32(rgb)),
            DrawEffects::none(),
        );
    }
    r.flush().unwrap();
    assert_eq!(
        count(&fx.surface.calls, |c| matches!(c, Call::FillPath(_))),
        3
    );
}

#[test]
fn strokes_flush_before_fills() {
    let mut fx = Fixture::new();
    let mut r = fx.renderer();
    r.batch_fill(rect_path(0.0), &FillStyle::solid(Rgba8::BLACK), DrawEffects::none());
    r.batch_stroke(
        rect_path(0.0),
        &StrokeStyle::solid(Rgba8::WHITE, 2.0),
        DrawEffects::none(),
    );
    r.flush().unwrap();

    let stroke_at = fx
        .surface
        .calls
        .iter()
        .position(|c| matches!(c, Call::StrokePath(_)))
        .unwrap();
    let fill_at = fx
        .surface
        .calls
        .iter()
        .position(|c| matches!(c, Call::FillPath(_)))
        .unwrap();
    assert!(stroke_at < fill_at);
}

#[test]
fn standalones_run_last_in_insertion_order() {
    let mut fx = Fixture::new();
    let mut r = fx.renderer();
    let style = TextStyle::default();

    let first = style.clone();
    r.defer(move |pass| pass.fill_text("first", Point::ORIGIN, &first));
    let second = style.clone();
    r.defer(move |pass| pass.fill_text("second", Point::ORIGIN, &second));
    r.batch_fill(rect_path(0.0), &FillStyle::solid(Rgba8::BLACK), DrawEffects::none());
    r.flush().unwrap();

    let order: Vec<usize> = ["first", "second"]
        .iter()
        .map(|t| {
            fx.surface
                .calls
                .iter()
                .position(|c| matches!(c, Call::FillText(s) if s == t))
                .unwrap()
        })
        .collect();
    let fill_at = fx
        .surface
        .calls
        .iter()
        .position(|c| matches!(c, Call::FillPath(_)))
        .unwrap();
    assert!(fill_at < order[0]);
    assert!(order[0] < order[1]);
}

#[test]
fn visibility_boundary_is_inclusive() {
    let mut fx = Fixture::new();
    let mut r = fx.renderer();
    let style = FillStyle::solid(Rgba8::BLACK);

    r.batch_fill(rect_path(0.0), &style, DrawEffects::with_alpha(0.049));
    r.flush().unwrap();
    assert_eq!(count(&fx.surface.calls, |c| matches!(c, Call::FillPath(_))), 0);

    let mut r = fx.renderer();
    r.batch_fill(rect_path(0.0), &style, DrawEffects::with_alpha(0.05));
    r.flush().unwrap();
    assert_eq!(count(&fx.surface.calls, |c| matches!(c, Call::FillPath(_))), 1);
}

#[test]
fn shared_attributes_are_written_once_per_flush() {
    let mut fx = Fixture::new();
    let mut r = fx.renderer();
    let style = FillStyle::solid(Rgba8::from_rgb_u32(0xCC0000));

    r.batch_fill(rect_path(0.0), &style, DrawEffects::none());
    r.batch_fill(rect_path(20.0), &style, DrawEffects::with_alpha(0.5));
    r.flush().unwrap();

    // Two buckets (alpha differs), one paint write.
    assert_eq!(count(&fx.surface.calls, |c| matches!(c, Call::FillPath(_))), 2);
    let red = Paint::Solid(Rgba8::from_rgb_u32(0xCC0000));
    assert_eq!(
        count(&fx.surface.calls, |c| matches!(c, Call::FillPaint(p) if *p == red)),
        1
    );
}

#[test]
fn gradients_are_reapplied_every_flush() {
    let gradient = Paint::Linear(LinearGradient {
        start: Point::ORIGIN,
        end: Point::new(50.0, 0.0),
        stops: vec![GradientStop {
            offset: 0.0,
            color: Rgba8::WHITE,
        }],
    });
    let style = FillStyle {
        paint: gradient.clone(),
        ..FillStyle::default()
    };

    let mut fx = Fixture::new();
    for _ in 0..2 {
        let mut r = fx.renderer();
        r.batch_fill(rect_path(0.0), &style, DrawEffects::none());
        r.flush().unwrap();
    }
    assert_eq!(
        count(&fx.surface.calls, |c| matches!(c, Call::FillPaint(p) if *p == gradient)),
        2
    );
}

#[test]
fn immediate_draws_share_the_same_cache() {
    let mut fx = Fixture::new();
    let mut r = fx.renderer();
    let style = FillStyle::solid(Rgba8::from_rgb_u32(0x00AA00));

    r.fill(&rect_path(0.0), &style, DrawEffects::none()).unwrap();
    r.batch_fill(rect_path(20.0), &style, DrawEffects::none());
    r.flush().unwrap();

    // The flush's style application found everything already cached from the
    // immediate draw: the green paint went down exactly once.
    let green = Paint::Solid(Rgba8::from_rgb_u32(0x00AA00));
    assert_eq!(
        count(&fx.surface.calls, |c| matches!(c, Call::FillPaint(p) if *p == green)),
        1
    );
    assert_eq!(count(&fx.surface.calls, |c| matches!(c, Call::FillPath(_))), 2);
}

#[test]
fn state_resets_to_defaults_between_passes_and_standalones() {
    let mut fx = Fixture::new();
    let mut r = fx.renderer();
    let mut style = FillStyle::solid(Rgba8::WHITE);
    style.composite = CompositeMode::Lighter;
    style.opacity = 0.5;

    r.batch_fill(rect_path(0.0), &style, DrawEffects::none());
    r.defer(|pass| pass.clear(Rect::new(0.0, 0.0, 1.0, 1.0)));
    r.flush().unwrap();

    let clear_at = fx
        .surface
        .calls
        .iter()
        .position(|c| matches!(c, Call::Clear))
        .unwrap();
    let reset_alpha = fx.surface.calls[..clear_at]
        .iter()
        .rposition(|c| matches!(c, Call::Alpha(a) if *a == 1.0));
    let reset_composite = fx.surface.calls[..clear_at]
        .iter()
        .rposition(|c| matches!(c, Call::Composite(CompositeMode::SourceOver)));
    assert!(reset_alpha.is_some());
    assert!(reset_composite.is_some());
}

#[test]
fn failed_flush_still_clears_the_collector() {
    let mut fx = Fixture::new();
    fx.surface.fail_fill = true;
    let mut r = fx.renderer();
    r.batch_fill(rect_path(0.0), &FillStyle::solid(Rgba8::BLACK), DrawEffects::none());
    assert!(r.flush().is_err());
    assert!(fx.batch.is_empty());

    fx.surface.fail_fill = false;
    let mut r = fx.renderer();
    r.flush().unwrap();
    assert_eq!(count(&fx.surface.calls, |c| matches!(c, Call::FillPath(_))), 0);
}

#[test]
fn image_draws_go_through_the_alpha_cache() {
    let mut fx = Fixture::new();
    let mut r = fx.renderer();
    let handle = ImageHandle(7);
    r.draw_image(handle, None, Rect::new(0.0, 0.0, 8.0, 8.0), DrawEffects::none())
        .unwrap();
    r.draw_image(handle, None, Rect::new(8.0, 0.0, 16.0, 8.0), DrawEffects::none())
        .unwrap();

    assert_eq!(count(&fx.surface.calls, |c| matches!(c, Call::Image(_))), 2);
    assert_eq!(count(&fx.surface.calls, |c| matches!(c, Call::Alpha(_))), 1);
}
