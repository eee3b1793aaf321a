//! Glimmer is a real-time 2D visual-effects engine.
//!
//! A frame-driven scheduler animates many independent drawable objects and
//! renders them onto a persistent host drawing surface:
//!
//! 1. **Clock/driver**: irregular hardware callbacks become a stable
//!    simulation timeline with fps capping and frame-skip recovery.
//! 2. **Animation**: per-object progress tweens (parallel set + serial
//!    backlog) with easing and finite/infinite repeat semantics.
//! 3. **Batching**: draw calls are deferred, merged by style key and applied
//!    through a state-diffing cache to minimize surface mutations.
//!
//! The host supplies two things: a [`Surface`] implementation and a callback
//! loop that keeps calling [`Engine::frame`] with high-resolution timestamps
//! while it returns [`LoopDirective::Continue`].
//!
//! Units: durations and timestamps are milliseconds; deltas surfaced to
//! animation callbacks are seconds.
#![forbid(unsafe_code)]

mod animation;
mod clock;
mod drawable;
mod drawables;
mod engine;
mod foundation;
mod render;

pub use animation::drive::{custom, fade_to, move_by, move_to, rotate_by, scale_to};
pub use animation::ease::Ease;
pub use animation::queue::{TweenId, TweenQueue};
pub use animation::tween::{Tween, TweenFrame, TweenStatus};
pub use clock::{Clock, DEFAULT_MAX_DELTA_SECS, FpsCap, MIN_FRAME_INTERVAL_MS};
pub use drawable::{DEFAULT_ACTIVATION_MARGIN, Drawable, Placement};
pub use drawables::banner::Banner;
pub use drawables::dot::Dot;
pub use drawables::polygon::Polygon;
pub use drawables::sprite::Sprite;
pub use engine::{
    DEFAULT_VISIBILITY_THRESHOLD, DrawableId, Engine, EngineOptions, LoopDirective, LoopState,
    Tick,
};
pub use foundation::core::{
    Affine, BezPath, Canvas, Circle, ImageHandle, Point, Rect, Rgba8, Vec2,
};
pub use foundation::error::{GlimmerError, GlimmerResult};
pub use render::batch::BatchCollector;
pub use render::state::StateCache;
pub use render::style::{
    CompositeMode, DrawEffects, FillStyle, FontSpec, GradientStop, LineCap, LineJoin,
    LinearGradient, Paint, Pattern, PatternRepeat, RadialGradient, StrokeStyle, TextAlign,
    TextBaseline, TextStyle,
};
pub use render::surface::{NullSurface, Surface};
pub use render::{Pass, Renderer};
