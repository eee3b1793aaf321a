use kurbo::{Point, Vec2};

use crate::engine::Tick;
use crate::foundation::error::GlimmerResult;
use crate::render::Renderer;

/// Distance outside the viewport within which a drawable still ticks, in
/// surface pixels.
pub const DEFAULT_ACTIVATION_MARGIN: f64 = 100.0;

/// Spatial and visual state shared by drawable kinds and mutated by tweens.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    pub pos: Point,
    pub scale: Vec2,
    /// Rotation around `pos`, in radians.
    pub rotation: f64,
    /// Object opacity in `[0, 1]`, multiplied into every draw.
    pub opacity: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            pos: Point::ORIGIN,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl Placement {
    pub fn at(pos: Point) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }
}

/// Capability contract for objects the engine ticks and draws.
///
/// Concrete kinds compose a [`TweenQueue`](crate::TweenQueue) and submit
/// geometry through the [`Renderer`]; the engine never needs to know the
/// kind.
pub trait Drawable {
    /// Advance animations and submit geometry for this tick.
    ///
    /// An error skips this object for the tick; it never halts the loop.
    fn draw(&mut self, render: &mut Renderer<'_>, tick: Tick) -> GlimmerResult<()>;

    /// Current position, used for activation-bound checks.
    fn pos(&self) -> Point;

    /// How far outside the viewport this object keeps ticking.
    fn activation_margin(&self) -> f64 {
        DEFAULT_ACTIVATION_MARGIN
    }
}
