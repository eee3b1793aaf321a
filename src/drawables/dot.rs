use kurbo::{Circle, Point, Shape};

use crate::animation::queue::TweenQueue;
use crate::drawable::{Drawable, Placement};
use crate::engine::Tick;
use crate::foundation::error::GlimmerResult;
use crate::render::Renderer;
use crate::render::style::{DrawEffects, FillStyle};

const PATH_TOLERANCE: f64 = 0.1;

/// A filled circle.
pub struct Dot {
    pub placement: Placement,
    pub radius: f64,
    pub style: FillStyle,
    pub tweens: TweenQueue<Placement>,
}

impl Dot {
    pub fn new(pos: Point, radius: f64, style: FillStyle) -> Self {
        Self {
            placement: Placement::at(pos),
            radius,
            style,
            tweens: TweenQueue::new(),
        }
    }
}

impl Drawable for Dot {
    fn draw(&mut self, render: &mut Renderer<'_>, tick: Tick) -> GlimmerResult<()> {
        self.tweens
            .advance(&mut self.placement, tick.time_ms, tick.delta_secs);

        let radius = (self.radius * self.placement.scale.x).max(0.0);
        let path = Circle::new(self.placement.pos, radius).to_path(PATH_TOLERANCE);
        render.batch_fill(
            path,
            &self.style,
            DrawEffects::with_alpha(self.placement.opacity),
        );
        Ok(())
    }

    fn pos(&self) -> Point {
        self.placement.pos
    }
}
