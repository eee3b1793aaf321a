use kurbo::Point;

use crate::animation::queue::TweenQueue;
use crate::drawable::{Drawable, Placement};
use crate::engine::Tick;
use crate::foundation::error::GlimmerResult;
use crate::render::Renderer;
use crate::render::style::{DrawEffects, TextStyle};

/// A text label drawn immediately through the state cache.
pub struct Banner {
    pub placement: Placement,
    pub text: String,
    pub style: TextStyle,
    pub tweens: TweenQueue<Placement>,
}

impl Banner {
    pub fn new(pos: Point, text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            placement: Placement::at(pos),
            text: text.into(),
            style,
            tweens: TweenQueue::new(),
        }
    }
}

impl Drawable for Banner {
    fn draw(&mut self, render: &mut Renderer<'_>, tick: Tick) -> GlimmerResult<()> {
        self.tweens
            .advance(&mut self.placement, tick.time_ms, tick.delta_secs);

        render.fill_text(
            &self.text,
            self.placement.pos,
            &self.style,
            DrawEffects::with_alpha(self.placement.opacity),
        )
    }

    fn pos(&self) -> Point {
        self.placement.pos
    }
}
