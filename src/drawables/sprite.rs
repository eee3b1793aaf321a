use kurbo::{Point, Rect, Vec2};

use crate::animation::queue::TweenQueue;
use crate::drawable::{Drawable, Placement};
use crate::engine::Tick;
use crate::foundation::core::ImageHandle;
use crate::foundation::error::GlimmerResult;
use crate::render::Renderer;
use crate::render::style::DrawEffects;

/// An image drawable, centered on its position.
///
/// A `live` sprite defers its draw as a standalone so it runs after the
/// batched passes in submission order; that keeps sources that change
/// between submission and flush (a live canvas feeding the image) correct.
pub struct Sprite {
    pub placement: Placement,
    pub image: ImageHandle,
    /// Destination size before placement scaling.
    pub size: Vec2,
    live: bool,
    pub tweens: TweenQueue<Placement>,
}

impl Sprite {
    pub fn new(pos: Point, image: ImageHandle, size: Vec2) -> Self {
        Self {
            placement: Placement::at(pos),
            image,
            size,
            live: false,
            tweens: TweenQueue::new(),
        }
    }

    /// A sprite backed by a live, order-sensitive source.
    pub fn live(pos: Point, image: ImageHandle, size: Vec2) -> Self {
        Self {
            live: true,
            ..Self::new(pos, image, size)
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    fn dst_rect(&self) -> Rect {
        let p = &self.placement;
        let w = self.size.x * p.scale.x;
        let h = self.size.y * p.scale.y;
        Rect::new(
            p.pos.x - w / 2.0,
            p.pos.y - h / 2.0,
            p.pos.x + w / 2.0,
            p.pos.y + h / 2.0,
        )
    }
}

impl Drawable for Sprite {
    fn draw(&mut self, render: &mut Renderer<'_>, tick: Tick) -> GlimmerResult<()> {
        self.tweens
            .advance(&mut self.placement, tick.time_ms, tick.delta_secs);

        let dst = self.dst_rect();
        let effects = DrawEffects::with_alpha(self.placement.opacity);
        if self.live {
            let image = self.image;
            render.defer(move |pass| pass.draw_image(image, None, dst, effects));
            Ok(())
        } else {
            render.draw_image(self.image, None, dst, effects)
        }
    }

    fn pos(&self) -> Point {
        self.placement.pos
    }
}
