use kurbo::{BezPath, Point};

use crate::animation::queue::TweenQueue;
use crate::drawable::{Drawable, Placement};
use crate::engine::Tick;
use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::render::Renderer;
use crate::render::style::{DrawEffects, FillStyle, StrokeStyle};

/// A regular n-gon with optional fill and stroke.
pub struct Polygon {
    pub placement: Placement,
    sides: u32,
    pub radius: f64,
    pub fill: Option<FillStyle>,
    pub stroke: Option<StrokeStyle>,
    pub tweens: TweenQueue<Placement>,
}

impl Polygon {
    pub fn new(pos: Point, sides: u32, radius: f64) -> GlimmerResult<Self> {
        if sides < 3 {
            return Err(GlimmerError::validation("polygon needs at least 3 sides"));
        }
        Ok(Self {
            placement: Placement::at(pos),
            sides,
            radius,
            fill: None,
            stroke: None,
            tweens: TweenQueue::new(),
        })
    }

    pub fn with_fill(mut self, style: FillStyle) -> Self {
        self.fill = Some(style);
        self
    }

    pub fn with_stroke(mut self, style: StrokeStyle) -> Self {
        self.stroke = Some(style);
        self
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    fn outline(&self) -> BezPath {
        let p = &self.placement;
        let step = std::f64::consts::TAU / f64::from(self.sides);
        let mut path = BezPath::new();
        for i in 0..self.sides {
            let theta = p.rotation + f64::from(i) * step;
            let at = Point::new(
                p.pos.x + theta.cos() * self.radius * p.scale.x,
                p.pos.y + theta.sin() * self.radius * p.scale.y,
            );
            if i == 0 {
                path.move_to(at);
            } else {
                path.line_to(at);
            }
        }
        path.close_path();
        path
    }
}

impl Drawable for Polygon {
    fn draw(&mut self, render: &mut Renderer<'_>, tick: Tick) -> GlimmerResult<()> {
        self.tweens
            .advance(&mut self.placement, tick.time_ms, tick.delta_secs);

        let effects = DrawEffects::with_alpha(self.placement.opacity);
        let path = self.outline();
        if let Some(stroke) = &self.stroke {
            render.batch_stroke(path.clone(), stroke, effects);
        }
        if let Some(fill) = &self.fill {
            render.batch_fill(path, fill, effects);
        }
        Ok(())
    }

    fn pos(&self) -> Point {
        self.placement.pos
    }
}
