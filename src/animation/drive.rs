//! Tween constructors for the common placement properties.
//!
//! Start values are latched from the target on the first update, so these
//! compose with whatever state earlier tweens left behind.

use kurbo::{Point, Vec2};

use crate::animation::ease::Ease;
use crate::animation::tween::Tween;
use crate::drawable::Placement;

/// Move to an absolute position.
pub fn move_to(dest: Point, duration_ms: f64, ease: Ease) -> Tween<Placement> {
    let mut from = None;
    Tween::new(duration_ms, ease, move |p: &mut Placement, frame| {
        let from = *from.get_or_insert(p.pos);
        p.pos = from.lerp(dest, frame.progress);
    })
}

/// Move by a relative offset.
pub fn move_by(offset: Vec2, duration_ms: f64, ease: Ease) -> Tween<Placement> {
    let mut from = None;
    Tween::new(duration_ms, ease, move |p: &mut Placement, frame| {
        let from = *from.get_or_insert(p.pos);
        p.pos = from + offset * frame.progress;
    })
}

/// Scale to an absolute factor pair.
pub fn scale_to(dest: Vec2, duration_ms: f64, ease: Ease) -> Tween<Placement> {
    let mut from = None;
    Tween::new(duration_ms, ease, move |p: &mut Placement, frame| {
        let from = *from.get_or_insert(p.scale);
        p.scale = from.lerp(dest, frame.progress);
    })
}

/// Rotate by a relative angle in radians.
pub fn rotate_by(angle_rad: f64, duration_ms: f64, ease: Ease) -> Tween<Placement> {
    let mut from = None;
    Tween::new(duration_ms, ease, move |p: &mut Placement, frame| {
        let from = *from.get_or_insert(p.rotation);
        p.rotation = from + angle_rad * frame.progress;
    })
}

/// Fade to an absolute opacity.
pub fn fade_to(opacity: f32, duration_ms: f64, ease: Ease) -> Tween<Placement> {
    let mut from = None;
    Tween::new(duration_ms, ease, move |p: &mut Placement, frame| {
        let from = f64::from(*from.get_or_insert(p.opacity));
        p.opacity = (from + (f64::from(opacity) - from) * frame.progress) as f32;
    })
}

/// Arbitrary update function with the standard duration/easing contract.
pub fn custom<P>(
    duration_ms: f64,
    ease: Ease,
    update: impl FnMut(&mut P, crate::animation::tween::TweenFrame) + 'static,
) -> Tween<P> {
    Tween::new(duration_ms, ease, update)
}
