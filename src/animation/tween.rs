use crate::animation::ease::Ease;

/// Values handed to a tween's update function on every advanced frame.
#[derive(Clone, Copy, Debug)]
pub struct TweenFrame {
    /// Eased progress in `[0, 1]`.
    pub progress: f64,
    /// Un-eased progress in `[0, 1]`.
    pub raw_progress: f64,
    /// Play cycles completed before this frame.
    pub play_count: u32,
    /// Simulation delta for this tick, in seconds.
    pub delta_secs: f64,
}

/// Outcome of advancing a tween by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenStatus {
    Running,
    Finished,
}

/// A progress-based animation over a target `P`.
///
/// The duration is in milliseconds; a negative duration encodes an infinite
/// loop with period `|duration|`. A zero duration degenerates to immediate
/// single-frame completion.
///
/// The first [`advance`](Self::advance) after (re)start only latches the
/// start time and emits a zero-progress frame, so the first measured
/// interval is never partial. Finite tweens force a `progress = 1` frame on
/// completion, bump the play count, then fire the end callback once.
/// Infinite tweens close every cycle with a `progress = 1` frame before
/// re-latching, so each loop visually reaches 1 before resetting to 0.
pub struct Tween<P> {
    duration_ms: f64,
    ease: Ease,
    start_ms: Option<f64>,
    progress: f64,
    play_count: u32,
    update: Box<dyn FnMut(&mut P, TweenFrame)>,
    on_end: Option<Box<dyn FnOnce(&mut P)>>,
}

impl<P> std::fmt::Debug for Tween<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("duration_ms", &self.duration_ms)
            .field("ease", &self.ease)
            .field("progress", &self.progress)
            .field("play_count", &self.play_count)
            .finish_non_exhaustive()
    }
}

impl<P> Tween<P> {
    pub fn new(
        duration_ms: f64,
        ease: Ease,
        update: impl FnMut(&mut P, TweenFrame) + 'static,
    ) -> Self {
        Self {
            duration_ms,
            ease,
            start_ms: None,
            progress: 0.0,
            play_count: 0,
            update: Box::new(update),
            on_end: None,
        }
    }

    /// An infinitely repeating tween with the given period.
    pub fn looping(
        period_ms: f64,
        ease: Ease,
        update: impl FnMut(&mut P, TweenFrame) + 'static,
    ) -> Self {
        Self::new(-period_ms.abs(), ease, update)
    }

    /// Attach a callback fired once when a finite tween completes.
    pub fn with_end(mut self, on_end: impl FnOnce(&mut P) + 'static) -> Self {
        self.on_end = Some(Box::new(on_end));
        self
    }

    pub fn is_infinite(&self) -> bool {
        self.duration_ms < 0.0
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Eased progress of the most recent frame, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    pub fn has_started(&self) -> bool {
        self.start_ms.is_some()
    }

    /// Advance by one tick at simulation time `time_ms`.
    pub fn advance(&mut self, target: &mut P, time_ms: f64, delta_secs: f64) -> TweenStatus {
        let span = self.duration_ms.abs();
        let infinite = self.duration_ms < 0.0;

        let Some(start) = self.start_ms else {
            self.start_ms = Some(time_ms);
            if !infinite && span == 0.0 {
                return self.complete(target, delta_secs);
            }
            self.emit(target, 0.0, delta_secs);
            return TweenStatus::Running;
        };

        let raw = if span > 0.0 {
            ((time_ms - start) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if raw < 1.0 {
            self.emit(target, raw, delta_secs);
            TweenStatus::Running
        } else if infinite {
            // Close the cycle at 1 before the next loop resets to 0.
            self.emit(target, 1.0, delta_secs);
            self.play_count += 1;
            self.start_ms = Some(time_ms);
            self.progress = 0.0;
            TweenStatus::Running
        } else {
            self.complete(target, delta_secs)
        }
    }

    fn emit(&mut self, target: &mut P, raw: f64, delta_secs: f64) {
        let eased = self.ease.apply(raw);
        self.progress = eased;
        let frame = TweenFrame {
            progress: eased,
            raw_progress: raw,
            play_count: self.play_count,
            delta_secs,
        };
        (self.update)(target, frame);
    }

    /// Force completion: a final `progress = 1` frame, play-count bump, end
    /// callback. Used on natural finite completion and by forced queue
    /// preemption.
    pub(crate) fn complete(&mut self, target: &mut P, delta_secs: f64) -> TweenStatus {
        self.emit(target, 1.0, delta_secs);
        self.play_count += 1;
        if let Some(end) = self.on_end.take() {
            end(target);
        }
        TweenStatus::Finished
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
