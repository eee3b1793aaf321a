use crate::foundation::error::{GlimmerError, GlimmerResult};

/// Default clamp applied to the per-tick delta time, in seconds.
///
/// Bounds the worst-case motion jump after a backgrounded tab or a long GC
/// pause.
pub const DEFAULT_MAX_DELTA_SECS: f64 = 0.130;

/// Shortest derived frame interval for capped loops, in milliseconds.
pub const MIN_FRAME_INTERVAL_MS: f64 = 50.0;

const LOW_CAP_KNEE_FPS: f64 = 7.0;
const LOW_CAP_CUBIC_MS: f64 = 8.0;

/// Frames-per-second cap for the logical tick rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FpsCap {
    /// Every hardware callback runs a logical tick.
    #[default]
    Uncapped,
    /// Tick at most this many times per second.
    Limit(std::num::NonZeroU32),
}

impl FpsCap {
    /// Build a capped value; a zero cap is invalid.
    pub fn limit(fps: u32) -> GlimmerResult<Self> {
        std::num::NonZeroU32::new(fps)
            .map(Self::Limit)
            .ok_or_else(|| GlimmerError::validation("fps cap must be > 0"))
    }

    /// Minimum spacing between logical ticks, in ms (0 = uncapped).
    ///
    /// Above 7 fps the interval is the cap period floored at
    /// [`MIN_FRAME_INTERVAL_MS`]; below 7 fps it grows cubically so extreme
    /// caps never accumulate runaway catch-up debt.
    pub fn frame_interval_ms(self) -> f64 {
        match self {
            Self::Uncapped => 0.0,
            Self::Limit(fps) => {
                let fps = f64::from(fps.get());
                if fps < LOW_CAP_KNEE_FPS {
                    let deficit = LOW_CAP_KNEE_FPS - fps;
                    1000.0 / fps + LOW_CAP_CUBIC_MS * deficit.powi(3)
                } else {
                    (1000.0 / fps).max(MIN_FRAME_INTERVAL_MS)
                }
            }
        }
    }
}

/// Simulation clock: turns irregular hardware callback timestamps into a
/// stable timeline.
///
/// The clock is the single clamping authority. `time_ms` advances by the
/// clamped, speed-scaled delta and is the only timeline animations see;
/// `raw_time_ms` accumulates uncorrected hardware time for diagnostics.
#[derive(Debug)]
pub struct Clock {
    fps_cap: FpsCap,
    frame_interval_ms: f64,
    speed: f64,
    max_delta_secs: f64,
    raw_time_ms: f64,
    time_ms: f64,
    delta_secs: f64,
    frame: u64,
    last_callback_ms: Option<f64>,
    last_tick_ms: f64,
    carry_ms: f64,
}

impl Clock {
    pub fn new(fps_cap: FpsCap, speed: f64, max_delta_secs: f64) -> Self {
        Self {
            fps_cap,
            frame_interval_ms: fps_cap.frame_interval_ms(),
            speed,
            max_delta_secs,
            raw_time_ms: 0.0,
            time_ms: 0.0,
            delta_secs: 0.0,
            frame: 0,
            last_callback_ms: None,
            last_tick_ms: 0.0,
            carry_ms: 0.0,
        }
    }

    /// Record one hardware callback and decide whether a logical tick runs.
    ///
    /// Uncapped clocks tick on every callback. Capped clocks tick only once
    /// elapsed-since-last-tick (plus the carried remainder) reaches the
    /// derived interval; the remainder carries forward, bounded by one
    /// interval, so recovery after a stall is evenly distributed rather than
    /// bursty.
    ///
    /// The first callback after a (re)latch ticks with a zero delta.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let Some(last_cb) = self.last_callback_ms else {
            self.last_callback_ms = Some(now_ms);
            self.last_tick_ms = now_ms;
            self.carry_ms = 0.0;
            self.delta_secs = 0.0;
            self.frame += 1;
            return true;
        };

        self.raw_time_ms += (now_ms - last_cb).max(0.0);
        self.last_callback_ms = Some(now_ms);

        if self.frame_interval_ms > 0.0 {
            let elapsed = now_ms - self.last_tick_ms + self.carry_ms;
            if elapsed < self.frame_interval_ms {
                return false;
            }
            self.carry_ms = (elapsed - self.frame_interval_ms).min(self.frame_interval_ms);
        }

        let tick_delta_ms = (now_ms - self.last_tick_ms).max(0.0);
        self.last_tick_ms = now_ms;
        self.delta_secs = (tick_delta_ms / 1000.0).min(self.max_delta_secs) * self.speed;
        self.time_ms += self.delta_secs * 1000.0;
        self.frame += 1;
        true
    }

    /// Forget the callback reference; the next callback ticks with delta 0.
    pub fn relatch(&mut self) {
        self.last_callback_ms = None;
        self.carry_ms = 0.0;
    }

    /// Treat `now_ms` as the last frame moment, absorbing the gap since the
    /// previous callback so the timeline does not jump on resume.
    pub fn absorb_gap(&mut self, now_ms: f64) {
        if self.last_callback_ms.is_some() {
            self.last_callback_ms = Some(now_ms);
            self.last_tick_ms = now_ms;
        }
    }

    /// Simulation time in milliseconds (clamped, speed-scaled).
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Uncorrected accumulated hardware time in milliseconds.
    pub fn raw_time_ms(&self) -> f64 {
        self.raw_time_ms
    }

    /// Delta of the most recent tick, in seconds.
    pub fn delta_secs(&self) -> f64 {
        self.delta_secs
    }

    /// Number of logical ticks run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn fps_cap(&self) -> FpsCap {
        self.fps_cap
    }

    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn max_delta_secs(&self) -> f64 {
        self.max_delta_secs
    }

    pub fn set_fps_cap(&mut self, cap: FpsCap) {
        self.fps_cap = cap;
        self.frame_interval_ms = cap.frame_interval_ms();
        self.carry_ms = 0.0;
        tracing::trace!(interval_ms = self.frame_interval_ms, "fps cap changed");
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn set_max_delta_secs(&mut self, max_delta_secs: f64) {
        self.max_delta_secs = max_delta_secs;
    }
}

#[cfg(test)]
#[path = "../tests/unit/clock.rs"]
mod tests;
