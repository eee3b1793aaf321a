use crate::clock::{Clock, DEFAULT_MAX_DELTA_SECS, FpsCap};
use crate::drawable::Drawable;
use crate::foundation::core::Canvas;
use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::render::Renderer;
use crate::render::batch::BatchCollector;
use crate::render::state::StateCache;
use crate::render::surface::Surface;

/// Default resolved alpha below which draws are silently dropped.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.05;

/// Engine configuration. Loadable from JSON; validated on engine creation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub fps_cap: FpsCap,
    /// Simulation speed modifier; scales the already-clamped delta.
    pub speed: f64,
    /// Clamp on the wall-clock component of per-tick delta time.
    pub max_delta_secs: f64,
    /// Resolved alpha at or above this value is visible; below is dropped.
    pub visibility_threshold: f32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            fps_cap: FpsCap::Uncapped,
            speed: 1.0,
            max_delta_secs: DEFAULT_MAX_DELTA_SECS,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl EngineOptions {
    pub fn validate(&self) -> GlimmerResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(GlimmerError::validation(
                "speed modifier must be finite and > 0",
            ));
        }
        if !self.max_delta_secs.is_finite() || self.max_delta_secs <= 0.0 {
            return Err(GlimmerError::validation("max_delta_secs must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(GlimmerError::validation(
                "visibility threshold must be within [0, 1]",
            ));
        }
        Ok(())
    }

    /// Parse and validate options from JSON text.
    pub fn from_json(text: &str) -> GlimmerResult<Self> {
        let opts: Self =
            serde_json::from_str(text).map_err(|e| GlimmerError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }
}

/// One logical simulation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Simulation time in milliseconds.
    pub time_ms: f64,
    /// Clamped, speed-scaled delta in seconds.
    pub delta_secs: f64,
    /// Tick counter since engine creation.
    pub frame: u64,
}

/// Lifecycle state of the frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Looping,
    /// A stop was requested; the next callback finalizes it. The in-flight
    /// tick always completes its flush first.
    StopRequested,
}

/// What the host scheduler should do after a callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopDirective {
    /// Schedule the next callback.
    Continue,
    /// Stop scheduling callbacks.
    Halt,
}

/// Handle to a drawable owned by one engine's registry.
///
/// Allocated from a monotonic counter owned by the engine instance, so
/// independent engines never share id state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(u64);

struct Slot {
    id: DrawableId,
    object: Box<dyn Drawable>,
}

type FrameHook = Box<dyn FnMut(Tick)>;

/// Frame-driven scheduler: owns the clock, the drawable registry, the batch
/// collector and the state cache, and orchestrates one tick per accepted
/// hardware callback.
///
/// The host drives it with two calls: [`start`](Self::start) (begin
/// scheduling callbacks when it returns `true`) and [`frame`](Self::frame)
/// with each high-resolution timestamp, rescheduling while it returns
/// [`LoopDirective::Continue`].
pub struct Engine<S: Surface> {
    surface: S,
    viewport: Canvas,
    opts: EngineOptions,
    clock: Clock,
    state: LoopState,
    objects: Vec<Slot>,
    next_object_id: u64,
    batch: BatchCollector,
    cache: StateCache,
    frame_hook: Option<FrameHook>,
}

impl<S: Surface> Engine<S> {
    pub fn new(surface: S, viewport: Canvas, opts: EngineOptions) -> GlimmerResult<Self> {
        opts.validate()?;
        let clock = Clock::new(opts.fps_cap, opts.speed, opts.max_delta_secs);
        Ok(Self {
            surface,
            viewport,
            opts,
            clock,
            state: LoopState::Stopped,
            objects: Vec::new(),
            next_object_id: 0,
            batch: BatchCollector::new(),
            cache: StateCache::new(),
            frame_hook: None,
        })
    }

    /// Begin (or resume) the frame loop.
    ///
    /// Returns whether the host must start scheduling callbacks: `true` on a
    /// fresh start from `Stopped`; `false` when a pending stop was cancelled
    /// (the already-scheduled callback chain is still alive, so restarting a
    /// timer would double-drive the loop) or the loop was already running.
    /// Cancelling a pending stop absorbs the elapsed gap into the clock so
    /// the timeline does not jump.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self, now_ms: f64) -> bool {
        match self.state {
            LoopState::Stopped => {
                self.state = LoopState::Looping;
                self.clock.relatch();
                tracing::debug!("frame loop started");
                true
            }
            LoopState::StopRequested => {
                self.state = LoopState::Looping;
                self.clock.absorb_gap(now_ms);
                tracing::debug!("pending stop cancelled");
                false
            }
            LoopState::Looping => false,
        }
    }

    /// Request a stop; honored at the next callback boundary.
    pub fn stop(&mut self) {
        if self.state == LoopState::Looping {
            self.state = LoopState::StopRequested;
            tracing::debug!("frame loop stop requested");
        }
    }

    /// One hardware callback: runs zero or one logical tick.
    pub fn frame(&mut self, now_ms: f64) -> LoopDirective {
        match self.state {
            LoopState::Stopped => LoopDirective::Halt,
            LoopState::StopRequested => {
                self.state = LoopState::Stopped;
                tracing::debug!("frame loop stopped");
                LoopDirective::Halt
            }
            LoopState::Looping => {
                if self.clock.advance(now_ms) {
                    let tick = Tick {
                        time_ms: self.clock.time_ms(),
                        delta_secs: self.clock.delta_secs(),
                        frame: self.clock.frame(),
                    };
                    self.run_tick(tick);
                }
                LoopDirective::Continue
            }
        }
    }

    fn run_tick(&mut self, tick: Tick) {
        let zone = self.viewport.rect();
        let mut renderer = Renderer::new(
            &mut self.surface,
            &mut self.cache,
            &mut self.batch,
            self.opts.visibility_threshold,
        );

        for slot in &mut self.objects {
            let margin = slot.object.activation_margin();
            if !zone.inflate(margin, margin).contains(slot.object.pos()) {
                continue;
            }
            if let Err(err) = slot.object.draw(&mut renderer, tick) {
                tracing::warn!(id = slot.id.0, error = %err, "drawable failed; skipped this tick");
            }
        }

        if let Err(err) = renderer.flush() {
            tracing::warn!(error = %err, "flush failed; frame dropped");
        }

        if let Some(hook) = self.frame_hook.as_mut() {
            hook(tick);
        }
    }

    /// Add a drawable; it is ticked and drawn in insertion order.
    pub fn spawn(&mut self, object: Box<dyn Drawable>) -> DrawableId {
        let id = DrawableId(self.next_object_id);
        self.next_object_id += 1;
        self.objects.push(Slot { id, object });
        id
    }

    /// Remove and return a drawable. Draw order of the rest is preserved.
    pub fn despawn(&mut self, id: DrawableId) -> Option<Box<dyn Drawable>> {
        let i = self.objects.iter().position(|s| s.id == id)?;
        Some(self.objects.remove(i).object)
    }

    pub fn object_mut(&mut self, id: DrawableId) -> Option<&mut (dyn Drawable + 'static)> {
        self.objects
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| s.object.as_mut())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Invoked after every tick's flush.
    pub fn set_frame_hook(&mut self, hook: impl FnMut(Tick) + 'static) {
        self.frame_hook = Some(Box::new(hook));
    }

    pub fn clear_frame_hook(&mut self) {
        self.frame_hook = None;
    }

    pub fn loop_state(&self) -> LoopState {
        self.state
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn viewport(&self) -> Canvas {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Canvas) {
        self.viewport = viewport;
    }

    pub fn options(&self) -> &EngineOptions {
        &self.opts
    }

    pub fn set_fps_cap(&mut self, cap: FpsCap) {
        self.opts.fps_cap = cap;
        self.clock.set_fps_cap(cap);
    }

    pub fn set_speed(&mut self, speed: f64) -> GlimmerResult<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(GlimmerError::validation(
                "speed modifier must be finite and > 0",
            ));
        }
        self.opts.speed = speed;
        self.clock.set_speed(speed);
        Ok(())
    }

    /// Direct surface access for the host.
    ///
    /// Mutating context state this way bypasses the diff cache; follow up
    /// with [`resync_surface_state`](Self::resync_surface_state).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Forget cached context state after out-of-band surface mutation.
    pub fn resync_surface_state(&mut self) {
        self.cache.invalidate();
    }
}
