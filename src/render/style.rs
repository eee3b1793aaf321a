use kurbo::Point;

use crate::foundation::core::{ImageHandle, Rgba8};

/// How source pixels combine with the destination surface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum CompositeMode {
    #[default]
    SourceOver,
    SourceAtop,
    DestinationOver,
    DestinationOut,
    Lighter,
    Copy,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

/// One gradient color stop; `offset` is in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<GradientStop>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadialGradient {
    pub center: Point,
    pub radius: f64,
    pub stops: Vec<GradientStop>,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PatternRepeat {
    #[default]
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

/// Tiled image paint; the image itself is a host-loaded resource.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pattern {
    pub image: ImageHandle,
    pub repeat: PatternRepeat,
}

/// Paint source for fills and strokes.
///
/// Gradients and patterns are forwarded to the surface as descriptions and
/// re-resolved to live paint objects at every flush; only solid colors are
/// cached by the state diff layer (gradient geometry may be dynamic).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Paint {
    Solid(Rgba8),
    Linear(LinearGradient),
    Radial(RadialGradient),
    Pattern(Pattern),
}

impl Default for Paint {
    fn default() -> Self {
        Self::Solid(Rgba8::BLACK)
    }
}

impl From<Rgba8> for Paint {
    fn from(color: Rgba8) -> Self {
        Self::Solid(color)
    }
}

impl Paint {
    pub fn is_solid(&self) -> bool {
        matches!(self, Self::Solid(_))
    }

    pub(crate) fn key(&self) -> PaintKey {
        match self {
            Self::Solid(c) => PaintKey::Solid(*c),
            Self::Linear(g) => PaintKey::Linear {
                start: g.start.into(),
                end: g.end.into(),
                stops: g.stops.iter().map(StopKey::from).collect(),
            },
            Self::Radial(g) => PaintKey::Radial {
                center: g.center.into(),
                radius: g.radius.to_bits(),
                stops: g.stops.iter().map(StopKey::from).collect(),
            },
            Self::Pattern(p) => PaintKey::Pattern {
                image: p.image,
                repeat: p.repeat,
            },
        }
    }
}

/// Per-call overrides merged into a style at submission time.
#[derive(Clone, Copy, Debug)]
pub struct DrawEffects {
    /// Multiplier applied to the style's opacity.
    pub alpha: f32,
    /// Composite mode override.
    pub composite: Option<CompositeMode>,
}

impl Default for DrawEffects {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            composite: None,
        }
    }
}

impl DrawEffects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_alpha(alpha: f32) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }
}

/// Visual profile for filled geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FillStyle {
    pub paint: Paint,
    pub opacity: f32,
    pub composite: CompositeMode,
    /// Opaque host filter expression, compared and forwarded verbatim.
    pub filter: Option<String>,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            paint: Paint::default(),
            opacity: 1.0,
            composite: CompositeMode::default(),
            filter: None,
        }
    }
}

impl From<Rgba8> for FillStyle {
    fn from(color: Rgba8) -> Self {
        Self::solid(color)
    }
}

impl FillStyle {
    pub fn solid(color: Rgba8) -> Self {
        Self {
            paint: Paint::Solid(color),
            ..Self::default()
        }
    }

    pub(crate) fn with_effects(&self, fx: DrawEffects) -> Self {
        Self {
            paint: self.paint.clone(),
            opacity: self.opacity * fx.alpha,
            composite: fx.composite.unwrap_or(self.composite),
            filter: self.filter.clone(),
        }
    }

    pub(crate) fn key(&self) -> VisualKey {
        VisualKey {
            paint: self.paint.key(),
            alpha: self.opacity.to_bits(),
            composite: self.composite,
            filter: self.filter.clone(),
        }
    }
}

/// Visual and geometry profile for stroked paths.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub paint: Paint,
    pub opacity: f32,
    pub composite: CompositeMode,
    pub filter: Option<String>,
    pub width: f64,
    /// Dash pattern lengths; empty means a solid line.
    pub dash: Vec<f64>,
    pub dash_offset: f64,
    pub join: LineJoin,
    pub cap: LineCap,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            paint: Paint::default(),
            opacity: 1.0,
            composite: CompositeMode::default(),
            filter: None,
            width: 1.0,
            dash: Vec::new(),
            dash_offset: 0.0,
            join: LineJoin::default(),
            cap: LineCap::default(),
        }
    }
}

impl StrokeStyle {
    pub fn solid(color: Rgba8, width: f64) -> Self {
        Self {
            paint: Paint::Solid(color),
            width,
            ..Self::default()
        }
    }

    pub(crate) fn with_effects(&self, fx: DrawEffects) -> Self {
        Self {
            paint: self.paint.clone(),
            opacity: self.opacity * fx.alpha,
            composite: fx.composite.unwrap_or(self.composite),
            filter: self.filter.clone(),
            width: self.width,
            dash: self.dash.clone(),
            dash_offset: self.dash_offset,
            join: self.join,
            cap: self.cap,
        }
    }

    pub(crate) fn key(&self) -> StrokeKey {
        StrokeKey {
            visual: VisualKey {
                paint: self.paint.key(),
                alpha: self.opacity.to_bits(),
                composite: self.composite,
                filter: self.filter.clone(),
            },
            width: self.width.to_bits(),
            dash: self.dash.iter().map(|d| d.to_bits()).collect(),
            dash_offset: self.dash_offset.to_bits(),
            join: self.join,
            cap: self.cap,
        }
    }
}

/// Font request forwarded to the host surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size_px: 16.0,
        }
    }
}

/// Visual profile for text draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font: FontSpec,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub paint: Paint,
    pub opacity: f32,
    pub composite: CompositeMode,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
            paint: Paint::default(),
            opacity: 1.0,
            composite: CompositeMode::default(),
        }
    }
}

impl TextStyle {
    pub fn solid(color: Rgba8, font: FontSpec) -> Self {
        Self {
            font,
            paint: Paint::Solid(color),
            ..Self::default()
        }
    }

    pub(crate) fn with_effects(&self, fx: DrawEffects) -> Self {
        Self {
            font: self.font.clone(),
            align: self.align,
            baseline: self.baseline,
            paint: self.paint.clone(),
            opacity: self.opacity * fx.alpha,
            composite: fx.composite.unwrap_or(self.composite),
        }
    }
}

// Structural batching keys. f64 attributes are stored as bit patterns so
// keys derive `Eq + Hash`; key equality means the draws are visually
// indistinguishable and therefore mergeable.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PointKey {
    x: u64,
    y: u64,
}

impl From<Point> for PointKey {
    fn from(p: Point) -> Self {
        Self {
            x: p.x.to_bits(),
            y: p.y.to_bits(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct StopKey {
    offset: u32,
    color: Rgba8,
}

impl From<&GradientStop> for StopKey {
    fn from(s: &GradientStop) -> Self {
        Self {
            offset: s.offset.to_bits(),
            color: s.color,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum PaintKey {
    Solid(Rgba8),
    Linear {
        start: PointKey,
        end: PointKey,
        stops: Vec<StopKey>,
    },
    Radial {
        center: PointKey,
        radius: u64,
        stops: Vec<StopKey>,
    },
    Pattern {
        image: ImageHandle,
        repeat: PatternRepeat,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct VisualKey {
    paint: PaintKey,
    alpha: u32,
    composite: CompositeMode,
    filter: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct StrokeKey {
    visual: VisualKey,
    width: u64,
    dash: Vec<u64>,
    dash_offset: u64,
    join: LineJoin,
    cap: LineCap,
}
