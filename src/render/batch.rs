use std::collections::HashMap;
use std::hash::Hash;

use kurbo::BezPath;

use crate::foundation::error::GlimmerResult;
use crate::render::Pass;
use crate::render::style::{FillStyle, StrokeKey, StrokeStyle, VisualKey};

pub(crate) type Standalone = Box<dyn FnOnce(&mut Pass<'_>) -> GlimmerResult<()>>;

/// Insertion-ordered style buckets: one merged path per distinct key.
struct Buckets<K, S> {
    index: HashMap<K, usize>,
    items: Vec<(S, BezPath)>,
}

impl<K: Eq + Hash, S> Buckets<K, S> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            items: Vec::new(),
        }
    }

    fn add(&mut self, key: K, style: S, path: BezPath) {
        if let Some(&i) = self.index.get(&key) {
            let merged = &mut self.items[i].1;
            for el in path.elements() {
                merged.push(*el);
            }
        } else {
            self.index.insert(key, self.items.len());
            self.items.push((style, path));
        }
    }

    fn take(&mut self) -> Vec<(S, BezPath)> {
        self.index.clear();
        std::mem::take(&mut self.items)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Everything collected for one tick, drained for flushing.
pub(crate) struct BatchDrain {
    pub strokes: Vec<(StrokeStyle, BezPath)>,
    pub fills: Vec<(FillStyle, BezPath)>,
    pub standalones: Vec<Standalone>,
}

/// Per-tick deferred draw collection.
///
/// Geometry submitted with the same style key is unioned into one bucket so
/// the flush issues a single surface call per distinct style. Buckets keep
/// their first-submission order; standalones keep exact insertion order.
/// Contents only live within one tick's draw-to-flush window.
pub struct BatchCollector {
    strokes: Buckets<StrokeKey, StrokeStyle>,
    fills: Buckets<VisualKey, FillStyle>,
    standalones: Vec<Standalone>,
}

impl Default for BatchCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BatchCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCollector")
            .field("stroke_buckets", &self.stroke_buckets())
            .field("fill_buckets", &self.fill_buckets())
            .field("standalones", &self.standalones.len())
            .finish()
    }
}

impl BatchCollector {
    pub fn new() -> Self {
        Self {
            strokes: Buckets::new(),
            fills: Buckets::new(),
            standalones: Vec::new(),
        }
    }

    /// `style` must already have per-call effects resolved into it.
    pub(crate) fn add_fill(&mut self, style: FillStyle, path: BezPath) {
        self.fills.add(style.key(), style, path);
    }

    pub(crate) fn add_stroke(&mut self, style: StrokeStyle, path: BezPath) {
        self.strokes.add(style.key(), style, path);
    }

    pub(crate) fn defer(&mut self, call: Standalone) {
        self.standalones.push(call);
    }

    /// Drain everything; the collector is empty afterwards regardless of
    /// what the caller does with the drained work.
    pub(crate) fn take(&mut self) -> BatchDrain {
        BatchDrain {
            strokes: self.strokes.take(),
            fills: self.fills.take(),
            standalones: std::mem::take(&mut self.standalones),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.len() == 0 && self.fills.len() == 0 && self.standalones.is_empty()
    }

    pub(crate) fn fill_buckets(&self) -> usize {
        self.fills.len()
    }

    pub(crate) fn stroke_buckets(&self) -> usize {
        self.strokes.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
