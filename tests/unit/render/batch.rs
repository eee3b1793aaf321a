use super::*;

use kurbo::{Rect, Shape};

use crate::foundation::core::Rgba8;

fn rect_path(x: f64) -> BezPath {
    Rect::new(x, 0.0, x + 10.0, 10.0).to_path(0.1)
}

#[test]
fn same_key_merges_into_one_bucket() {
    let mut batch = BatchCollector::new();
    let style = FillStyle::solid(Rgba8::BLACK);

    let el_count = rect_path(0.0).elements().len();
    for i in 0..3 {
        batch.add_fill(style.clone(), rect_path(f64::from(i) * 20.0));
    }
    assert_eq!(batch.fill_buckets(), 1);

    let drain = batch.take();
    assert_eq!(drain.fills.len(), 1);
    assert_eq!(drain.fills[0].1.elements().len(), el_count * 3);
}

#[test]
fn distinct_keys_stay_separate() {
    let mut batch = BatchCollector::new();
    batch.add_fill(FillStyle::solid(Rgba8::BLACK), rect_path(0.0));
    batch.add_fill(FillStyle::solid(Rgba8::WHITE), rect_path(20.0));
    let mut faded = FillStyle::solid(Rgba8::BLACK);
    faded.opacity = 0.5;
    batch.add_fill(faded, rect_path(40.0));

    assert_eq!(batch.fill_buckets(), 3);
}

#[test]
fn strokes_and_fills_bucket_independently() {
    let mut batch = BatchCollector::new();
    batch.add_fill(FillStyle::solid(Rgba8::BLACK), rect_path(0.0));
    batch.add_stroke(StrokeStyle::solid(Rgba8::BLACK, 1.0), rect_path(0.0));
    assert_eq!(batch.fill_buckets(), 1);
    assert_eq!(batch.stroke_buckets(), 1);
}

#[test]
fn bucket_contents_ignore_interleaving() {
    let a = FillStyle::solid(Rgba8::BLACK);
    let b = FillStyle::solid(Rgba8::WHITE);

    let mut sequential = BatchCollector::new();
    sequential.add_fill(a.clone(), rect_path(0.0));
    sequential.add_fill(a.clone(), rect_path(20.0));

    let mut interleaved = BatchCollector::new();
    interleaved.add_fill(a.clone(), rect_path(0.0));
    interleaved.add_fill(b, rect_path(100.0));
    interleaved.add_fill(a, rect_path(20.0));

    let seq = sequential.take();
    let mix = interleaved.take();
    assert_eq!(seq.fills[0].1.elements(), mix.fills[0].1.elements());
}

#[test]
fn take_drains_unconditionally() {
    let mut batch = BatchCollector::new();
    batch.add_fill(FillStyle::solid(Rgba8::BLACK), rect_path(0.0));
    batch.add_stroke(StrokeStyle::solid(Rgba8::BLACK, 2.0), rect_path(0.0));
    batch.defer(Box::new(|_| Ok(())));
    assert!(!batch.is_empty());

    let drain = batch.take();
    assert_eq!(drain.fills.len(), 1);
    assert_eq!(drain.strokes.len(), 1);
    assert_eq!(drain.standalones.len(), 1);
    assert!(batch.is_empty());

    let empty = batch.take();
    assert!(empty.fills.is_empty() && empty.strokes.is_empty() && empty.standalones.is_empty());
}

#[test]
fn buckets_keep_first_submission_order() {
    let mut batch = BatchCollector::new();
    let first = FillStyle::solid(Rgba8::from_rgb_u32(0x111111));
    let second = FillStyle::solid(Rgba8::from_rgb_u32(0x222222));
    batch.add_fill(first.clone(), rect_path(0.0));
    batch.add_fill(second.clone(), rect_path(10.0));
    batch.add_fill(first.clone(), rect_path(20.0));

    let drain = batch.take();
    assert_eq!(drain.fills[0].0, first);
    assert_eq!(drain.fills[1].0, second);
}
