mod common;

use common::ScriptedProvider;
use scope_rs::core::{DirtyLayers, LayerKind, Phase, Viewport};
use scope_rs::provider::{GraphMode, GraphSeries, LayerResponse};
use scope_rs::render::{Color, GraphStyle};
use scope_rs::{GraphEngine, GraphEngineConfig};

const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

/// One series of 100 samples at constant 0.5, line mode, curve-cached
/// dirty: after one cycle the cache holds a single horizontal line on the
/// vertical midline, the realtime surface is a copy of the cache, and the
/// generation advances to 1.
#[test]
fn constant_half_series_lands_on_the_midline() {
    let provider = ScriptedProvider::default();
    let (responses, payload, generations) = provider.handles();
    payload.borrow_mut().cache_graphs =
        vec![GraphSeries::new(vec![0.5; 100], GraphMode::Line).with_color(BLACK)];
    responses
        .borrow_mut()
        .push_back(LayerResponse::dirty(DirtyLayers::from_layer(
            LayerKind::Graph,
            Phase::Cache,
        )));

    let config = GraphEngineConfig::new(Viewport::new(100, 101))
        .with_style(GraphStyle::default().with_background(WHITE));
    let mut engine = GraphEngine::new(config).expect("engine init");
    engine.set_provider(Box::new(provider));

    let summary = engine.render().expect("draw cycle");
    assert!(!summary.skipped);
    assert!(summary.cache_pass);
    assert_eq!(engine.generation(), 1);
    assert_eq!(*generations.borrow(), vec![0]);

    let cache = &engine.surfaces().cache;
    for x in 0..100 {
        assert_eq!(cache.pixel(x, 50), Some(BLACK), "midline at x={x}");
        assert_eq!(cache.pixel(x, 49), Some(WHITE), "above midline at x={x}");
        assert_eq!(cache.pixel(x, 51), Some(WHITE), "below midline at x={x}");
    }
    assert_eq!(&engine.surfaces().realtime, cache);
}

/// Same scenario without the construction-time full rebuild: the second
/// cycle runs purely off the reported curve-cached flag.
#[test]
fn non_forced_curve_cycle_rebuilds_cache_and_realtime() {
    let provider = ScriptedProvider::default();
    let (responses, payload, _) = provider.handles();
    let config = GraphEngineConfig::new(Viewport::new(100, 101))
        .with_style(GraphStyle::default().with_background(WHITE));
    let mut engine = GraphEngine::new(config).expect("engine init");
    engine.set_provider(Box::new(provider));
    engine.render().expect("forced first cycle");

    payload.borrow_mut().cache_graphs =
        vec![GraphSeries::new(vec![0.5; 100], GraphMode::Line).with_color(BLACK)];
    responses
        .borrow_mut()
        .push_back(LayerResponse::dirty(DirtyLayers::from_layer(
            LayerKind::Graph,
            Phase::Cache,
        )));
    let summary = engine.render().expect("curve cycle");
    assert!(summary.cache_pass);
    assert!(!summary.realtime_pass);
    assert_eq!(engine.generation(), 2);

    assert_eq!(engine.surfaces().cache.pixel(42, 50), Some(BLACK));
    assert_eq!(&engine.surfaces().realtime, &engine.surfaces().cache);
    assert_eq!(engine.window(), &engine.surfaces().realtime);
}

#[test]
fn resize_schedules_a_full_rebuild() {
    let provider = ScriptedProvider::default();
    let (_, payload, generations) = provider.handles();
    payload.borrow_mut().cache_graphs =
        vec![GraphSeries::new(vec![0.5; 60], GraphMode::Line).with_color(BLACK)];
    let config = GraphEngineConfig::new(Viewport::new(100, 101))
        .with_style(GraphStyle::default().with_background(WHITE));
    let mut engine = GraphEngine::new(config).expect("engine init");
    engine.set_provider(Box::new(provider));
    engine.render().expect("first cycle");

    engine.resize(Viewport::new(60, 61)).expect("resize");
    engine.render().expect("post-resize cycle");

    assert_eq!(engine.window().size(), (60, 61));
    assert_eq!(engine.surfaces().cache.pixel(30, 30), Some(BLACK));
    // the forced post-resize cycle queried with a reset generation
    assert_eq!(*generations.borrow(), vec![0, 0]);
}
