mod common;

use common::ScriptedProvider;
use scope_rs::core::{DirtyLayers, LayerKind, Phase, PlotArea, Viewport};
use scope_rs::provider::{LayerResponse, MoveDirection, MovingTrace};
use scope_rs::render::primitives::draw_moving;
use scope_rs::render::{Color, GraphStyle, Surface};
use scope_rs::{GraphEngine, GraphEngineConfig};

const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

fn trace(direction: MoveDirection, offset: u32) -> MovingTrace {
    MovingTrace {
        samples: vec![1.0; 10],
        direction,
        offset,
        color: Some(GREEN),
    }
}

#[test]
fn left_trace_enters_at_the_right_edge() {
    let area = PlotArea::from_viewport(Viewport::new(10, 10), 0, 0);
    let mut surface = Surface::new(10, 10).expect("surface");
    draw_moving(
        &mut surface,
        area,
        &trace(MoveDirection::Left, 0),
        &GraphStyle::default(),
    );
    assert_eq!(surface.pixel(9, 4), Some(GREEN));
    assert_eq!(surface.pixel(8, 4), Some(Color::TRANSPARENT));
}

#[test]
fn down_trace_enters_at_the_top_edge() {
    let area = PlotArea::from_viewport(Viewport::new(10, 10), 0, 0);
    let mut surface = Surface::new(10, 10).expect("surface");
    draw_moving(
        &mut surface,
        area,
        &trace(MoveDirection::Down, 2),
        &GraphStyle::default(),
    );
    assert_eq!(surface.pixel(4, 2), Some(GREEN));
    assert_eq!(surface.pixel(4, 3), Some(Color::TRANSPARENT));
}

#[test]
fn sample_value_modulates_the_ink_alpha() {
    let area = PlotArea::from_viewport(Viewport::new(10, 10), 0, 0);
    let mut surface = Surface::new(10, 10).expect("surface");
    let faint = MovingTrace {
        samples: vec![0.25; 10],
        direction: MoveDirection::Left,
        offset: 0,
        color: Some(GREEN),
    };
    draw_moving(&mut surface, area, &faint, &GraphStyle::default());
    let pixel = surface.pixel(9, 4).expect("in bounds");
    assert!(pixel.alpha > 0.0 && pixel.alpha < 1.0);
}

#[test]
fn ping_pong_shifts_the_previous_frame_along_the_direction() {
    let provider = ScriptedProvider::default();
    let (responses, payload, _) = provider.handles();
    payload.borrow_mut().moving = vec![trace(MoveDirection::Left, 0)];

    let config = GraphEngineConfig::new(Viewport::new(10, 10))
        .with_style(GraphStyle::default().with_background(Color::rgb(1.0, 1.0, 1.0)));
    let mut engine = GraphEngine::new(config).expect("engine init");
    engine.set_provider(Box::new(provider));
    engine.render().expect("first cycle");

    responses
        .borrow_mut()
        .push_back(LayerResponse::dirty(DirtyLayers::from_layer(
            LayerKind::Moving,
            Phase::Cache,
        )));
    engine.render().expect("second cycle");

    // after the toggle the freshly produced buffer is `previous`: the new
    // slice at the entry edge, the first cycle's slice shifted one left
    let fresh = engine.surfaces().moving.previous();
    assert_eq!(fresh.pixel(9, 4), Some(GREEN), "new slice at the entry edge");
    assert_eq!(fresh.pixel(8, 4), Some(GREEN), "old slice shifted left");
    assert_eq!(fresh.pixel(7, 4), Some(Color::TRANSPARENT));

    assert_eq!(engine.surfaces().cache.pixel(8, 4), Some(GREEN));
}
