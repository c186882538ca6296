//! Shared test support: a scripted content provider driven by a queue of
//! dirty-layer responses.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use scope_rs::core::Phase;
use scope_rs::provider::{ContentProvider, Dot, GraphSeries, GridLine, LayerResponse, MovingTrace};

/// Per-phase payload the provider hands to the compositor. Kept behind an
/// `Rc<RefCell>` so tests can swap content between renders while the
/// engine owns the boxed provider.
#[derive(Default)]
pub struct Payload {
    pub cache_grid: Vec<GridLine>,
    pub realtime_grid: Vec<GridLine>,
    pub cache_graphs: Vec<GraphSeries>,
    pub realtime_graphs: Vec<GraphSeries>,
    pub moving: Vec<MovingTrace>,
    pub cache_dots: Vec<Dot>,
    pub realtime_dots: Vec<Dot>,
    pub crosshair_text: String,
}

/// Provider whose `layers` answers come from a scripted queue (an empty
/// queue means "unchanged"). Generations passed by the engine are recorded
/// into a shared log.
#[derive(Default)]
pub struct ScriptedProvider {
    pub responses: Rc<RefCell<VecDeque<LayerResponse>>>,
    pub payload: Rc<RefCell<Payload>>,
    pub generations: Rc<RefCell<Vec<u64>>>,
}

impl ScriptedProvider {
    /// Handles the test keeps after boxing the provider into the engine.
    pub fn handles(
        &self,
    ) -> (
        Rc<RefCell<VecDeque<LayerResponse>>>,
        Rc<RefCell<Payload>>,
        Rc<RefCell<Vec<u64>>>,
    ) {
        (
            Rc::clone(&self.responses),
            Rc::clone(&self.payload),
            Rc::clone(&self.generations),
        )
    }

    pub fn push_response(&self, response: LayerResponse) {
        self.responses.borrow_mut().push_back(response);
    }
}

impl ContentProvider for ScriptedProvider {
    fn layers(&mut self, generation: u64) -> LayerResponse {
        self.generations.borrow_mut().push(generation);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(LayerResponse::unchanged)
    }

    fn grid_lines(&mut self, phase: Phase) -> Box<dyn Iterator<Item = GridLine> + '_> {
        let payload = self.payload.borrow();
        let lines = match phase {
            Phase::Cache => payload.cache_grid.clone(),
            Phase::Realtime => payload.realtime_grid.clone(),
        };
        Box::new(lines.into_iter())
    }

    fn graphs(
        &mut self,
        phase: Phase,
        _samples: usize,
    ) -> Box<dyn Iterator<Item = GraphSeries> + '_> {
        let payload = self.payload.borrow();
        let series = match phase {
            Phase::Cache => payload.cache_graphs.clone(),
            Phase::Realtime => payload.realtime_graphs.clone(),
        };
        Box::new(series.into_iter())
    }

    fn moving_traces(
        &mut self,
        _width: usize,
        _height: usize,
    ) -> Box<dyn Iterator<Item = MovingTrace> + '_> {
        Box::new(self.payload.borrow().moving.clone().into_iter())
    }

    fn dots(&mut self, phase: Phase) -> Box<dyn Iterator<Item = Dot> + '_> {
        let payload = self.payload.borrow();
        let dots = match phase {
            Phase::Cache => payload.cache_dots.clone(),
            Phase::Realtime => payload.realtime_dots.clone(),
        };
        Box::new(dots.into_iter())
    }

    fn crosshair_label(&mut self, _x: f64, _y: f64) -> String {
        self.payload.borrow().crosshair_text.clone()
    }
}
