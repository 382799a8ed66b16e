//! End-to-end playback: simulation JSON payload through the wire types into
//! a validated run, replayed with render surfaces attached as sinks.

use fire_viz_core::api::SimulationResponse;
use fire_viz_core::render::{CellMeshRenderer, GridRenderer};
use fire_viz_core::{
    CellState, FrameSink, FrameStats, PlaybackController, PlaybackState, SimulationFrame,
};
use std::cell::RefCell;
use std::rc::Rc;

/// A 2x2 run in which one cell ignites, burns, and burns out.
const SIMULATION_JSON: &str = r#"{
    "success": true,
    "simulation": {
        "params": {"grid_size": 2, "wind_speed": 5.0, "wind_direction": 45.0,
                   "temperature": 35.0, "humidity": 30.0, "time_steps": 3},
        "history": [
            [[0, 0], [0, 0]],
            [[1, 0], [0, 0]],
            [[2, 1], [0, 0]]
        ],
        "stats_history": [
            {"unburned": 4, "burning": 0, "burned": 0, "unburned_pct": 100.0,
             "burning_pct": 0.0, "burned_pct": 0.0, "total_affected": 0,
             "affected_pct": 0.0},
            {"unburned": 3, "burning": 1, "burned": 0, "unburned_pct": 75.0,
             "burning_pct": 25.0, "burned_pct": 0.0, "total_affected": 1,
             "affected_pct": 25.0},
            {"unburned": 2, "burning": 1, "burned": 1, "unburned_pct": 50.0,
             "burning_pct": 25.0, "burned_pct": 25.0, "total_affected": 2,
             "affected_pct": 50.0}
        ],
        "vegetation": [[0.5, 0.6], [0.7, 0.8]],
        "final_stats": {"unburned": 2, "burning": 1, "burned": 1,
                        "unburned_pct": 50.0, "burning_pct": 25.0,
                        "burned_pct": 25.0, "total_affected": 2,
                        "affected_pct": 50.0}
    }
}"#;

/// Sink sharing its render surface with the test body.
struct SharedSink<T: FrameSink>(Rc<RefCell<T>>);

impl<T: FrameSink> FrameSink for SharedSink<T> {
    fn present(&mut self, frame: &SimulationFrame, stats: &FrameStats) {
        self.0.borrow_mut().present(frame, stats);
    }
}

#[test]
fn json_payload_replays_to_completion_with_synchronized_views() {
    let response: SimulationResponse = serde_json::from_str(SIMULATION_JSON).unwrap();
    let run = response.simulation.into_run().unwrap();
    assert_eq!(run.len(), 3);

    let canvas = Rc::new(RefCell::new(GridRenderer::new(8)));
    let mesh = Rc::new(RefCell::new(CellMeshRenderer::new(2)));

    let mut controller = PlaybackController::new();
    controller.attach(Box::new(SharedSink(Rc::clone(&canvas))));
    controller.attach(Box::new(SharedSink(Rc::clone(&mesh))));
    controller.load(run);
    controller.play();

    // 200ms per tick at 1x; 700ms covers all three frames.
    let mut steps = 0;
    while controller.state() == PlaybackState::Playing && steps < 100 {
        controller.advance(100.0);
        steps += 1;
    }

    assert_eq!(controller.state(), PlaybackState::Completed);
    assert_eq!(controller.current_index(), 2);

    // Both views show the final frame: cell (0,0) burned, (1,0) burning.
    let mesh = mesh.borrow();
    assert_eq!(mesh.cells()[0].state, CellState::Burned);
    assert_eq!(mesh.cells()[1].state, CellState::Burning);

    // Canvas cell (0,0) occupies a 4px block on the 8px canvas; burned is
    // dark gray.
    let p = canvas.borrow().canvas().pixel(0, 0);
    assert_eq!([p[0], p[1], p[2]], [31, 41, 55]);

    // Aggregates reflect the full run.
    let agg = controller.aggregate();
    assert_eq!(agg.peak_burning_pct, 25.0);
    assert_eq!(agg.total_burned_pct, 25.0);
    assert_eq!(agg.spread_rate_pct_per_step, Some(12.5));
}

#[test]
fn speed_change_mid_run_keeps_views_in_lockstep() {
    let response: SimulationResponse = serde_json::from_str(SIMULATION_JSON).unwrap();
    let run = response.simulation.into_run().unwrap();

    let mesh = Rc::new(RefCell::new(CellMeshRenderer::new(2)));
    let mut controller = PlaybackController::new();
    controller.attach(Box::new(SharedSink(Rc::clone(&mesh))));
    controller.load(run);
    controller.play();

    controller.advance(200.0); // frame 0 presented, index now 1
    controller.set_speed(4.0); // interval drops to 50ms, timer rearmed
    controller.advance(50.0); // frame 1
    assert_eq!(mesh.borrow().cells()[0].state, CellState::Burning);
    controller.advance(50.0); // frame 2, run completes
    assert_eq!(controller.state(), PlaybackState::Completed);
    assert_eq!(mesh.borrow().cells()[0].state, CellState::Burned);
}

#[test]
fn misaligned_payload_never_reaches_the_controller() {
    let mut response: SimulationResponse = serde_json::from_str(SIMULATION_JSON).unwrap();
    response.simulation.stats_history.pop();

    let mut controller = PlaybackController::new();
    match response.simulation.into_run() {
        Ok(_) => panic!("misaligned history/stats must not build a run"),
        Err(_) => {
            // Load never happened; the controller is untouched.
            assert_eq!(controller.state(), PlaybackState::Idle);
            assert_eq!(controller.run_len(), None);
        }
    }
    controller.play();
    assert_eq!(controller.state(), PlaybackState::Idle);
}
