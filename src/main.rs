//! Scripted demo entry point
//!
//! Runs one escape-room scene through all three puzzles at a fixed timestep
//! and logs every event the core emits. Useful for eyeballing tuning changes
//! without a headset: `RUST_LOG=info cargo run`.

use balance_escape::consts::SIM_DT;
use balance_escape::sim::Occupant;
use balance_escape::{EscapeScene, PuzzleHooks, SceneConfig};

/// Logs every hook invocation
struct LoggingHooks;

impl PuzzleHooks for LoggingHooks {
    fn on_balance_achieved(&mut self) {
        log::info!("event: balance achieved -> door animation");
    }
    fn on_balance_lost(&mut self) {
        log::info!("event: balance lost");
    }
    fn on_weight_threshold_reached(&mut self) {
        log::info!("event: weight threshold reached -> open door");
    }
    fn on_weight_threshold_lost(&mut self) {
        log::info!("event: weight threshold lost -> close door");
    }
    fn on_required_items_reached(&mut self) {
        log::info!("event: required item count reached");
    }
    fn on_sequence_mismatch(&mut self, error_index: u32) {
        log::info!("event: sequence mismatch -> ceiling fall_{error_index}");
    }
    fn on_sequence_solved(&mut self) {
        log::info!("event: sequence solved -> door opens");
    }
    fn on_game_over(&mut self) {
        log::info!("event: game over");
    }
    fn on_item_placed(&mut self, slot: usize, correct: bool) {
        log::info!(
            "event: item on pedestal {slot} -> {} cue",
            if correct { "correct" } else { "wrong" }
        );
    }
    fn on_slot_cleared(&mut self, slot: usize) {
        log::info!("event: pedestal {slot} cleared");
    }
    fn on_puzzle_completed(&mut self) {
        log::info!("event: pedestal puzzle completed -> activate exit");
    }
}

fn run_for(scene: &mut EscapeScene, hooks: &mut LoggingHooks, seconds: f32) {
    let ticks = (seconds / SIM_DT).ceil() as usize;
    for _ in 0..ticks {
        scene.tick(SIM_DT);
        scene.dispatch(hooks);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SceneConfig::default();
    let mut scene = match EscapeScene::new(config) {
        Ok(scene) => scene,
        Err(err) => {
            log::error!("bad scene config: {err}");
            std::process::exit(1);
        }
    };
    let mut hooks = LoggingHooks;

    log::info!("--- balance scale ---");
    scene.add_weight(1.5);
    scene.add_weight(1.0);
    run_for(&mut scene, &mut hooks, 1.0);
    scene.add_weight(0.5);
    run_for(&mut scene, &mut hooks, 3.0);
    let pose = scene.tick(SIM_DT);
    log::info!("beam settled at {:.2} deg", pose.beam_angle_degrees);

    log::info!("--- pressure plates ---");
    scene.press_plate(1);
    scene.press_plate(3); // slip
    scene.dispatch(&mut hooks);
    scene.reset_sequence();
    for index in [1, 2, 3] {
        scene.press_plate(index);
    }
    scene.dispatch(&mut hooks);

    log::info!("--- pedestals ---");
    scene.place_item(0, Occupant { id: 100, identity: 0 });
    scene.place_item(1, Occupant { id: 101, identity: 9 }); // wrong statue
    scene.place_item(2, Occupant { id: 102, identity: 2 });
    run_for(&mut scene, &mut hooks, 0.1);
    scene.remove_item(1);
    scene.place_item(1, Occupant { id: 103, identity: 1 });
    run_for(&mut scene, &mut hooks, 0.1);

    log::info!("demo complete");
}
