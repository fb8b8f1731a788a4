//! Dart Arcade entry point
//!
//! Runs a headless autopilot session against the simulation core and prints
//! the final snapshot as JSON. Pass a settings JSON path to override defaults.

#[cfg(not(target_arch = "wasm32"))]
use dart_arcade::consts::SIM_DT;
#[cfg(not(target_arch = "wasm32"))]
use dart_arcade::sim::{GamePhase, GameState, TickInput, Trigger, UiButton};
#[cfg(not(target_arch = "wasm32"))]
use dart_arcade::{Session, Settings, angle_toward, distance, normalize_degrees};

/// Ten simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 60 * 60 * 10;
#[cfg(not(target_arch = "wasm32"))]
const MAX_RESTARTS: u32 = 10;
/// Close enough to release
#[cfg(not(target_arch = "wasm32"))]
const AIM_TOLERANCE: f32 = 0.5;

/// Heading that meets the board where it will be when the dart arrives
#[cfg(not(target_arch = "wasm32"))]
fn lead_heading(state: &GameState) -> f32 {
    let origin = state.dart.origin;
    let flight_ticks = (distance(origin, state.board.center) / state.settings.dart_speed).round();
    let mut board = state.board.clone();
    for _ in 0..flight_ticks as u32 {
        board.update(SIM_DT);
    }
    angle_toward(origin, board.center)
}

/// Input a player would give for the current state
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &GameState, restarts: &mut u32) -> TickInput {
    let mut input = TickInput::default();
    match state.phase() {
        GamePhase::NotStarted => input.start = Some(Trigger::Button(UiButton::Start)),
        GamePhase::Playing if !state.dart.in_flight => {
            let error = normalize_degrees(lead_heading(state) - state.dart.heading);
            if error.abs() <= AIM_TOLERANCE {
                input.throw = Some(Trigger::Key);
            } else if error > 0.0 {
                input.aim_down = true;
            } else {
                input.aim_up = true;
            }
        }
        GamePhase::Playing => {}
        GamePhase::Cleared => input.quit = Some(Trigger::Button(UiButton::Quit)),
        GamePhase::GameOver { .. } => {
            if state.can_advance() {
                input.advance = Some(Trigger::Button(UiButton::NextLevel));
            } else if *restarts < MAX_RESTARTS {
                *restarts += 1;
                input.restart = Some(Trigger::Button(UiButton::Restart));
            } else {
                input.quit = Some(Trigger::Key);
            }
        }
    }
    input
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dart Arcade (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load settings from {}: {} (using defaults)", path, e);
            Settings::default()
        }),
        None => Settings::default(),
    };

    let mut session = match Session::new(settings) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };

    let mut restarts = 0;
    let mut ticks = 0;
    while session.is_running() && ticks < MAX_TICKS {
        let input = autopilot(session.state(), &mut restarts);
        for event in session.update(SIM_DT, &input) {
            if event.is_resolution() {
                log::info!("Throw: {:?}", event);
            } else {
                log::debug!("{:?}", event);
            }
        }
        ticks += 1;
    }
    if ticks >= MAX_TICKS {
        log::warn!("Autopilot stopped after {} ticks", ticks);
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build only ships the library
}
