//! Squish Platformer entry point
//!
//! Native builds run a headless scripted round and print the final snapshot.
//! The browser build is driven through `platform::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use squish_platformer::consts::SIM_DT;
    use squish_platformer::sim::{ArcadePhysics, GameState, tick};
    use squish_platformer::{Settings, Variant};

    env_logger::init();
    log::info!("Squish Platformer (native) starting...");

    // Usage: squish-platformer [variant | settings.json] [ticks] [seed]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut settings = match args.first() {
        Some(arg) if arg.ends_with(".json") => Settings::load(Path::new(arg)),
        Some(arg) => Settings::from_preset(Variant::from_str(arg).unwrap_or_else(|| {
            log::warn!("Unknown variant '{}', using {}", arg, Variant::default().as_str());
            Variant::default()
        })),
        None => Settings::default(),
    };
    let ticks: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(600);
    if let Some(seed) = args.get(2).and_then(|s| s.parse().ok()) {
        settings.seed = seed;
    }

    let mut state = GameState::new(settings);
    let mut physics = ArcadePhysics::default();

    for n in 0..ticks {
        let input = script::input_for(n, state.settings.input_mode);
        tick(&mut state, &mut physics, &input, SIM_DT);
        for event in state.drain_events() {
            log::info!("[tick {}] {:?}", state.time_ticks, event);
        }
        if state.is_game_over() {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks: score {}, wave {}",
        state.time_ticks,
        state.score,
        state.wave_index
    );
    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

/// Fixed input script for the headless demo
#[cfg(not(target_arch = "wasm32"))]
mod script {
    use squish_platformer::InputMode;
    use squish_platformer::sim::{Button, InputEvent, PointerPhase, TickInput};

    fn key(button: Button, pressed: bool) -> InputEvent {
        InputEvent::Key { button, pressed }
    }

    fn pointer(phase: PointerPhase, x: f32) -> InputEvent {
        InputEvent::Pointer { phase, x, y: 300.0 }
    }

    /// Input for tick `n`; the script repeats every 8 seconds
    pub fn input_for(n: u64, mode: InputMode) -> TickInput {
        let events = match (mode, n % 480) {
            (InputMode::Discrete, 60) => vec![key(Button::Right, true)],
            (InputMode::Discrete, 120) => vec![key(Button::Up, true)],
            (InputMode::Discrete, 122) => vec![key(Button::Up, false)],
            (InputMode::Discrete, 200) => vec![key(Button::Right, false)],
            (InputMode::Discrete, 260) => vec![key(Button::Left, true)],
            (InputMode::Discrete, 300) => vec![key(Button::Up, true)],
            (InputMode::Discrete, 302) => vec![key(Button::Up, false)],
            (InputMode::Discrete, 400) => vec![key(Button::Left, false)],
            (InputMode::Drag, 60) => vec![pointer(PointerPhase::Down, 200.0)],
            (InputMode::Drag, 90) => vec![pointer(PointerPhase::Move, 260.0)],
            (InputMode::Drag, 200) => vec![pointer(PointerPhase::Up, 260.0)],
            (InputMode::Drag, 260) => vec![pointer(PointerPhase::Down, 400.0)],
            (InputMode::Drag, 290) => vec![pointer(PointerPhase::Move, 320.0)],
            (InputMode::Drag, 400) => vec![pointer(PointerPhase::Out, 320.0)],
            _ => Vec::new(),
        };
        TickInput::new(events)
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
