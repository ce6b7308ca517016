//! Dash Runner - headless native driver
//!
//! Runs one session at a fixed 60 Hz step under the autopilot and prints the
//! final frame as JSON. Rendering and audio are not part of this binary;
//! emitted intents are logged instead.
//!
//! Usage: `dash-runner [--seed N] [--tuning FILE] [--seconds S]`

use std::process::ExitCode;

use dash_runner::consts::SIM_DT;
use dash_runner::sim::GameEvent;
use dash_runner::{GameState, TickInput, Tuning, tick};

struct Options {
    seed: u64,
    tuning: Option<String>,
    seconds: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            tuning: None,
            seconds: 180.0,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{} needs a value", arg));
        match arg.as_str() {
            "--seed" => {
                let v = value()?;
                options.seed = v.parse().map_err(|_| format!("bad seed: {}", v))?;
            }
            "--tuning" => options.tuning = Some(value()?),
            "--seconds" => {
                let v = value()?;
                options.seconds = v.parse().map_err(|_| format!("bad duration: {}", v))?;
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(options)
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("usage: dash-runner [--seed N] [--tuning FILE] [--seconds S]");
            return ExitCode::FAILURE;
        }
    };

    let tuning = match &options.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let mut state = match GameState::with_tuning(options.seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Dash Runner (headless) starting with seed {}", options.seed);

    let frames = (options.seconds / SIM_DT).ceil() as u64;
    let mut last = None;
    for frame_index in 0..frames {
        let input = TickInput::autopilot(&state);
        let frame = tick(&mut state, &input, SIM_DT);
        for event in &frame.events {
            match event {
                GameEvent::PlayHitSound { .. } => {
                    log::info!("[{:>6}] hit, {} lives left", frame_index, frame.lives)
                }
                other => log::info!("[{:>6}] {:?}", frame_index, other),
            }
        }
        let done = frame.game_over || frame.level_cleared;
        last = Some(frame);
        if done {
            break;
        }
    }

    match last.map(|frame| serde_json::to_string_pretty(&frame)) {
        Some(Ok(json)) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Some(Err(e)) => {
            log::error!("Could not encode final frame: {}", e);
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}
