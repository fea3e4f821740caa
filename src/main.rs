//! Maby Quest entry point
//!
//! Headless native runner: loads settings and the stored high score, then
//! plays a few autopilot runs at the fixed timestep and logs what happens.
//! Run with `RUST_LOG=debug` to see every spawn and sound cue.

use maby_quest::FrameClock;
use maby_quest::audio::{AudioManager, LogSink};
use maby_quest::consts::SIM_DT;
use maby_quest::persistence::{HighScoreStore, KeyValueFile, MemoryStore};
use maby_quest::platform::{NullPresentation, Shell};
use maby_quest::settings::Settings;
use maby_quest::sim::{GameEvent, GamePhase, GameSession, TickInput, tick};

/// Autopilot runs per launch
const RUNS: u32 = 3;
/// Give up on a run after this much simulated time
const MAX_RUN_SECS: f32 = 120.0;
/// Simulated display frame time (a 30 Hz host)
const FRAME_DT: f32 = 1.0 / 30.0;

fn main() {
    env_logger::init();
    log::info!("Maby Quest (headless) starting...");

    let (settings, store) = match KeyValueFile::data_dir() {
        Ok(dir) => {
            let settings = Settings::load_or_default(&dir.join(Settings::FILE_NAME));
            let store: Box<dyn HighScoreStore> =
                Box::new(KeyValueFile::new(dir.join(KeyValueFile::FILE_NAME)));
            (settings, store)
        }
        Err(e) => {
            log::warn!("{}; high score will not persist", e);
            let store: Box<dyn HighScoreStore> = Box::new(MemoryStore::new());
            (Settings::default(), store)
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut audio = AudioManager::new(LogSink, &settings.audio);
    let mut session = GameSession::new(settings, store, seed);
    let mut shell = Shell::new(NullPresentation);
    shell.show_about();

    for run in 1..=RUNS {
        let mut clock = FrameClock::new();
        let mut input = TickInput {
            play: true,
            ..Default::default()
        };
        let max_frames = (MAX_RUN_SECS / FRAME_DT) as u32;

        'frames: for _ in 0..max_frames {
            for _ in 0..clock.advance(FRAME_DT) {
                tick(&mut session, &input, SIM_DT);
                input = TickInput {
                    jump: autopilot_wants_jump(&session),
                    ..Default::default()
                };

                for event in session.drain_events() {
                    audio.handle(&event);
                    match event {
                        GameEvent::ObstacleSpawned { .. } | GameEvent::ObstacleRetired { .. } => {}
                        other => log::info!("[run {}] {:?}", run, other),
                    }
                }

                if session.phase() == GamePhase::GameOver {
                    break 'frames;
                }
            }
        }

        // Runs that survive the time limit end like any other
        if session.phase() == GamePhase::Playing {
            session.game_over();
            for event in session.drain_events() {
                audio.handle(&event);
            }
        }
        log::info!("[run {}] {}", run, session.score_text());
    }

    log::info!("Best score: {}", session.high_score());
}

/// Flap whenever the player sinks below the middle of the next gap
fn autopilot_wants_jump(session: &GameSession) -> bool {
    let player = session.player();
    let target_y = session
        .obstacles()
        .iter()
        .find(|o| o.pos.x + 0.5 > player.pos.x)
        .map(|o| o.pos.y)
        .unwrap_or(0.0);

    player.pos.y < target_y - 0.3 && player.vel_y <= 0.0
}
