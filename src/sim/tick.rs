//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::collision::resolve;
use super::session::GameSession;
use super::state::{GameEvent, GamePhase};

/// Input signals for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (tap/click/space)
    pub jump: bool,
    /// Pause toggle (app lifecycle or pause button)
    pub pause: bool,
    /// Start a run (play button)
    pub play: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.play {
        session.play();
    }

    // Handle pause toggle
    if input.pause {
        match session.phase {
            GamePhase::Playing => session.pause(),
            GamePhase::Paused => session.resume(),
            GamePhase::Ready | GamePhase::GameOver => {}
        }
    }

    if input.jump {
        session.jump();
    }

    // Frozen unless a run is live
    if !session.phase.is_simulating() {
        return;
    }

    session.clock += dt;
    let clock = session.clock;

    session.player.tick(dt);

    // Scroll obstacles and retire those past the left edge
    let mut retired = Vec::new();
    session.obstacles.retain_mut(|track| {
        if track.tick(dt, clock) {
            retired.push(track.id);
            false
        } else {
            true
        }
    });
    for id in retired {
        log::debug!("Retired obstacle {}", id);
        session.emit(GameEvent::ObstacleRetired { id });
    }

    if session.spawner.update(dt) {
        session.spawn_obstacle();
    }

    // Contacts are applied in the order they were detected
    let player_box = session.player.collider();
    let contacts = session
        .contacts
        .begin_contacts(&player_box, &session.obstacles, &session.bounds);
    for contact in contacts {
        if let Some(outcome) = resolve(contact.kind) {
            session.apply_contact(outcome);
        }
    }
}
