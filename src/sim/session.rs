//! Game session: lifecycle, score and high score authority
//!
//! One session lives for the whole process. Runs start with `play()` and end
//! with `game_over()`; between runs only the high score survives. Every
//! transition is synchronous and guarded, so calls made in the wrong phase
//! are silent no-ops.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{ContactOutcome, ContactTracker, Region, world_bounds};
use super::difficulty::ThresholdFlags;
use super::obstacle::ObstacleTrack;
use super::player::PhysicsBody;
use super::spawner::ObstacleSpawner;
use super::state::{EntityIds, GameEvent, GamePhase};
use crate::highscores::{HighScore, HighScoreUpdate};
use crate::persistence::HighScoreStore;
use crate::settings::Settings;

/// The process-wide game session
pub struct GameSession {
    pub(crate) settings: Settings,
    pub(crate) phase: GamePhase,
    pub(crate) score: u32,
    pub(crate) high_score: HighScore,
    pub(crate) thresholds: ThresholdFlags,
    pub(crate) player: PhysicsBody,
    /// Live obstacles, ascending by id
    pub(crate) obstacles: Vec<ObstacleTrack>,
    pub(crate) spawner: ObstacleSpawner,
    pub(crate) contacts: ContactTracker,
    pub(crate) bounds: Vec<Region>,
    pub(crate) rng: Pcg32,
    /// Seconds of Playing time; drives obstacle oscillation
    pub(crate) clock: f32,
    pub(crate) ids: EntityIds,
    viewport_left: f32,
    events: Vec<GameEvent>,
    store: Box<dyn HighScoreStore>,
}

impl GameSession {
    /// Create the session and load the stored high score
    ///
    /// A failing store is logged and treated as "no record yet".
    pub fn new(settings: Settings, store: Box<dyn HighScoreStore>, seed: u64) -> Self {
        let best = store.load_high_score().unwrap_or_else(|e| {
            log::warn!("Could not load high score, starting from 0: {}", e);
            0
        });
        log::info!("Session created (seed {}, high score {})", seed, best);

        Self {
            phase: GamePhase::Ready,
            score: 0,
            high_score: HighScore::new(best),
            thresholds: ThresholdFlags::default(),
            player: PhysicsBody::new(&settings.physics),
            obstacles: Vec::new(),
            spawner: ObstacleSpawner::new(settings.spawner.clone(), settings.obstacles.clone()),
            contacts: ContactTracker::new(),
            bounds: world_bounds(settings.world.floor_y, settings.world.ceiling_y),
            rng: Pcg32::seed_from_u64(seed),
            clock: 0.0,
            ids: EntityIds::default(),
            viewport_left: settings.world.viewport_left,
            events: Vec::new(),
            store,
            settings,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn player(&self) -> &PhysicsBody {
        &self.player
    }

    pub fn obstacles(&self) -> &[ObstacleTrack] {
        &self.obstacles
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Seconds of simulated play time
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn is_spawner_enabled(&self) -> bool {
        self.spawner.is_enabled()
    }

    /// Update the viewport's left visibility edge (window resize)
    ///
    /// Only obstacles spawned afterwards use the new edge.
    pub fn set_viewport_left(&mut self, x: f32) {
        self.viewport_left = x;
    }

    /// Retirement edge handed to new obstacles
    pub fn left_edge(&self) -> f32 {
        self.viewport_left - self.settings.world.retire_margin
    }

    /// Events raised since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// HUD score line
    pub fn score_text(&self) -> String {
        match self.phase {
            GamePhase::Ready | GamePhase::GameOver => {
                format!("{} | High: {}", self.score, self.high_score.best())
            }
            GamePhase::Playing | GamePhase::Paused => self.score.to_string(),
        }
    }

    /// Start a fresh run (from Ready or GameOver)
    pub fn play(&mut self) {
        match self.phase {
            GamePhase::Ready | GamePhase::GameOver => {}
            GamePhase::Playing | GamePhase::Paused => return,
        }

        self.score = 0;
        self.thresholds.clear();
        self.high_score.start_run();
        self.player.reset(&self.settings.physics);
        self.obstacles.clear();
        self.contacts.clear();
        self.spawner.enable();
        self.phase = GamePhase::Playing;

        log::info!("Run started (high score {})", self.high_score.best());
        self.emit(GameEvent::Started);
    }

    /// End the current run
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.phase = GamePhase::GameOver;
        self.spawner.disable();

        if self.high_score.observe(self.score).raised() {
            self.persist_high_score();
        }

        log::info!(
            "Game over: score {}, high score {}",
            self.score,
            self.high_score.best()
        );
        self.emit(GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score.best(),
        });
    }

    /// Freeze a live run
    pub fn pause(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Paused;
        self.spawner.disable();
        log::info!("Paused at score {}", self.score);
        self.emit(GameEvent::Paused);
    }

    /// Unfreeze a paused run
    pub fn resume(&mut self) {
        if self.phase != GamePhase::Paused {
            return;
        }
        self.phase = GamePhase::Playing;
        self.spawner.enable();
        log::info!("Resumed");
        self.emit(GameEvent::Resumed);
    }

    /// Jump impulse; ignored unless the run is live
    pub fn jump(&mut self) {
        if self.phase.is_simulating() {
            self.player.jump();
        }
    }

    /// Award one point
    pub fn increase_score(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.score += 1;
        self.emit(GameEvent::Scored { score: self.score });

        match self.high_score.observe(self.score) {
            HighScoreUpdate::Unchanged => {}
            HighScoreUpdate::Raised => self.persist_high_score(),
            HighScoreUpdate::FirstThisRun => {
                log::info!("New high score: {}", self.score);
                self.emit(GameEvent::NewHighScore { score: self.score });
                self.persist_high_score();
            }
        }

        if let Some(band) = self.thresholds.take_crossed(self.score) {
            let stats = band.stats();
            self.player.update_stats(stats.strength, stats.gravity, stats.tilt);
            log::info!("Difficulty level {} reached", band.level());
            self.emit(GameEvent::ThresholdCrossed { level: band.level() });
        }
    }

    /// Apply a resolved contact
    pub fn apply_contact(&mut self, outcome: ContactOutcome) {
        match outcome {
            ContactOutcome::IncreaseScore => self.increase_score(),
            ContactOutcome::GameOver => self.game_over(),
        }
    }

    /// Spawn one obstacle at the current score
    pub(crate) fn spawn_obstacle(&mut self) {
        let id = self.ids.next_entity_id();
        let left_edge = self.left_edge();
        let track = self.spawner.spawn(id, self.score, left_edge, &mut self.rng);
        log::debug!(
            "Spawned obstacle {} at y={:.2} (oscillating: {})",
            id,
            track.pos.y,
            track.moves_vertically()
        );
        self.obstacles.push(track);
        self.emit(GameEvent::ObstacleSpawned { id });
    }

    fn persist_high_score(&mut self) {
        let best = self.high_score.best();
        if let Err(e) = self.store.save_high_score(best) {
            log::warn!("Failed to save high score {}: {}", best, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, PersistenceError};
    use crate::sim::player::PlayerStats;
    use proptest::prelude::*;

    fn session_with(store: MemoryStore) -> GameSession {
        GameSession::new(Settings::default(), Box::new(store), 42)
    }

    fn playing() -> GameSession {
        let mut session = session_with(MemoryStore::new());
        session.play();
        session.drain_events();
        session
    }

    fn score_to(session: &mut GameSession, target: u32) {
        while session.score() < target {
            session.increase_score();
        }
    }

    #[test]
    fn test_starts_ready_and_frozen() {
        let session = session_with(MemoryStore::with_value(7));
        assert_eq!(session.phase(), GamePhase::Ready);
        assert_eq!(session.high_score(), 7);
        assert!(!session.is_spawner_enabled());
        assert_eq!(session.score_text(), "0 | High: 7");
    }

    #[test]
    fn test_play_resets_run_state() {
        let mut session = playing();
        score_to(&mut session, 25);
        session.spawn_obstacle();
        session.player.vel_y = -9.0;
        session.game_over();

        session.play();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 0);
        assert!(session.obstacles().is_empty());
        assert_eq!(session.player().vel_y, 0.0);
        assert_eq!(session.player().pos, session.settings().physics.spawn);
        assert_eq!(session.player().stats(), PlayerStats::new(3.0, -4.0, 3.5));
        assert!(session.is_spawner_enabled());
        assert_eq!(session.score_text(), "0");
    }

    #[test]
    fn test_play_ignored_mid_run() {
        let mut session = playing();
        score_to(&mut session, 3);
        session.play();
        assert_eq!(session.score(), 3);
        assert!(session.drain_events().iter().all(|e| *e != GameEvent::Started));
    }

    #[test]
    fn test_threshold_scenario_a() {
        let mut session = playing();
        score_to(&mut session, 7);
        assert_eq!(session.player().stats(), PlayerStats::new(3.0, -4.0, 3.5));
        session.increase_score();

        let crossings: Vec<_> = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ThresholdCrossed { .. }))
            .collect();
        assert_eq!(crossings, vec![GameEvent::ThresholdCrossed { level: 8 }]);
        assert_eq!(session.player().stats(), PlayerStats::new(6.0, -10.0, 6.0));
    }

    #[test]
    fn test_threshold_applied_once_per_run() {
        let mut session = playing();
        score_to(&mut session, 8);
        // Something else changes the stats; the band must not re-apply
        session.player.update_stats(1.0, -1.0, 1.0);
        score_to(&mut session, 19);
        assert_eq!(session.player().stats(), PlayerStats::new(1.0, -1.0, 1.0));

        score_to(&mut session, 20);
        assert_eq!(session.player().stats(), PlayerStats::new(7.0, -11.0, 7.0));
        score_to(&mut session, 30);
        assert_eq!(session.player().stats(), PlayerStats::new(8.0, -12.0, 8.0));

        let levels: Vec<_> = session
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::ThresholdCrossed { level } => Some(level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![8, 20, 30]);
    }

    #[test]
    fn test_play_rearms_threshold_bands() {
        let mut session = playing();
        score_to(&mut session, 25);
        session.game_over();

        session.play();
        session.drain_events();
        assert_eq!(session.player().stats(), PlayerStats::new(3.0, -4.0, 3.5));

        score_to(&mut session, 8);
        let crossed = session
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::ThresholdCrossed { level: 8 })
            .count();
        assert_eq!(crossed, 1);
        assert_eq!(session.player().stats(), PlayerStats::new(6.0, -10.0, 6.0));
    }

    #[test]
    fn test_high_score_scenario_b() {
        let store = MemoryStore::with_value(10);
        let mut session = session_with(store.clone());
        session.play();
        session.drain_events();

        let mut announced_at = Vec::new();
        for _ in 0..15 {
            session.increase_score();
            for event in session.drain_events() {
                if let GameEvent::NewHighScore { score } = event {
                    announced_at.push(score);
                }
            }
        }
        session.game_over();

        assert_eq!(announced_at, vec![11]);
        assert_eq!(session.high_score(), 15);
        assert_eq!(store.value(), 15);
        // persisted live on every raise: 11..=15
        assert_eq!(store.save_count(), 5);
    }

    #[test]
    fn test_no_save_below_record() {
        let store = MemoryStore::with_value(50);
        let mut session = session_with(store.clone());
        session.play();
        score_to(&mut session, 12);
        session.game_over();
        assert_eq!(store.value(), 50);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_pause_in_game_over_scenario_c() {
        let mut session = playing();
        session.game_over();
        session.drain_events();

        session.pause();
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_pause_resume_preserves_run() {
        let mut session = playing();
        score_to(&mut session, 9);
        session.pause();
        assert_eq!(session.phase(), GamePhase::Paused);
        assert!(!session.is_spawner_enabled());
        session.pause();
        session.resume();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 9);
        assert!(session.is_spawner_enabled());

        let events = session.drain_events();
        let pauses = events.iter().filter(|e| **e == GameEvent::Paused).count();
        assert_eq!(pauses, 1);
        assert!(events.contains(&GameEvent::Resumed));
    }

    #[test]
    fn test_pause_and_resume_ignored_when_not_live() {
        let mut session = session_with(MemoryStore::new());
        session.pause();
        session.resume();
        assert_eq!(session.phase(), GamePhase::Ready);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut session = playing();
        session.game_over();
        session.game_over();
        let overs = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
        assert!(!session.is_spawner_enabled());
    }

    #[test]
    fn test_score_ignored_outside_playing() {
        let mut session = playing();
        session.pause();
        session.increase_score();
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_jump_ignored_while_frozen() {
        let mut session = session_with(MemoryStore::new());
        session.jump();
        assert_eq!(session.player().vel_y, 0.0);
        session.play();
        session.jump();
        assert_eq!(session.player().vel_y, 3.0);
    }

    #[test]
    fn test_new_high_score_rearms_each_run() {
        let mut session = playing();
        score_to(&mut session, 2);
        session.game_over();
        session.play();
        session.drain_events();
        score_to(&mut session, 3);
        let announced = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::NewHighScore { .. }))
            .count();
        assert_eq!(announced, 1);
    }

    struct FailingStore;

    impl HighScoreStore for FailingStore {
        fn load_high_score(&self) -> Result<u32, PersistenceError> {
            Err(PersistenceError::NoDataDir)
        }

        fn save_high_score(&mut self, _score: u32) -> Result<(), PersistenceError> {
            Err(PersistenceError::NoDataDir)
        }
    }

    #[test]
    fn test_failing_store_is_tolerated() {
        let mut session = GameSession::new(Settings::default(), Box::new(FailingStore), 1);
        assert_eq!(session.high_score(), 0);
        session.play();
        score_to(&mut session, 4);
        session.game_over();
        assert_eq!(session.high_score(), 4);
    }

    #[test]
    fn test_left_edge_uses_margin() {
        let mut session = playing();
        assert_eq!(session.left_edge(), -10.0);
        session.set_viewport_left(-5.0);
        session.spawn_obstacle();
        assert_eq!(session.obstacles()[0].left_edge(), -6.0);
    }

    proptest! {
        #[test]
        fn prop_high_score_never_decreases(runs in prop::collection::vec(0u32..60, 1..8)) {
            let store = MemoryStore::with_value(5);
            let mut session = session_with(store.clone());
            let mut last = session.high_score();
            for target in runs {
                session.play();
                prop_assert_eq!(session.score(), 0);
                score_to(&mut session, target);
                session.game_over();
                prop_assert!(session.high_score() >= last);
                prop_assert_eq!(store.value(), session.high_score());
                last = session.high_score();
            }
        }
    }
}
