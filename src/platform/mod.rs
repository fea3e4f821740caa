//! Platform abstraction layer
//!
//! The core never branches on platform. Hosts provide a `Presentation` with
//! the two capabilities the game needs (quit confirmation and info panels);
//! `Shell` implements the app-level flows on top of it.

use crate::sim::{GamePhase, GameSession};

/// Game title shown in info panels
pub const GAME_TITLE: &str = "MABY ENDLESS QUEST";
pub const GAME_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Presentation-layer capabilities
pub trait Presentation {
    /// Ask the player whether to quit; true means quit
    fn confirm_quit(&mut self) -> bool;

    /// Show an informational panel
    fn show_info(&mut self, text: &str);
}

/// Host without dialogs: quitting needs no confirmation, info is logged
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn confirm_quit(&mut self) -> bool {
        true
    }

    fn show_info(&mut self, text: &str) {
        log::info!("{}", text);
    }
}

/// Result of a quit request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitDecision {
    Quit,
    Stay,
}

/// About panel text
pub fn about_text() -> String {
    format!(
        "{GAME_TITLE}\n\nVersion: {GAME_VERSION}\n\nFly through the gaps, dodge the nets.\n\nEnjoy the game and have fun!"
    )
}

/// Credits panel text
pub fn credits_text() -> String {
    format!(
        "{GAME_TITLE}\n\nVersion: {GAME_VERSION}\n\nSprites: https://www.canva.com/\nSounds: https://pixabay.com/sound-effects/\n\nEnjoy the game and have fun!"
    )
}

/// App-level flows around a session
pub struct Shell<P: Presentation> {
    presentation: P,
    quitting: bool,
}

impl<P: Presentation> Shell<P> {
    pub fn new(presentation: P) -> Self {
        Self {
            presentation,
            quitting: false,
        }
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// Whether a quit confirmation is in progress
    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Back button / window close
    ///
    /// Pauses a live run while asking; resumes it if the player stays.
    pub fn request_quit(&mut self, session: &mut GameSession) -> QuitDecision {
        if self.quitting {
            return QuitDecision::Stay;
        }
        self.quitting = true;
        session.pause();

        if self.presentation.confirm_quit() {
            log::info!("Quit confirmed");
            return QuitDecision::Quit;
        }

        self.quitting = false;
        if session.phase() == GamePhase::Paused {
            session.resume();
        }
        QuitDecision::Stay
    }

    /// App moved to background (true) or foreground (false)
    ///
    /// Backgrounding pauses a live run; foregrounding leaves it paused until
    /// the player resumes.
    pub fn on_app_pause(&mut self, session: &mut GameSession, paused: bool) {
        if paused && !self.quitting {
            session.pause();
        }
    }

    pub fn show_about(&mut self) {
        self.presentation.show_info(&about_text());
    }

    pub fn show_credits(&mut self) {
        self.presentation.show_info(&credits_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::settings::Settings;

    struct Scripted {
        answer: bool,
        asked: usize,
        shown: Vec<String>,
    }

    impl Scripted {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                asked: 0,
                shown: Vec::new(),
            }
        }
    }

    impl Presentation for Scripted {
        fn confirm_quit(&mut self) -> bool {
            self.asked += 1;
            self.answer
        }

        fn show_info(&mut self, text: &str) {
            self.shown.push(text.to_string());
        }
    }

    fn live_session() -> GameSession {
        let mut session = GameSession::new(Settings::default(), Box::new(MemoryStore::new()), 3);
        session.play();
        session
    }

    #[test]
    fn test_declined_quit_resumes_run() {
        let mut session = live_session();
        let mut shell = Shell::new(Scripted::answering(false));
        assert_eq!(shell.request_quit(&mut session), QuitDecision::Stay);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(!shell.is_quitting());
        assert_eq!(shell.presentation().asked, 1);
    }

    #[test]
    fn test_confirmed_quit_leaves_run_paused() {
        let mut session = live_session();
        let mut shell = Shell::new(Scripted::answering(true));
        assert_eq!(shell.request_quit(&mut session), QuitDecision::Quit);
        assert_eq!(session.phase(), GamePhase::Paused);
        assert!(shell.is_quitting());
    }

    #[test]
    fn test_declined_quit_on_game_over_stays_over() {
        let mut session = live_session();
        session.game_over();
        let mut shell = Shell::new(Scripted::answering(false));
        shell.request_quit(&mut session);
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_backgrounding_pauses() {
        let mut session = live_session();
        let mut shell = Shell::new(NullPresentation);
        shell.on_app_pause(&mut session, false);
        assert_eq!(session.phase(), GamePhase::Playing);
        shell.on_app_pause(&mut session, true);
        assert_eq!(session.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_info_panels() {
        let mut shell = Shell::new(Scripted::answering(false));
        shell.show_about();
        shell.show_credits();
        let shown = &shell.presentation().shown;
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|t| t.starts_with(GAME_TITLE)));
        assert!(shown[1].contains("Sounds"));
    }
}
