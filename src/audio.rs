//! Audio feedback
//!
//! Translates session events into sound effect and music commands for
//! whatever backend the host provides. Playback is fire-and-forget; the
//! simulation never waits on it.

use crate::settings::AudioSettings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started
    GameStart,
    /// Passed a gap
    Score,
    /// Difficulty level reached (played at a level-specific pitch)
    Threshold,
    /// New high score
    HighScore,
    /// Game over
    GameOver,
}

/// Background music control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    Play,
    Pause,
    Resume,
    Stop,
}

/// One instruction for the audio backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    Effect { effect: SoundEffect, pitch: f32 },
    Music(MusicCommand),
}

/// Pitch of the threshold cue for a difficulty level
pub fn threshold_pitch(level: u32) -> f32 {
    match level {
        0..=19 => 1.1,
        20..=29 => 1.2,
        _ => 1.3,
    }
}

fn effect(effect: SoundEffect) -> AudioCommand {
    AudioCommand::Effect { effect, pitch: 1.0 }
}

/// Commands an event maps to, in playback order
pub fn commands_for(event: &GameEvent) -> Vec<AudioCommand> {
    match *event {
        GameEvent::Started => vec![
            effect(SoundEffect::GameStart),
            AudioCommand::Music(MusicCommand::Play),
        ],
        GameEvent::Scored { .. } => vec![effect(SoundEffect::Score)],
        GameEvent::NewHighScore { .. } => vec![effect(SoundEffect::HighScore)],
        GameEvent::ThresholdCrossed { level } => vec![AudioCommand::Effect {
            effect: SoundEffect::Threshold,
            pitch: threshold_pitch(level),
        }],
        GameEvent::GameOver { .. } => vec![
            effect(SoundEffect::GameOver),
            AudioCommand::Music(MusicCommand::Stop),
        ],
        GameEvent::Paused => vec![AudioCommand::Music(MusicCommand::Pause)],
        GameEvent::Resumed => vec![AudioCommand::Music(MusicCommand::Resume)],
        GameEvent::ObstacleSpawned { .. } | GameEvent::ObstacleRetired { .. } => Vec::new(),
    }
}

/// Audio backend
///
/// Implementations must tolerate being called when no device is available.
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect, pitch: f32, volume: f32);
    fn music(&mut self, command: MusicCommand, volume: f32);
}

/// Sink that only logs (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play_effect(&mut self, effect: SoundEffect, pitch: f32, volume: f32) {
        log::debug!("sfx {:?} pitch={} vol={:.2}", effect, pitch, volume);
    }

    fn music(&mut self, command: MusicCommand, volume: f32) {
        log::debug!("music {:?} vol={:.2}", command, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &AudioSettings) -> Self {
        Self {
            sink,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// React to one session event
    pub fn handle(&mut self, event: &GameEvent) {
        for command in commands_for(event) {
            match command {
                AudioCommand::Effect { effect, pitch } => {
                    let vol = self.effective(self.sfx_volume);
                    if vol > 0.0 {
                        self.sink.play_effect(effect, pitch, vol);
                    }
                }
                // Music state changes go through even when muted so that
                // unmuting later resumes from the right place
                AudioCommand::Music(cmd) => {
                    let vol = self.effective(self.music_volume);
                    self.sink.music(cmd, vol);
                }
            }
        }
    }

    pub fn handle_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.handle(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        effects: Vec<(SoundEffect, f32)>,
        music: Vec<MusicCommand>,
    }

    impl AudioSink for Recorder {
        fn play_effect(&mut self, effect: SoundEffect, pitch: f32, _volume: f32) {
            self.effects.push((effect, pitch));
        }

        fn music(&mut self, command: MusicCommand, _volume: f32) {
            self.music.push(command);
        }
    }

    #[test]
    fn test_threshold_pitches() {
        assert_eq!(threshold_pitch(8), 1.1);
        assert_eq!(threshold_pitch(20), 1.2);
        assert_eq!(threshold_pitch(30), 1.3);
    }

    #[test]
    fn test_run_lifecycle_drives_music() {
        let mut audio = AudioManager::new(Recorder::default(), &AudioSettings::default());
        audio.handle_all(&[
            GameEvent::Started,
            GameEvent::Paused,
            GameEvent::Resumed,
            GameEvent::GameOver {
                score: 3,
                high_score: 3,
            },
        ]);
        assert_eq!(
            audio.sink().music,
            vec![
                MusicCommand::Play,
                MusicCommand::Pause,
                MusicCommand::Resume,
                MusicCommand::Stop
            ]
        );
        assert_eq!(
            audio.sink().effects,
            vec![(SoundEffect::GameStart, 1.0), (SoundEffect::GameOver, 1.0)]
        );
    }

    #[test]
    fn test_threshold_event_uses_pitch() {
        let mut audio = AudioManager::new(Recorder::default(), &AudioSettings::default());
        audio.handle(&GameEvent::ThresholdCrossed { level: 20 });
        assert_eq!(audio.sink().effects, vec![(SoundEffect::Threshold, 1.2)]);
    }

    #[test]
    fn test_muted_skips_effects() {
        let mut audio = AudioManager::new(Recorder::default(), &AudioSettings::default());
        audio.set_muted(true);
        audio.handle(&GameEvent::Scored { score: 1 });
        audio.handle(&GameEvent::Started);
        assert!(audio.sink().effects.is_empty());
        assert_eq!(audio.sink().music, vec![MusicCommand::Play]);
    }

    #[test]
    fn test_obstacle_events_are_silent() {
        assert!(commands_for(&GameEvent::ObstacleSpawned { id: 1 }).is_empty());
        assert!(commands_for(&GameEvent::ObstacleRetired { id: 1 }).is_empty());
    }
}
