//! Sound cue mapping
//!
//! Playback belongs to the platform layer. This module decides which effect
//! an event triggers, how loud, and where it sits in the stereo field.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Artifact collected, more remain
    Artifact,
    /// Final artifact collected
    LastArtifact,
    /// Key picked up
    Key,
    /// Door opened with a key
    DoorUnlock,
    /// Actor bounced off a locked door
    DoorBounce,
    Teleport,
    /// Stepped off the path
    Fall,
    /// Exit reached
    LevelUp,
    /// Turn record beaten
    NewBest,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        Some(match event {
            GameEvent::Artifact { .. } => SoundEffect::Artifact,
            GameEvent::LastArtifact { .. } => SoundEffect::LastArtifact,
            GameEvent::Key { .. } => SoundEffect::Key,
            GameEvent::DoorUnlock { .. } => SoundEffect::DoorUnlock,
            GameEvent::DoorBounce { .. } => SoundEffect::DoorBounce,
            GameEvent::Teleport { .. } => SoundEffect::Teleport,
            GameEvent::Fall { .. } => SoundEffect::Fall,
            GameEvent::LevelUp { .. } => SoundEffect::LevelUp,
            GameEvent::NewBest { .. } => SoundEffect::NewBest,
            _ => return None,
        })
    }
}

/// A sound to play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioCue {
    pub effect: SoundEffect,
    /// 0.0 - 1.0
    pub volume: f32,
    /// -1.0 (left) to 1.0 (right)
    pub pan: f32,
}

/// Turns simulation events into cues
#[derive(Debug, Clone)]
pub struct AudioMixer {
    volume: f32,
    stereo: bool,
    board_left: f32,
    board_width: f32,
}

impl AudioMixer {
    pub fn new(settings: &Settings, board_left: f32, board_width: f32) -> Self {
        Self {
            volume: settings.effect_volume(),
            stereo: settings.stereo_pan,
            board_left,
            board_width,
        }
    }

    /// Stereo balance for a source at screen x
    pub fn pan_for(&self, x: f32) -> f32 {
        if !self.stereo || self.board_width <= 0.0 {
            return 0.0;
        }
        ((x - self.board_left) / self.board_width * 2.0 - 1.0).clamp(-1.0, 1.0)
    }

    pub fn cue(&self, event: &GameEvent) -> Option<AudioCue> {
        if self.volume <= 0.0 {
            return None;
        }
        let effect = SoundEffect::for_event(event)?;
        let pan = event.position().map_or(0.0, |p| self.pan_for(p.x));
        Some(AudioCue {
            effect,
            volume: self.volume,
            pan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn mixer() -> AudioMixer {
        AudioMixer::new(&Settings::default(), 0.0, 200.0)
    }

    #[test]
    fn test_pan_follows_source() {
        let mixer = mixer();
        let left = mixer.cue(&GameEvent::Key { pos: Vec2::new(0.0, 10.0) }).unwrap();
        let mid = mixer.cue(&GameEvent::Key { pos: Vec2::new(100.0, 10.0) }).unwrap();
        let right = mixer.cue(&GameEvent::Key { pos: Vec2::new(250.0, 10.0) }).unwrap();
        assert_eq!(left.pan, -1.0);
        assert_eq!(mid.pan, 0.0);
        assert_eq!(right.pan, 1.0);
    }

    #[test]
    fn test_positionless_events_are_centred() {
        let cue = mixer().cue(&GameEvent::NewBest { level: 0, turns: 3 }).unwrap();
        assert_eq!(cue.effect, SoundEffect::NewBest);
        assert_eq!(cue.pan, 0.0);
    }

    #[test]
    fn test_silent_events_and_mute() {
        assert!(mixer().cue(&GameEvent::Restart { level: 0 }).is_none());

        let muted = Settings {
            muted: true,
            ..Settings::default()
        };
        let mixer = AudioMixer::new(&muted, 0.0, 200.0);
        assert!(mixer.cue(&GameEvent::Fall { pos: Vec2::ZERO }).is_none());
    }
}
