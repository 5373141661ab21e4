//! Sound cue routing
//!
//! The simulation raises `GameEvent`s; this module turns them into sound
//! effect and music cues, applies the player's volume settings, and hands
//! them to whatever `AudioSink` the host provides.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits block (doesn't break)
    BlockHit,
    /// Block breaks
    BlockBreak,
    /// Ball hits paddle or shield
    PaddleHit,
    /// Pickup collected
    ItemPickup,
    /// Life lost
    Miss,
    /// Ball strikes the boss
    BossHit,
    /// Armor blast or boss destroyed
    Explosion,
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    Stage,
    Boss,
}

/// What the host should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Sfx(SoundEffect),
    StartMusic(Music),
    StopMusic,
}

/// Map a simulation event to its audio cue, if it has one
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    let cue = match event {
        GameEvent::BlockHit => Cue::Sfx(SoundEffect::BlockHit),
        GameEvent::BlockDestroyed { .. } => Cue::Sfx(SoundEffect::BlockBreak),
        GameEvent::Explosion | GameEvent::BossDefeated { .. } => Cue::Sfx(SoundEffect::Explosion),
        GameEvent::PaddleBounce | GameEvent::ShieldBounce => Cue::Sfx(SoundEffect::PaddleHit),
        GameEvent::ItemCaught { .. } => Cue::Sfx(SoundEffect::ItemPickup),
        GameEvent::LifeLost { .. } => Cue::Sfx(SoundEffect::Miss),
        GameEvent::BossHit { .. } => Cue::Sfx(SoundEffect::BossHit),
        GameEvent::MusicStart { boss } => Cue::StartMusic(if *boss { Music::Boss } else { Music::Stage }),
        GameEvent::MusicStop => Cue::StopMusic,
        GameEvent::StageCleared { .. } | GameEvent::GameOver { .. } => return None,
    };
    Some(cue)
}

/// Host audio backend. Volumes arrive already scaled to 0.0 - 1.0.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn start_music(&mut self, music: Music, volume: f32);
    fn stop_music(&mut self);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn start_music(&mut self, _music: Music, _volume: f32) {}
    fn stop_music(&mut self) {}
}

/// Writes cues to the debug log (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
    }

    fn start_music(&mut self, music: Music, volume: f32) {
        log::debug!("music {:?} @ {:.2}", music, volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stop");
    }
}

/// Applies master/sfx/music volumes and mute in front of a sink
pub struct AudioMixer<A: AudioSink> {
    sink: A,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<A: AudioSink> AudioMixer<A> {
    pub fn new(sink: A, settings: &Settings) -> Self {
        let mut mixer = Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        };
        mixer.apply_settings(settings);
        mixer
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio. Muting also silences running music.
    pub fn set_muted(&mut self, muted: bool) {
        if muted && !self.muted {
            self.sink.stop_music();
        }
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Route one simulation event to the sink
    pub fn handle(&mut self, event: &GameEvent) {
        match cue_for(event) {
            Some(Cue::Sfx(effect)) => {
                let vol = self.sfx_gain();
                if vol > 0.0 {
                    self.sink.play(effect, vol);
                }
            }
            Some(Cue::StartMusic(music)) => {
                let vol = self.music_gain();
                if vol > 0.0 {
                    self.sink.start_music(music, vol);
                }
            }
            Some(Cue::StopMusic) => self.sink.stop_music(),
            None => {}
        }
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }
}
