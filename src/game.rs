//! Host-facing driver
//!
//! Owns the simulation, the frame clock, the ranking table and the two
//! collaborators (audio and ranking storage). The host feeds it elapsed time
//! and input once per display frame.

use crate::audio::{AudioMixer, AudioSink};
use crate::highscores::{HighScores, RankEntry};
use crate::persistence::RankingStore;
use crate::platform::{self, FrameClock};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput, tick};

pub struct Game<A: AudioSink, S: RankingStore> {
    pub state: GameState,
    pub high_scores: HighScores,
    settings: Settings,
    clock: FrameClock,
    input: TickInput,
    audio: AudioMixer<A>,
    store: S,
}

impl<A: AudioSink, S: RankingStore> Game<A, S> {
    /// New session on the title screen. An unreadable ranking store starts
    /// an empty table.
    pub fn new(seed: u64, audio: A, store: S, settings: Settings) -> Self {
        let high_scores = match store.load() {
            Ok(entries) => {
                log::info!("Loaded {} ranking entries", entries.len());
                HighScores::from_entries(entries)
            }
            Err(e) => {
                log::warn!("Rankings unavailable, starting fresh: {}", e);
                HighScores::new()
            }
        };

        let mut state = GameState::new(seed);
        state.max_particles = settings.max_particles();

        Self {
            state,
            high_scores,
            audio: AudioMixer::new(audio, &settings),
            settings,
            clock: FrameClock::new(),
            input: TickInput::default(),
            store,
        }
    }

    /// Run however many ticks `elapsed_ms` covers, then route events to
    /// audio. Returns the number of ticks run.
    pub fn frame(&mut self, elapsed_ms: f64, input: &TickInput) -> u32 {
        self.input.merge(input);
        let ticks = self.clock.advance(elapsed_ms);
        for _ in 0..ticks {
            tick(&mut self.state, &self.input);
            // Clear one-shot inputs after processing
            self.input.clear_one_shots();
        }
        for event in self.state.drain_events() {
            self.audio.handle(&event);
        }
        ticks
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.state.max_particles = settings.max_particles();
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    pub fn audio(&self) -> &AudioMixer<A> {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drop any partial tick, e.g. after the window was hidden
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    /// Type one character into the name prompt
    pub fn type_char(&mut self, c: char) -> bool {
        match self.state.name_entry.as_mut() {
            Some(entry) => entry.push(c),
            None => false,
        }
    }

    pub fn backspace(&mut self) {
        if let Some(entry) = self.state.name_entry.as_mut() {
            entry.backspace();
        }
    }

    /// Record the finished run under the typed name and show the ranking.
    /// Returns the rank achieved, or None if nothing was submitted or the
    /// score missed the table.
    pub fn submit_name(&mut self) -> Option<usize> {
        if self.state.phase != GamePhase::GameOver {
            return None;
        }
        let name = match &self.state.name_entry {
            Some(entry) if entry.can_submit() => entry.text().trim_end().to_string(),
            _ => return None,
        };

        let rank = self.high_scores.add(RankEntry {
            name,
            score: self.state.score,
            stage: self.state.stage.min(crate::consts::FINAL_STAGE),
            date: platform::today(),
        });
        if let Err(e) = self.store.save(&self.high_scores.entries) {
            log::warn!("Failed to save rankings: {}", e);
        }

        self.state.name_entry = None;
        self.state.phase = GamePhase::Ranking;
        rank
    }
}
