//! Collaborators a session talks to: an audio sink and a high score store.

use std::cell::Cell;

use crate::types::SoundCue;

/// Plays short cues. Implementations must not block the frame loop.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Records cues in order; used by tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundCue>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.played.push(cue);
    }
}

/// Persists the best score across runs.
pub trait HighScoreStore {
    /// Stored high score, 0 when nothing was saved yet.
    fn load(&self) -> anyhow::Result<u32>;
    fn save(&self, score: u32) -> anyhow::Result<()>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Cell<u32>,
    saves: Cell<u32>,
}

impl MemoryStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Cell::new(initial),
            saves: Cell::new(0),
        }
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    /// Number of successful `save` calls.
    pub fn saves(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> anyhow::Result<u32> {
        Ok(self.value.get())
    }

    fn save(&self, score: u32) -> anyhow::Result<()> {
        self.value.set(score);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for &T {
    fn load(&self) -> anyhow::Result<u32> {
        (**self).load()
    }

    fn save(&self, score: u32) -> anyhow::Result<()> {
        (**self).save(score)
    }
}
