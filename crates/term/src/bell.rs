//! Terminal bell audio sink.

use std::io::{self, Write};

use log::trace;

use crate::engine::AudioSink;
use crate::types::SoundCue;

/// Rings the terminal bell for each cue.
///
/// Terminals have one sound, so cues are only told apart by which ones ring:
/// by default rotations stay silent to keep the bell from firing on every key.
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
    ring_on_rotate: bool,
}

impl TerminalBell {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            ring_on_rotate: false,
        }
    }

    pub fn ring_on_rotate(mut self, on: bool) -> Self {
        self.ring_on_rotate = on;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        if cue == SoundCue::Rotate && !self.ring_on_rotate {
            return;
        }
        trace!("bell: {}", cue.as_str());
        // A failed bell is not worth interrupting the game for.
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}
