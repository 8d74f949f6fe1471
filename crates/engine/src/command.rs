//! Bounded queue of pending player commands.
//!
//! Input handlers push as events arrive; the session drains everything once
//! per frame, in arrival order. A full queue drops the newest command and
//! counts it.

use arrayvec::ArrayVec;

use crate::types::GameAction;

/// Commands held between two frames.
pub const COMMAND_CAPACITY: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: ArrayVec<GameAction, COMMAND_CAPACITY>,
    dropped: u64,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action`. Returns `false` if the queue was full.
    pub fn push(&mut self, action: GameAction) -> bool {
        match self.pending.try_push(action) {
            Ok(()) => true,
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Commands rejected because the queue was full, since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Remove and return every pending command, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = GameAction> + '_ {
        self.pending.drain(..)
    }
}
