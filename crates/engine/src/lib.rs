//! Session controller: owns a game, its command queue and its collaborators.

pub mod collab;
pub mod command;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use collab::{AudioSink, HighScoreStore, MemoryStore, NullAudio, RecordingAudio};
pub use command::{CommandQueue, COMMAND_CAPACITY};
pub use session::Session;
