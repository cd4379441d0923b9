//! Engine error type.
//!
//! Only setup and teardown paths return errors. The frame loop itself never
//! propagates an [`EngineError`]: anomalies inside a tick are logged and
//! handled locally (substitute, replace or skip).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration file could not be read, parsed or written.
    #[error("config error: {0}")]
    Config(String),
    /// An image could not be decoded by the platform loader.
    #[error("failed to load image '{key}': {reason}")]
    ImageLoad { key: String, reason: String },
    /// A sound could not be loaded by the platform backend.
    #[error("failed to load sound '{id}': {reason}")]
    SoundLoad { id: String, reason: String },
    /// The audio thread is no longer receiving commands.
    #[error("audio thread has shut down")]
    AudioThreadGone,
    /// A background thread (frame worker or audio) could not be started.
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),
    /// The frame worker thread panicked inside a game hook.
    #[error("frame worker panicked: {0}")]
    WorkerPanicked(String),
}
