//! Fire-and-forget sound playback.
//!
//! [`AudioPlayer::start`] spawns the audio thread and returns a handle that
//! the registry keeps as a service. Game code calls [`AudioPlayer::play`]; the
//! request crosses an unbounded channel and the call returns immediately.
//! Call [`AudioPlayer::shutdown`] during teardown to stop and join the thread.

use std::thread::JoinHandle;

use crossbeam_channel::{Sender, unbounded};
use log::{info, warn};

use crate::error::EngineError;
use crate::events::audio::AudioCmd;
use crate::systems::audio::audio_thread;

/// Platform sound output driven exclusively by the audio thread.
pub trait SoundBackend: Send {
    /// Prepare `id` for playback.
    fn load(&mut self, id: &str) -> Result<(), EngineError>;
    /// Start playing a previously loaded `id` once.
    fn play(&mut self, id: &str);
    /// Release everything loaded so far.
    fn unload_all(&mut self) {}
}

/// Backend that accepts every sound and plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl SoundBackend for SilentBackend {
    fn load(&mut self, _id: &str) -> Result<(), EngineError> {
        Ok(())
    }

    fn play(&mut self, _id: &str) {}
}

/// Handle to the background audio thread.
pub struct AudioPlayer {
    tx_cmd: Sender<AudioCmd>,
    handle: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    /// Spawn the audio thread around `backend`.
    pub fn start(backend: Box<dyn SoundBackend>) -> Result<Self, EngineError> {
        let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
        let handle = std::thread::Builder::new()
            .name("audio".into())
            .spawn(move || audio_thread(rx_cmd, backend))
            .map_err(EngineError::WorkerSpawn)?;
        info!("audio thread started");
        Ok(Self {
            tx_cmd,
            handle: Some(handle),
        })
    }

    /// Request that `id` be played once. Never blocks.
    pub fn play(&self, id: &str) {
        if self.send(AudioCmd::Play { id: id.to_string() }).is_err() {
            warn!("dropping play request for '{}': audio thread is gone", id);
        }
    }

    pub fn preload(&self, id: &str) -> Result<(), EngineError> {
        self.send(AudioCmd::Preload { id: id.to_string() })
    }

    pub fn unload_all(&self) -> Result<(), EngineError> {
        self.send(AudioCmd::UnloadAll)
    }

    /// Stop the audio thread and wait for it to exit. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.tx_cmd.send(AudioCmd::Shutdown);
            if handle.join().is_err() {
                warn!("audio thread panicked during shutdown");
            }
            info!("audio thread stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), EngineError> {
        if self.handle.is_none() {
            return Err(EngineError::AudioThreadGone);
        }
        self.tx_cmd
            .send(cmd)
            .map_err(|_| EngineError::AudioThreadGone)
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
