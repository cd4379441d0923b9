//! Services owned by the registry for the lifetime of a session.

use crate::resources::audio::AudioPlayer;
use crate::resources::imagestore::{ImageStore, PlaceholderLoader};
use crate::resources::random::Rand;

pub struct Services {
    pub images: ImageStore,
    /// `None` runs silently.
    pub audio: Option<AudioPlayer>,
    pub rand: Rand,
}

impl Services {
    pub fn new(images: ImageStore, audio: Option<AudioPlayer>, rand: Rand) -> Self {
        Self {
            images,
            audio,
            rand,
        }
    }

    /// Placeholder images, no audio, seeded randomness.
    pub fn headless(seed: u64) -> Self {
        Self::new(
            ImageStore::new(Box::new(PlaceholderLoader)),
            None,
            Rand::with_seed(seed),
        )
    }

    /// Fire-and-forget; a no-op without an audio player.
    pub fn play_sound(&self, id: &str) {
        if let Some(audio) = &self.audio {
            audio.play(id);
        }
    }

    /// Stop background threads. Called when the session ends.
    pub fn shutdown(&mut self) {
        if let Some(audio) = self.audio.as_mut() {
            audio.shutdown();
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(
            ImageStore::new(Box::new(PlaceholderLoader)),
            None,
            Rand::new(),
        )
    }
}
