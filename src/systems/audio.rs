//! Body of the dedicated audio thread.
//!
//! The thread owns the [`SoundBackend`] so platform audio calls never happen
//! on the frame worker. Each sound is loaded at most once; a failed load is
//! logged and the sound is skipped, but a later play retries the load.

use crossbeam_channel::Receiver;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use crate::events::audio::AudioCmd;
use crate::resources::audio::SoundBackend;

/// Blocks on `rx_cmd` until [`AudioCmd::Shutdown`] arrives or every sender is dropped.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, mut backend: Box<dyn SoundBackend>) {
    info!(
        "audio thread running (id={:?})",
        std::thread::current().id()
    );
    let mut loaded: FxHashSet<String> = FxHashSet::default();

    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::Preload { id } => {
                ensure_loaded(backend.as_mut(), &mut loaded, id);
            }
            AudioCmd::Play { id } => {
                if let Some(id) = ensure_loaded(backend.as_mut(), &mut loaded, id) {
                    debug!("audio play id='{}'", id);
                    backend.play(id);
                }
            }
            AudioCmd::UnloadAll => {
                debug!("audio unload all ({} sounds)", loaded.len());
                backend.unload_all();
                loaded.clear();
            }
            AudioCmd::Shutdown => {
                debug!("audio shutdown requested");
                break;
            }
        }
    }

    backend.unload_all();
    info!("audio thread exiting");
}

/// Load `id` unless already loaded. Returns the cached id on success.
fn ensure_loaded<'a>(
    backend: &mut dyn SoundBackend,
    loaded: &'a mut FxHashSet<String>,
    id: String,
) -> Option<&'a str> {
    if !loaded.contains(&id) {
        if let Err(e) = backend.load(&id) {
            warn!("{}", e);
            return None;
        }
        debug!("audio loaded id='{}'", id);
        loaded.insert(id.clone());
    }
    loaded.get(&id).map(String::as_str)
}
