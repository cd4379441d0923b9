/// Commands sent *to* the audio thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    /// Load `id` if it has not been loaded yet, without playing it.
    Preload { id: String },
    /// Play `id` once, loading it first if needed.
    Play { id: String },
    /// Forget every loaded sound.
    UnloadAll,
    Shutdown,
}
