//! Decoded image cache keyed by resource id.
//!
//! Decoding is the platform's job: an [`ImageLoader`] turns an opaque key into
//! an [`Image`]. The [`ImageStore`] asks the loader at most once per key and
//! hands out shared handles afterwards, so a hundred identical sprites or a
//! cycling animation share one decoded copy.
//!
//! When a key fails to load, the store logs the failure and substitutes the
//! configured default image. The failure is remembered, so a broken key is not
//! retried every frame.

use std::sync::Arc;

use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::EngineError;

/// A decoded image. Pixels are opaque to the engine and only forwarded to the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub key: Arc<str>,
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u32]>,
}

impl Image {
    /// Image with no pixel data, for platforms that draw by key.
    pub fn placeholder(key: &str, width: u32, height: u32) -> Self {
        Self {
            key: Arc::from(key),
            width,
            height,
            pixels: Arc::from(Vec::<u32>::new()),
        }
    }
}

/// Platform hook that decodes the image behind a key.
pub trait ImageLoader: Send {
    fn load(&mut self, key: &str) -> Result<Image, EngineError>;
}

/// Loader that fabricates a 1x1 placeholder for every key. Useful headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderLoader;

impl ImageLoader for PlaceholderLoader {
    fn load(&mut self, key: &str) -> Result<Image, EngineError> {
        Ok(Image::placeholder(key, 1, 1))
    }
}

pub struct ImageStore {
    loader: Box<dyn ImageLoader>,
    cache: FxHashMap<Arc<str>, Arc<Image>>,
    failed: FxHashSet<Arc<str>>,
    default_key: Option<Arc<str>>,
}

impl ImageStore {
    pub fn new(loader: Box<dyn ImageLoader>) -> Self {
        Self {
            loader,
            cache: FxHashMap::default(),
            failed: FxHashSet::default(),
            default_key: None,
        }
    }

    /// Key substituted when a lookup fails.
    pub fn with_default(mut self, key: impl Into<Arc<str>>) -> Self {
        self.default_key = Some(key.into());
        self
    }

    pub fn set_default(&mut self, key: impl Into<Arc<str>>) {
        self.default_key = Some(key.into());
    }

    /// Resolve `key`, falling back to the default image on failure.
    ///
    /// Returns `None` only when both the key and the default fail to load (or
    /// no default is configured).
    pub fn get(&mut self, key: &str) -> Option<Arc<Image>> {
        if let Some(image) = self.load_cached(key) {
            return Some(image);
        }
        let default_key = self.default_key.clone()?;
        if default_key.as_ref() == key {
            return None;
        }
        self.load_cached(&default_key)
    }

    /// Whether `key` has been decoded already.
    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every decoded image and forget past failures.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.failed.clear();
    }

    fn load_cached(&mut self, key: &str) -> Option<Arc<Image>> {
        if let Some(image) = self.cache.get(key) {
            return Some(image.clone());
        }
        if self.failed.contains(key) {
            return None;
        }
        match self.loader.load(key) {
            Ok(image) => {
                let image = Arc::new(image);
                self.cache.insert(Arc::from(key), image.clone());
                Some(image)
            }
            Err(e) => {
                warn!("{}; substituting default image", e);
                self.failed.insert(Arc::from(key));
                None
            }
        }
    }
}
