//! Engine configuration.
//!
//! Settings are loaded from an INI file. Anything missing from the file keeps
//! its default, so an empty or partial file is valid.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! width = 1600
//! height = 900
//!
//! [timing]
//! step_ms = 16
//! fps_log_secs = 5
//! pace = true
//!
//! [assets]
//! default_image = missing
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use configparser::ini::Ini;
use log::info;

use crate::error::EngineError;

const DEFAULT_WORLD_WIDTH: f32 = 1600.0;
const DEFAULT_WORLD_HEIGHT: f32 = 900.0;
const DEFAULT_STEP_MS: u64 = 16;
const DEFAULT_FPS_LOG_SECS: u64 = 5;
const DEFAULT_PACE: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./hopscotch.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// World width in world units.
    pub world_width: f32,
    /// World height in world units.
    pub world_height: f32,
    /// Fixed simulation step in milliseconds.
    pub step_ms: u64,
    /// Seconds between throughput log lines. Zero disables them.
    pub fps_log_secs: u64,
    /// Sleep off the rest of each step instead of running flat out.
    pub pace: bool,
    /// Image substituted when a lookup fails.
    pub default_image: Option<String>,
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            step_ms: DEFAULT_STEP_MS,
            fps_log_secs: DEFAULT_FPS_LOG_SECS,
            pace: DEFAULT_PACE,
            default_image: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Read `path` on top of the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let mut config = Self::with_path(path.as_ref());
        config.load_from_file()?;
        Ok(config)
    }

    /// Load settings from [`Self::config_path`]; missing keys keep their current values.
    pub fn load_from_file(&mut self) -> Result<(), EngineError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|e| {
            EngineError::Config(format!("failed to load {:?}: {}", self.config_path, e))
        })?;
        self.apply(&ini)
    }

    /// Parse settings from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), EngineError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|e| EngineError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), EngineError> {
        // [world]
        if let Some(width) = ini.getfloat("world", "width").map_err(EngineError::Config)? {
            self.world_width = width as f32;
        }
        if let Some(height) = ini.getfloat("world", "height").map_err(EngineError::Config)? {
            self.world_height = height as f32;
        }

        // [timing]
        if let Some(step) = ini.getuint("timing", "step_ms").map_err(EngineError::Config)? {
            self.step_ms = step;
        }
        if let Some(secs) = ini
            .getuint("timing", "fps_log_secs")
            .map_err(EngineError::Config)?
        {
            self.fps_log_secs = secs;
        }
        if let Some(pace) = ini.getbool("timing", "pace").map_err(EngineError::Config)? {
            self.pace = pace;
        }

        // [assets]
        if let Some(image) = ini.get("assets", "default_image") {
            self.default_image = Some(image).filter(|s| !s.is_empty());
        }

        self.validate()?;
        info!(
            "Loaded config: world {}x{}, step {}ms, pace={}, default_image={:?}",
            self.world_width, self.world_height, self.step_ms, self.pace, self.default_image
        );
        Ok(())
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(EngineError::Config(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if self.step_ms == 0 {
            return Err(EngineError::Config("step_ms must be at least 1".into()));
        }
        Ok(())
    }

    /// Save settings to [`Self::config_path`] in the layout [`Self::load_from_file`] reads.
    pub fn save_to_file(&self) -> Result<(), EngineError> {
        let mut ini = Ini::new();

        ini.set("world", "width", Some(self.world_width.to_string()));
        ini.set("world", "height", Some(self.world_height.to_string()));

        ini.set("timing", "step_ms", Some(self.step_ms.to_string()));
        ini.set("timing", "fps_log_secs", Some(self.fps_log_secs.to_string()));
        ini.set("timing", "pace", Some(self.pace.to_string()));

        ini.set("assets", "default_image", self.default_image.clone());

        ini.write(&self.config_path).map_err(|e| {
            EngineError::Config(format!("failed to save {:?}: {}", self.config_path, e))
        })?;
        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    /// Fixed step in seconds, as handed to the registry.
    pub fn step_seconds(&self) -> f32 {
        self.step_ms as f32 / 1000.0
    }

    /// `None` when throughput logging is disabled.
    pub fn fps_log_interval(&self) -> Option<Duration> {
        (self.fps_log_secs > 0).then(|| Duration::from_secs(self.fps_log_secs))
    }
}
