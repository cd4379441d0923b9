//! Named motion states for sprite animation.
//!
//! A [`MotionSet`] maps state names to [`Motion`]s: a sequence of image keys
//! shown for a fixed duration each, or a single still image. A motion whose
//! last frame is [`MotionFrame::End`] plays once; when playback reaches the
//! sentinel the [`Animation`] falls back to the set's default state and
//! re-evaluates in the same lookup, so no blank frame is ever drawn.
//!
//! Motion sets are plain data and round-trip through JSON:
//!
//! ```json
//! {
//!   "default_state": "idle",
//!   "motions": {
//!     "idle":  { "frames": [{ "image": "frog" }] },
//!     "hop":   { "frames": [{ "image": "frog_crouch" }, { "image": "frog_leap" }, "end"],
//!                "frame_duration": 0.1 }
//!   }
//! }
//! ```

use bevy_ecs::prelude::Component;
use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionFrame {
    Image(String),
    /// Stop here and return to the default state.
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub frames: Vec<MotionFrame>,
    /// Seconds per frame. `None` holds the first frame forever.
    #[serde(default)]
    pub frame_duration: Option<f32>,
}

impl Motion {
    /// A single image with no timing.
    pub fn still(image_key: impl Into<String>) -> Self {
        Self {
            frames: vec![MotionFrame::Image(image_key.into())],
            frame_duration: None,
        }
    }

    /// Frames that repeat forever.
    pub fn looping<I, S>(image_keys: I, frame_duration: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            frames: image_keys
                .into_iter()
                .map(|k| MotionFrame::Image(k.into()))
                .collect(),
            frame_duration: Some(frame_duration),
        }
    }

    /// Frames that play once and then return to the default state.
    pub fn once<I, S>(image_keys: I, frame_duration: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut motion = Self::looping(image_keys, frame_duration);
        motion.frames.push(MotionFrame::End);
        motion
    }

    /// Frame shown `elapsed` seconds into the motion.
    ///
    /// The index is `floor(elapsed / frame_duration) mod len`. A motion that
    /// plays once never wraps: any time at or past its last slot yields the
    /// `End` sentinel.
    pub fn frame_at(&self, elapsed: f32) -> Option<&MotionFrame> {
        let len = self.frames.len();
        if len == 0 {
            return None;
        }
        let index = match self.frame_duration {
            Some(d) if d > 0.0 => {
                let raw = (elapsed / d).floor().max(0.0) as usize;
                if self.plays_once() {
                    raw.min(len - 1)
                } else {
                    raw % len
                }
            }
            _ => 0,
        };
        self.frames.get(index)
    }

    /// Whether the last frame is the `End` sentinel.
    pub fn plays_once(&self) -> bool {
        matches!(self.frames.last(), Some(MotionFrame::End))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSet {
    pub default_state: String,
    pub motions: FxHashMap<String, Motion>,
}

impl MotionSet {
    pub fn new(default_state: impl Into<String>) -> Self {
        Self {
            default_state: default_state.into(),
            motions: FxHashMap::default(),
        }
    }

    pub fn with_motion(mut self, state: impl Into<String>, motion: Motion) -> Self {
        self.motions.insert(state.into(), motion);
        self
    }

    pub fn get(&self, state: &str) -> Option<&Motion> {
        self.motions.get(state)
    }

    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        serde_json::from_str(text)
            .map_err(|e| EngineError::Config(format!("invalid motion set: {e}")))
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("cannot serialize motion set: {e}")))
    }
}

/// Per-entity playback state over a [`MotionSet`].
#[derive(Debug, Clone, Component)]
pub struct Animation {
    pub motions: MotionSet,
    state: String,
    elapsed_time: f32,
}

impl Animation {
    /// Starts in the set's default state.
    pub fn new(motions: MotionSet) -> Self {
        Self {
            state: motions.default_state.clone(),
            motions,
            elapsed_time: 0.0,
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Seconds spent in the current state.
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Switch to `state` and restart its timer. Selecting the state already
    /// playing leaves the timer running.
    pub fn set_state(&mut self, state: &str) {
        if self.state != state {
            self.state = state.to_string();
            self.elapsed_time = 0.0;
        }
    }

    /// Restart the current state from its first frame.
    pub fn restart(&mut self) {
        self.elapsed_time = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed_time += dt;
    }

    /// Image key to draw now, or `None` for an unknown or empty state.
    ///
    /// Reaching an [`MotionFrame::End`] switches to the default state first.
    pub fn current_image(&mut self) -> Option<&str> {
        let finished = matches!(self.current_frame(), Some(MotionFrame::End));
        if finished {
            debug!(
                "motion '{}' finished, returning to '{}'",
                self.state, self.motions.default_state
            );
            self.state = self.motions.default_state.clone();
            self.elapsed_time = 0.0;
        }
        match self.current_frame() {
            Some(MotionFrame::Image(key)) => Some(key.as_str()),
            _ => None,
        }
    }

    fn current_frame(&self) -> Option<&MotionFrame> {
        self.motions
            .get(&self.state)
            .and_then(|m| m.frame_at(self.elapsed_time))
    }
}
