//! Long-lived services and settings.
//!
//! Overview
//! - `audio` – handle to the background audio thread
//! - `gameconfig` – INI-backed engine settings
//! - `imagestore` – decoded images cached by key
//! - `random` – seedable random helpers
//! - `rendertarget` – canvas and surface seams, plus headless implementations
//! - `services` – the bundle of services owned by a registry
//! - `worldtime` – simulated time and frame counter
pub mod audio;
pub mod gameconfig;
pub mod imagestore;
pub mod random;
pub mod rendertarget;
pub mod services;
pub mod worldtime;
