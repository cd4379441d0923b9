//! Per-frame work performed on the registry.
//!
//! Submodules overview
//! - [`audio`] – the audio thread loop
//! - [`input`] – route input events through the claim chain
//! - [`physics`] – move bodies, land them on solids, expire them
//! - [`render`] – draw one entity onto a canvas
pub mod audio;
pub mod input;
pub mod physics;
pub mod render;
