//! Messages crossing thread boundaries.
//!
//! - [`audio`] – commands for the background audio thread
//! - [`input`] – pointer, button and joystick events for the frame worker
pub mod audio;
pub mod input;
