//! Hopscotch engine library.
//!
//! A small 2D simulation core: an entity [`registry::Registry`] with z-ordered
//! drawing, solids and level transitions; simple gravity physics that lands
//! bodies on solid tops; convex overlap tests; and a [`scheduler::FrameScheduler`]
//! that runs it all on a worker thread fed by an input queue.

pub mod components;
pub mod entity;
pub mod error;
pub mod events;
pub mod level;
pub mod registry;
pub mod resources;
pub mod scheduler;
pub mod systems;

pub use entity::{EntityBuilder, EntityId};
pub use error::EngineError;
pub use level::{Level, Scene};
pub use registry::Registry;
pub use scheduler::{FrameScheduler, FrameTiming};
