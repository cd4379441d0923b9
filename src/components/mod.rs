//! Per-entity data stored in the registry's world.
//!
//! Every entity carries a [`body::Body`]; the rest are optional.
//!
//! Submodules overview:
//! - [`animation`] – named motion states cycling through images
//! - [`behavior`] – per-instance hooks for update, collision and input
//! - [`body`] – bounds, velocity, gravity, lifetime and collision shape
//! - [`collisionshape`] – convex polygons tested with separating axes
//! - [`label`] – text drawn at the entity's lower-left corner
//! - [`rect`] – axis-aligned rectangle in world units
//! - [`sprite`] – static image stretched over the entity's bounds

pub mod animation;
pub mod behavior;
pub mod body;
pub mod collisionshape;
pub mod label;
pub mod rect;
pub mod sprite;
