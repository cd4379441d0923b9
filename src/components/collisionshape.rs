//! Convex collision shapes and the Separating Axis Theorem overlap test.
//!
//! A [`ConvexShape`] is an ordered list of vertices in local coordinates. At
//! construction time the shape precomputes its edge vectors (wrapping from the
//! last vertex back to the first), one perpendicular candidate axis per edge,
//! and the deduplicated axis set: an axis parallel to one already kept (cross
//! product magnitude below [`PARALLEL_EPSILON`]) adds no information and is
//! dropped.
//!
//! [`ConvexShape::collide_with`] projects both shapes onto every axis of both
//! axis sets. The first axis on which the projected intervals do not overlap
//! proves separation. The test is exact for convex polygons but only answers
//! overlap / no overlap: no penetration depth or contact normal is produced.

use glam::Vec2;
use smallvec::SmallVec;

use crate::components::rect::Rect;

/// Two axes whose cross product magnitude is below this are treated as parallel.
pub const PARALLEL_EPSILON: f32 = 0.001;

/// Closed interval of a shape projected onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f32,
    pub max: f32,
}

impl Projection {
    /// Strict interval overlap. Identical intervals overlap; intervals that only
    /// touch at an end point do not.
    pub fn overlaps(&self, other: &Projection) -> bool {
        self.min < other.max && other.min < self.max
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvexShape {
    vertices: Vec<Vec2>,
    edges: Vec<Vec2>,
    axes: SmallVec<[Vec2; 8]>,
}

impl ConvexShape {
    /// Build a shape from vertices given in order around the outline.
    ///
    /// Fewer than two vertices produce a shape with no axes; such a shape never
    /// separates from anything on its own axes.
    pub fn new(vertices: impl Into<Vec<Vec2>>) -> Self {
        let vertices = vertices.into();
        let edges = edges_of(&vertices);
        let axes = unique_axes(&edges);
        Self {
            vertices,
            edges,
            axes,
        }
    }

    /// Box shape centered on the local origin with the rectangle's extent.
    ///
    /// Used to test plain rectangular entities against custom-shaped ones.
    pub fn from_rect(bounds: &Rect) -> Self {
        let hw = bounds.width() / 2.0;
        let hh = bounds.height() / 2.0;
        Self::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Vec2] {
        &self.edges
    }

    /// Deduplicated separating-axis candidates.
    pub fn axes(&self) -> &[Vec2] {
        &self.axes
    }

    /// Project every vertex, translated by `offset`, onto `axis`.
    pub fn project_onto(&self, axis: Vec2, offset: Vec2) -> Projection {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for vertex in &self.vertices {
            let p = (*vertex + offset).dot(axis);
            min = min.min(p);
            max = max.max(p);
        }
        Projection { min, max }
    }

    /// SAT overlap test against `other`, with each shape placed at its world offset.
    pub fn collide_with(&self, other: &ConvexShape, self_offset: Vec2, other_offset: Vec2) -> bool {
        if self.vertices.is_empty() || other.vertices.is_empty() {
            return false;
        }
        for axis in self.axes.iter().chain(other.axes.iter()) {
            let mine = self.project_onto(*axis, self_offset);
            let theirs = other.project_onto(*axis, other_offset);
            if !mine.overlaps(&theirs) {
                log::trace!("separating axis found at {:?}", axis);
                return false;
            }
        }
        true
    }
}

fn edges_of(vertices: &[Vec2]) -> Vec<Vec2> {
    if vertices.len() < 2 {
        return Vec::new();
    }
    let n = vertices.len();
    (0..n)
        .map(|i| vertices[(i + 1) % n] - vertices[i])
        .collect()
}

fn is_parallel(a: Vec2, b: Vec2) -> bool {
    a.perp_dot(b).abs() < PARALLEL_EPSILON
}

fn unique_axes(edges: &[Vec2]) -> SmallVec<[Vec2; 8]> {
    let mut axes: SmallVec<[Vec2; 8]> = SmallVec::new();
    for edge in edges {
        // Perpendicular, not normalized.
        let axis = Vec2::new(edge.y, -edge.x);
        if axis == Vec2::ZERO {
            continue;
        }
        if !axes.iter().any(|kept| is_parallel(axis, *kept)) {
            axes.push(axis);
        }
    }
    axes
}
