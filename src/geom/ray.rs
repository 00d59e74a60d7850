//! Ray casting infrastructure.
//!
//! Provides a Ray struct and the ray-plane intersection test used by the
//! view-factor estimator.

use crate::geom::polygon::Plane;
use crate::{Point, Vector};

/// Rays closer than this to parallel with a plane miss it.
const PARALLEL_EPS: f64 = 1e-9;

/// Hits closer than this to the ray origin are discarded. Looser than the
/// parallelism threshold so rays spawned on a surface do not immediately
/// re-hit it.
const MIN_HIT_DISTANCE: f64 = 1e-7;

/// A ray defined by an origin point and a direction vector.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Point,
    /// Direction vector (should be normalized for distance calculations)
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Returns the point along the ray at parameter t.
    ///
    /// point = origin + t * direction
    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Calculates the intersection of this ray with a plane.
    ///
    /// Returns `Some((t, point))` for forward hits. Rays parallel to the
    /// plane and hits behind (or at) the origin miss.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<(f64, Point)> {
        let denom = plane.normal.dot(&self.direction);
        if denom.abs() < PARALLEL_EPS {
            return None; // Ray parallel to plane
        }

        let w = self.origin - plane.anchor;
        let t = -plane.normal.dot(&w) / denom;
        if t < MIN_HIT_DISTANCE {
            return None;
        }

        Some((t, self.point_at(t)))
    }
}
