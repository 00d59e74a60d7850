//! Monte Carlo view-factor estimation under occlusion.
//!
//! A view factor is the fraction of cosine-weighted hemisphere directions
//! from a receiver point that reach an emitter polygon before hitting
//! anything else. Emitter hits accumulate; inert polygons only block.

use rand::Rng;

use crate::geom::polygon::Plane;
use crate::{Point, Polygon, Ray, Vector};

use super::sampler::HemisphereSampler;
use super::scene::Emitter;

/// A polygon prepared for ray casting.
///
/// Degenerate polygons carry no plane and are skipped during traversal.
#[derive(Debug, Clone)]
struct TracedPolygon {
    polygon: Polygon,
    plane: Option<Plane>,
}

impl TracedPolygon {
    fn new(polygon: Polygon) -> Self {
        let plane = polygon.plane();
        Self { polygon, plane }
    }
}

/// Scene geometry flattened for ray casting.
///
/// Polygon planes are computed once here and reused for every receiver
/// point and every ray. The scene is immutable, so one instance serves
/// all receiver points of a run.
#[derive(Debug, Clone)]
pub struct TraceScene {
    emitters: Vec<TracedPolygon>,
    occluders: Vec<TracedPolygon>,
}

impl TraceScene {
    pub fn new(emitters: &[Emitter], occluders: &[Polygon]) -> Self {
        Self {
            emitters: emitters
                .iter()
                .map(|e| TracedPolygon::new(e.polygon.clone()))
                .collect(),
            occluders: occluders
                .iter()
                .map(|p| TracedPolygon::new(p.clone()))
                .collect(),
        }
    }

    pub fn num_emitters(&self) -> usize {
        self.emitters.len()
    }

    /// Estimates view factors from one receiver point.
    ///
    /// Shoots `num_rays` cosine-weighted rays from `origin` around
    /// `normal` and returns one factor per emitter, in emitter order:
    /// `VF[i] = hits[i] / num_rays`. A ray counts for the closest emitter
    /// it reaches, unless an occluder is hit at the same or a shorter
    /// distance (ties go to the occluder). Rays that miss everything, and
    /// all rays of a zero-length normal or `num_rays == 0`, leave the
    /// factors at zero.
    pub fn view_factors(
        &self,
        origin: Point,
        normal: &Vector,
        num_rays: usize,
        rng: &mut impl Rng,
    ) -> Vec<f64> {
        let mut factors = vec![0.0; self.emitters.len()];
        if num_rays == 0 {
            return factors;
        }
        let Some(sampler) = HemisphereSampler::new(normal) else {
            // Degenerate receiver normal: sees nothing.
            return factors;
        };

        let mut hits = vec![0_u64; self.emitters.len()];
        for _ in 0..num_rays {
            let ray = Ray::new(origin, sampler.sample(rng));

            let (occluder_dist, _) = closest_hit(&self.occluders, &ray);
            let (emitter_dist, emitter_idx) = closest_hit(&self.emitters, &ray);

            if occluder_dist.is_finite() && occluder_dist <= emitter_dist {
                continue;
            }
            if let Some(idx) = emitter_idx {
                hits[idx] += 1;
            }
        }

        for (factor, &count) in factors.iter_mut().zip(hits.iter()) {
            *factor = count as f64 / num_rays as f64;
        }
        factors
    }
}

/// Closest in-polygon hit among the given polygons.
///
/// Returns the hit distance (infinite when nothing is hit) and the index
/// of the hit polygon.
fn closest_hit(polygons: &[TracedPolygon], ray: &Ray) -> (f64, Option<usize>) {
    let mut closest = f64::INFINITY;
    let mut closest_idx = None;
    for (idx, traced) in polygons.iter().enumerate() {
        let Some(plane) = &traced.plane else {
            continue;
        };
        if let Some((t, point)) = ray.intersect_plane(plane)
            && t < closest
            && traced.polygon.is_point_inside(point, &plane.normal)
        {
            closest = t;
            closest_idx = Some(idx);
        }
    }
    (closest, closest_idx)
}
