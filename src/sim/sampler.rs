use rand::Rng;
use std::f64::consts::PI;

use crate::Vector;

/// Normals this close to the x axis use the y axis as the frame reference
/// instead.
const X_ALIGNED_LIMIT: f64 = 0.9999;

/// Cosine-weighted hemisphere sampler around a fixed surface normal.
///
/// Directions are drawn with density proportional to cos(theta) relative
/// to the normal, so the Monte Carlo estimator of a diffuse view factor is
/// the plain hit ratio with no per-sample reweighting.
///
/// Given the same normal and the same PRNG state, the produced sequence is
/// bit-for-bit reproducible.
#[derive(Debug, Clone, Copy)]
pub struct HemisphereSampler {
    u: Vector,
    v: Vector,
    w: Vector,
}

impl HemisphereSampler {
    /// Builds the sampling frame for a surface normal.
    ///
    /// The frame depends only on the direction of the normal, not its
    /// length. None for (near) zero-length normals.
    pub fn new(normal: &Vector) -> Option<Self> {
        let w = normal.normalize()?;
        let reference = if w.dx.abs() > X_ALIGNED_LIMIT {
            Vector::new(0.0, 1.0, 0.0)
        } else {
            Vector::new(1.0, 0.0, 0.0)
        };
        let u = reference.cross(&w).normalize()?;
        let v = w.cross(&u);
        Some(Self { u, v, w })
    }

    /// Draws one direction from the cosine-weighted hemisphere.
    pub fn sample(&self, rng: &mut impl Rng) -> Vector {
        let u1: f64 = rng.r#gen();
        let u2: f64 = rng.r#gen();

        let phi = 2.0 * PI * u1;
        let cos_theta = (1.0 - u2).sqrt();
        let sin_theta = u2.sqrt();

        let x = sin_theta * phi.cos();
        let y = sin_theta * phi.sin();
        let z = cos_theta;

        self.u * x + self.v * y + self.w * z
    }
}
