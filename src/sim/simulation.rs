use log::{debug, info, warn};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use rayon::prelude::*;

use super::result::PlaneResult;
use super::scene::Scene;
use super::view_factor::TraceScene;

/// Receiver-plane driver.
///
/// Walks the scene's receiver planes in order, keeping a global cursor
/// into the flat receiver-point list, and folds each point's view factors
/// into a radiant temperature `T = sum(VF[i] * temperature[i])`.
///
/// Receiver points are independent, so each plane is processed in
/// parallel. Every point draws from its own PRNG stream derived from
/// `(seed, global index)`, which makes seeded results identical for any
/// thread count.
pub struct Simulation<'a> {
    scene: &'a Scene,
    trace: TraceScene,
}

impl<'a> Simulation<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        let trace = TraceScene::new(&scene.emitters, &scene.occluders);
        Self { scene, trace }
    }

    /// Runs the simulation over every receiver plane.
    ///
    /// Never fails: degenerate polygons are skipped and pathological
    /// receivers (zero normal, nothing visible) come out at temperature 0.
    pub fn run(&self) -> Vec<PlaneResult> {
        let temperatures: Vec<f64> = self.scene.emitters.iter().map(|e| e.temperature).collect();
        let total_points = self.scene.receiver_points.len();
        info!(
            "Processing {} receiver planes, {} points, {} emitters, {} occluders, {} rays per point",
            self.scene.planes.len(),
            total_points,
            self.scene.emitters.len(),
            self.scene.occluders.len(),
            self.scene.num_rays
        );

        let num_rays = self.scene.num_rays;
        let seed = self.scene.seed;

        let mut results = Vec::with_capacity(self.scene.planes.len());
        let mut cursor = 0_usize;
        for plane in &self.scene.planes {
            let mut end = cursor + plane.num_points;
            if end > total_points {
                warn!(
                    "Plane \"{}\" declares {} points but only {} remain; skipping the excess",
                    plane.name,
                    plane.num_points,
                    total_points - cursor
                );
                end = total_points;
            }

            let values: Vec<f64> = (cursor..end)
                .into_par_iter()
                .map(|global_idx| {
                    let mut rng = point_rng(seed, global_idx);
                    let point = &self.scene.receiver_points[global_idx];
                    let factors =
                        self.trace
                            .view_factors(point.origin, &point.normal, num_rays, &mut rng);
                    factors
                        .iter()
                        .zip(temperatures.iter())
                        .map(|(vf, temp)| vf * temp)
                        .sum()
                })
                .collect();

            if !values.is_empty() {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                debug!(
                    "Plane \"{}\": {} values, temperature range {min:.3}..{max:.3}",
                    plane.name,
                    values.len()
                );
            }

            cursor = end;
            results.push(PlaneResult {
                name: plane.name.clone(),
                width: plane.width,
                height: plane.height,
                values,
            });
        }
        results
    }
}

/// Independent deterministic PRNG stream for one receiver point.
///
/// PCG streams are uncorrelated, so `(seed, index)` gives every point its
/// own reproducible sequence. Without a seed each point draws a fresh
/// state from the platform entropy source.
fn point_rng(seed: Option<u64>, index: usize) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::new(seed, index as u64),
        None => Pcg32::from_entropy(),
    }
}
