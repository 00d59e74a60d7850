use crate::{Point, Polygon, Vector};

/// Default number of rays per receiver point.
pub const DEFAULT_NUM_RAYS: usize = 100_000;

/// A polygon radiating at a fixed temperature.
///
/// Temperatures pass through unchanged; no unit is assumed.
#[derive(Debug, Clone)]
pub struct Emitter {
    pub polygon: Polygon,
    pub temperature: f64,
}

/// A sampling location on a receiver surface.
#[derive(Debug, Clone, Copy)]
pub struct ReceiverPoint {
    pub origin: Point,
    /// Surface normal; need not be unit length.
    pub normal: Vector,
}

/// Grid metadata for one receiver plane.
///
/// The point list itself lives in `Scene::receiver_points`; `num_points`
/// is how many consecutive entries of that list belong to this plane.
/// `width` and `height` are echoed into the result without being checked
/// against `num_points`.
#[derive(Debug, Clone)]
pub struct ReceiverPlane {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub num_points: usize,
}

/// A full scene: emitters, occluders and receiver grids.
///
/// Everything is immutable during a run. Receiver points of all planes are
/// concatenated in plane order.
#[derive(Debug, Clone)]
pub struct Scene {
    pub emitters: Vec<Emitter>,
    /// Inert polygons: block rays, contribute no temperature.
    pub occluders: Vec<Polygon>,
    /// Receiver planes in processing order.
    pub planes: Vec<ReceiverPlane>,
    pub receiver_points: Vec<ReceiverPoint>,
    /// Rays per receiver point.
    pub num_rays: usize,
    /// Seed for deterministic runs; None draws from the platform entropy
    /// source.
    pub seed: Option<u64>,
}
