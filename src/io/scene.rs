//! JSON scene format.
//!
//! Input is an object with `receiver_planes` (plane name to grid),
//! `polygons` (emitters, with temperatures or legacy bare vertex lists),
//! optional `inert_polygons`, `num_rays` and `seed`. Output is either
//! `{"success":true,"planes":[...]}` or `{"error":"..."}`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::sim::result::PlaneResult;
use crate::sim::scene::{DEFAULT_NUM_RAYS, Emitter, ReceiverPlane, ReceiverPoint, Scene};
use crate::{Point, Polygon, Vector};

type Vertex = [f64; 3];

#[derive(Debug, Deserialize)]
struct SceneFile {
    /// Plane name to grid. The BTreeMap fixes the processing order to
    /// lexicographic by name.
    receiver_planes: Option<BTreeMap<String, PlaneFile>>,
    polygons: Option<Vec<EmitterFile>>,
    #[serde(default)]
    inert_polygons: Vec<Vec<Vertex>>,
    num_rays: Option<f64>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PlaneFile {
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    points: Vec<PointFile>,
}

#[derive(Debug, Deserialize)]
struct PointFile {
    origin: Vertex,
    normal: Vertex,
}

/// Emitters arrive either as `{polygon, temperature}` objects or as legacy
/// bare vertex lists, which get temperature 0.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmitterFile {
    WithTemperature { polygon: Vec<Vertex>, temperature: f64 },
    Bare(Vec<Vertex>),
}

fn to_point(v: Vertex) -> Point {
    Point::new(v[0], v[1], v[2])
}

fn to_vector(v: Vertex) -> Vector {
    Vector::new(v[0], v[1], v[2])
}

fn to_polygon(vertices: Vec<Vertex>) -> Polygon {
    Polygon::new(vertices.into_iter().map(to_point).collect())
}

/// Parses a scene description into the in-memory model.
///
/// Receiver points of all planes are concatenated into one flat list in
/// plane order. Grid dimensions pass through without being checked
/// against the point count.
pub fn parse_scene(json: &str) -> Result<Scene> {
    let file: SceneFile = serde_json::from_str(json).context("Malformed scene description")?;

    let plane_map = file
        .receiver_planes
        .ok_or_else(|| anyhow!("Must provide 'receiver_planes' field"))?;

    let mut planes = Vec::with_capacity(plane_map.len());
    let mut receiver_points = Vec::new();
    for (name, grid) in plane_map {
        planes.push(ReceiverPlane {
            name,
            width: grid.width as usize,
            height: grid.height as usize,
            num_points: grid.points.len(),
        });
        receiver_points.extend(grid.points.into_iter().map(|p| ReceiverPoint {
            origin: to_point(p.origin),
            normal: to_vector(p.normal),
        }));
    }
    if receiver_points.is_empty() {
        bail!("receiver_planes is empty");
    }

    let emitters = file
        .polygons
        .ok_or_else(|| anyhow!("Missing polygons"))?
        .into_iter()
        .map(|entry| match entry {
            EmitterFile::WithTemperature {
                polygon,
                temperature,
            } => Emitter {
                polygon: to_polygon(polygon),
                temperature,
            },
            EmitterFile::Bare(polygon) => Emitter {
                polygon: to_polygon(polygon),
                temperature: 0.0,
            },
        })
        .collect();

    let occluders = file.inert_polygons.into_iter().map(to_polygon).collect();

    let num_rays = match file.num_rays {
        Some(n) if n < 0.0 => 0,
        Some(n) => n as usize,
        None => DEFAULT_NUM_RAYS,
    };

    Ok(Scene {
        emitters,
        occluders,
        planes,
        receiver_points,
        num_rays,
        seed: file.seed,
    })
}

#[derive(Debug, Serialize)]
struct ResponseFile<'a> {
    success: bool,
    planes: Vec<PlaneEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct PlaneEntry<'a> {
    name: &'a str,
    width: usize,
    height: usize,
    values: &'a [f64],
}

/// Reads a scene description from a JSON file.
pub fn read_scene(path: &Path) -> Result<Scene> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene from: {}", path.display()))?;
    parse_scene(&json)
}

/// Writes the success document for the given plane results to a file.
pub fn write_response(path: &Path, results: &[PlaneResult]) -> Result<()> {
    let json = response_json(results)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write results to: {}", path.display()))
}

/// Serializes plane results into the success document.
pub fn response_json(results: &[PlaneResult]) -> Result<String> {
    let response = ResponseFile {
        success: true,
        planes: results
            .iter()
            .map(|r| PlaneEntry {
                name: &r.name,
                width: r.width,
                height: r.height,
                values: &r.values,
            })
            .collect(),
    };
    serde_json::to_string(&response).context("Failed to serialize results")
}

/// Serializes a user-visible diagnostic into the error document.
pub fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
