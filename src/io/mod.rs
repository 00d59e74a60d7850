//! Scene I/O.
//!
//! This module parses textual scene descriptions into the in-memory model
//! and serializes plane-keyed result grids.

pub mod scene;

pub use scene::{error_json, parse_scene, read_scene, response_json, write_response};
