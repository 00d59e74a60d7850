pub mod result;
pub mod sampler;
pub mod scene;
pub mod simulation;
pub mod view_factor;
