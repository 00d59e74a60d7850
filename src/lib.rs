pub mod geom;
pub mod io;
pub mod sim;

// Prelude
pub use geom::point::Point;
pub use geom::polygon::{Plane, Polygon};
pub use geom::ray::Ray;
pub use geom::vector::Vector;
pub use sim::result::PlaneResult;
pub use sim::scene::{Emitter, ReceiverPlane, ReceiverPoint, Scene};
pub use sim::simulation::Simulation;
pub use sim::view_factor::TraceScene;
