/// Result grid for one receiver plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneResult {
    pub name: String,
    /// Grid dimensions as declared in the scene; not validated against
    /// `values.len()`.
    pub width: usize,
    pub height: usize,
    /// Radiant temperature per receiver point, in receiver-point order.
    /// Row-major interpretation is up to the caller.
    pub values: Vec<f64>,
}
