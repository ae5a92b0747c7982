mod position;

pub use position::{PositionMethod, PositionMode, placement_bounds, resolve};
