mod model;

pub use model::{ColorModel, Raster};
