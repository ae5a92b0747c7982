mod input;

pub use input::{
    validate_color_triple, validate_dimensions, validate_output_extension, validate_percentage,
    validate_position, validate_raster,
};
