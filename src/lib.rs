//! Watermark compositing.
//!
//! Blends a watermark image onto a base image and writes the result as an opaque
//! JPEG or PNG.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: both rasters must be 3-color-component, 24- or 32-bit images and the
//!    watermark must fit inside the base (`validate_*`).
//! 2. **Classify**: the watermark's color model decides which transparency handling is
//!    available ([`classify`], [`resolve_transparency`]).
//! 3. **Resolve**: `single` placement gets a validated top-left corner, `grid` tiles from
//!    the origin ([`resolve_position`]).
//! 4. **Blend**: every output channel is `floor((p * w + (100 - p) * b) / 100)` unless the
//!    watermark pixel is transparent under the active mode ([`compose`]).
//! 5. **Encode**: the output is written last, so a failed run never leaves a file behind
//!    ([`run`]).
//!
//! Library code reports every failure as a [`WatermarkError`]; it never prints or exits.
#![forbid(unsafe_code)]

mod blend;
mod codec;
mod foundation;
mod pipeline;
mod placement;
mod raster;
mod transparency;
mod validate;

pub use blend::{
    BlendParameters, BlendThreading, blend_channel, blend_pixel, compose, compose_with_threading,
    watermark_coord,
};
pub use codec::{ImageInfo, OutputFormat, decode_file, decode_memory, encode_file, image_info};
pub use foundation::color::Color;
pub use foundation::error::{RasterRole, WatermarkError, WatermarkResult};
pub use pipeline::{WatermarkOutcome, WatermarkRequest, prepare, run};
pub use placement::{PositionMethod, PositionMode, placement_bounds, resolve as resolve_position};
pub use raster::{ColorModel, Raster};
pub use transparency::{TransparencyClass, TransparencyMode, classify, resolve_transparency};
pub use validate::{
    validate_color_triple, validate_dimensions, validate_output_extension, validate_percentage,
    validate_position, validate_raster,
};
