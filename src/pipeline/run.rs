use std::path::PathBuf;

use crate::{
    blend::{BlendParameters, BlendThreading, compose_with_threading},
    codec::{OutputFormat, decode_file, encode_file},
    foundation::error::{RasterRole, WatermarkResult},
    placement,
    raster::Raster,
    transparency::{classify, resolve_transparency},
    validate::{
        validate_dimensions, validate_output_extension, validate_percentage, validate_raster,
    },
};

/// Raw answers for one compositing run.
///
/// Numeric inputs stay strings until the validators parse them.
#[derive(Clone, Debug, Default)]
pub struct WatermarkRequest {
    pub image: PathBuf,
    pub watermark: PathBuf,
    /// Use the watermark's alpha channel (translucent watermarks only).
    pub use_alpha: bool,
    /// `"R G B"` key color (opaque or bitmask watermarks only).
    pub transparency_color: Option<String>,
    pub percentage: String,
    /// `single` or `grid`, any case.
    pub position_method: String,
    /// `"X Y"`, required for `single`.
    pub position: Option<String>,
    pub output: PathBuf,
    pub threading: BlendThreading,
}

/// Result of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatermarkOutcome {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for WatermarkOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The watermarked image {} has been created.",
            self.output.display()
        )
    }
}

/// Validate every input and resolve the blend, without writing anything.
///
/// Stages run in prompt order and the first failure aborts the rest.
pub fn prepare(
    request: &WatermarkRequest,
) -> WatermarkResult<(Raster, Raster, BlendParameters, OutputFormat)> {
    let base = validate_raster(decode_file(&request.image)?, RasterRole::Base)?;
    let watermark = validate_raster(decode_file(&request.watermark)?, RasterRole::Watermark)?;
    validate_dimensions(&base, &watermark)?;

    let class = classify(&watermark);
    let transparency = resolve_transparency(
        class,
        request.use_alpha,
        request.transparency_color.as_deref(),
    )?;
    tracing::debug!(%class, ?transparency, "resolved transparency");

    let percentage = validate_percentage(&request.percentage)?;
    let position = placement::resolve(
        &request.position_method,
        &base,
        &watermark,
        request.position.as_deref(),
    )?;
    tracing::debug!(percentage, ?position, "resolved placement");

    let format = validate_output_extension(&request.output.to_string_lossy())?;
    let params = BlendParameters::new(percentage, transparency, position)?;
    Ok((base, watermark, params, format))
}

/// Validate → classify → resolve → blend → encode.
///
/// The output file is only written once every earlier stage has succeeded.
#[tracing::instrument(skip(request), fields(output = %request.output.display()))]
pub fn run(request: &WatermarkRequest) -> WatermarkResult<WatermarkOutcome> {
    let (base, watermark, params, format) = prepare(request)?;

    let out = compose_with_threading(&base, &watermark, &params, &request.threading)?;
    encode_file(&out, &request.output, format)?;
    tracing::info!(format = %format, "wrote watermarked image");

    Ok(WatermarkOutcome {
        output: request.output.clone(),
        format,
        width: out.width(),
        height: out.height(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
