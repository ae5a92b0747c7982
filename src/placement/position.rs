use std::str::FromStr;

use crate::{
    foundation::error::{WatermarkError, WatermarkResult},
    raster::Raster,
    validate::validate_position,
};

/// Placement strategy as chosen by the caller, before any coordinates are known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionMethod {
    Single,
    Grid,
}

impl FromStr for PositionMethod {
    type Err = WatermarkError;

    /// Case-insensitive `single` or `grid`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("single") {
            Ok(Self::Single)
        } else if s.eq_ignore_ascii_case("grid") {
            Ok(Self::Grid)
        } else {
            Err(WatermarkError::InvalidPositionMethod)
        }
    }
}

/// Resolved placement of the watermark over the base image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionMode {
    /// One copy with its top-left corner at `(x, y)` of the base image.
    Single { x: u32, y: u32 },
    /// Tiled from the origin over the whole base image.
    Grid,
}

/// Largest valid top-left corner for a single watermark: `(max_x, max_y)`.
pub fn placement_bounds(base: &Raster, watermark: &Raster) -> WatermarkResult<(u32, u32)> {
    let max_x = base.width().checked_sub(watermark.width());
    let max_y = base.height().checked_sub(watermark.height());
    max_x.zip(max_y).ok_or(WatermarkError::OversizedWatermark)
}

/// Resolve the placement method and, for `single`, the raw `"X Y"` position.
///
/// `grid` needs no position and ignores `raw_position`.
#[tracing::instrument(skip(base, watermark))]
pub fn resolve(
    method: &str,
    base: &Raster,
    watermark: &Raster,
    raw_position: Option<&str>,
) -> WatermarkResult<PositionMode> {
    match method.parse::<PositionMethod>()? {
        PositionMethod::Grid => Ok(PositionMode::Grid),
        PositionMethod::Single => {
            let (max_x, max_y) = placement_bounds(base, watermark)?;
            tracing::debug!(max_x, max_y, "single placement bounds");
            let raw = raw_position.ok_or(WatermarkError::InvalidPositionFormat)?;
            let (x, y) = validate_position(raw, max_x, max_y)?;
            Ok(PositionMode::Single { x, y })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/position.rs"]
mod tests;
