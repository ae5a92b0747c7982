use crate::{
    codec::OutputFormat,
    foundation::{
        color::Color,
        error::{RasterRole, WatermarkError, WatermarkResult},
    },
    raster::Raster,
};

const SUPPORTED_BITS_PER_PIXEL: [u16; 2] = [24, 32];

/// Accept a raster with three color components at 24 or 32 bits per pixel.
///
/// The raster is handed back unchanged so it can flow into the next stage.
pub fn validate_raster(raster: Raster, role: RasterRole) -> WatermarkResult<Raster> {
    let model = raster.model();
    if model.color_components != 3 {
        return Err(WatermarkError::UnsupportedColorModel {
            role,
            components: model.color_components,
        });
    }
    if !SUPPORTED_BITS_PER_PIXEL.contains(&model.bits_per_pixel) {
        return Err(WatermarkError::UnsupportedBitDepth {
            role,
            bits_per_pixel: model.bits_per_pixel,
        });
    }
    Ok(raster)
}

pub fn validate_dimensions(base: &Raster, watermark: &Raster) -> WatermarkResult<()> {
    if base.width() < watermark.width() || base.height() < watermark.height() {
        return Err(WatermarkError::OversizedWatermark);
    }
    Ok(())
}

pub fn validate_percentage(raw: &str) -> WatermarkResult<u8> {
    let value: i32 = raw.parse().map_err(|_| WatermarkError::NotInteger)?;
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or(WatermarkError::PercentageOutOfRange)
}

/// Parse `"R G B"` into an opaque key color.
pub fn validate_color_triple(raw: &str) -> WatermarkResult<Color> {
    let [r, g, b] = parse_ints::<3>(raw).ok_or(WatermarkError::InvalidColorFormat)?;
    let channel = |v: i32| u8::try_from(v).map_err(|_| WatermarkError::ChannelOutOfRange);
    Ok(Color::rgb(channel(r)?, channel(g)?, channel(b)?))
}

/// Parse `"X Y"` and check `0 <= X <= max_x`, `0 <= Y <= max_y`.
pub fn validate_position(raw: &str, max_x: u32, max_y: u32) -> WatermarkResult<(u32, u32)> {
    let [x, y] = parse_ints::<2>(raw).ok_or(WatermarkError::InvalidPositionFormat)?;
    let coord = |v: i32, max: u32| {
        u32::try_from(v)
            .ok()
            .filter(|v| *v <= max)
            .ok_or(WatermarkError::PositionOutOfRange)
    };
    Ok((coord(x, max_x)?, coord(y, max_y)?))
}

/// The name must end in a literal, case-sensitive `.jpg` or `.png`.
pub fn validate_output_extension(name: &str) -> WatermarkResult<OutputFormat> {
    match name.rsplit_once('.') {
        Some((_, "jpg")) => Ok(OutputFormat::Jpg),
        Some((_, "png")) => Ok(OutputFormat::Png),
        _ => Err(WatermarkError::InvalidOutputExtension),
    }
}

// Exactly N integers separated by single spaces.
fn parse_ints<const N: usize>(raw: &str) -> Option<[i32; N]> {
    let mut out = [0i32; N];
    let mut parts = raw.split(' ');
    for slot in &mut out {
        *slot = parts.next()?.parse().ok()?;
    }
    match parts.next() {
        Some(_) => None,
        None => Some(out),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/input.rs"]
mod tests;
