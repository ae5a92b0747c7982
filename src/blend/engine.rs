use image::RgbImage;
use rayon::prelude::*;

use crate::{
    foundation::{
        color::Color,
        error::{WatermarkError, WatermarkResult},
    },
    placement::PositionMode,
    raster::Raster,
    transparency::TransparencyMode,
};

/// Everything the blend needs besides the two rasters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlendParameters {
    percentage: u8,
    transparency: TransparencyMode,
    position: PositionMode,
}

impl BlendParameters {
    pub fn new(
        percentage: u8,
        transparency: TransparencyMode,
        position: PositionMode,
    ) -> WatermarkResult<Self> {
        if percentage > 100 {
            return Err(WatermarkError::PercentageOutOfRange);
        }
        Ok(Self {
            percentage,
            transparency,
            position,
        })
    }

    /// Watermark weight in `0..=100`.
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn transparency(&self) -> TransparencyMode {
        self.transparency
    }

    pub fn position(&self) -> PositionMode {
        self.position
    }
}

/// Row scheduling for [`compose_with_threading`].
#[derive(Clone, Debug, Default)]
pub struct BlendThreading {
    /// Blend rows on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Pool size; `None` lets rayon decide.
    pub threads: Option<usize>,
}

/// Map an output coordinate into watermark space.
///
/// `None` means the watermark does not cover `(x, y)`.
pub fn watermark_coord(
    position: PositionMode,
    x: u32,
    y: u32,
    wm_width: u32,
    wm_height: u32,
) -> Option<(u32, u32)> {
    match position {
        PositionMode::Grid => Some((x.checked_rem(wm_width)?, y.checked_rem(wm_height)?)),
        PositionMode::Single { x: px, y: py } => {
            let wmx = x.checked_sub(px)?;
            let wmy = y.checked_sub(py)?;
            (wmx < wm_width && wmy < wm_height).then_some((wmx, wmy))
        }
    }
}

/// `floor((p * w + (100 - p) * b) / 100)`. Percentages above 100 count as 100.
pub fn blend_channel(percentage: u8, w: u8, b: u8) -> u8 {
    let p = u32::from(percentage.min(100));
    ((p * u32::from(w) + (100 - p) * u32::from(b)) / 100) as u8
}

/// Blend one covered pixel. Skipped pixels come back as `b`.
pub fn blend_pixel(params: &BlendParameters, w: Color, b: Color) -> Color {
    let skip = match params.transparency {
        TransparencyMode::None => false,
        TransparencyMode::AlphaChannel => w.a == 0,
        TransparencyMode::KeyColor(key) => w == key,
    };
    if skip {
        return b;
    }

    let p = params.percentage;
    Color::rgb(
        blend_channel(p, w.r, b.r),
        blend_channel(p, w.g, b.g),
        blend_channel(p, w.b, b.b),
    )
}

/// Blend `watermark` onto `base` on the calling thread.
///
/// The result has the base dimensions and is always opaque RGB8. Neither input is
/// modified.
#[tracing::instrument(skip(base, watermark), fields(width = base.width(), height = base.height()))]
pub fn compose(base: &Raster, watermark: &Raster, params: &BlendParameters) -> Raster {
    let mut out = RgbImage::new(base.width(), base.height());
    if let Some(stride) = row_stride(base) {
        let buf: &mut [u8] = &mut out;
        for (y, row) in (0u32..).zip(buf.chunks_exact_mut(stride)) {
            blend_row(base, watermark, params, y, row);
        }
    }
    Raster::from_rgb8(out)
}

/// Same result as [`compose`], optionally spreading rows over a rayon pool.
pub fn compose_with_threading(
    base: &Raster,
    watermark: &Raster,
    params: &BlendParameters,
    threading: &BlendThreading,
) -> WatermarkResult<Raster> {
    if threading.threads == Some(0) {
        return Err(WatermarkError::config(
            "blend threading 'threads' must be >= 1 when set",
        ));
    }
    if !threading.parallel {
        return Ok(compose(base, watermark, params));
    }

    let pool = build_thread_pool(threading.threads)?;
    let _span = tracing::debug_span!(
        "compose_parallel",
        threads = pool.current_num_threads()
    )
    .entered();

    let mut out = RgbImage::new(base.width(), base.height());
    if let Some(stride) = row_stride(base) {
        let buf: &mut [u8] = &mut out;
        pool.install(|| {
            buf.par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(y, row)| blend_row(base, watermark, params, y as u32, row));
        });
    }
    Ok(Raster::from_rgb8(out))
}

fn row_stride(base: &Raster) -> Option<usize> {
    let stride = base.width() as usize * 3;
    (stride > 0 && base.height() > 0).then_some(stride)
}

fn blend_row(base: &Raster, watermark: &Raster, params: &BlendParameters, y: u32, row: &mut [u8]) {
    let (wm_width, wm_height) = watermark.dimensions();
    for (x, px) in (0u32..).zip(row.chunks_exact_mut(3)) {
        let b = base.pixel(x, y);
        let out = match watermark_coord(params.position, x, y, wm_width, wm_height) {
            None => b,
            Some((wmx, wmy)) => blend_pixel(params, watermark.pixel(wmx, wmy), b),
        };
        px.copy_from_slice(&[out.r, out.g, out.b]);
    }
}

fn build_thread_pool(threads: Option<usize>) -> WatermarkResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WatermarkError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/blend/engine.rs"]
mod tests;
