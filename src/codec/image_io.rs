use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::{DynamicImage, ExtendedColorType, ImageDecoder as _, ImageFormat, ImageReader};

use crate::{
    foundation::error::{WatermarkError, WatermarkResult},
    raster::{ColorModel, Raster},
    transparency::TransparencyClass,
};

/// Encoding of the output file, picked from its literal extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpg,
    Png,
}

impl OutputFormat {
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Jpg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decode an image file into a [`Raster`], keeping its source color model.
pub fn decode_file(path: &Path) -> WatermarkResult<Raster> {
    if !path.exists() {
        return Err(WatermarkError::file_not_found(path.display().to_string()));
    }

    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_bytes(&bytes).map_err(|e| {
        WatermarkError::Other(e.context(format!("decode image '{}'", path.display())))
    })
}

pub fn decode_memory(bytes: &[u8]) -> WatermarkResult<Raster> {
    Ok(decode_bytes(bytes)?)
}

fn decode_bytes(bytes: &[u8]) -> anyhow::Result<Raster> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("detect image format")?;
    let is_png = reader.format() == Some(ImageFormat::Png);

    let decoder = reader.into_decoder().context("create image decoder")?;
    let original = decoder.original_color_type();
    let img = DynamicImage::from_decoder(decoder).context("decode image pixels")?;

    // The decoder reports palettes and tRNS keys already expanded, so PNGs are
    // described from their own header instead.
    let model = if is_png {
        png_source_model(bytes)?
    } else {
        let mut model = ColorModel::from_color_type(img.color());
        if matches!(original, ExtendedColorType::La1 | ExtendedColorType::Rgba1) {
            model.transparency = TransparencyClass::Bitmask;
        }
        model
    };
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        ?model,
        "decoded image"
    );

    Ok(Raster::new(model, img.to_rgba8()))
}

/// Color model as stored in the PNG header, before any palette or tRNS expansion.
fn png_source_model(bytes: &[u8]) -> anyhow::Result<ColorModel> {
    let reader = png::Decoder::new(Cursor::new(bytes))
        .read_info()
        .context("read png header")?;
    let info = reader.info();

    let color_components = match info.color_type {
        png::ColorType::Grayscale | png::ColorType::GrayscaleAlpha => 1,
        png::ColorType::Rgb | png::ColorType::Rgba | png::ColorType::Indexed => 3,
    };
    let trns = info.trns.as_deref();
    let transparency = match (info.color_type, trns) {
        (png::ColorType::GrayscaleAlpha | png::ColorType::Rgba, _) => {
            TransparencyClass::Translucent
        }
        (png::ColorType::Indexed, Some(alphas)) if alphas.iter().any(|a| *a != 0 && *a != 255) => {
            TransparencyClass::Translucent
        }
        (_, Some(_)) => TransparencyClass::Bitmask,
        (_, None) => TransparencyClass::Opaque,
    };
    let has_alpha = transparency != TransparencyClass::Opaque;

    Ok(ColorModel {
        components: color_components + u8::from(has_alpha),
        color_components,
        bits_per_pixel: (info.color_type.samples() * info.bit_depth as usize) as u16,
        transparency,
    })
}

/// Write `raster` as opaque RGB8, creating the parent directory when needed.
///
/// Encoding goes to a sibling temporary file that replaces `path` only once it is
/// complete.
pub fn encode_file(raster: &Raster, path: &Path, format: OutputFormat) -> WatermarkResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let tmp = partial_path(path);
    let written = raster
        .to_rgb8()
        .save_with_format(&tmp, format.image_format())
        .with_context(|| format!("write {format} '{}'", path.display()))
        .and_then(|()| {
            std::fs::rename(&tmp, path)
                .with_context(|| format!("move output into place at '{}'", path.display()))
        });
    if written.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    Ok(written?)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/image_io.rs"]
mod tests;
