use std::path::Path;

use crate::{
    foundation::error::WatermarkResult, raster::Raster, transparency::TransparencyClass,
};

use super::decode_file;

/// Summary of a decoded image and its color model.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ImageInfo {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub components: u8,
    pub color_components: u8,
    pub bits_per_pixel: u16,
    pub transparency: TransparencyClass,
}

impl ImageInfo {
    pub fn from_raster(file: impl Into<String>, raster: &Raster) -> Self {
        let model = raster.model();
        Self {
            file: file.into(),
            width: raster.width(),
            height: raster.height(),
            components: model.components,
            color_components: model.color_components,
            bits_per_pixel: model.bits_per_pixel,
            transparency: model.transparency,
        }
    }
}

impl std::fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Image file: {}", self.file)?;
        writeln!(f, "Width: {}", self.width)?;
        writeln!(f, "Height: {}", self.height)?;
        writeln!(f, "Number of components: {}", self.components)?;
        writeln!(f, "Number of color components: {}", self.color_components)?;
        writeln!(f, "Bits per pixel: {}", self.bits_per_pixel)?;
        write!(f, "Transparency: {}", self.transparency)
    }
}

pub fn image_info(path: &Path) -> WatermarkResult<ImageInfo> {
    let raster = decode_file(path)?;
    Ok(ImageInfo::from_raster(path.display().to_string(), &raster))
}

#[cfg(test)]
#[path = "../../tests/unit/codec/info.rs"]
mod tests;
