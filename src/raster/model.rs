use image::{ColorType, DynamicImage, RgbImage, RgbaImage};

use crate::{foundation::color::Color, transparency::TransparencyClass};

/// Color model a raster was decoded with.
///
/// Pixels are always held as straight RGBA8; the model remembers what the source looked
/// like so validation can reject gray or 16-bit inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorModel {
    /// Channel count including alpha.
    pub components: u8,
    /// Channel count excluding alpha.
    pub color_components: u8,
    pub bits_per_pixel: u16,
    pub transparency: TransparencyClass,
}

impl ColorModel {
    pub const RGB8: Self = Self {
        components: 3,
        color_components: 3,
        bits_per_pixel: 24,
        transparency: TransparencyClass::Opaque,
    };

    pub const RGBA8: Self = Self {
        components: 4,
        color_components: 3,
        bits_per_pixel: 32,
        transparency: TransparencyClass::Translucent,
    };

    pub fn from_color_type(color: ColorType) -> Self {
        let transparency = match color {
            ColorType::L8
            | ColorType::L16
            | ColorType::Rgb8
            | ColorType::Rgb16
            | ColorType::Rgb32F => TransparencyClass::Opaque,
            ColorType::La8
            | ColorType::La16
            | ColorType::Rgba8
            | ColorType::Rgba16
            | ColorType::Rgba32F => TransparencyClass::Translucent,
            _ => TransparencyClass::Unsupported,
        };

        Self {
            components: color.channel_count(),
            color_components: if color.has_color() { 3 } else { 1 },
            bits_per_pixel: color.bits_per_pixel(),
            transparency,
        }
    }

    pub fn has_alpha(self) -> bool {
        self.components > self.color_components
    }
}

/// A decoded image: dimensions, color model and straight RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct Raster {
    model: ColorModel,
    pixels: RgbaImage,
}

impl Raster {
    pub fn new(model: ColorModel, pixels: RgbaImage) -> Self {
        Self { model, pixels }
    }

    pub fn from_dynamic(img: DynamicImage) -> Self {
        let model = ColorModel::from_color_type(img.color());
        Self {
            model,
            pixels: img.to_rgba8(),
        }
    }

    /// Opaque 24-bit raster.
    pub fn from_rgb8(img: RgbImage) -> Self {
        Self {
            model: ColorModel::RGB8,
            pixels: DynamicImage::ImageRgb8(img).to_rgba8(),
        }
    }

    /// Translucent 32-bit raster.
    pub fn from_rgba8(img: RgbaImage) -> Self {
        Self {
            model: ColorModel::RGBA8,
            pixels: img,
        }
    }

    /// Opaque 24-bit raster of a single color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self::from_rgb8(RgbImage::from_pixel(width, height, color.to_rgb8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        Color::from_rgba8(*self.pixels.get_pixel(x, y))
    }

    pub fn as_rgba8(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Drops alpha.
    pub fn to_rgb8(&self) -> RgbImage {
        DynamicImage::ImageRgba8(self.pixels.clone()).to_rgb8()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/model.rs"]
mod tests;
