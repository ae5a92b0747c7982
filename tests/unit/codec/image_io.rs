use std::{io::Cursor, path::PathBuf};

use image::{RgbImage, RgbaImage};

use super::*;
use crate::foundation::color::Color;

fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn png_with_header(
    color: png::ColorType,
    palette: Option<Vec<u8>>,
    trns: Option<Vec<u8>>,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut enc = png::Encoder::new(&mut buf, 4, 4);
        enc.set_color(color);
        enc.set_depth(png::BitDepth::Eight);
        if let Some(palette) = palette {
            enc.set_palette(palette);
        }
        if let Some(trns) = trns {
            enc.set_trns(trns);
        }
        let mut writer = enc.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    buf
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_codec").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn decode_rgb_png_is_opaque_24_bit() {
    let img = RgbImage::from_pixel(3, 2, image::Rgb([1, 2, 3]));
    let r = decode_memory(&png_bytes(DynamicImage::ImageRgb8(img))).unwrap();
    assert_eq!(r.dimensions(), (3, 2));
    assert_eq!(r.model(), ColorModel::RGB8);
    assert_eq!(r.pixel(2, 1), Color::rgb(1, 2, 3));
}

#[test]
fn decode_rgba_png_is_translucent_32_bit() {
    let img = RgbaImage::from_pixel(1, 1, image::Rgba([9, 8, 7, 6]));
    let r = decode_memory(&png_bytes(DynamicImage::ImageRgba8(img))).unwrap();
    assert_eq!(r.model(), ColorModel::RGBA8);
    assert_eq!(r.model().transparency, TransparencyClass::Translucent);
    assert_eq!(r.pixel(0, 0), Color::rgba(9, 8, 7, 6));
}

#[test]
fn decode_garbage_fails() {
    assert!(decode_memory(b"definitely not an image").is_err());
}

#[test]
fn missing_file_is_file_not_found() {
    let err = decode_file(Path::new("target/unit_codec/does-not-exist.png")).unwrap_err();
    assert!(matches!(err, WatermarkError::FileNotFound { .. }));
    assert!(err.to_string().contains("does-not-exist.png"));
}

#[test]
fn png_roundtrip_drops_alpha() {
    let dir = scratch_dir("png");
    let path = dir.join("out.png");
    let raster = Raster::from_rgba8(RgbaImage::from_pixel(2, 2, image::Rgba([5, 6, 7, 0])));

    encode_file(&raster, &path, OutputFormat::Png).unwrap();
    let back = decode_file(&path).unwrap();
    assert_eq!(back.model(), ColorModel::RGB8);
    assert_eq!(back.pixel(1, 1), Color::rgb(5, 6, 7));
}

#[test]
fn jpg_output_is_jpeg_encoded() {
    let dir = scratch_dir("jpg");
    let path = dir.join("out.jpg");
    encode_file(&Raster::solid(8, 8, Color::rgb(200, 10, 10)), &path, OutputFormat::Jpg).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(decode_file(&path).unwrap().dimensions(), (8, 8));
}

#[test]
fn format_extensions() {
    assert_eq!(OutputFormat::Jpg.extension(), "jpg");
    assert_eq!(OutputFormat::Png.image_format(), image::ImageFormat::Png);
    assert_eq!(OutputFormat::Jpg.image_format(), image::ImageFormat::Jpeg);
}

#[test]
fn indexed_png_reports_its_8_bit_palette_depth() {
    let bytes = png_with_header(
        png::ColorType::Indexed,
        Some(vec![255, 0, 0, 0, 0, 255]),
        None,
        &[0u8; 16],
    );
    let r = decode_memory(&bytes).unwrap();
    assert_eq!(r.model().bits_per_pixel, 8);
    assert_eq!(r.model().color_components, 3);
    assert_eq!(r.model().transparency, TransparencyClass::Opaque);
    assert_eq!(r.pixel(0, 0), Color::rgb(255, 0, 0));

    let err = crate::validate::validate_raster(r, crate::RasterRole::Watermark).unwrap_err();
    assert!(matches!(
        err,
        WatermarkError::UnsupportedBitDepth {
            bits_per_pixel: 8,
            ..
        }
    ));
}

#[test]
fn indexed_png_with_binary_trns_is_bitmask() {
    let bytes = png_with_header(
        png::ColorType::Indexed,
        Some(vec![255, 0, 0, 0, 0, 255]),
        Some(vec![0, 255]),
        &[0u8; 16],
    );
    let r = decode_memory(&bytes).unwrap();
    assert_eq!(r.model().transparency, TransparencyClass::Bitmask);
    assert_eq!(crate::transparency::classify(&r), TransparencyClass::Bitmask);
}

#[test]
fn indexed_png_with_partial_alpha_is_translucent() {
    let bytes = png_with_header(
        png::ColorType::Indexed,
        Some(vec![255, 0, 0, 0, 0, 255]),
        Some(vec![128, 255]),
        &[0u8; 16],
    );
    let r = decode_memory(&bytes).unwrap();
    assert_eq!(r.model().transparency, TransparencyClass::Translucent);
}

#[test]
fn rgb_png_with_trns_key_is_24_bit_bitmask() {
    let bytes = png_with_header(
        png::ColorType::Rgb,
        None,
        Some(vec![0, 0, 0, 0, 0, 255]),
        &[0u8; 48],
    );
    let r = decode_memory(&bytes).unwrap();
    assert_eq!(r.model().bits_per_pixel, 24);
    assert_eq!(r.model().transparency, TransparencyClass::Bitmask);

    let r = crate::validate::validate_raster(r, crate::RasterRole::Watermark).unwrap();
    let class = crate::transparency::classify(&r);
    assert_eq!(
        crate::transparency::resolve_transparency(class, false, Some("0 0 255")).unwrap(),
        crate::TransparencyMode::KeyColor(Color::rgb(0, 0, 255))
    );
}

#[test]
fn failed_encode_leaves_no_file() {
    let dir = scratch_dir("failed");
    let path = dir.join("empty.png");
    let _ = std::fs::remove_file(&path);

    let empty = Raster::solid(0, 0, Color::rgb(0, 0, 0));
    assert!(encode_file(&empty, &path, OutputFormat::Png).is_err());
    assert!(!path.exists());
    assert!(!partial_path(&path).exists());
}

#[test]
fn successful_encode_removes_partial_file() {
    let dir = scratch_dir("partial");
    let path = dir.join("out.png");
    encode_file(&Raster::solid(2, 2, Color::rgb(1, 1, 1)), &path, OutputFormat::Png).unwrap();
    assert!(path.exists());
    assert!(!partial_path(&path).exists());
}
