//! Page image encoding.

use crate::config::{OutputFormat, RenderConfig};
use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::Cursor;

/// Encode a rendered page in `format`.
pub fn encode_page(image: &RgbImage, format: OutputFormat, config: &RenderConfig) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => encode_png(image, config.png_compression),
        OutputFormat::Jpeg => encode_jpeg(image, config.jpeg_quality),
        OutputFormat::Tiff => encode_tiff(image),
    }
}

fn encode_png(image: &RgbImage, level: u8) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());

    // Use the png crate directly for control over compression
    let mut encoder = png::Encoder::new(&mut buffer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png_compression(level));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;

    Ok(buffer.into_inner())
}

fn png_compression(level: u8) -> png::Compression {
    match level {
        0..=3 => png::Compression::Fast,
        4..=6 => png::Compression::Default,
        _ => png::Compression::Best,
    }
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buffer.into_inner())
}

fn encode_tiff(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    TiffEncoder::new(&mut buffer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buffer.into_inner())
}
