//! Test fixtures: images built in memory.

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(write: impl FnOnce(&mut Cursor<&mut Vec<u8>>) -> image::ImageResult<()>) -> Vec<u8> {
    let mut bytes = Vec::new();
    write(&mut Cursor::new(&mut bytes)).expect("Failed to encode test image");
    bytes
}

/// A single-color PNG
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode(|out| RgbImage::from_pixel(width, height, Rgb(rgb)).write_to(out, ImageFormat::Png))
}

/// A single-color JPEG
pub fn solid_jpeg(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode(|out| RgbImage::from_pixel(width, height, Rgb(rgb)).write_to(out, ImageFormat::Jpeg))
}

/// A fully transparent black PNG (alpha must not matter)
pub fn transparent_png(width: u32, height: u32) -> Vec<u8> {
    encode(|out| {
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])).write_to(out, ImageFormat::Png)
    })
}

/// Left half black, right half white
pub fn split_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    encode(|out| image.write_to(out, ImageFormat::Png))
}

/// Horizontal gradient from black to white
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1).max(1)) as u8;
        Rgb([v, v, v])
    });
    encode(|out| image.write_to(out, ImageFormat::Png))
}

/// Bytes that are not an image in any format
pub const NOT_AN_IMAGE: &[u8] = b"definitely not an image, just some text";
