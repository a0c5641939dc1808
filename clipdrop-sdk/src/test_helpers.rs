// ABOUTME: Test helper utilities for building clients, keys, and image fixtures
// ABOUTME: Provides mockito-friendly clients and in-memory encoded images for unit tests

use crate::ClipdropClient;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use secrecy::SecretString;
use std::io::Cursor;

pub const TEST_API_KEY: &str = "test-api-key";

pub fn test_api_key() -> SecretString {
    SecretString::new(TEST_API_KEY.to_string().into_boxed_str())
}

/// Client pointed at a mock server (or any base URL) with the test key.
pub fn test_client(base_url: &str) -> ClipdropClient {
    ClipdropClient::builder()
        .api_key(Some(test_api_key()))
        .base_url(base_url)
        .build()
        .expect("test client should build")
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("test image should encode");
    bytes
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::new(width, height)),
        ImageFormat::Png,
    )
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::new(width, height)),
        ImageFormat::Jpeg,
    )
}
