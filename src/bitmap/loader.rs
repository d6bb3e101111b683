use std::path::Path;

use crate::error::{NetworkError, Result};

/// Pixels darker than this gray level count as ink when decoding images.
pub const INK_THRESHOLD: u8 = 128;

/// Parses a text bitmap into a flat pixel vector.
///
/// Characters are read in order and only `'0'` and `'1'` are kept, so row
/// separators, spaces and any other decoration are ignored.
pub fn parse_text_bitmap(text: &str) -> Vec<f64> {
    text.chars()
        .filter_map(|c| match c {
            '0' => Some(0.0),
            '1' => Some(1.0),
            _ => None,
        })
        .collect()
}

/// Reads and parses a text bitmap file.
pub fn load_text_bitmap(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| NetworkError::io(path, e))?;
    Ok(parse_text_bitmap(&text))
}

/// Decodes an image file (PNG/JPEG/BMP/GIF), resizes it to `width × height`
/// and thresholds it to a binary pixel vector where dark pixels are `1.0`.
pub fn load_image_bitmap(path: impl AsRef<Path>, width: u32, height: u32) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| NetworkError::io(path, e))?;
    image_bytes_to_bitmap(&bytes, width, height)
        .map_err(|e| NetworkError::Format(format!("{}: {e}", path.display())))
}

/// Decodes image bytes into a thresholded `width * height` pixel vector.
pub fn image_bytes_to_bitmap(bytes: &[u8], width: u32, height: u32) -> std::result::Result<Vec<f64>, String> {
    let img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let resized = img.resize_exact(width, height, image::imageops::FilterType::Nearest);
    let gray = resized.to_luma8();
    Ok(gray.pixels().map(|p| if p.0[0] < INK_THRESHOLD { 1.0 } else { 0.0 }).collect())
}

/// Loads bitmaps and insists that every one has exactly `input_size` pixels.
///
/// Files with a `.txt` extension (or no extension) are parsed as text
/// bitmaps; anything else is decoded as an image resized to
/// `width × height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapLoader {
    pub width: u32,
    pub height: u32,
}

impl BitmapLoader {
    pub fn new(width: u32, height: u32) -> BitmapLoader {
        BitmapLoader { width, height }
    }

    /// A square loader for `input_size` pixels, e.g. 10×10 for 100.
    /// Non-square sizes fall back to a single row.
    pub fn for_input_size(input_size: usize) -> BitmapLoader {
        let side = (input_size as f64).sqrt().round() as usize;
        if side * side == input_size {
            BitmapLoader::new(side as u32, side as u32)
        } else {
            BitmapLoader::new(input_size as u32, 1)
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Loads `path`, returning a `DimensionMismatch` instead of a short or
    /// long vector.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<f64>> {
        let path = path.as_ref();
        let pixels = match path.extension().and_then(|e| e.to_str()) {
            None => load_text_bitmap(path)?,
            Some(ext) if ext.eq_ignore_ascii_case("txt") => load_text_bitmap(path)?,
            Some(_) => load_image_bitmap(path, self.width, self.height)?,
        };
        NetworkError::check_len("bitmap pixels", self.pixel_count(), pixels.len())?;
        Ok(pixels)
    }
}
