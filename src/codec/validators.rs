
use super::{Meta, Palette, MAX_COLORS};
use super::errors::{GifError, GifResult};



pub fn validate_meta(meta: &Meta) -> GifResult<()> {
    let max = u32::from(u16::max_value());

    if meta.width == 0 || meta.height == 0 || max < meta.width || max < meta.height {
        return Err(GifError::InvalidCanvasSize);
    }

    validate_palette(&meta.palette)
}

pub fn validate_palette(palette: &Palette) -> GifResult<()> {
    if palette.is_empty() || MAX_COLORS < palette.len() {
        return Err(GifError::InvalidPalette);
    }
    Ok(())
}

pub fn validate_image_data(indices: &[u8], width: u32, height: u32) -> GifResult<()> {
    let expected = width as usize * height as usize;
    if indices.len() < expected {
        return Err(GifError::TooSmallImage);
    }
    if expected < indices.len() {
        return Err(GifError::TooLargeImage);
    }
    Ok(())
}

pub fn validate_indices(indices: &[u8], palette: &Palette, transparent: Option<u8>) -> GifResult<()> {
    let len = palette.len();

    if let Some(index) = transparent {
        if len <= index as usize {
            return Err(GifError::InvalidTransparentIndex(index));
        }
    }

    if let Some(index) = indices.iter().find(|it| len <= **it as usize) {
        return Err(GifError::InvalidColorIndex(*index));
    }

    Ok(())
}
