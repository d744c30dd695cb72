
use std::borrow::Cow;
use std::io::Write;

use super::errors::{GifError, GifResult};
use super::validators::*;
use super::{Frame, Meta, Palette};



/// Counts and validates frames around `gif::Encoder`
pub struct Encoder<W: Write> {
    inner: gif::Encoder<W>,
    meta: Meta,
    sequence: usize,
}


impl<W: Write> Encoder<W> {
    /// Writes the header, the global color table and the loop extension
    pub fn create(writer: W, meta: Meta) -> GifResult<Self> {
        validate_meta(&meta)?;

        let mut inner = gif::Encoder::new(writer, meta.width as u16, meta.height as u16, &meta.palette.to_table())?;
        if let Some(plays) = meta.plays {
            let repeat = if plays == 0 { gif::Repeat::Infinite } else { gif::Repeat::Finite(plays) };
            inner.set_repeat(repeat)?;
        }

        Ok(Encoder { inner, meta, sequence: 0 })
    }

    /// Writes one frame of palette indices.
    ///
    /// `palette` becomes the local color table of the frame; without it the global one is used.
    pub fn write_frame(&mut self, indices: &[u8], frame: &Frame, palette: Option<&Palette>) -> GifResult<()> {
        let frames = self.meta.frames as usize;
        if frames <= self.sequence {
            return Err(GifError::TooManyFrames(frames, self.sequence + 1));
        }

        validate_image_data(indices, self.meta.width, self.meta.height)?;
        if let Some(palette) = palette {
            validate_palette(palette)?;
        }
        validate_indices(indices, palette.unwrap_or(&self.meta.palette), frame.transparent)?;

        let frame = gif::Frame {
            width: self.meta.width as u16,
            height: self.meta.height as u16,
            delay: frame.delay,
            dispose: frame.dispose,
            transparent: frame.transparent,
            palette: palette.map(Palette::to_table),
            buffer: Cow::Borrowed(indices),
            ..Default::default()
        };
        self.inner.write_frame(&frame)?;

        self.sequence += 1;
        Ok(())
    }

    /// Writes the trailer
    pub fn finish(self) -> GifResult<()> {
        let frames = self.meta.frames as usize;
        if self.sequence < frames {
            return Err(GifError::NotEnoughFrames(frames, self.sequence));
        }
        let mut writer = self.inner.into_inner()?;
        writer.flush()?;
        Ok(())
    }
}
