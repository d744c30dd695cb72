
use std::io::Write;

use image::DynamicImage;

pub mod animation;
pub mod codec;
pub mod quantize;
pub mod slide;

pub use crate::animation::{Animation, PalettedFrame, Renderer};
pub use crate::codec::encoder::Encoder;
pub use crate::codec::errors::{GifError, GifResult};
pub use crate::codec::{Frame, Meta, Palette};
pub use crate::slide::{Direction, InvalidDirection, Offset, Slide, FRAME_COUNT};



/// Renders the sliding animation of `source` and writes it to `writer` as GIF
pub fn animate<W: Write>(source: &DynamicImage, slide: Slide, writer: &mut W) -> GifResult<()> {
    Renderer::new(source, slide).render().encode(writer)
}
