
use std::io::Write;

use image::imageops::index_colors;
use image::{DynamicImage, Rgb, Rgba, RgbaImage};

use crate::codec::encoder::Encoder;
use crate::codec::errors::{GifError, GifResult};
use crate::codec::{Frame, Meta, Palette};
use crate::quantize::{MedianCut, NearestColor};
use crate::slide::{Offset, Slide, FRAME_COUNT};



/// Palette slot 0 of every frame
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
/// Centiseconds between frames (0 leaves pacing to the viewer)
pub const FRAME_DELAY: u16 = 0;
pub const FRAME_DISPOSAL: gif::DisposalMethod = gif::DisposalMethod::Background;
/// Plays forever
pub const LOOP_COUNT: u16 = 0;


/// Indexed raster covering the whole source bounds
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PalettedFrame {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<Rgba<u8>>,
    pub indices: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub frames: Vec<PalettedFrame>,
    pub delays: Vec<u16>,
    pub disposals: Vec<gif::DisposalMethod>,
    pub loop_count: u16,
}

/// Produces the sliding frames of one source image
#[derive(Clone, Debug)]
pub struct Renderer {
    height: u32,
    /// Palette index of every source pixel, row major
    indexed: Vec<u8>,
    map: NearestColor,
    slide: Slide,
    width: u32,
}


impl PalettedFrame {
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[y as usize * self.width as usize + x as usize]
    }

    pub fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.palette[self.index_at(x, y) as usize]
    }
}


impl Renderer {
    pub fn new(source: &DynamicImage, slide: Slide) -> Self {
        Self::from_rgba(source.to_rgba8(), slide)
    }

    /// The source never changes between frames, so it is quantized and indexed once here.
    /// Frames are shifted copies of the indexed source.
    pub fn from_rgba(source: RgbaImage, slide: Slide) -> Self {
        let (width, height) = source.dimensions();
        let colors = MedianCut::default().quantize(&source);
        let map = NearestColor::new(working_palette(&colors));
        let indexed = index_colors(&source, &map).into_raw();
        Renderer { height, indexed, map, slide, width }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn offset(&self, index: usize) -> Offset {
        self.slide.offset(index, self.width, self.height)
    }

    pub fn render_frame(&self, index: usize) -> PalettedFrame {
        PalettedFrame {
            width: self.width,
            height: self.height,
            palette: self.map.colors().to_vec(),
            indices: shift_indices(&self.indexed, self.width, self.height, self.offset(index)),
        }
    }

    pub fn render(&self) -> Animation {
        Animation::new((0 .. FRAME_COUNT).map(|index| self.render_frame(index)).collect())
    }
}


/// Transparent entry followed by the quantized colors in their original order
pub fn working_palette(colors: &[Rgb<u8>]) -> Vec<Rgba<u8>> {
    let mut palette = Vec::with_capacity(colors.len() + 1);
    palette.push(TRANSPARENT);
    palette.extend(colors.iter().map(|Rgb([r, g, b])| Rgba([*r, *g, *b, 0xff])));
    palette
}

/// Copies `indexed` so that frame pixel `(x, y)` shows source pixel `(x + offset.x, y + offset.y)`.
///
/// Pixels with no source counterpart stay at index 0. Colors were mapped to the nearest entry
/// without error diffusion; Floyd-Steinberg gave visibly wrong colors on some photos.
pub fn shift_indices(indexed: &[u8], width: u32, height: u32, offset: Offset) -> Vec<u8> {
    let (width, height) = (i64::from(width), i64::from(height));
    let mut indices = vec![0; (width * height) as usize];

    // Frame columns `left .. right` have a source column
    let left = (-offset.x).max(0).min(width);
    let right = (width - offset.x).min(width).max(left);
    if left == right {
        return indices;
    }

    for y in 0 .. height {
        let source_y = y + offset.y;
        if source_y < 0 || height <= source_y {
            continue;
        }
        let frame_start = (y * width + left) as usize;
        let source_start = (source_y * width + left + offset.x) as usize;
        let length = (right - left) as usize;
        indices[frame_start .. frame_start + length]
            .copy_from_slice(&indexed[source_start .. source_start + length]);
    }

    indices
}


impl Animation {
    pub fn new(frames: Vec<PalettedFrame>) -> Self {
        let count = frames.len();
        Animation {
            frames,
            delays: vec![FRAME_DELAY; count],
            disposals: vec![FRAME_DISPOSAL; count],
            loop_count: LOOP_COUNT,
        }
    }

    /// Writes the animation as GIF.
    ///
    /// The first frame's palette is the global color table; frames sharing it carry no local table.
    pub fn encode<W: Write>(&self, writer: &mut W) -> GifResult<()> {
        let first = self.frames.first().ok_or(GifError::NotEnoughFrames(FRAME_COUNT, 0))?;
        let global = to_gif_palette(&first.palette);

        let meta = Meta {
            width: first.width,
            height: first.height,
            frames: self.frames.len() as u32,
            plays: Some(self.loop_count),
            palette: global.clone(),
        };
        let mut encoder = Encoder::create(writer, meta)?;

        for ((frame, delay), disposal) in self.frames.iter().zip(&self.delays).zip(&self.disposals) {
            let palette = to_gif_palette(&frame.palette);
            let parameter = Frame {
                delay: *delay,
                dispose: *disposal,
                transparent: frame.palette.iter().position(|it| it.0[3] == 0).map(|it| it as u8),
            };
            let local = if palette == global { None } else { Some(&palette) };
            encoder.write_frame(&frame.indices, &parameter, local)?;
        }

        encoder.finish()
    }
}


fn to_gif_palette(colors: &[Rgba<u8>]) -> Palette {
    Palette::new(colors.iter().map(|Rgba([r, g, b, _])| Rgb([*r, *g, *b])).collect())
}


#[cfg(test)]
mod tests {
    use super::*;

    use image::imageops::ColorMap;

    use crate::slide::Direction;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    fn red_and_blue() -> NearestColor {
        NearestColor::new(working_palette(&[Rgb([255, 0, 0]), Rgb([0, 0, 255])]))
    }

    fn shifted(source: &RgbaImage, map: &NearestColor, offset: Offset) -> PalettedFrame {
        let (width, height) = source.dimensions();
        PalettedFrame {
            width,
            height,
            palette: map.colors().to_vec(),
            indices: shift_indices(&index_colors(source, map).into_raw(), width, height, offset),
        }
    }

    /// Looks up every covered frame pixel on its own
    fn mapped_per_pixel(source: &RgbaImage, map: &NearestColor, offset: Offset) -> Vec<u8> {
        let (width, height) = (i64::from(source.width()), i64::from(source.height()));
        let mut indices = vec![];
        for y in 0 .. height {
            for x in 0 .. width {
                let (source_x, source_y) = (x + offset.x, y + offset.y);
                let inside = 0 <= source_x && source_x < width && 0 <= source_y && source_y < height;
                indices.push(if inside {
                    map.index_of(source.get_pixel(source_x as u32, source_y as u32)) as u8
                } else {
                    0
                });
            }
        }
        indices
    }

    #[test]
    fn test_working_palette() {
        let palette = working_palette(&[Rgb([1, 2, 3]), Rgb([4, 5, 6])]);
        assert_eq!(palette, vec![TRANSPARENT, Rgba([1, 2, 3, 255]), Rgba([4, 5, 6, 255])]);
    }

    #[test]
    fn test_shift_without_offset() {
        let source = checker(4, 3);
        let frame = shifted(&source, &red_and_blue(), Offset::default());
        assert_eq!((frame.width, frame.height), (4, 3));
        for (x, y, pixel) in source.enumerate_pixels() {
            assert_eq!(frame.color_at(x, y), *pixel);
        }
    }

    #[test]
    fn test_shift_with_offset() {
        let source = checker(4, 3);
        let map = red_and_blue();

        let frame = shifted(&source, &map, Offset::new(1, 0));
        for y in 0 .. 3 {
            for x in 0 .. 3 {
                assert_eq!(frame.color_at(x, y), *source.get_pixel(x + 1, y));
            }
            assert_eq!(frame.index_at(3, y), 0);
        }

        let frame = shifted(&source, &map, Offset::new(0, -2));
        for x in 0 .. 4 {
            assert_eq!(frame.index_at(x, 0), 0);
            assert_eq!(frame.index_at(x, 1), 0);
            assert_eq!(frame.color_at(x, 2), *source.get_pixel(x, 0));
        }
    }

    #[test]
    fn test_shift_fully_outside() {
        let source = checker(4, 3);
        let map = NearestColor::new(working_palette(&[Rgb([255, 0, 0])]));
        for offset in &[Offset::new(4, 0), Offset::new(-4, 0), Offset::new(0, 3), Offset::new(0, -3)] {
            assert!(shifted(&source, &map, *offset).indices.iter().all(|it| *it == 0));
        }
    }

    #[test]
    fn test_frames_match_per_pixel_lookup() {
        // Gradient with a transparent stripe, odd sizes so fractions truncate
        let source = RgbaImage::from_fn(23, 11, |x, y| {
            let alpha = if x % 7 == 3 { 0 } else { 0xff };
            Rgba([(x * 11) as u8, (y * 23) as u8, ((x + y) * 5) as u8, alpha])
        });

        for &(start, end, looped) in &[
            (Direction::Left, Direction::Right, false),
            (Direction::Bottom, Direction::Left, true),
            (Direction::Top, Direction::Bottom, false),
            (Direction::Right, Direction::Top, true),
        ] {
            let renderer = Renderer::from_rgba(source.clone(), Slide::new(start, end, looped));
            for index in 0 .. FRAME_COUNT {
                let expected = mapped_per_pixel(&source, &renderer.map, renderer.offset(index));
                assert_eq!(renderer.render_frame(index).indices, expected, "frame {}", index);
            }
        }
    }

    #[test]
    fn test_animation_parallel_arrays() {
        let animation = Renderer::from_rgba(checker(5, 5), Slide::default()).render();
        assert_eq!(animation.frames.len(), FRAME_COUNT);
        assert_eq!(animation.delays, vec![0; FRAME_COUNT]);
        assert_eq!(animation.disposals, vec![gif::DisposalMethod::Background; FRAME_COUNT]);
        assert_eq!(animation.loop_count, 0);
    }

    #[test]
    fn test_encode_empty_animation() {
        let mut buffer = vec![];
        assert!(Animation::new(vec![]).encode(&mut buffer).is_err());
    }
}
