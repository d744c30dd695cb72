
use image::Rgb;



pub mod encoder;
pub mod errors;
pub mod validators;



/// Largest color table a GIF can carry
pub const MAX_COLORS: usize = 256;


#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Meta {
    /// Number of animation frames
    pub frames: u32,
    pub height: u32,
    /// Global color table
    pub palette: Palette,
    /// Number of plays (`Some(0)` loops forever, `None` plays once)
    pub plays: Option<u16>,
    pub width: u32,
}

/// Per frame parameters. The frame always covers the whole canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Centiseconds
    pub delay: u16,
    pub dispose: gif::DisposalMethod,
    pub transparent: Option<u8>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Palette {
    pub colors: Vec<Rgb<u8>>,
}


impl Default for Frame {
    fn default() -> Self {
        Frame {
            delay: 0,
            dispose: gif::DisposalMethod::Any,
            transparent: None,
        }
    }
}


impl Palette {
    pub fn new(colors: Vec<Rgb<u8>>) -> Self {
        Palette { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Flat `r, g, b` bytes as the `gif` crate takes them
    pub fn to_table(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|it| it.0.iter().copied()).collect()
    }
}
