
use failure::Fail;
use std::io::Error as IOError;


pub type GifResult<T> = Result<T, GifError>;



#[derive(Fail, Debug)]
pub enum GifError {
    #[fail(display = "Encoding error")]
    Encoding(#[cause] gif::EncodingError),
    #[fail(display = "Invalid canvas size")]
    InvalidCanvasSize,
    #[fail(display = "Color index out of the color table: {}", _0)]
    InvalidColorIndex(u8),
    #[fail(display = "Invalid palette")]
    InvalidPalette,
    #[fail(display = "Transparent index out of the color table: {}", _0)]
    InvalidTransparentIndex(u8),
    #[fail(display = "IO error")]
    Io(#[cause] IOError),
    #[fail(display = "Not enough frames: expected={}, actual={}", _0, _1)]
    NotEnoughFrames(usize, usize),
    #[fail(display = "Too large image")]
    TooLargeImage,
    #[fail(display = "Too many frames: expected={}, actual={}", _0, _1)]
    TooManyFrames(usize, usize),
    #[fail(display = "Too small image")]
    TooSmallImage,
}

macro_rules! define_error {
    ($source:ty, $kind:tt) => {
        impl From<$source> for GifError {
            fn from(error: $source) -> GifError {
                GifError::$kind(error)
            }
        }
    }
}

define_error!(std::io::Error, Io);
define_error!(gif::EncodingError, Encoding);
