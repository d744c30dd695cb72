
use failure::Fail;



pub type AppResult<T> = Result<T, AppError>;


#[derive(Fail, Debug)]
pub enum AppError {
    #[fail(display = "Direction error")]
    Direction(#[cause] slide_gif::InvalidDirection),
    #[fail(display = "GIF error")]
    Gif(#[cause] slide_gif::GifError),
    #[fail(display = "Image error")]
    Image(#[cause] image::ImageError),
    #[fail(display = "IO error")]
    Io(#[cause] std::io::Error),
    #[fail(display = "Not enough argument")]
    NotEnoughArgument,
    #[fail(display = "Unknown option: {}", _0)]
    UnknownOption(String),
}

macro_rules! define_error {
    ($source:ty, $kind:ident) => {
        impl From<$source> for AppError {
            fn from(error: $source) -> AppError {
                AppError::$kind(error)
            }
        }
    }
}

define_error!(std::io::Error, Io);
define_error!(image::ImageError, Image);
define_error!(slide_gif::GifError, Gif);
define_error!(slide_gif::InvalidDirection, Direction);
