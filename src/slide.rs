
use std::fmt;
use std::str::FromStr;

use enum_iterator::IntoEnumIterator;
use failure::Fail;



/// Number of frames in every animation
pub const FRAME_COUNT: usize = 10;
/// Frames `0 .. HALF_FRAMES` slide in, the rest slide out
pub const HALF_FRAMES: usize = FRAME_COUNT / 2;
/// Each frame travels `1 / STEPS` (0.2) of the image
pub const STEPS: i64 = 5;


#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoEnumIterator)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

/// Position of the source image origin relative to the frame origin
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Offset {
    pub x: i64,
    pub y: i64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Slide {
    pub start: Direction,
    pub end: Direction,
    /// Start and end around the resting position instead of off the frame
    pub looped: bool,
}

#[derive(Fail, Debug)]
#[fail(display = "Invalid direction: {} (expected left, right, top or bottom)", _0)]
pub struct InvalidDirection(pub String);


impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Top => "top",
            Direction::Bottom => "bottom",
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::into_enum_iter()
            .find(|it| it.name() == s)
            .ok_or_else(|| InvalidDirection(s.to_owned()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


impl Offset {
    pub fn new(x: i64, y: i64) -> Self {
        Offset { x, y }
    }
}


impl Default for Slide {
    fn default() -> Self {
        Slide { start: Direction::Left, end: Direction::Right, looped: false }
    }
}

impl Slide {
    pub fn new(start: Direction, end: Direction, looped: bool) -> Self {
        Slide { start, end, looped }
    }

    /// Offset of frame `index` (`0 .. FRAME_COUNT`) for an image of `width` x `height`
    pub fn offset(&self, index: usize, width: u32, height: u32) -> Offset {
        let index = index as i64;
        let half = HALF_FRAMES as i64;
        let (width, height) = (i64::from(width), i64::from(height));

        if index < half {
            let k = if self.looped { index + half } else { index };
            match self.start {
                Direction::Right => Offset::new(-width + fraction(width, k), 0),
                Direction::Left => Offset::new(width - fraction(width, k), 0),
                Direction::Top => Offset::new(0, height - fraction(height, k)),
                Direction::Bottom => Offset::new(0, -height + fraction(height, k)),
            }
        } else {
            let k = if self.looped { index - FRAME_COUNT as i64 } else { index - half };
            match self.end {
                Direction::Right => Offset::new(-fraction(width, k), 0),
                Direction::Left => Offset::new(fraction(width, k), 0),
                Direction::Top => Offset::new(0, fraction(height, k)),
                Direction::Bottom => Offset::new(0, -fraction(height, k)),
            }
        }
    }

    pub fn offsets(&self, width: u32, height: u32) -> Vec<Offset> {
        (0 .. FRAME_COUNT).map(|index| self.offset(index, width, height)).collect()
    }
}


/// `floor(dimension * 0.2 * k)`, computed exactly
fn fraction(dimension: i64, k: i64) -> i64 {
    (dimension * k).div_euclid(STEPS)
}
