
use std::cmp::Reverse;
use std::collections::BTreeMap;

use image::imageops::ColorMap;
use image::{Rgb, Rgba, RgbaImage};



/// Colors left for the image once the transparent slot is reserved
pub const QUANTIZED_COLORS: usize = 255;


/// Median cut color quantizer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MedianCut {
    colors: usize,
}

/// Maps colors to the nearest entry of a fixed palette
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NearestColor {
    colors: Vec<Rgba<u8>>,
}

/// Distinct colors with their pixel counts
#[derive(Clone, Debug)]
struct Bucket {
    entries: Vec<([u8;3], u64)>,
}


impl Default for MedianCut {
    fn default() -> Self {
        MedianCut::new(QUANTIZED_COLORS)
    }
}

impl MedianCut {
    pub fn new(colors: usize) -> Self {
        MedianCut { colors }
    }

    /// Representative colors of every visible pixel, at most `self.colors` of them.
    ///
    /// Fully transparent pixels are ignored. The result only depends on the pixels.
    pub fn quantize(&self, image: &RgbaImage) -> Vec<Rgb<u8>> {
        let mut histogram = BTreeMap::<[u8;3], u64>::new();
        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            if a != 0 {
                *histogram.entry([r, g, b]).or_insert(0) += 1;
            }
        }

        if histogram.is_empty() || self.colors == 0 {
            return vec![];
        }

        let mut buckets = vec![Bucket { entries: histogram.into_iter().collect() }];

        while buckets.len() < self.colors {
            let widest = buckets
                .iter()
                .enumerate()
                .filter(|(_, bucket)| 1 < bucket.entries.len())
                .max_by_key(|(index, bucket)| (bucket.widest_channel().1, Reverse(*index)))
                .map(|(index, _)| index);

            let index = match widest {
                Some(index) => index,
                None => break,
            };

            let (low, high) = buckets[index].split();
            buckets[index] = low;
            buckets.push(high);
        }

        buckets.iter().map(Bucket::mean).collect()
    }
}


impl Bucket {
    /// Channel with the largest value range and that range
    fn widest_channel(&self) -> (usize, u8) {
        let mut result = (0, 0);
        for channel in 0 .. 3 {
            let values = self.entries.iter().map(|(color, _)| color[channel]);
            let min = values.clone().min().unwrap_or(0);
            let max = values.max().unwrap_or(0);
            if result.1 < max - min {
                result = (channel, max - min);
            }
        }
        result
    }

    /// Splits at the pixel weighted median of the widest channel. Needs two or more entries.
    fn split(&self) -> (Bucket, Bucket) {
        let (channel, _) = self.widest_channel();
        let mut entries = self.entries.clone();
        entries.sort_by_key(|(color, _)| (color[channel], *color));

        let total: u64 = entries.iter().map(|(_, count)| count).sum();
        let mut accumulated = 0;
        let mut at = entries.len() - 1;
        for (index, (_, count)) in entries.iter().enumerate() {
            accumulated += count;
            if total <= accumulated * 2 {
                at = index + 1;
                break;
            }
        }
        let at = at.max(1).min(entries.len() - 1);

        let high = entries.split_off(at);
        (Bucket { entries }, Bucket { entries: high })
    }

    fn mean(&self) -> Rgb<u8> {
        let total: u64 = self.entries.iter().map(|(_, count)| count).sum();
        let mut sums = [0u64; 3];
        for (color, count) in &self.entries {
            for (sum, value) in sums.iter_mut().zip(color.iter()) {
                *sum += u64::from(*value) * count;
            }
        }
        let average = |sum: u64| ((sum + total / 2) / total) as u8;
        Rgb([average(sums[0]), average(sums[1]), average(sums[2])])
    }
}


impl NearestColor {
    pub fn new(colors: Vec<Rgba<u8>>) -> Self {
        NearestColor { colors }
    }

    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.colors
    }
}

impl ColorMap for NearestColor {
    type Color = Rgba<u8>;

    /// First entry with the smallest premultiplied distance
    fn index_of(&self, color: &Rgba<u8>) -> usize {
        let target = premultiply(color);
        let mut best = (0, u32::max_value());
        for (index, candidate) in self.colors.iter().enumerate() {
            let candidate = premultiply(candidate);
            let distance: u32 = target
                .iter()
                .zip(candidate.iter())
                .map(|(a, b)| {
                    let d = i32::from(*a) - i32::from(*b);
                    (d * d) as u32
                })
                .sum();
            if distance < best.1 {
                best = (index, distance);
                if distance == 0 {
                    break;
                }
            }
        }
        best.0
    }

    fn map_color(&self, color: &mut Rgba<u8>) {
        if let Some(mapped) = self.colors.get(self.index_of(color)) {
            *color = *mapped;
        }
    }
}


fn premultiply(color: &Rgba<u8>) -> [u8;4] {
    let [r, g, b, a] = color.0;
    let scale = |value: u8| ((u32::from(value) * u32::from(a) + 127) / 255) as u8;
    [scale(r), scale(g), scale(b), a]
}
