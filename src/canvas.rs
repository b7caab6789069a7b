// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The canvas is a row-major, RGB-interleaved byte buffer with its
//! origin at the top-left.  It starts out white, gets painted exactly
//! once, and is then handed to an encoder and thrown away.
//!
//! Writes outside the canvas are silently dropped.  For threaded
//! rendering the canvas can be carved into [`Strip`]s, disjoint runs
//! of whole rows that can each be painted from a different thread.

use std::ops::Range;

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Bytes per pixel: red, green, blue.
pub const CHANNELS: usize = 3;

const BACKGROUND: u8 = 0xFF;

/// The width and height of an image, both positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageSize {
    width: usize,
    height: usize,
}

impl ImageSize {
    /// Rejects empty images, and images whose pixel buffer could not
    /// be addressed, up front before anything is allocated.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        let addressable = width
            .checked_mul(height)
            .and_then(|area| area.checked_mul(CHANNELS))
            .map_or(false, |bytes| bytes <= isize::MAX as usize);
        if !addressable {
            return Err(Error::ImageTooLarge { width, height });
        }
        Ok(ImageSize { width, height })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of pixels.  Cannot overflow; `new` checked it.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// The column, row of a pixel.  Signed, so that a caller that has
/// wandered off the left or top edge gets a no-op rather than a wrap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pixel(pub isize, pub isize);

#[inline]
fn put(dest: &mut [u8], color: Rgb) {
    dest[0] = color.red;
    dest[1] = color.green;
    dest[2] = color.blue;
}

/// An RGB pixel buffer.
#[derive(Clone, Debug)]
pub struct Canvas {
    size: ImageSize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocates a white canvas of the given size.
    pub fn new(size: ImageSize) -> Self {
        Canvas {
            size,
            pixels: vec![BACKGROUND; size.area() * CHANNELS],
        }
    }

    /// The size this canvas was created with.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Byte offset of a pixel, or None if it is off the canvas.
    fn offset(&self, pixel: Pixel) -> Option<usize> {
        let Pixel(x, y) = pixel;
        if x < 0 || y < 0 || x as usize >= self.size.width || y as usize >= self.size.height {
            return None;
        }
        Some((y as usize * self.size.width + x as usize) * CHANNELS)
    }

    /// Paints one pixel.  Off-canvas writes do nothing.
    pub fn write(&mut self, pixel: Pixel, color: Rgb) {
        if let Some(offset) = self.offset(pixel) {
            put(&mut self.pixels[offset..offset + CHANNELS], color);
        }
    }

    /// The color at a pixel, or None if it is off the canvas.
    pub fn get(&self, pixel: Pixel) -> Option<Rgb> {
        self.offset(pixel).map(|offset| {
            let p = &self.pixels[offset..offset + CHANNELS];
            Rgb::new(p[0], p[1], p[2])
        })
    }

    /// The raw buffer, `width * height * 3` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Gives up the raw buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Splits the canvas into strips of at most `rows` whole rows
    /// each, top to bottom.  The strips share no bytes, so they can be
    /// painted concurrently without locking.
    pub fn strips_mut(&mut self, rows: usize) -> Vec<Strip> {
        let width = self.size.width;
        let stride = width * CHANNELS * rows.max(1);
        self.pixels
            .chunks_mut(stride)
            .enumerate()
            .map(|(i, pixels)| Strip {
                width,
                first_row: i * rows.max(1),
                pixels,
            })
            .collect()
    }
}

/// A horizontal band of a [`Canvas`], addressed with the canvas's own
/// coordinates.
#[derive(Debug)]
pub struct Strip<'a> {
    width: usize,
    first_row: usize,
    pixels: &'a mut [u8],
}

impl<'a> Strip<'a> {
    /// The canvas rows this strip covers.
    pub fn rows(&self) -> Range<usize> {
        let count = self.pixels.len() / (self.width * CHANNELS);
        self.first_row..self.first_row + count
    }

    /// True if the pixel lies in one of this strip's rows.
    pub fn contains(&self, pixel: Pixel) -> bool {
        let Pixel(x, y) = pixel;
        x >= 0 && y >= 0 && (x as usize) < self.width && self.rows().contains(&(y as usize))
    }

    /// Paints one pixel.  Writes outside this strip do nothing, even
    /// if they would land on the canvas.
    pub fn write(&mut self, pixel: Pixel, color: Rgb) {
        if !self.contains(pixel) {
            return;
        }
        let Pixel(x, y) = pixel;
        let offset = ((y as usize - self.first_row) * self.width + x as usize) * CHANNELS;
        put(&mut self.pixels[offset..offset + CHANNELS], color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: usize, height: usize) -> Canvas {
        Canvas::new(ImageSize::new(width, height).unwrap())
    }

    #[test]
    fn empty_sizes_are_rejected() {
        assert!(ImageSize::new(0, 10).is_err());
        assert!(ImageSize::new(10, 0).is_err());
        assert_eq!(ImageSize::new(4, 3).unwrap().area(), 12);
    }

    #[test]
    fn unaddressable_sizes_are_rejected() {
        match ImageSize::new(usize::MAX / 2, 4) {
            Err(Error::ImageTooLarge { .. }) => {}
            other => panic!("expected a too-large error, got {:?}", other),
        }
        assert!(ImageSize::new(usize::MAX, 1).is_err());
        assert!(ImageSize::new(usize::MAX / 3 + 1, 1).is_err());
    }

    #[test]
    fn new_canvas_is_white() {
        let c = canvas(5, 3);
        assert_eq!(c.pixels().len(), 5 * 3 * 3);
        assert!(c.pixels().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn write_lands_at_row_major_offset() {
        let mut c = canvas(4, 3);
        c.write(Pixel(1, 2), Rgb::new(10, 20, 30));
        let offset = (2 * 4 + 1) * 3;
        assert_eq!(&c.pixels()[offset..offset + 3], &[10, 20, 30]);
        assert_eq!(c.get(Pixel(1, 2)), Some(Rgb::new(10, 20, 30)));
        assert_eq!(c.get(Pixel(2, 1)), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn off_canvas_writes_change_nothing() {
        let mut c = canvas(4, 3);
        let before = c.pixels().to_vec();
        for &p in &[Pixel(-1, 0), Pixel(0, -1), Pixel(4, 0), Pixel(0, 3), Pixel(100, 100)] {
            c.write(p, Rgb::new(0, 0, 0));
            assert_eq!(c.get(p), None);
        }
        assert_eq!(c.pixels(), &before[..]);
    }

    #[test]
    fn strips_cover_every_row_once() {
        let mut c = canvas(3, 7);
        let strips = c.strips_mut(3);
        let rows: Vec<Range<usize>> = strips.iter().map(|s| s.rows()).collect();
        assert_eq!(rows, vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn strip_writes_use_canvas_coordinates() {
        let mut c = canvas(3, 4);
        {
            let mut strips = c.strips_mut(2);
            strips[1].write(Pixel(2, 3), Rgb::new(1, 2, 3));
            // Row 0 belongs to the first strip.
            strips[1].write(Pixel(0, 0), Rgb::new(9, 9, 9));
            strips[1].write(Pixel(3, 2), Rgb::new(9, 9, 9));
        }
        assert_eq!(c.get(Pixel(2, 3)), Some(Rgb::new(1, 2, 3)));
        assert_eq!(c.get(Pixel(0, 0)), Some(Rgb::new(255, 255, 255)));
        assert_eq!(
            c.pixels().iter().filter(|&&b| b != 0xFF).count(),
            3,
            "only one pixel should have been painted"
        );
    }

    #[test]
    fn strips_know_their_own_pixels() {
        let mut c = canvas(3, 5);
        let strips = c.strips_mut(2);
        assert!(strips[0].contains(Pixel(0, 0)));
        assert!(strips[0].contains(Pixel(2, 1)));
        assert!(!strips[0].contains(Pixel(0, 2)));
        assert!(!strips[0].contains(Pixel(3, 0)));
        assert!(!strips[0].contains(Pixel(-1, 0)));
        assert!(strips[2].contains(Pixel(1, 4)));
        assert!(!strips[2].contains(Pixel(1, 5)));
    }

    #[test]
    fn zero_rows_per_strip_means_one() {
        let mut c = canvas(2, 2);
        assert_eq!(c.strips_mut(0).len(), 2);
    }
}
