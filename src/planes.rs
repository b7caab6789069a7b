// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window on the complex plane centered on the origin.
//!
//! The window is described by its extent: an extent of `4,4` shows
//! the square from `-2-2i` up to (but not including) `2+2i`.  The
//! extent is used as given, it is never doubled.  Row zero of the
//! image is the most negative imaginary value; there is no vertical
//! flip.
use num::Complex;

use crate::canvas::{ImageSize, Pixel};
use crate::error::{Error, Result};

/// Maps pixels on an image of a given size to points in a centered
/// window of the complex plane, and back.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The pixel dimensions of the image.
    pub size: ImageSize,
    /// The width (real part) and height (imaginary part) of the
    /// visible window.
    pub extent: Complex<f64>,
}

impl PlaneMapper {
    /// Constructor.  Both components of the extent must be positive
    /// and finite.
    pub fn new(size: ImageSize, extent: Complex<f64>) -> Result<PlaneMapper> {
        if !(extent.re.is_finite() && extent.im.is_finite() && extent.re > 0.0 && extent.im > 0.0)
        {
            return Err(Error::InvalidExtent {
                x: extent.re,
                y: extent.im,
            });
        }
        Ok(PlaneMapper { size, extent })
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// complex plane: `(column / width - 0.5) * extent` and likewise
    /// for rows.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let w = self.size.width() as f64;
        let h = self.size.height() as f64;
        Complex::new(
            ((pixel.0 as f64 / w) - 0.5) * self.extent.re,
            ((pixel.1 as f64 / h) - 0.5) * self.extent.im,
        )
    }

    /// Given a complex number, find the pixel whose cell contains it,
    /// or None if it is outside the visible window.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let w = self.size.width() as f64;
        let h = self.size.height() as f64;
        let left = ((point.re / self.extent.re) + 0.5) * w;
        let top = ((point.im / self.extent.im) + 0.5) * h;
        if !(left >= 0.0 && left < w && top >= 0.0 && top < h) {
            return None;
        }
        Some(Pixel(left.floor() as isize, top.floor() as isize))
    }
}
