// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Hue/saturation/value to red/green/blue conversion.  Hue is carried
//! in degrees, saturation and value as fractions of one.  Inputs are
//! clamped, not rejected: `sin()` and `powf()` like to overshoot by an
//! ulp or two, and a color is always better than a panic.

use num::clamp;

/// An 8-bit-per-channel color, in the order it lands in the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb {
    /// Builds a color from its three channels.
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }
}

/// A color in hue/saturation/value space.  `hue` is in degrees,
/// `[0, 360]`; `saturation` and `value` are in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsv {
    /// Hue, in degrees.
    pub hue: f64,
    /// Saturation, zero is gray.
    pub saturation: f64,
    /// Value, zero is black.
    pub value: f64,
}

impl Hsv {
    /// Builds an HSV triple, clamping each component into its range.
    /// A NaN component becomes the bottom of its range.
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Hsv {
            hue: bounded(hue, 360.0),
            saturation: bounded(saturation, 1.0),
            value: bounded(value, 1.0),
        }
    }

    /// Converts to 8-bit RGB.
    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self)
    }
}

impl From<Hsv> for Rgb {
    fn from(hsv: Hsv) -> Self {
        hsv_to_rgb(hsv)
    }
}

fn bounded(v: f64, high: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        clamp(v, 0.0, high)
    }
}

/// Six-sector HSV to RGB conversion.  A hue of exactly 360 is the same
/// as a hue of 0, and a saturation of zero produces a gray.  Each
/// channel is scaled by 255 and truncated.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv {
        hue,
        saturation,
        value,
    } = Hsv::new(hsv.hue, hsv.saturation, hsv.value);

    let (r, g, b) = if saturation == 0.0 {
        (value, value, value)
    } else {
        let sector = if hue == 360.0 { 0.0 } else { hue / 60.0 };
        let i = sector.trunc();
        let f = sector - i;
        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * f);
        let t = value * (1.0 - saturation * (1.0 - f));

        match i as u8 {
            0 => (value, t, p),
            1 => (q, value, p),
            2 => (p, value, t),
            3 => (p, q, value),
            4 => (t, p, value),
            _ => (value, p, q),
        }
    };

    Rgb::new(channel(r), channel(g), channel(b))
}

#[inline]
fn channel(c: f64) -> u8 {
    (c * 255.0) as u8
}
