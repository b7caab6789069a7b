// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The domain coloring itself.  For a point `(x, y)` of the visible
//! plane and a function `f`:
//!
//! - the hue is the phase of the point itself,
//!   `(pi + atan2(-y, -x)) / 2pi`, scaled to degrees;
//! - the saturation is a sawtooth over `|f(z)|`, which draws
//!   concentric contour bands around zeros and poles;
//! - the value is a grid over the real and imaginary parts of
//!   `f(z)`, dark wherever either one is an integer.
//!
//! See <https://www.algorithm-archive.org/contents/domain_coloring/domain_coloring.html>
//! for the technique.
//!
//! None of this is allowed to fail.  Non-finite intermediate results
//! (a pole, an overflow) are replaced by `1.0` before they reach the
//! color model.

use num::Complex;
use std::f64::consts::PI;

use crate::color::{Hsv, Rgb};
use crate::functions::ComplexFn;

/// Exponent applied to the gridline sines.  Smaller values give
/// thinner lines.
pub const THRESHOLD: f64 = 0.1;

/// Distance of `(x, y)` from the origin.
#[inline]
pub fn radius(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

/// Angle of `(x, y)`, `atan2(y, x)`.  At the origin this is 0 (or pi
/// for a negative-zero `x`), never NaN.
#[inline]
pub fn theta(x: f64, y: f64) -> f64 {
    y.atan2(x)
}

/// Rebuilds the point from its polar form, `r * e^(i*theta)`.  This is
/// `x + iy` up to rounding, and the rounding is kept on purpose: the
/// gridlines sit exactly on integers and can tell the difference.
pub fn z(x: f64, y: f64) -> Complex<f64> {
    let r = radius(x, y);
    let t = theta(x, y);
    Complex::new(r * t.cos(), r * t.sin())
}

/// The phase of `(x, y)` as a fraction of a full turn, in `[0, 1]`.
#[inline]
pub fn angle(x: f64, y: f64) -> f64 {
    (PI + (-y).atan2(-x)) / (2.0 * PI)
}

fn finite_or_one(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        1.0
    }
}

/// `0.5 + 0.5 * frac(|w|)`: a sawtooth in `[0.5, 1)` over magnitude.
pub fn magnitude_shading(w: Complex<f64>) -> f64 {
    let m = w.norm();
    finite_or_one(0.5 + 0.5 * (m - m.floor()))
}

/// `|sin(pi * re)|^t * |sin(pi * im)|^t`, zero on the integer grid of
/// `w`, one halfway between grid lines.
pub fn gridlines(w: Complex<f64>) -> f64 {
    let value = (w.re * PI).sin().abs().powf(THRESHOLD) * (w.im * PI).sin().abs().powf(THRESHOLD);
    finite_or_one(value)
}

/// The HSV color of the point `(x, y)` under `f`, before conversion.
pub fn domain_hsv<F>(x: f64, y: f64, f: &F) -> Hsv
where
    F: ComplexFn + ?Sized,
{
    let w = f.evaluate(z(x, y));
    Hsv::new(angle(x, y) * 360.0, magnitude_shading(w), gridlines(w))
}

/// The final color of the point `(x, y)` under `f`.
pub fn colorize<F>(x: f64, y: f64, f: &F) -> Rgb
where
    F: ComplexFn + ?Sized,
{
    domain_hsv(x, y, f).to_rgb()
}
