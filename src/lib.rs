#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Domain coloring renderer
//!
//! Domain coloring is a way of looking at a function of a complex
//! variable.  A complex function takes a point on a plane and returns
//! a point on another plane, which is one dimension too many to plot
//! as a graph.  Instead, every pixel of an image is treated as a
//! point `z` of the input plane and painted with a color: its hue
//! comes from the phase of `z`, and its saturation and value come from
//! `f(z)`.  The saturation repeats as `|f(z)|` climbs, drawing
//! contour rings around zeros and poles, and the value darkens
//! wherever the real or imaginary part of `f(z)` is an integer,
//! drawing the image of the integer grid.
//!
//! The pipeline, leaves first: [`color`] converts HSV to RGB,
//! [`canvas`] holds the pixels, [`colorizer`] picks the HSV color of a
//! point, and [`render`] walks the canvas, optionally on several
//! threads.  [`encode`] turns the finished canvas into sixel, PPM, or
//! PNG bytes.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod canvas;
pub mod color;
pub mod colorizer;
pub mod config;
pub mod encode;
pub mod error;
pub mod functions;
pub mod planes;
pub mod render;

pub use canvas::{Canvas, ImageSize, Pixel};
pub use color::{hsv_to_rgb, Hsv, Rgb};
pub use colorizer::colorize;
pub use encode::{Encoder, Format};
pub use error::{Error, Result};
pub use functions::{Builtin, ComplexFn};
pub use planes::PlaneMapper;
pub use render::{plot, DomainRenderer};
