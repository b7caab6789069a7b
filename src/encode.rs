// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning a finished canvas into bytes.  The renderer only knows the
//! [`Encoder`] trait; the encoders here write DEC sixel graphics for
//! terminals, or binary PPM and PNG through the `image` crate.

use image::png::PNGEncoder;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use itertools::Itertools;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::canvas::CHANNELS;
use crate::error::{Error, Result};

/// Something that can serialize a row-major, interleaved pixel buffer.
pub trait Encoder {
    /// Encodes `pixels`, which must hold `width * height * channels`
    /// bytes.
    fn encode(&mut self, pixels: &[u8], width: usize, height: usize, channels: usize) -> Result<()>;
}

fn check_shape(pixels: &[u8], width: usize, height: usize, channels: usize) -> Result<()> {
    if channels != CHANNELS {
        return Err(Error::Channels(channels));
    }
    let expected = width * height * channels;
    if pixels.len() != expected {
        return Err(Error::BufferLength {
            actual: pixels.len(),
            expected,
        });
    }
    Ok(())
}

/// Output formats the command line can ask for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// DEC sixel graphics, for terminals that speak it.
    Sixel,
    /// Portable Network Graphics.
    Png,
    /// Binary portable pixmap (P6).
    Pnm,
}

impl Format {
    /// The name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Format::Sixel => "sixel",
            Format::Png => "png",
            Format::Pnm => "pnm",
        }
    }

    /// Guesses a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Format::Png),
            "pnm" | "ppm" => Some(Format::Pnm),
            "six" | "sixel" => Some(Format::Sixel),
            _ => None,
        }
    }

    /// Whether the output is meant for a terminal rather than a file.
    pub fn is_terminal(self) -> bool {
        self == Format::Sixel
    }

    /// An encoder for this format writing to `out`.
    pub fn encoder<'a, W: Write + 'a>(self, out: W) -> Box<dyn Encoder + 'a> {
        match self {
            Format::Sixel => Box::new(SixelEncoder::new(out)),
            Format::Png => Box::new(PngEncoder::new(out)),
            Format::Pnm => Box::new(PnmEncoder::new(out)),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sixel" | "six" => Ok(Format::Sixel),
            "png" => Ok(Format::Png),
            "pnm" | "ppm" => Ok(Format::Pnm),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary PPM through the `image` crate.
pub struct PnmEncoder<W: Write> {
    out: W,
}

impl<W: Write> PnmEncoder<W> {
    /// Writes to `out`.
    pub fn new(out: W) -> Self {
        PnmEncoder { out }
    }
}

impl<W: Write> Encoder for PnmEncoder<W> {
    fn encode(&mut self, pixels: &[u8], width: usize, height: usize, channels: usize) -> Result<()> {
        check_shape(pixels, width, height, channels)?;
        let mut encoder = PNMEncoder::new(&mut self.out)
            .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
        encoder.encode(pixels, width as u32, height as u32, ColorType::RGB(8))?;
        self.out.flush()?;
        Ok(())
    }
}

/// PNG through the `image` crate.
pub struct PngEncoder<W: Write> {
    out: W,
}

impl<W: Write> PngEncoder<W> {
    /// Writes to `out`.
    pub fn new(out: W) -> Self {
        PngEncoder { out }
    }
}

impl<W: Write> Encoder for PngEncoder<W> {
    fn encode(&mut self, pixels: &[u8], width: usize, height: usize, channels: usize) -> Result<()> {
        check_shape(pixels, width, height, channels)?;
        PNGEncoder::new(&mut self.out).encode(
            pixels,
            width as u32,
            height as u32,
            ColorType::RGB(8),
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// Levels per channel in the sixel color cube.
const LEVELS: usize = 6;
const PALETTE: usize = LEVELS * LEVELS * LEVELS;

/// Nearest level, 0..=5, of an 8-bit channel.
#[inline]
fn level(c: u8) -> usize {
    (c as usize * (LEVELS - 1) + 127) / 255
}

fn cube_index(rgb: &[u8]) -> usize {
    level(rgb[0]) * LEVELS * LEVELS + level(rgb[1]) * LEVELS + level(rgb[2])
}

/// DEC sixel graphics with a fixed 6x6x6 color cube.  Every color is
/// snapped to its nearest cube entry; there is no dithering.
pub struct SixelEncoder<W: Write> {
    out: W,
}

impl<W: Write> SixelEncoder<W> {
    /// Writes to `out`.
    pub fn new(out: W) -> Self {
        SixelEncoder { out }
    }

    fn palette(&mut self) -> Result<()> {
        let percent = |l: usize| l * 100 / (LEVELS - 1);
        for i in 0..PALETTE {
            let (r, g, b) = (i / (LEVELS * LEVELS), (i / LEVELS) % LEVELS, i % LEVELS);
            write!(self.out, "#{};2;{};{};{}", i, percent(r), percent(g), percent(b))?;
        }
        Ok(())
    }

    // Runs of four or more identical sixels use the repeat introducer.
    fn runs(&mut self, line: &[u8]) -> Result<()> {
        let groups = line.iter().group_by(|&&c| c);
        for (sixel, run) in &groups {
            let count = run.count();
            if count > 3 {
                write!(self.out, "!{}", count)?;
                self.out.write_all(&[sixel])?;
            } else {
                for _ in 0..count {
                    self.out.write_all(&[sixel])?;
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> Encoder for SixelEncoder<W> {
    fn encode(&mut self, pixels: &[u8], width: usize, height: usize, channels: usize) -> Result<()> {
        check_shape(pixels, width, height, channels)?;
        let colors: Vec<usize> = pixels.chunks(channels).map(cube_index).collect();

        write!(self.out, "\x1bPq\"1;1;{};{}", width, height)?;
        self.palette()?;

        let mut line = Vec::with_capacity(width);
        for top in (0..height).step_by(6) {
            let band = top..(top + 6).min(height);
            let mut used = [false; PALETTE];
            for &c in &colors[band.start * width..band.end * width] {
                used[c] = true;
            }

            for (n, color) in (0..PALETTE).filter(|&c| used[c]).enumerate() {
                if n > 0 {
                    self.out.write_all(b"$")?;
                }
                line.clear();
                for x in 0..width {
                    let bits = band
                        .clone()
                        .enumerate()
                        .filter(|&(_, y)| colors[y * width + x] == color)
                        .fold(0u8, |bits, (bit, _)| bits | (1 << bit));
                    line.push(b'?' + bits);
                }
                write!(self.out, "#{}", color)?;
                self.runs(&line)?;
            }
            self.out.write_all(b"-")?;
        }

        self.out.write_all(b"\x1b\\")?;
        self.out.flush()?;
        Ok(())
    }
}
