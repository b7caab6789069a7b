// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type shared by the renderer, the encoders, and
//! the command line.  Numeric trouble inside the colorizer (poles,
//! overflow, `atan2(0, 0)`) never shows up here; it is absorbed where
//! it happens so that every pixel still gets a color.

use failure::Fail;
use std::io;

/// Everything that can go wrong between reading the configuration
/// and writing the last byte of an encoded image.
#[derive(Debug, Fail)]
pub enum Error {
    /// The requested image has no area.
    #[fail(display = "image size must be positive, got {}x{}", width, height)]
    InvalidSize {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The requested image has more pixels than fit in memory.
    #[fail(display = "image size {}x{} is too large", width, height)]
    ImageTooLarge {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The visible range of the complex plane is empty, negative, or
    /// not a number.
    #[fail(display = "visible range must be positive and finite, got {},{}", x, y)]
    InvalidExtent {
        /// Extent along the real axis.
        x: f64,
        /// Extent along the imaginary axis.
        y: f64,
    },

    /// A canvas was handed to a renderer built for a different size.
    #[fail(
        display = "canvas is {}x{} but the renderer expects {}x{}",
        width, height, expected_width, expected_height
    )]
    SizeMismatch {
        /// Width of the canvas supplied.
        width: usize,
        /// Height of the canvas supplied.
        height: usize,
        /// Width the renderer was built for.
        expected_width: usize,
        /// Height the renderer was built for.
        expected_height: usize,
    },

    /// A pixel buffer whose length disagrees with its stated shape.
    #[fail(display = "pixel buffer holds {} bytes, expected {}", actual, expected)]
    BufferLength {
        /// Bytes actually supplied.
        actual: usize,
        /// Bytes implied by width, height and channel count.
        expected: usize,
    },

    /// Only interleaved RGB buffers are supported.
    #[fail(display = "unsupported channel count {}, expected 3", _0)]
    Channels(usize),

    /// A command line value that does not have the expected shape.
    #[fail(display = "could not parse {} from '{}'", what, input)]
    Parse {
        /// What we were trying to read, e.g. "image size".
        what: &'static str,
        /// The text we were given.
        input: String,
    },

    /// A function name that is not in the builtin catalog.
    #[fail(display = "unknown function '{}'", _0)]
    UnknownFunction(String),

    /// An output format name we have no encoder for.
    #[fail(display = "unknown output format '{}'", _0)]
    UnknownFormat(String),

    /// More than one function was asked to go into a single file.
    #[fail(display = "only one function can be written to an output file, got {}", _0)]
    TooManyFunctions(usize),

    /// A render worker died before finishing its strip.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// Writing the encoded image failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = Error::InvalidSize {
            width: 0,
            height: 400,
        };
        assert_eq!(err.to_string(), "image size must be positive, got 0x400");

        let err = Error::ImageTooLarge {
            width: 70000,
            height: 90000,
        };
        assert_eq!(err.to_string(), "image size 70000x90000 is too large");

        let err = Error::UnknownFunction("tan(z)".to_string());
        assert_eq!(err.to_string(), "unknown function 'tan(z)'");
    }

    #[test]
    fn io_errors_keep_their_cause() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(err.cause().is_some());
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
