// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of command line values into a validated [`Config`].  The
//! `validate_*` functions have the shape clap wants for its
//! validators, so bad input is caught before a canvas is allocated.

use num::Complex;
use std::path::PathBuf;
use std::str::FromStr;

use crate::canvas::ImageSize;
use crate::encode::Format;
use crate::error::{Error, Result};
use crate::functions::Builtin;

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (
            T::from_str(s[..index].trim()),
            T::from_str(s[index + separator.len_utf8()..].trim()),
        ) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Parses `WIDTHxHEIGHT` into a non-empty image size.
pub fn parse_size(s: &str) -> Result<ImageSize> {
    match parse_pair::<usize>(s, 'x') {
        Some((width, height)) => ImageSize::new(width, height),
        None => Err(Error::Parse {
            what: "image size",
            input: s.to_string(),
        }),
    }
}

/// Parses `X,Y` into the extent of the visible window.  Signs and
/// infinities are not checked here.
pub fn parse_extent(s: &str) -> Result<Complex<f64>> {
    match parse_pair::<f64>(s, ',') {
        Some((re, im)) => Ok(Complex { re, im }),
        None => Err(Error::Parse {
            what: "visible range",
            input: s.to_string(),
        }),
    }
}

/// A clap validator for image sizes.
pub fn validate_size(s: String) -> std::result::Result<(), String> {
    parse_size(&s).map(|_| ()).map_err(|e| e.to_string())
}

/// A clap validator for visible ranges.
pub fn validate_extent(s: String) -> std::result::Result<(), String> {
    parse_extent(&s)
        .and_then(usable_extent)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn usable_extent(extent: Complex<f64>) -> Result<Complex<f64>> {
    if extent.re > 0.0 && extent.im > 0.0 && extent.re.is_finite() && extent.im.is_finite() {
        Ok(extent)
    } else {
        Err(Error::InvalidExtent {
            x: extent.re,
            y: extent.im,
        })
    }
}

/// A clap validator for anything with a `FromStr` that reports our
/// own error type.
pub fn validate_name<T>(s: String) -> std::result::Result<(), String>
where
    T: FromStr<Err = Error>,
{
    T::from_str(&s).map(|_| ()).map_err(|e| e.to_string())
}

/// Checks that `s` is a number between `low` and `high`, inclusive.
pub fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

/// Everything one run of the program needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Size of each rendered image.
    pub size: ImageSize,
    /// Extent of the visible window.
    pub extent: Complex<f64>,
    /// Functions to render, in order.
    pub functions: Vec<Builtin>,
    /// Render worker count.
    pub threads: usize,
    /// Output encoding.
    pub format: Format,
    /// Output file; standard output when absent.
    pub output: Option<PathBuf>,
}

impl Config {
    /// Builds a configuration from raw command line values.  The
    /// format, when not given, is guessed from the output file's
    /// extension and otherwise defaults to sixel.
    pub fn from_args<'s, I>(
        size: &str,
        range: &str,
        functions: I,
        threads: usize,
        format: Option<&str>,
        output: Option<&str>,
    ) -> Result<Config>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let output = output.map(PathBuf::from);
        let format = match format {
            Some(name) => name.parse()?,
            None => output
                .as_ref()
                .and_then(|p| Format::from_path(p))
                .unwrap_or(Format::Sixel),
        };
        let mut functions = functions
            .into_iter()
            .map(Builtin::from_str)
            .collect::<Result<Vec<_>>>()?;
        if functions.is_empty() {
            functions.push(Builtin::Identity);
        }
        // Only a terminal stream can carry several images with captions.
        if functions.len() > 1 && (output.is_some() || !format.is_terminal()) {
            return Err(Error::TooManyFunctions(functions.len()));
        }
        Ok(Config {
            size: parse_size(size)?,
            extent: usable_extent(parse_extent(range)?)?,
            functions,
            threads: threads.max(1),
            format,
            output,
        })
    }
}
