// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The function being visualized.  Anything that maps a complex
//! number to a complex number and can be shared between threads will
//! do: closures and plain `fn`s get [`ComplexFn`] for free, and a small
//! fixed catalog of [`Builtin`]s can be picked by name from the command
//! line.

use num::Complex;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A pure unary complex function.
pub trait ComplexFn: Sync {
    /// Evaluates the function at `z`.
    fn evaluate(&self, z: Complex<f64>) -> Complex<f64>;
}

impl<F> ComplexFn for F
where
    F: Fn(Complex<f64>) -> Complex<f64> + Sync,
{
    fn evaluate(&self, z: Complex<f64>) -> Complex<f64> {
        self(z)
    }
}

/// The functions the command line knows about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    /// `f(z) = z`
    Identity,
    /// `f(z) = z*z`
    Square,
    /// `f(z) = z*z*z`
    Cube,
    /// `f(z) = 1/z`, a pole at the origin.
    Reciprocal,
    /// `f(z) = sin(z)`
    Sine,
}

const BUILTINS: [Builtin; 5] = [
    Builtin::Identity,
    Builtin::Square,
    Builtin::Cube,
    Builtin::Reciprocal,
    Builtin::Sine,
];

impl Builtin {
    /// Every builtin, in catalog order.
    pub fn all() -> &'static [Builtin] {
        &BUILTINS
    }

    /// The name used to select this function on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Identity => "z",
            Builtin::Square => "z^2",
            Builtin::Cube => "z^3",
            Builtin::Reciprocal => "1/z",
            Builtin::Sine => "sin(z)",
        }
    }

    /// A caption for the rendered image.
    pub fn label(self) -> String {
        let body = match self {
            Builtin::Identity => "z",
            Builtin::Square => "z*z",
            Builtin::Cube => "z*z*z",
            Builtin::Reciprocal => "1/z",
            Builtin::Sine => "sin(z)",
        };
        format!("f(z) := {}", body)
    }
}

impl ComplexFn for Builtin {
    fn evaluate(&self, z: Complex<f64>) -> Complex<f64> {
        match *self {
            Builtin::Identity => z,
            Builtin::Square => z * z,
            Builtin::Cube => z * z * z,
            Builtin::Reciprocal => Complex::new(1.0, 0.0) / z,
            Builtin::Sine => z.sin(),
        }
    }
}

impl FromStr for Builtin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // "z2" and "z*z" are common enough spellings to accept.
        let alias = match s {
            "z2" | "z*z" => "z^2",
            "z3" | "z*z*z" => "z^3",
            "sin" => "sin(z)",
            other => other,
        };
        BUILTINS
            .iter()
            .cloned()
            .find(|b| b.name() == alias)
            .ok_or_else(|| Error::UnknownFunction(s.to_string()))
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
