// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type returned by every fallible operation in the
//! crate.  Configuration problems are caught at construction time, so
//! a renderer that exists is a renderer that will finish.

use failure::Fail;
use std::io;

/// Everything that can go wrong between receiving a view and handing
/// back an encoded image.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// A parameter that would make the render meaningless: zero
    /// iterations, a non-positive escape radius or plane width, an
    /// empty image, or no worker threads.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// Smooth coloring takes ln(ln|z|) at the escape step, which is
    /// undefined unless the escape radius is above 1.
    #[fail(
        display = "smooth coloring needs an escape radius above 1, got {}",
        escape_radius
    )]
    NumericDegenerate {
        /// The offending radius.
        escape_radius: f64,
    },

    /// One of the band workers panicked; no image is produced.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The request body could not be understood.
    #[fail(display = "invalid request: {}", _0)]
    InvalidRequest(String),

    /// Encoding or writing the image failed.
    #[fail(display = "i/o failure: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::InvalidRequest(err.to_string())
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;

pub(crate) fn invalid<T, S: Into<String>>(reason: S) -> Result<T> {
    Err(RenderError::InvalidConfiguration(reason.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = RenderError::InvalidConfiguration("width must be positive".to_string());
        assert_eq!(
            e.to_string(),
            "invalid configuration: width must be positive"
        );
        let e = RenderError::NumericDegenerate { escape_radius: 0.5 };
        assert!(e.to_string().contains("0.5"));
    }

    #[test]
    fn io_errors_keep_their_cause() {
        let e: RenderError = io::Error::new(io::ErrorKind::Other, "disk full").into();
        assert!(e.cause().is_some());
    }
}
