#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which the orbit of z ← z² + c, started at zero, never runs off to
//! infinity.  Points outside the set escape at some speed, and that
//! speed is what gets drawn: every pixel of the image is mapped to a
//! point, the point is iterated until it escapes or the budget runs
//! out, and the escape step (optionally smoothed with a log-log
//! correction so the bands blend) selects a color from a sixteen-entry
//! gradient.  Points that never escape are painted black.
//!
//! The pipeline, leaf first:
//!
//! * `Viewport` maps pixels to points given a center and a span.
//! * `MandelbrotSet` runs the escape-time test for one point.
//! * `Palette` turns an escape layer into a color.
//! * `Renderer` drives the three over a `Framebuffer`, on one thread
//!   or on several.
//!
//! `RenderRequest` is the caller-facing description of a view, in the
//! form the web front end posts it.

pub mod error;
pub mod escape;
pub mod framebuffer;
pub mod palette;
pub mod render;
pub mod request;
pub mod viewport;

pub use crate::error::{RenderError, Result};
pub use crate::escape::MandelbrotSet;
pub use crate::framebuffer::Framebuffer;
pub use crate::palette::{Color, Palette, DEFAULT_PALETTE};
pub use crate::render::Renderer;
pub use crate::request::{
    encode_base64, plane_width, render_base64, RenderOptions, RenderRequest,
};
pub use crate::viewport::{Pixel, Viewport};
