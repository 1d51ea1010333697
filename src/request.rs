// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The request side of the renderer: what a caller asks for (where to
//! look, how far in, how hard to try) and how that becomes a
//! configured `Renderer`.  The JSON shape is the one the browser form
//! posts, which sends every field as a string.

use crate::error::{RenderError, Result};
use crate::escape::{MandelbrotSet, DEFAULT_ESCAPE_RADIUS, SMOOTH_ESCAPE_RADIUS};
use crate::palette::DEFAULT_PALETTE;
use crate::render::Renderer;
use crate::viewport::Viewport;
use base64::{engine::general_purpose::STANDARD, Engine};
use num::Complex;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

/// Span of the real axis at zoom level zero.
pub const FULL_VIEW_WIDTH: f64 = 3.0;

/// Each zoom step keeps this fraction of the previous span.
pub const ZOOM_FACTOR: f64 = 1.0 - 1.0 / 8.0;

/// Side of the image the web front end asks for.
pub const DEFAULT_SIZE: usize = 1024;

/// The plane width shown at a given zoom level.
pub fn plane_width(zoom: u32) -> f64 {
    FULL_VIEW_WIDTH * ZOOM_FACTOR.powf(f64::from(zoom))
}

/// A view of the set, as a caller describes it.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct RenderRequest {
    /// Real part of the center.
    #[serde(deserialize_with = "number_or_string")]
    pub real: f64,
    /// Imaginary part of the center.
    #[serde(deserialize_with = "number_or_string")]
    pub imaginary: f64,
    /// Zoom level; zero shows the whole set.
    #[serde(deserialize_with = "number_or_string")]
    pub zoom: u32,
    /// Iteration budget, also used as the banding multiplier.
    #[serde(deserialize_with = "number_or_string")]
    pub iterations: usize,
}

/// How to produce the image, as opposed to what to look at.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Use continuous coloring.
    pub smooth: bool,
    /// Worker threads; one means render on the calling thread.
    pub threads: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            smooth: true,
            threads: 1,
        }
    }
}

impl RenderRequest {
    /// Parse the body the web form posts.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// The point at the center of the view.
    pub fn center(&self) -> Complex<f64> {
        Complex::new(self.real, self.imaginary)
    }

    /// Build the engine, viewport and renderer this request describes.
    /// The escape radius follows the coloring mode.
    pub fn renderer(&self, options: &RenderOptions) -> Result<Renderer> {
        let radius = if options.smooth {
            SMOOTH_ESCAPE_RADIUS
        } else {
            DEFAULT_ESCAPE_RADIUS
        };
        let set = MandelbrotSet::new(self.iterations, radius)?;
        let viewport = Viewport::new(
            options.width,
            options.height,
            self.center(),
            plane_width(self.zoom),
        )?;
        Renderer::new(set, viewport, DEFAULT_PALETTE, options.smooth, self.iterations)
    }

    /// Render the request, as PNG bytes.
    pub fn render_png(&self, options: &RenderOptions) -> Result<Vec<u8>> {
        let renderer = self.renderer(options)?;
        let fb = if options.threads == 1 {
            renderer.render()
        } else {
            renderer.render_threaded(options.threads)?
        };
        fb.to_png()
    }
}

/// Standard base64 with no line breaks, ready to drop into a
/// `data:image/png;base64,` URL.
pub fn encode_base64(png: &[u8]) -> String {
    STANDARD.encode(png)
}

/// Render a request and return the PNG as base64.
pub fn render_base64(request: &RenderRequest, options: &RenderOptions) -> Result<String> {
    Ok(encode_base64(&request.render_png(options)?))
}

/// Accepts either a JSON number or a string holding one.
fn number_or_string<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field<T> {
        Text(String),
        Value(T),
    }

    match Field::<T>::deserialize(deserializer)? {
        Field::Value(v) => Ok(v),
        Field::Text(s) => T::from_str(s.trim()).map_err(de::Error::custom),
    }
}

impl FromStr for RenderRequest {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        RenderRequest::from_json(s)
    }
}
