// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An owned RGB image buffer, and the one place the crate talks to
//! the `image` encoders.

use crate::error::{invalid, Result};
use crate::palette::Color;
use image::png::PNGEncoder;
use image::ColorType;
use std::convert::TryFrom;
use std::io::Write;

const CHANNELS: usize = 3;

/// width × height RGB8 triples, row-major from the top-left.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Framebuffer {
    /// An all-black buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            data: vec![0u8; width * height * CHANNELS],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The color at x, y, or None outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * CHANNELS;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    /// The raw bytes, three per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Bytes in one row of the image.
    pub(crate) fn stride(&self) -> usize {
        self.width * CHANNELS
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Encode as an 8-bit RGB PNG.
    pub fn write_png<W: Write>(&self, output: W) -> Result<()> {
        let (width, height) = match (u32::try_from(self.width), u32::try_from(self.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return invalid("image too large to encode as PNG"),
        };
        let encoder = PNGEncoder::new(output);
        encoder.encode(&self.data, width, height, ColorType::RGB(8))?;
        Ok(())
    }

    /// The PNG encoding, in memory.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        self.write_png(&mut png)?;
        Ok(png)
    }
}

/// Write one color into a three-byte slot.
#[inline]
pub(crate) fn put(slot: &mut [u8], color: Color) {
    slot.copy_from_slice(&color);
}
