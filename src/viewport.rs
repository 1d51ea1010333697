// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper left, and a rectangle on the complex plane described by
//! its center and the span of its real axis.  The imaginary span is
//! derived from the image's aspect ratio, so pixels are always square.
use crate::error::{invalid, Result};
use itertools::iproduct;
use num::Complex;
use std::ops::Range;

/// Describes the x, y of a pixel in the image.  x grows to the right,
/// y grows downward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels to points.  The upper-left corner of the image is the
/// point with the smallest real part and the largest imaginary part;
/// image y runs opposite to the imaginary axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    width: usize,
    height: usize,
    center: Complex<f64>,
    plane_width: f64,
    plane_height: f64,
}

impl Viewport {
    /// Takes the size of the image, the point at its center, and the
    /// length of the real axis the image spans.
    pub fn new(
        width: usize,
        height: usize,
        center: Complex<f64>,
        plane_width: f64,
    ) -> Result<Viewport> {
        if width == 0 || height == 0 {
            return invalid(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            ));
        }
        if width > u32::max_value() as usize || height > u32::max_value() as usize {
            return invalid(format!(
                "image sides must fit in 32 bits, got {}x{}",
                width, height
            ));
        }
        if width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(3))
            .is_none()
        {
            return invalid(format!("image of {}x{} is too large", width, height));
        }
        if !(plane_width > 0.0) || !plane_width.is_finite() {
            return invalid(format!(
                "plane width must be a positive number, got {}",
                plane_width
            ));
        }
        if !center.re.is_finite() || !center.im.is_finite() {
            return invalid("center must be a finite point");
        }

        Ok(Viewport {
            width,
            height,
            center,
            plane_width,
            plane_height: plane_width * (height as f64) / (width as f64),
        })
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The point at the center of the image.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// Span of the real axis.
    pub fn plane_width(&self) -> f64 {
        self.plane_width
    }

    /// Span of the imaginary axis.
    pub fn plane_height(&self) -> f64 {
        self.plane_height
    }

    /// The total number of pixels.  Used to size the framebuffer.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// A viewport can't be constructed empty, but the pair is
    /// expected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel on the integral plane, return the point on the
    /// complex plane it stands for.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.center.re - self.plane_width / 2.0
                + (pixel.0 as f64 / self.width as f64) * self.plane_width,
            self.center.im + self.plane_height / 2.0
                - (pixel.1 as f64 / self.height as f64) * self.plane_height,
        )
    }

    /// Every pixel of the image, row by row from the top, paired with
    /// its point.  Each call starts over.
    pub fn pixels(&self) -> Pixels<'_> {
        self.rows(0..self.height)
    }

    /// As `pixels`, restricted to a band of rows.  Rows past the
    /// bottom of the image are dropped.
    pub fn rows(&self, rows: Range<usize>) -> Pixels<'_> {
        let rows = rows.start.min(self.height)..rows.end.min(self.height);
        Pixels {
            viewport: self,
            inner: iproduct!(rows, 0..self.width),
        }
    }
}

/// Lazy, row-major walk over a viewport.
#[derive(Clone)]
pub struct Pixels<'a> {
    viewport: &'a Viewport,
    inner: itertools::Product<Range<usize>, Range<usize>>,
}

impl<'a> Iterator for Pixels<'a> {
    type Item = (Pixel, Complex<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(y, x)| {
            let pixel = Pixel(x, y);
            (pixel, self.viewport.pixel_to_point(&pixel))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
