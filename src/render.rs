// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Walks a viewport, asks the escape-time engine about every point,
//! and paints the answer through the palette.  Pixels don't depend on
//! one another, so the threaded version just hands each worker its
//! own band of rows.

use crate::error::{invalid, RenderError, Result};
use crate::escape::MandelbrotSet;
use crate::framebuffer::{put, Framebuffer};
use crate::palette::{Color, Palette, BLACK};
use crate::viewport::Viewport;
use log::{debug, info};
use std::time::Instant;

/// Everything a render needs.  Once built, this object is not
/// mutable, and any number of renders can be taken from it.
#[derive(Clone, Debug)]
pub struct Renderer {
    set: MandelbrotSet,
    viewport: Viewport,
    palette: Palette,
    smooth: bool,
    iterations: usize,
}

impl Renderer {
    /// `iterations` scales stability into palette layers; the usual
    /// choice is the engine's own iteration budget.  Smooth rendering
    /// is refused outright if the engine's radius would put the
    /// log-log correction out of its domain.
    pub fn new(
        set: MandelbrotSet,
        viewport: Viewport,
        palette: Palette,
        smooth: bool,
        iterations: usize,
    ) -> Result<Self> {
        if iterations == 0 {
            return invalid("color banding multiplier must be greater than zero");
        }
        if smooth && set.escape_radius() <= 1.0 {
            return Err(RenderError::NumericDegenerate {
                escape_radius: set.escape_radius(),
            });
        }
        Ok(Renderer {
            set,
            viewport,
            palette,
            smooth,
            iterations,
        })
    }

    /// The engine.
    pub fn set(&self) -> &MandelbrotSet {
        &self.set
    }

    /// The viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The color for a single stability value.  Members of the set
    /// are black; everything else is banded by layer.
    pub fn paint(&self, stability: f64) -> Color {
        if stability == 1.0 {
            BLACK
        } else {
            let layer = (stability * self.iterations as f64).floor() as usize;
            self.palette.color(layer)
        }
    }

    /// Fill a slice of framebuffer bytes that starts at `first_row`.
    fn render_band(&self, band: &mut [u8], first_row: usize) {
        let stride = self.viewport.width() * 3;
        let rows = first_row..first_row + band.len() / stride;
        for ((_, point), slot) in self.viewport.rows(rows).zip(band.chunks_mut(3)) {
            let stability = self.set.stability(point, self.smooth, true);
            put(slot, self.paint(stability));
        }
    }

    /// The main function for single-threaded renders.
    pub fn render(&self) -> Framebuffer {
        let started = Instant::now();
        let mut fb = Framebuffer::new(self.viewport.width(), self.viewport.height());
        self.render_band(fb.bytes_mut(), 0);
        info!(
            "rendered {}x{} at {} iterations in {:?}",
            fb.width(),
            fb.height(),
            self.set.max_iterations(),
            started.elapsed()
        );
        fb
    }

    /// A multi-threaded version of the render function.  The image is
    /// cut into horizontal bands, one per thread, and no band is
    /// shared.  The result is identical to `render`.
    pub fn render_threaded(&self, threads: usize) -> Result<Framebuffer> {
        if threads == 0 {
            return invalid("thread count must be greater than zero");
        }
        let started = Instant::now();
        let mut fb = Framebuffer::new(self.viewport.width(), self.viewport.height());
        let stride = fb.stride();
        let rows_per_band = (self.viewport.height() + threads - 1) / threads;

        crossbeam::scope(|spawner| {
            for (index, band) in fb.bytes_mut().chunks_mut(stride * rows_per_band).enumerate() {
                let first_row = index * rows_per_band;
                debug!(
                    "band {}: rows {}..{}",
                    index,
                    first_row,
                    first_row + band.len() / stride
                );
                spawner.spawn(move |_| self.render_band(band, first_row));
            }
        })
        .map_err(|_| RenderError::WorkerPanicked)?;

        info!(
            "rendered {}x{} at {} iterations on {} threads in {:?}",
            fb.width(),
            fb.height(),
            self.set.max_iterations(),
            threads,
            started.elapsed()
        );
        Ok(fb)
    }
}
