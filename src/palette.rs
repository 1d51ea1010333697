// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fixed color gradient.  Sixteen entries running from a dark
//! brown through deep blues and white out to orange, repeated around
//! the set as the escape layer climbs.

/// One RGB triple, 8 bits per channel.
pub type Color = [u8; 3];

/// Set members are always painted this, whatever the palette says.
pub const BLACK: Color = [0, 0, 0];

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 16;

/// An immutable table of sixteen colors.  Lookups wrap, so any layer
/// number is a valid index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette(pub [Color; PALETTE_SIZE]);

/// The gradient every render uses unless told otherwise.
pub const DEFAULT_PALETTE: Palette = Palette([
    [66, 30, 15],
    [25, 7, 26],
    [9, 1, 47],
    [4, 4, 73],
    [0, 7, 100],
    [12, 44, 138],
    [24, 82, 177],
    [57, 125, 209],
    [134, 181, 229],
    [211, 236, 248],
    [241, 233, 191],
    [248, 201, 95],
    [255, 170, 0],
    [204, 128, 0],
    [153, 87, 0],
    [106, 52, 3],
]);

impl Palette {
    /// The color for a given escape layer, reduced modulo 16.
    #[inline]
    pub fn color(&self, layer: usize) -> Color {
        self.0[layer % PALETTE_SIZE]
    }
}

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}
