use image::{Rgb, RgbImage};

use crate::palette::{CHECKER_DARK, CHECKER_LIGHT};

pub const DEFAULT_TILE: u32 = 12;

/// Tiled light/dark matte used as a transparency indicator.
///
/// Tile `(row, col)` is light when `(row + col)` is even. Tiles on the right
/// and bottom edges are cut off rather than stretched.
pub fn checkerboard(width: u32, height: u32, tile: u32) -> RgbImage {
    let tile = tile.max(1);
    RgbImage::from_fn(width, height, |x, y| {
        if (x / tile + y / tile) % 2 == 0 {
            Rgb(CHECKER_LIGHT)
        } else {
            Rgb(CHECKER_DARK)
        }
    })
}
