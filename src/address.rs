//! Pixel addressing
//!
//! Maps a logical `(x, y)` coordinate to the byte and bit of channel memory
//! that holds it.
//!
//! Each byte holds eight horizontally adjacent pixels of one row. Bytes are
//! grouped in blocks of `commons` bytes, one per row, and each block covers
//! eight columns:
//!
//! - byte index = `y + commons * (x / 8)`
//! - bit mask = `0x80 >> (x % 8)` (bit 7 is the leftmost column of the group)
//!
//! With 8 commons this is `y + (x & !7)`.
//!
//! ## Example
//!
//! ```
//! use ht1632::address::pixel_address;
//!
//! // 32x8 matrix: pixel (0,0) is byte 0, bit 7
//! assert_eq!(pixel_address(0, 0, 8), (0, 0x80));
//!
//! // Pixel (31,7) is byte 31, bit 0
//! assert_eq!(pixel_address(31, 7, 8), (31, 0x01));
//! ```

use crate::config::PIXELS_PER_BYTE;

/// Get the buffer index and bit mask of a pixel
///
/// Does not range check; callers validate against
/// [`Dimensions::contains`](crate::Dimensions::contains) first.
///
/// # Arguments
///
/// * `x` - Column, 0 to outputs-1
/// * `y` - Row, 0 to commons-1
/// * `commons` - Number of rows of the matrix
pub fn pixel_address(x: u8, y: u8, commons: u8) -> (usize, u8) {
    let group = x as usize / PIXELS_PER_BYTE;
    let index = y as usize + commons as usize * group;
    let bit = 0x80 >> (x as usize % PIXELS_PER_BYTE);
    (index, bit)
}
