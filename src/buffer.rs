//! Frame buffer
//!
//! Channel memory for one chip plus the pixel operations that modify it.
//! Nothing here touches hardware; [`Display::render`](crate::Display::render)
//! streams the memory to the chip.
//!
//! The memory lives in caller-provided storage (an array, a `&mut [u8]` or a
//! `Vec<u8>`), laid out channel after channel. It is zero-filled when the
//! frame buffer is created and never resized.
//!
//! ## Example
//!
//! ```
//! use ht1632::{Builder, Dimensions, FrameBuffer};
//!
//! # let Ok(dims) = Dimensions::new(8, 32) else { return };
//! # let Ok(config) = Builder::new().dimensions(dims).build() else { return };
//! let Ok(mut buffer) = FrameBuffer::new([0xAAu8; 32], &config) else { return };
//! assert!(buffer.as_bytes().iter().all(|byte| *byte == 0));
//!
//! buffer.set_pixel(0, 0);
//! buffer.set_pixel(31, 7);
//! assert_eq!(buffer.pixel(0, 0), Some(true));
//! assert_eq!(buffer.as_bytes()[0], 0x80);
//! assert_eq!(buffer.as_bytes()[31], 0x01);
//!
//! // Outside the matrix: ignored
//! buffer.set_pixel(32, 0);
//! assert_eq!(buffer.pixel(32, 0), None);
//! ```

use crate::address::pixel_address;
use crate::config::{Config, Dimensions};
use crate::error::{BuilderError, OutOfBounds};

/// Rows written by [`FrameBuffer::set_column`]
pub const COLUMN_HEIGHT: u8 = 8;

/// Channel memory and pixel operations
pub struct FrameBuffer<B> {
    /// Backing storage, channel after channel
    storage: B,
    /// Matrix geometry
    dimensions: Dimensions,
    /// Number of channels in `storage`
    channels: u8,
    /// Channel modified by pixel operations
    channel: u8,
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a zero-filled frame buffer over `storage`
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::BufferTooSmall` if `storage` holds fewer than
    /// [`Config::frame_size`] bytes. Extra bytes are left untouched.
    pub fn new(mut storage: B, config: &Config) -> Result<Self, BuilderError> {
        let required = config.frame_size();
        let provided = storage.as_ref().len();
        if provided < required {
            return Err(BuilderError::BufferTooSmall { required, provided });
        }
        storage.as_mut()[..required].fill(0);
        Ok(Self {
            storage,
            dimensions: config.dimensions,
            channels: config.channels,
            channel: 0,
        })
    }

    /// Matrix geometry
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of channels
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Index of the channel pixel operations write to
    pub fn active_channel(&self) -> u8 {
        self.channel
    }

    /// Select the channel pixel operations write to
    ///
    /// Out-of-range indices are ignored.
    pub fn set_channel(&mut self, channel: u8) {
        if channel < self.channels {
            self.channel = channel;
        } else {
            log::trace!("channel {channel} out of range, ignored");
        }
    }

    /// Memory of one channel
    pub fn channel(&self, channel: u8) -> Option<&[u8]> {
        if channel >= self.channels {
            return None;
        }
        let size = self.dimensions.buffer_size();
        let start = channel as usize * size;
        Some(&self.storage.as_ref()[start..start + size])
    }

    /// Memory of every channel, in render order
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_ref()[..self.frame_size()]
    }

    /// Turn a pixel on
    ///
    /// Coordinates outside the matrix are ignored.
    pub fn set_pixel(&mut self, x: u8, y: u8) {
        self.write_pixel(x, y, true);
    }

    /// Turn a pixel off
    ///
    /// Coordinates outside the matrix are ignored.
    pub fn clear_pixel(&mut self, x: u8, y: u8) {
        self.write_pixel(x, y, false);
    }

    /// Turn a pixel on or off
    ///
    /// Coordinates outside the matrix are ignored.
    pub fn write_pixel(&mut self, x: u8, y: u8, on: bool) {
        if self.try_write_pixel(x, y, on).is_err() {
            log::trace!("pixel ({x}, {y}) out of bounds, ignored");
        }
    }

    /// Turn a pixel on, reporting coordinates outside the matrix
    pub fn try_set_pixel(&mut self, x: u8, y: u8) -> Result<(), OutOfBounds> {
        self.try_write_pixel(x, y, true)
    }

    /// Turn a pixel off, reporting coordinates outside the matrix
    pub fn try_clear_pixel(&mut self, x: u8, y: u8) -> Result<(), OutOfBounds> {
        self.try_write_pixel(x, y, false)
    }

    /// Turn a pixel on or off, reporting coordinates outside the matrix
    pub fn try_write_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), OutOfBounds> {
        if !self.dimensions.contains(x, y) {
            return Err(OutOfBounds { x, y });
        }
        let (index, bit) = pixel_address(x, y, self.dimensions.commons);
        let byte = &mut self.active_mut()[index];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
        Ok(())
    }

    /// Read a pixel of the active channel
    ///
    /// Returns `None` outside the matrix.
    pub fn pixel(&self, x: u8, y: u8) -> Option<bool> {
        if !self.dimensions.contains(x, y) {
            return None;
        }
        let (index, bit) = pixel_address(x, y, self.dimensions.commons);
        let start = self.channel as usize * self.dimensions.buffer_size();
        Some(self.storage.as_ref()[start + index] & bit != 0)
    }

    /// Write the top eight pixels of column `x` from one byte
    ///
    /// Bit 0 is row 0 (top), bit 7 is row 7. Used to blit font glyphs one
    /// column at a time. A column outside the matrix is ignored.
    pub fn set_column(&mut self, x: u8, value: u8) {
        if x >= self.dimensions.outputs {
            log::trace!("column {x} out of bounds, ignored");
            return;
        }
        for y in 0..COLUMN_HEIGHT.min(self.dimensions.commons) {
            self.write_pixel(x, y, value & (1 << y) != 0);
        }
    }

    /// Turn on every pixel of the active channel
    pub fn fill(&mut self) {
        self.active_mut().fill(0xFF);
    }

    /// Turn off every pixel of every channel
    pub fn clear(&mut self) {
        let size = self.frame_size();
        self.storage.as_mut()[..size].fill(0x00);
    }

    /// Release the backing storage
    pub fn release(self) -> B {
        self.storage
    }

    fn frame_size(&self) -> usize {
        self.dimensions.buffer_size() * self.channels as usize
    }

    fn active_mut(&mut self) -> &mut [u8] {
        let size = self.dimensions.buffer_size();
        let start = self.channel as usize * size;
        &mut self.storage.as_mut()[start..start + size]
    }
}
