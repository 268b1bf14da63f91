//! Graphics support via embedded-graphics
//!
//! Implements [`DrawTarget`] for [`FrameBuffer`] and [`Display`] with
//! [`BinaryColor`]: `On` lights an LED, `Off` clears it. Drawing only touches
//! the active channel of the frame buffer; call [`Display::render`] to push it
//! to the chip.
//!
//! Pixels outside the matrix are dropped, like the plain pixel methods.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle},
//! };
//! use ht1632::{Builder, Dimensions, FrameBuffer};
//!
//! let config = Builder::new()
//!     .dimensions(Dimensions::new(8, 32).unwrap())
//!     .build()
//!     .unwrap();
//! let mut buffer = FrameBuffer::new([0u8; 32], &config).unwrap();
//!
//! Line::new(Point::new(0, 0), Point::new(7, 0))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut buffer)
//!     .unwrap();
//!
//! assert_eq!(buffer.as_bytes()[0], 0xFF);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::buffer::FrameBuffer;
use crate::display::Display;
use crate::interface::DisplayInterface;

fn coordinates(point: Point) -> Option<(u8, u8)> {
    let x = u8::try_from(point.x).ok()?;
    let y = u8::try_from(point.y).ok()?;
    Some((x, y))
}

impl<B> DrawTarget for FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = coordinates(point) {
                self.write_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

impl<B> OriginDimensions for FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(dims.outputs as u32, dims.commons as u32)
    }
}

impl<I, B> DrawTarget for Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.buffer_mut().draw_iter(pixels)
    }
}

impl<I, B> OriginDimensions for Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        self.buffer().size()
    }
}
