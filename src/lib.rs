//! HT1632 LED Matrix Driver
//!
//! A driver for the Holtek HT1632/HT1632C LED matrix controller, driving up to
//! four chained chips over a bit-banged three-wire bus.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - 8 or 16 common geometries
//! - Multiple frame buffer channels per chip
//! - Per-chip or broadcast brightness, blink and LED control
//!
//! ## Usage
//!
//! ```rust
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use ht1632::{Builder, ChipSelection, Dimensions, Display, Interface};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (cs, wr, data, delay) = (MockPin, MockPin, MockPin, MockDelay);
//! let interface = match Interface::new([cs], wr, data, delay) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//! let dims = match Dimensions::new(8, 32) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).default_brightness(8).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = match Display::new(interface, config, [0u8; 32]) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.init();
//!
//! display.set_pixel(0, 0);
//! display.set_pixel(31, 7);
//! let _ = display.render();
//! let _ = display.set_brightness(4, ChipSelection::All);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Pixel to memory address mapping
pub mod address;
/// Multi-channel frame buffer
pub mod buffer;
/// HT1632 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use buffer::FrameBuffer;
pub use config::{Builder, ClockSource, Config, Dimensions, MAX_CHIPS, OutputDrive};
pub use display::{ChipSelection, Display};
pub use error::{BuilderError, Error, OutOfBounds};
pub use interface::InterfaceError;
pub use interface::{DEFAULT_WRITE_DELAY_NS, DisplayInterface, Interface};
