//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for bit-banging the HT1632 3-wire bus.
//!
//! ## Hardware Requirements
//!
//! The HT1632 requires 2 shared GPIO outputs plus one chip select per chip:
//! - **WR**: Write strobe, data is latched on the rising edge
//! - **DATA**: Serial data, MSB first
//! - **CS0..CS3**: Chip select (active low), one per chained chip
//!
//! The chip needs at least 50ns between a DATA change and the rising edge of
//! WR. The delay is taken from an injected [`DelayNs`] so the same code meets
//! the timing on any host clock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use ht1632::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! // One chip: CS0, WR, DATA
//! let mut interface = match Interface::new([MockPin], MockPin, MockPin, MockDelay) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//!
//! // Command mode, LED on, deselect
//! let _ = interface.select(0b0001);
//! let _ = interface.write_bits(0b100, 3);
//! let _ = interface.write_command(0x03);
//! let _ = interface.deselect();
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::command::CMD_LEN;
use crate::config::MAX_CHIPS;
use crate::error::BuilderError;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the hardware side of the HT1632 bus
///
/// Combines the chip selector and the serial protocol encoder. The
/// [`Display`](crate::display::Display) only talks to the chip through this
/// trait, so any GPIO implementation (or a recording mock) can stand in.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If the chip
/// selects go through a shift register or a port expander, implement this
/// trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Number of chips on the bus (1 to 4)
    fn chip_count(&self) -> usize;

    /// Drive the chip-select lines for `mask`
    ///
    /// Bit `i` of `mask` pulls CS `i` low (selected); every other line is
    /// driven high. Bits beyond [`chip_count`](Self::chip_count) are ignored.
    #[allow(clippy::type_complexity)]
    fn select(&mut self, mask: u8) -> InterfaceResult<(), Self::Error>;

    /// Shift out the low `len` bits of `value`, MSB first
    ///
    /// PRECONDITION: WR is low. It is low again when this returns.
    #[allow(clippy::type_complexity)]
    fn write_bits(&mut self, value: u16, len: u8) -> InterfaceResult<(), Self::Error>;

    /// Shift out a single `0` bit
    ///
    /// Used as the padding bit that follows every command code.
    #[allow(clippy::type_complexity)]
    fn write_single_bit(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Put the bus into its idle state: WR low, DATA low, every chip deselected
    #[allow(clippy::type_complexity)]
    fn idle(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Deselect every chip
    #[allow(clippy::type_complexity)]
    fn deselect(&mut self) -> InterfaceResult<(), Self::Error> {
        self.select(0)
    }

    /// Shift out an 8-bit command code followed by its padding bit
    #[allow(clippy::type_complexity)]
    fn write_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.write_bits(u16::from(command), CMD_LEN)?;
        self.write_single_bit()
    }
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Default DATA setup and WR high time in nanoseconds
pub const DEFAULT_WRITE_DELAY_NS: u32 = 50;

/// GPIO bit-bang implementation of the HT1632 bus
///
/// ## Type Parameters
///
/// * `CS` - Chip-select pin implementing [`OutputPin`]
/// * `WR` - Write strobe pin implementing [`OutputPin`]
/// * `DATA` - Data pin implementing [`OutputPin`]
/// * `D` - Delay implementing [`DelayNs`]
/// * `N` - Number of chained chips (1 to 4)
///
/// Chip-select mask bit `i` maps to `cs[i]`.
pub struct Interface<CS, WR, DATA, D, const N: usize> {
    /// Chip-select pins in attachment order (active low)
    cs: [CS; N],
    /// Write strobe pin
    wr: WR,
    /// Serial data pin
    data: DATA,
    /// Delay used for the bit timing
    delay: D,
    /// DATA setup time and WR high time in nanoseconds
    write_delay_ns: u32,
}

impl<CS, WR, DATA, D, const N: usize> Interface<CS, WR, DATA, D, N>
where
    CS: OutputPin,
    WR: OutputPin,
    DATA: OutputPin,
    D: DelayNs,
{
    /// Create a new Interface
    ///
    /// Pins must already be configured as push-pull outputs. Nothing is
    /// driven until [`DisplayInterface::idle`] is called (which
    /// [`Display::init`](crate::Display::init) does).
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidChipCount` unless `1 <= N <= 4`.
    pub fn new(cs: [CS; N], wr: WR, data: DATA, delay: D) -> Result<Self, BuilderError> {
        if N == 0 || N > MAX_CHIPS {
            return Err(BuilderError::InvalidChipCount(N));
        }
        Ok(Self {
            cs,
            wr,
            data,
            delay,
            write_delay_ns: DEFAULT_WRITE_DELAY_NS,
        })
    }

    /// Set the DATA setup and WR high time in nanoseconds
    ///
    /// Default is 50ns, the datasheet minimum. Raise it for long or
    /// heavily loaded wiring.
    pub fn set_write_delay_ns(&mut self, ns: u32) -> &mut Self {
        self.write_delay_ns = ns;
        self
    }

    /// Get the current DATA setup and WR high time in nanoseconds
    pub fn write_delay_ns(&self) -> u32 {
        self.write_delay_ns
    }

    /// Release the pins and the delay
    pub fn release(self) -> ([CS; N], WR, DATA, D) {
        (self.cs, self.wr, self.data, self.delay)
    }
}

impl<CS, WR, DATA, D, PinErr, const N: usize> DisplayInterface for Interface<CS, WR, DATA, D, N>
where
    CS: OutputPin<Error = PinErr>,
    WR: OutputPin<Error = PinErr>,
    DATA: OutputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn chip_count(&self) -> usize {
        N
    }

    fn select(&mut self, mask: u8) -> InterfaceResult<(), Self::Error> {
        for (i, pin) in self.cs.iter_mut().enumerate() {
            let selected = mask & (1 << i) != 0;
            pin.set_state(PinState::from(!selected))
                .map_err(InterfaceError::Pin)?;
        }
        Ok(())
    }

    fn write_bits(&mut self, value: u16, len: u8) -> InterfaceResult<(), Self::Error> {
        for bit in (0..len.min(16)).rev() {
            let level = PinState::from(value & (1 << bit) != 0);
            self.data.set_state(level).map_err(InterfaceError::Pin)?;
            self.delay.delay_ns(self.write_delay_ns);
            self.wr.set_high().map_err(InterfaceError::Pin)?;
            self.delay.delay_ns(self.write_delay_ns);
            self.wr.set_low().map_err(InterfaceError::Pin)?;
        }
        Ok(())
    }

    fn write_single_bit(&mut self) -> InterfaceResult<(), Self::Error> {
        self.write_bits(0, 1)
    }

    fn idle(&mut self) -> InterfaceResult<(), Self::Error> {
        self.wr.set_low().map_err(InterfaceError::Pin)?;
        self.data.set_low().map_err(InterfaceError::Pin)?;
        self.select(0)
    }
}
