//! HT1632 command definitions
//!
//! This module defines the mode IDs, command codes and field widths of the
//! HT1632 serial protocol. Everything is shifted out MSB-first on DATA,
//! latched on the rising edge of WR, while the target chip's CS is low.
//!
//! ## Frame Structure
//!
//! Command mode:
//! 1. Assert CS
//! 2. 3-bit ID `100` ([`ID_CMD`])
//! 3. One or more 8-bit command codes, each followed by one padding bit
//! 4. Deassert CS
//!
//! Write mode:
//! 1. Assert CS
//! 2. 3-bit ID `101` ([`ID_WR`])
//! 3. 7-bit start address
//! 4. Any number of 4-bit data words (the address auto-increments)
//! 5. Deassert CS
//!
//! ## Example
//!
//! ```
//! use ht1632::command;
//!
//! assert_eq!(command::pwm(16), 0xAF);
//! assert_eq!(command::pwm(1), 0xA0);
//! ```

// Mode IDs

/// Command mode ID (`100`)
pub const ID_CMD: u8 = 0b100;

/// Read RAM mode ID (`110`)
///
/// Listed for completeness; the driver never reads back from the chip.
pub const ID_RD: u8 = 0b110;

/// Write RAM mode ID (`101`)
pub const ID_WR: u8 = 0b101;

/// Width of a mode ID in bits
pub const ID_LEN: u8 = 3;

// Field widths

/// Width of a command code in bits, excluding the trailing padding bit
pub const CMD_LEN: u8 = 8;

/// Width of a RAM address in bits
pub const ADDR_LEN: u8 = 7;

/// Width of a RAM data word (nibble) in bits
pub const WORD_LEN: u8 = 4;

// System commands

/// Turn off the system oscillator and LED duty cycle generator (0x00)
pub const SYS_DIS: u8 = 0x00;

/// Turn on the system oscillator (0x01)
pub const SYS_EN: u8 = 0x01;

/// Turn off the LED duty cycle generator (0x02)
pub const LED_OFF: u8 = 0x02;

/// Turn on the LED duty cycle generator (0x03)
pub const LED_ON: u8 = 0x03;

/// Turn off blinking (0x08)
pub const BLINK_OFF: u8 = 0x08;

/// Turn on blinking (0x09)
pub const BLINK_ON: u8 = 0x09;

// Clock source commands

/// Slave mode, clock taken from the OSC pin (0x10)
pub const SLAVE_MODE: u8 = 0x10;

/// Master mode, on-chip RC clock driven out on OSC (0x18)
///
/// This is the power-on default. Sending it to HT1632C parts is known to
/// upset them, so [`Display::init`](crate::Display::init) never does.
pub const RC_MASTER_MODE: u8 = 0x18;

/// Master mode, external clock source (0x1C)
pub const EXT_CLK: u8 = 0x1C;

// Commons options

/// N-MOS open drain output, 8 commons (0x20)
pub const COMS00: u8 = 0x20;

/// N-MOS open drain output, 16 commons (0x24)
pub const COMS01: u8 = 0x24;

/// P-MOS open drain output, 8 commons (0x28)
pub const COMS10: u8 = 0x28;

/// P-MOS open drain output, 16 commons (0x2C)
pub const COMS11: u8 = 0x2C;

// PWM

/// PWM duty template (0xA0); the low nibble holds `duty - 1`
pub const PWM_BASE: u8 = 0xA0;

/// Lowest PWM duty, in sixteenths
pub const MIN_BRIGHTNESS: u8 = 1;

/// Highest PWM duty, in sixteenths
pub const MAX_BRIGHTNESS: u8 = 16;

/// Build the PWM duty command for `level` sixteenths
///
/// `level` is clamped to `1..=16`.
pub const fn pwm(level: u8) -> u8 {
    let level = if level < MIN_BRIGHTNESS {
        MIN_BRIGHTNESS
    } else if level > MAX_BRIGHTNESS {
        MAX_BRIGHTNESS
    } else {
        level
    };
    PWM_BASE | (level - 1)
}
