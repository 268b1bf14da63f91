//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration and frame buffer construction
//! - [`Error`] - Runtime errors during display operations
//! - [`OutOfBounds`] - A checked pixel write outside the matrix
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level pin errors
//!
//! The chip never answers, so nothing here reports a chip-side failure. Range
//! violations are silently discarded by the plain pixel methods; the `try_`
//! variants surface them as [`OutOfBounds`].
//!
//! ## Example
//!
//! ```
//! use ht1632::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(8, 40); // Too wide
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Pixel coordinate outside the matrix
    OutOfBounds {
        /// Column requested
        x: u8,
        /// Row requested
        y: u8,
    },
    /// Render target index not backed by a chip-select line
    InvalidRenderTarget {
        /// Index requested
        target: usize,
        /// Number of chips on the bus
        chips: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::OutOfBounds { x, y } => write!(f, "Pixel out of bounds: ({x}, {y})"),
            Self::InvalidRenderTarget { target, chips } => {
                write!(f, "Invalid render target {target} ({chips} chips)")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

impl<I: DisplayInterface> From<OutOfBounds> for Error<I> {
    fn from(err: OutOfBounds) -> Self {
        Self::OutOfBounds { x: err.x, y: err.y }
    }
}

/// A checked pixel write fell outside the matrix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutOfBounds {
    /// Column requested
    pub x: u8,
    /// Row requested
    pub y: u8,
}

impl core::fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Pixel out of bounds: ({}, {})", self.x, self.y)
    }
}

impl core::error::Error for OutOfBounds {}

/// Errors that can occur when building configuration
///
/// These errors occur before the display is created.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of commons (rows) requested
        commons: u8,
        /// Number of outputs (columns) requested
        outputs: u8,
    },
    /// Channel count is zero or overflows the chip's 7-bit address space
    InvalidChannelCount(u8),
    /// Number of chip-select lines is outside `1..=4`
    InvalidChipCount(usize),
    /// Frame buffer storage is too small for all channels
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { commons, outputs } => write!(
                f,
                "Invalid dimensions {commons}x{outputs} (commons must be 8 or 16, outputs a multiple of 8 up to 32/24)"
            ),
            Self::InvalidChannelCount(channels) => {
                write!(f, "Invalid channel count: {channels}")
            }
            Self::InvalidChipCount(chips) => {
                write!(f, "Invalid chip count: {chips} (expected 1 to 4)")
            }
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "Buffer too small: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
