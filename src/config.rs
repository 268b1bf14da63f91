//! Display configuration types and builder

use crate::command::{COMS00, COMS01, COMS10, COMS11, MAX_BRIGHTNESS, MIN_BRIGHTNESS};
pub use crate::error::BuilderError;

/// Number of nibbles addressable through the 7-bit RAM address
pub const ADDRESS_SPACE_NIBBLES: usize = 1 << crate::command::ADDR_LEN;

/// Maximum number of output lines (columns) when driving 8 commons
pub const MAX_OUTPUTS_8_COMMONS: u8 = 32;

/// Maximum number of output lines (columns) when driving 16 commons
pub const MAX_OUTPUTS_16_COMMONS: u8 = 24;

/// Maximum number of chips sharing one WR/DATA bus
pub const MAX_CHIPS: usize = 4;

/// Pixels held by one byte of channel memory
pub const PIXELS_PER_BYTE: usize = 8;

/// Matrix geometry driven by one chip
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of common lines (rows, `y` axis)
    pub commons: u8,
    /// Number of output lines (columns, `x` axis)
    pub outputs: u8,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - commons is neither 8 nor 16
    /// - outputs is zero or not a multiple of 8
    /// - outputs exceeds what the chip drives for that commons count
    ///   (32 for 8 commons, 24 for 16 commons)
    pub fn new(commons: u8, outputs: u8) -> Result<Self, BuilderError> {
        let max_outputs = match commons {
            8 => MAX_OUTPUTS_8_COMMONS,
            16 => MAX_OUTPUTS_16_COMMONS,
            _ => return Err(BuilderError::InvalidDimensions { commons, outputs }),
        };
        if outputs == 0 || outputs > max_outputs || outputs % 8 != 0 {
            return Err(BuilderError::InvalidDimensions { commons, outputs });
        }
        Ok(Self { commons, outputs })
    }

    /// Bytes of memory per channel
    pub fn buffer_size(&self) -> usize {
        (self.commons as usize * self.outputs as usize) / PIXELS_PER_BYTE
    }

    /// Whether `(x, y)` lies inside the matrix
    pub fn contains(&self, x: u8, y: u8) -> bool {
        x < self.outputs && y < self.commons
    }
}

/// Output driver type of the commons lines
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputDrive {
    /// N-MOS open drain outputs (JY-MCU 3208 and most modules)
    #[default]
    Nmos,
    /// P-MOS open drain outputs
    Pmos,
}

/// Clock source of a chip
///
/// Chained chips must share one clock: the first chip runs as a master and
/// the rest as slaves fed from its OSC/SYNC pins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ClockSource {
    /// On-chip RC oscillator, clock driven out (power-on default)
    #[default]
    RcMaster,
    /// External clock on OSC, clock driven out
    ExternalMaster,
    /// Clock taken from the master chip
    Slave,
}

impl ClockSource {
    /// Command code selecting this clock source
    pub fn command(self) -> u8 {
        match self {
            Self::RcMaster => crate::command::RC_MASTER_MODE,
            Self::ExternalMaster => crate::command::EXT_CLK,
            Self::Slave => crate::command::SLAVE_MODE,
        }
    }
}

/// Display configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Matrix geometry
    pub dimensions: Dimensions,
    /// Number of channels (memory blocks) streamed per render
    pub channels: u8,
    /// Output driver type, combined with the commons count for the COM option
    pub output_drive: OutputDrive,
    /// PWM duty (1..=16) sent during initialization
    pub default_brightness: u8,
}

impl Config {
    /// Commons-option command matching the geometry and drive type
    pub fn commons_command(&self) -> u8 {
        match (self.output_drive, self.dimensions.commons) {
            (OutputDrive::Nmos, 16) => COMS01,
            (OutputDrive::Pmos, 16) => COMS11,
            (OutputDrive::Pmos, _) => COMS10,
            (OutputDrive::Nmos, _) => COMS00,
        }
    }

    /// Total bytes of frame buffer memory across all channels
    pub fn frame_size(&self) -> usize {
        self.dimensions.buffer_size() * self.channels as usize
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use ht1632::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(8, 32) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).default_brightness(8).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.frame_size(), 32);
/// ```
#[must_use]
pub struct Builder {
    /// Matrix geometry (required)
    dimensions: Option<Dimensions>,
    /// Number of channels
    channels: u8,
    /// Output driver type
    output_drive: OutputDrive,
    /// PWM duty sent during initialization
    default_brightness: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            channels: 1,
            output_drive: OutputDrive::Nmos,
            default_brightness: MAX_BRIGHTNESS,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set matrix geometry (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set number of channels
    pub fn channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    /// Set output driver type
    pub fn output_drive(mut self, drive: OutputDrive) -> Self {
        self.output_drive = drive;
        self
    }

    /// Set the PWM duty sent during initialization
    ///
    /// Clamped to `1..=16` when building.
    pub fn default_brightness(mut self, level: u8) -> Self {
        self.default_brightness = level;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// or `BuilderError::InvalidChannelCount` if the channels do not fit the
    /// chip's address space.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let nibbles = dimensions.buffer_size() * 2 * self.channels as usize;
        if self.channels == 0 || nibbles > ADDRESS_SPACE_NIBBLES {
            return Err(BuilderError::InvalidChannelCount(self.channels));
        }
        Ok(Config {
            dimensions,
            channels: self.channels,
            output_drive: self.output_drive,
            default_brightness: self
                .default_brightness
                .clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS),
        })
    }
}
