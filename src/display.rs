//! Core display operations
//!
//! [`Display`] owns the bus interface and the frame buffer. Pixel operations
//! only touch memory; [`Display::render`] pushes the whole buffer to the
//! current render target in one write transaction.
//!
//! Every bus operation is a single transaction: select chips, shift out
//! fields back to back, deselect. No public method returns with a chip still
//! selected; if a pin fails mid-transaction a deselect is still attempted.

use crate::buffer::FrameBuffer;
use crate::command::{
    ADDR_LEN, BLINK_OFF, BLINK_ON, ID_CMD, ID_LEN, ID_WR, LED_OFF, LED_ON, SYS_DIS, SYS_EN,
    WORD_LEN, pwm,
};
use crate::config::{ClockSource, Config};
use crate::error::{BuilderError, Error};
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Chips addressed by a command
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ChipSelection {
    /// The current render target only
    ///
    /// The command is skipped while no valid render target is set.
    #[default]
    RenderTarget,
    /// Every chip on the bus
    All,
    /// Bit `i` selects chip `i`; all selected chips receive one shared transaction
    ///
    /// Bits without a chip are ignored. A mask selecting no chip is a no-op.
    Mask(u8),
}

/// Core display driver for HT1632
///
/// Holds the bus interface, the frame buffer and the render target.
pub struct Display<I, B>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Channel memory
    buffer: FrameBuffer<B>,
    /// Display configuration
    config: Config,
    /// Chip addressed by `render`; unset until `init`
    render_target: Option<usize>,
}

impl<I, B> Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new Display instance
    ///
    /// `storage` backs the frame buffer and must hold at least
    /// [`Config::frame_size`] bytes. It is zero-filled. No bus activity
    /// happens until [`init`](Self::init).
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::BufferTooSmall` if `storage` is too small.
    pub fn new(interface: I, config: Config, storage: B) -> Result<Self, BuilderError> {
        let buffer = FrameBuffer::new(storage, &config)?;
        Ok(Self {
            interface,
            buffer,
            config,
            render_target: None,
        })
    }

    /// Bring every chip on the bus into a known, lit, blank state
    ///
    /// Idles the bus, clears the frame buffer, then broadcasts to all chips
    /// at once: system off, commons option, system on, LED duty generator
    /// on, default PWM duty. The oscillator has to be off while the commons
    /// option changes. Each chip then receives one render of the blank
    /// buffer, and chip 0 is left as the render target.
    pub fn init(&mut self) -> DisplayResult<I> {
        log::debug!(
            "init: {} chip(s), {}x{}, {} channel(s)",
            self.chip_count(),
            self.config.dimensions.outputs,
            self.config.dimensions.commons,
            self.config.channels
        );
        self.interface.idle().map_err(Error::Interface)?;
        self.buffer.clear();

        let commons = self.config.commons_command();
        let brightness = pwm(self.config.default_brightness);
        let all = self.all_chips_mask();
        transaction(&mut self.interface, all, |interface| {
            interface.write_bits(ID_CMD.into(), ID_LEN)?;
            interface.write_command(SYS_DIS)?;
            interface.write_command(commons)?;
            interface.write_command(SYS_EN)?;
            interface.write_command(LED_ON)?;
            interface.write_command(brightness)
        })?;

        for chip in 0..self.chip_count() {
            self.render_target = Some(chip);
            self.render()?;
        }
        self.render_target = Some(0);
        Ok(())
    }

    /// Write the whole frame buffer to the render target
    ///
    /// Sends the write ID, start address 0, then every byte of every channel
    /// as two nibbles, high nibble first. Does nothing while the render
    /// target is unset.
    pub fn render(&mut self) -> DisplayResult<I> {
        let Some(target) = self.valid_render_target() else {
            log::warn!("render skipped: no valid render target");
            return Ok(());
        };
        let bytes = self.buffer.as_bytes();
        log::trace!("render {} bytes to chip {target}", bytes.len());
        transaction(&mut self.interface, 1 << target, |interface| {
            interface.write_bits(ID_WR.into(), ID_LEN)?;
            interface.write_bits(0, ADDR_LEN)?;
            for byte in bytes {
                interface.write_bits((byte >> 4).into(), WORD_LEN)?;
                interface.write_bits((byte & 0x0F).into(), WORD_LEN)?;
            }
            Ok(())
        })
    }

    /// Make `target` the render target and render to it
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRenderTarget` without touching the bus if
    /// `target` has no chip.
    pub fn render_to(&mut self, target: usize) -> DisplayResult<I> {
        self.try_set_render_target(target)?;
        self.render()
    }

    /// Choose the chip addressed by [`render`](Self::render)
    ///
    /// Indices without a chip are ignored.
    pub fn set_render_target(&mut self, target: usize) {
        if self.try_set_render_target(target).is_err() {
            log::trace!("render target {target} out of range, ignored");
        }
    }

    /// Choose the chip addressed by [`render`](Self::render), reporting invalid indices
    pub fn try_set_render_target(&mut self, target: usize) -> DisplayResult<I> {
        let chips = self.chip_count();
        if target >= chips {
            return Err(Error::InvalidRenderTarget { target, chips });
        }
        log::debug!("render target: chip {target}");
        self.render_target = Some(target);
        Ok(())
    }

    /// Current render target, `None` before [`init`](Self::init)
    pub fn render_target(&self) -> Option<usize> {
        self.render_target
    }

    /// Set the PWM duty to `level` sixteenths
    ///
    /// `level` is clamped to `1..=16`. All chips in `selection` are updated
    /// in one transaction.
    pub fn set_brightness(&mut self, level: u8, selection: ChipSelection) -> DisplayResult<I> {
        log::debug!("brightness {level}/16 for {selection:?}");
        self.send_command(pwm(level), selection)
    }

    /// Turn the LED duty cycle generator on or off
    ///
    /// Display memory is kept while the LEDs are off.
    pub fn set_led_enabled(&mut self, enabled: bool, selection: ChipSelection) -> DisplayResult<I> {
        self.send_command(if enabled { LED_ON } else { LED_OFF }, selection)
    }

    /// Turn blinking on or off
    pub fn set_blink(&mut self, enabled: bool, selection: ChipSelection) -> DisplayResult<I> {
        self.send_command(if enabled { BLINK_ON } else { BLINK_OFF }, selection)
    }

    /// Turn the system oscillator on or off
    ///
    /// With the oscillator off the chip draws almost no power but shows
    /// nothing. Turning it back on does not re-enable the LED duty cycle
    /// generator; call [`set_led_enabled`](Self::set_led_enabled) as well.
    pub fn set_oscillator_enabled(
        &mut self,
        enabled: bool,
        selection: ChipSelection,
    ) -> DisplayResult<I> {
        self.send_command(if enabled { SYS_EN } else { SYS_DIS }, selection)
    }

    /// Select the clock source
    ///
    /// Cascaded chips need one master and the rest as slaves.
    pub fn set_clock_source(
        &mut self,
        source: ClockSource,
        selection: ChipSelection,
    ) -> DisplayResult<I> {
        self.send_command(source.command(), selection)
    }

    /// Send one command code to the chips in `selection`
    ///
    /// Emits the command ID, the code and its padding bit in a single
    /// transaction. Does nothing if `selection` resolves to no chip.
    pub fn send_command(&mut self, command: u8, selection: ChipSelection) -> DisplayResult<I> {
        let Some(mask) = self.resolve(selection) else {
            log::warn!("command {command:#04x} skipped: {selection:?} selects no chip");
            return Ok(());
        };
        transaction(&mut self.interface, mask, |interface| {
            interface.write_bits(ID_CMD.into(), ID_LEN)?;
            interface.write_command(command)
        })
    }

    /// Turn a pixel on (buffer only)
    pub fn set_pixel(&mut self, x: u8, y: u8) {
        self.buffer.set_pixel(x, y);
    }

    /// Turn a pixel off (buffer only)
    pub fn clear_pixel(&mut self, x: u8, y: u8) {
        self.buffer.clear_pixel(x, y);
    }

    /// Turn a pixel on or off (buffer only)
    pub fn write_pixel(&mut self, x: u8, y: u8, on: bool) {
        self.buffer.write_pixel(x, y, on);
    }

    /// Turn a pixel on or off, reporting coordinates outside the matrix
    pub fn try_write_pixel(&mut self, x: u8, y: u8, on: bool) -> DisplayResult<I> {
        Ok(self.buffer.try_write_pixel(x, y, on)?)
    }

    /// Write the top eight pixels of a column from one byte (buffer only)
    pub fn set_column(&mut self, x: u8, value: u8) {
        self.buffer.set_column(x, value);
    }

    /// Turn on every pixel of the active channel (buffer only)
    pub fn fill(&mut self) {
        self.buffer.fill();
    }

    /// Turn off every pixel of every channel (buffer only)
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Access the frame buffer
    pub fn buffer(&self) -> &FrameBuffer<B> {
        &self.buffer
    }

    /// Access the frame buffer mutably
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer<B> {
        &mut self.buffer
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of chips on the bus
    pub fn chip_count(&self) -> usize {
        self.interface.chip_count()
    }

    /// Release the interface and the frame buffer storage
    pub fn release(self) -> (I, B) {
        (self.interface, self.buffer.release())
    }

    fn valid_render_target(&self) -> Option<usize> {
        self.render_target
            .filter(|target| *target < self.chip_count())
    }

    fn all_chips_mask(&self) -> u8 {
        ((1u16 << self.chip_count().min(8)) - 1) as u8
    }

    fn resolve(&self, selection: ChipSelection) -> Option<u8> {
        let mask = match selection {
            ChipSelection::RenderTarget => 1 << self.valid_render_target()?,
            ChipSelection::All => self.all_chips_mask(),
            ChipSelection::Mask(mask) => mask & self.all_chips_mask(),
        };
        (mask != 0).then_some(mask)
    }
}

/// Run `fields` with the chips in `mask` selected, then deselect
///
/// The deselect is attempted even when a field write fails; the first
/// error is returned.
fn transaction<I, F>(interface: &mut I, mask: u8, fields: F) -> DisplayResult<I>
where
    I: DisplayInterface,
    F: FnOnce(&mut I) -> Result<(), I::Error>,
{
    let result = interface.select(mask).and_then(|()| fields(interface));
    match result {
        Ok(()) => interface.deselect().map_err(Error::Interface),
        Err(e) => {
            let _ = interface.deselect();
            Err(Error::Interface(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::COMS00;
    use crate::config::{Builder, Dimensions};
    use alloc::vec::Vec;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Op {
        Idle,
        Select(u8),
        Bits(u16, u8),
        Pad,
    }

    #[derive(Debug)]
    struct MockInterface {
        chips: usize,
        ops: Vec<Op>,
        fail_writes: bool,
    }

    impl MockInterface {
        fn new(chips: usize) -> Self {
            Self {
                chips,
                ops: Vec::new(),
                fail_writes: false,
            }
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = ();

        fn chip_count(&self) -> usize {
            self.chips
        }

        fn select(&mut self, mask: u8) -> Result<(), Self::Error> {
            self.ops.push(Op::Select(mask));
            Ok(())
        }

        fn write_bits(&mut self, value: u16, len: u8) -> Result<(), Self::Error> {
            if self.fail_writes {
                return Err(());
            }
            self.ops.push(Op::Bits(value, len));
            Ok(())
        }

        fn write_single_bit(&mut self) -> Result<(), Self::Error> {
            self.ops.push(Op::Pad);
            Ok(())
        }

        fn idle(&mut self) -> Result<(), Self::Error> {
            self.ops.push(Op::Idle);
            Ok(())
        }
    }

    fn test_config() -> Config {
        Builder::new()
            .dimensions(Dimensions::new(8, 32).unwrap())
            .build()
            .unwrap()
    }

    fn test_display(chips: usize) -> Display<MockInterface, [u8; 32]> {
        Display::new(MockInterface::new(chips), test_config(), [0u8; 32]).unwrap()
    }

    fn initialized(chips: usize) -> Display<MockInterface, [u8; 32]> {
        let mut display = test_display(chips);
        display.init().unwrap();
        display.interface.ops.clear();
        display
    }

    fn command_ops(command: u8) -> [Op; 3] {
        [
            Op::Bits(ID_CMD.into(), 3),
            Op::Bits(command.into(), 8),
            Op::Pad,
        ]
    }

    /// Expected render transaction for `bytes` on `chip`
    fn render_ops(chip: u8, bytes: &[u8]) -> Vec<Op> {
        let mut ops = alloc::vec![
            Op::Select(1 << chip),
            Op::Bits(ID_WR.into(), 3),
            Op::Bits(0, 7)
        ];
        for byte in bytes {
            ops.push(Op::Bits((byte >> 4).into(), 4));
            ops.push(Op::Bits((byte & 0x0F).into(), 4));
        }
        ops.push(Op::Select(0));
        ops
    }

    #[test]
    fn test_new_buffer_too_small() {
        let result = Display::new(MockInterface::new(1), test_config(), [0u8; 16]);
        assert!(matches!(result, Err(BuilderError::BufferTooSmall { .. })));
    }

    #[test]
    fn test_render_target_unset_before_init() {
        let mut display = test_display(1);
        assert_eq!(display.render_target(), None);
        display.render().unwrap();
        assert!(display.interface.ops.is_empty());
    }

    #[test]
    fn test_init_sequence() {
        let mut display = test_display(2);
        display.set_pixel(0, 0);
        display.init().unwrap();

        let mut expected = alloc::vec![Op::Idle, Op::Select(0b11), Op::Bits(ID_CMD.into(), 3)];
        for command in [SYS_DIS, COMS00, SYS_EN, LED_ON, 0xAF] {
            expected.push(Op::Bits(command.into(), 8));
            expected.push(Op::Pad);
        }
        expected.push(Op::Select(0));
        expected.extend(render_ops(0, &[0u8; 32]));
        expected.extend(render_ops(1, &[0u8; 32]));

        assert_eq!(display.interface.ops, expected);
        assert_eq!(display.render_target(), Some(0));
    }

    #[test]
    fn test_init_uses_configured_brightness() {
        let config = Builder::new()
            .dimensions(Dimensions::new(8, 32).unwrap())
            .default_brightness(4)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::new(1), config, [0u8; 32]).unwrap();
        display.init().unwrap();
        assert!(display.interface.ops.contains(&Op::Bits(0xA3, 8)));
    }

    #[test]
    fn test_render_corner_pixels() {
        let mut display = initialized(1);
        display.set_pixel(0, 0);
        display.set_pixel(31, 7);
        display.render().unwrap();

        let mut bytes = [0u8; 32];
        bytes[0] = 0x80;
        bytes[31] = 0x01;
        assert_eq!(display.interface.ops, render_ops(0, &bytes));
    }

    #[test]
    fn test_render_high_nibble_first() {
        let mut display = initialized(1);
        display.set_column(0, 0xFF);
        display.render().unwrap();

        // Column 0 is bit 7 of bytes 0..8
        assert_eq!(display.interface.ops[3], Op::Bits(0x8, 4));
        assert_eq!(display.interface.ops[4], Op::Bits(0x0, 4));
    }

    #[test]
    fn test_render_streams_channels_in_order() {
        let config = Builder::new()
            .dimensions(Dimensions::new(8, 32).unwrap())
            .channels(2)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::new(1), config, [0u8; 64]).unwrap();
        display.init().unwrap();
        display.interface.ops.clear();

        display.buffer_mut().set_channel(1);
        display.fill();
        display.render().unwrap();

        let mut bytes = [0u8; 64];
        bytes[32..].fill(0xFF);
        assert_eq!(display.interface.ops, render_ops(0, &bytes));
    }

    #[test]
    fn test_render_to_second_chip() {
        let mut display = initialized(2);
        display.render_to(1).unwrap();
        assert_eq!(display.interface.ops[0], Op::Select(0b10));
        assert_eq!(display.render_target(), Some(1));
    }

    #[test]
    fn test_render_to_invalid_chip() {
        let mut display = initialized(2);
        let result = display.render_to(2);
        assert!(matches!(
            result,
            Err(Error::InvalidRenderTarget {
                target: 2,
                chips: 2
            })
        ));
        assert!(display.interface.ops.is_empty());
    }

    #[test]
    fn test_set_render_target_out_of_range_ignored() {
        let mut display = initialized(2);
        display.set_render_target(1);
        display.set_render_target(4);
        assert_eq!(display.render_target(), Some(1));
    }

    #[test]
    fn test_brightness_on_unset_target_is_noop() {
        let mut display = test_display(1);
        display
            .set_brightness(16, ChipSelection::RenderTarget)
            .unwrap();
        assert!(display.interface.ops.is_empty());
    }

    #[test]
    fn test_brightness_on_render_target() {
        let mut display = initialized(4);
        display.set_render_target(2);
        display.set_brightness(1, ChipSelection::RenderTarget).unwrap();

        let mut expected = alloc::vec![Op::Select(0b0100)];
        expected.extend(command_ops(0xA0));
        expected.push(Op::Select(0));
        assert_eq!(display.interface.ops, expected);
    }

    #[test]
    fn test_brightness_mask_is_one_transaction() {
        let mut display = initialized(2);
        display.set_brightness(8, ChipSelection::Mask(0b0011)).unwrap();

        let mut expected = alloc::vec![Op::Select(0b0011)];
        expected.extend(command_ops(0xA7));
        expected.push(Op::Select(0));
        assert_eq!(display.interface.ops, expected);
    }

    #[test]
    fn test_brightness_clamped() {
        let mut display = initialized(1);
        display.set_brightness(40, ChipSelection::All).unwrap();
        assert!(display.interface.ops.contains(&Op::Bits(0xAF, 8)));
    }

    #[test]
    fn test_mask_without_chips_is_noop() {
        let mut display = initialized(2);
        display.set_brightness(8, ChipSelection::Mask(0b1100)).unwrap();
        assert!(display.interface.ops.is_empty());
    }

    #[test]
    fn test_led_and_blink_commands() {
        let mut display = initialized(1);
        display.set_led_enabled(false, ChipSelection::Mask(0b1)).unwrap();
        display.set_blink(true, ChipSelection::All).unwrap();
        display
            .set_oscillator_enabled(false, ChipSelection::RenderTarget)
            .unwrap();
        display
            .set_clock_source(ClockSource::Slave, ChipSelection::All)
            .unwrap();

        let mut expected = Vec::new();
        for command in [LED_OFF, BLINK_ON, SYS_DIS, 0x10] {
            expected.push(Op::Select(0b1));
            expected.extend(command_ops(command));
            expected.push(Op::Select(0));
        }
        assert_eq!(display.interface.ops, expected);
    }

    #[test]
    fn test_failed_write_still_deselects() {
        let mut display = initialized(2);
        display.interface.fail_writes = true;

        let result = display.render();
        assert!(matches!(result, Err(Error::Interface(()))));
        assert_eq!(
            display.interface.ops,
            [Op::Select(0b01), Op::Select(0)]
        );
    }

    #[test]
    fn test_try_write_pixel_out_of_bounds() {
        let mut display = initialized(1);
        let result = display.try_write_pixel(32, 0, true);
        assert!(matches!(result, Err(Error::OutOfBounds { x: 32, y: 0 })));
    }

    #[test]
    fn test_every_transaction_ends_deselected() {
        let mut display = test_display(3);
        display.init().unwrap();
        display.set_pixel(4, 4);
        display.render_to(2).unwrap();
        display.set_brightness(3, ChipSelection::All).unwrap();
        display.set_blink(false, ChipSelection::Mask(0b101)).unwrap();

        let selects: Vec<u8> = display
            .interface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Select(mask) => Some(*mask),
                _ => None,
            })
            .collect();
        assert_eq!(selects.last(), Some(&0));
        // Selections strictly alternate with deselects
        for pair in selects.chunks(2) {
            assert_ne!(pair[0], 0);
            assert_eq!(pair[1], 0);
        }
    }

    mod bus {
        use super::*;
        use crate::interface::Interface;
        use alloc::rc::Rc;
        use core::cell::RefCell;
        use core::convert::Infallible;
        use embedded_hal::delay::DelayNs;
        use embedded_hal::digital::{ErrorType, OutputPin};

        type Log = Rc<RefCell<Vec<(&'static str, bool)>>>;

        struct Pin {
            name: &'static str,
            log: Log,
        }

        impl ErrorType for Pin {
            type Error = Infallible;
        }

        impl OutputPin for Pin {
            fn set_low(&mut self) -> Result<(), Self::Error> {
                self.log.borrow_mut().push((self.name, false));
                Ok(())
            }
            fn set_high(&mut self) -> Result<(), Self::Error> {
                self.log.borrow_mut().push((self.name, true));
                Ok(())
            }
        }

        struct NoDelay;

        impl DelayNs for NoDelay {
            fn delay_ns(&mut self, _ns: u32) {}
        }

        type BusDisplay = Display<Interface<Pin, Pin, Pin, NoDelay, 2>, [u8; 32]>;

        fn bus_display(log: &Log) -> BusDisplay {
            let pin = |name| Pin {
                name,
                log: log.clone(),
            };
            let interface = Interface::new([pin("cs0"), pin("cs1")], pin("wr"), pin("data"), NoDelay)
                .unwrap();
            let mut display = Display::new(interface, test_config(), [0u8; 32]).unwrap();
            assert!(display.init().is_ok());
            log.borrow_mut().clear();
            display
        }

        /// Bits latched on rising WR edges, grouped by select window
        fn transactions(log: &Log) -> Vec<(u8, Vec<bool>)> {
            let mut cs = [true, true];
            let mut data = false;
            let mut open = false;
            let mut groups: Vec<(u8, Vec<bool>)> = Vec::new();
            for &(name, level) in log.borrow().iter() {
                match name {
                    "cs0" => cs[0] = level,
                    "cs1" => cs[1] = level,
                    "data" => data = level,
                    "wr" if level => {
                        let mask = u8::from(!cs[0]) | (u8::from(!cs[1]) << 1);
                        assert_ne!(mask, 0, "bit latched with no chip selected");
                        if !open {
                            groups.push((mask, Vec::new()));
                            open = true;
                        }
                        if let Some(group) = groups.last_mut() {
                            assert_eq!(group.0, mask, "selection changed mid-transaction");
                            group.1.push(data);
                        }
                    }
                    _ => {}
                }
                if cs == [true, true] {
                    open = false;
                }
            }
            groups
        }

        fn value(bits: &[bool]) -> u16 {
            bits.iter().fold(0, |acc, bit| (acc << 1) | u16::from(*bit))
        }

        fn assert_idle(log: &Log) {
            let log = log.borrow();
            for name in ["cs0", "cs1"] {
                let last = log.iter().rev().find(|(pin, _)| *pin == name);
                assert_eq!(last.map(|(_, level)| *level), Some(true));
            }
            let wr = log.iter().rev().find(|(pin, _)| *pin == "wr");
            assert_eq!(wr.map(|(_, level)| *level), Some(false));
        }

        #[test]
        fn test_render_corner_pixels_on_the_wire() {
            let log = Log::default();
            let mut display = bus_display(&log);
            display.set_pixel(0, 0);
            display.set_pixel(31, 7);
            assert!(display.render().is_ok());

            let groups = transactions(&log);
            assert_eq!(groups.len(), 1);
            let (mask, bits) = &groups[0];
            assert_eq!(*mask, 0b01);
            assert_eq!(bits.len(), 3 + 7 + 32 * 8);
            assert_eq!(value(&bits[..3]), u16::from(ID_WR));
            assert_eq!(value(&bits[3..10]), 0);

            let bytes: Vec<u16> = bits[10..].chunks(8).map(value).collect();
            assert_eq!(bytes[0], 0x80);
            assert_eq!(bytes[31], 0x01);
            assert!(bytes[1..31].iter().all(|byte| *byte == 0));
            assert_idle(&log);
        }

        #[test]
        fn test_brightness_mask_on_the_wire() {
            let log = Log::default();
            let mut display = bus_display(&log);
            assert!(display.set_brightness(8, ChipSelection::Mask(0b0011)).is_ok());

            let groups = transactions(&log);
            assert_eq!(groups.len(), 1);
            let (mask, bits) = &groups[0];
            assert_eq!(*mask, 0b11);
            assert_eq!(value(&bits[..3]), u16::from(ID_CMD));
            assert_eq!(value(&bits[3..11]), 0xA7);
            assert_eq!(bits.len(), 12);
            assert!(!bits[11]);
            assert_idle(&log);
        }

        #[test]
        fn test_init_broadcasts_then_renders_each_chip() {
            let log = Log::default();
            let pin = |name| Pin {
                name,
                log: log.clone(),
            };
            let interface = Interface::new([pin("cs0"), pin("cs1")], pin("wr"), pin("data"), NoDelay)
                .unwrap();
            let mut display = Display::new(interface, test_config(), [0xFFu8; 32]).unwrap();
            assert!(display.init().is_ok());

            let groups = transactions(&log);
            let masks: Vec<u8> = groups.iter().map(|(mask, _)| *mask).collect();
            assert_eq!(masks, [0b11, 0b01, 0b10]);

            let commands: Vec<u16> = groups[0].1[3..].chunks(9).map(|c| value(&c[..8])).collect();
            assert_eq!(commands, [0x00, 0x20, 0x01, 0x03, 0xAF]);
            assert_idle(&log);
        }
    }
}
