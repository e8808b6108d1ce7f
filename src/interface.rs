//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the SSD1322 controller over 4-wire SPI.
//!
//! ## Hardware Requirements
//!
//! The SSD1322 requires:
//! - SPI bus (MOSI + SCK + CS, the chip select owned by the [`SpiDevice`])
//! - 2 GPIO pins:
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output, active low)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1322::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // Create interface with SPI and GPIO pins
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//!
//! // Pulse the reset line
//! let _ = interface.reset(&mut delay);
//!
//! // Send command
//! let _ = interface.send_command(0xAF); // Display on
//!
//! // Send data
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Time the reset line is held low, in milliseconds
pub const RESET_LOW_MS: u32 = 50;

/// Time allowed for the controller to come out of reset, in milliseconds
pub const RESET_SETTLE_MS: u32 = 100;

/// Trait for hardware interface to SSD1322 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., a 3-wire bus or a shared reset line),
/// implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;
    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the command byte over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    #[allow(clippy::type_complexity)]
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes over SPI in one transfer
    ///
    /// # Arguments
    ///
    /// * `data` - Slice of bytes to send
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    #[allow(clippy::type_complexity)]
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Set RST pin low
    /// 2. Wait [`RESET_LOW_MS`]
    /// 3. Set RST pin high
    /// 4. Wait [`RESET_SETTLE_MS`]
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for timing
    ///
    /// # Errors
    ///
    /// Returns an error if driving the reset pin fails.
    #[allow(clippy::type_complexity)]
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation for SSD1322
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
///
/// ## Example
///
/// ```rust,no_run
/// use ssd1322::{Builder, Dimensions, Display, Interface};
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::OutputPin;
/// # use embedded_hal::spi::{Operation, SpiDevice};
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiDevice for MockSpi {
/// #     fn transaction(
/// #         &mut self,
/// #         _operations: &mut [Operation<'_, u8>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// let interface = Interface::new(
///     MockSpi,  // SpiDevice
///     MockPin,  // DC
///     MockPin,  // RST
/// );
///
/// // Use with Display
/// # let dims = match Dimensions::new(64, 256) {
/// #     Ok(dims) => dims,
/// #     Err(_) => return,
/// # };
/// # let config = match Builder::new().dimensions(dims).build() {
/// #     Ok(config) => config,
/// #     Err(_) => return,
/// # };
/// let _display = Display::new(interface, config);
/// ```
pub struct Interface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Give back the SPI device and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_LOW_MS);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_hal::digital::ErrorType;
    use embedded_hal::spi::{ErrorType as SpiErrorType, Operation};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Dc(bool),
        Rst(bool),
        Write(u8),
        DelayMs(u32),
    }

    #[derive(Debug, Clone, Copy)]
    struct MockError;

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    struct MockSpi<'a>(&'a RefCell<Vec<Event>>);
    struct MockDc<'a>(&'a RefCell<Vec<Event>>);
    struct MockRst<'a>(&'a RefCell<Vec<Event>>, bool);
    struct MockDelay<'a>(&'a RefCell<Vec<Event>>);

    impl SpiErrorType for MockSpi<'_> {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi<'_> {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.0.borrow_mut().extend(bytes.iter().map(|b| Event::Write(*b)));
                }
            }
            Ok(())
        }
    }

    impl ErrorType for MockDc<'_> {
        type Error = MockError;
    }

    impl OutputPin for MockDc<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Event::Dc(false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Event::Dc(true));
            Ok(())
        }
    }

    impl ErrorType for MockRst<'_> {
        type Error = MockError;
    }

    impl OutputPin for MockRst<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.1 {
                return Err(MockError);
            }
            self.0.borrow_mut().push(Event::Rst(false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Event::Rst(true));
            Ok(())
        }
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(Event::DelayMs(ms));
        }
    }

    #[test]
    fn test_command_then_data_framing() {
        let log = RefCell::new(Vec::new());
        let mut interface = Interface::new(MockSpi(&log), MockDc(&log), MockRst(&log, false));
        interface.send_command(0x15).unwrap();
        interface.send_data(&[0x1C, 0x5B]).unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Dc(false),
                Event::Write(0x15),
                Event::Dc(true),
                Event::Write(0x1C),
                Event::Write(0x5B),
            ]
        );
    }

    #[test]
    fn test_reset_timing() {
        let log = RefCell::new(Vec::new());
        let mut interface = Interface::new(MockSpi(&log), MockDc(&log), MockRst(&log, false));
        interface.reset(&mut MockDelay(&log)).unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Rst(false),
                Event::DelayMs(50),
                Event::Rst(true),
                Event::DelayMs(100),
            ]
        );
    }

    #[test]
    fn test_reset_pin_failure_propagates() {
        let log = RefCell::new(Vec::new());
        let mut interface = Interface::new(MockSpi(&log), MockDc(&log), MockRst(&log, true));
        let result = interface.reset(&mut MockDelay(&log));
        assert!(matches!(result, Err(InterfaceError::Pin(MockError))));
        assert!(log.borrow().is_empty());
    }
}
