//! Bus transport
//!
//! The driver never touches hardware directly. Everything it sends goes
//! through a [`BusTransport`], which the host supplies:
//! - `open`/`close` bracket a bus session
//! - `write_bytes` clocks a frame out and discards what comes back
//! - `transfer` is a full-duplex exchange performed in place
//! - `set_line` drives a GPIO line, used to pulse the chip select on reset
//!
//! [`SpiTransport`] implements the trait on top of an embedded-hal
//! [`SpiDevice`] and an [`OutputPin`].

use core::fmt::Debug;

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::spi::SpiDevice;
use thiserror::Error;

/// Byte-level access to the chip's register bus.
///
/// Implementations are used by a single owner and need no internal locking.
pub trait BusTransport {
    /// Transport failure, passed through to callers unchanged
    type Error: Debug;

    /// Handle of an open session
    type Session;

    /// Opens a session on `channel` clocked at `bit_rate` Hz.
    fn open(&mut self, channel: u8, bit_rate: u32) -> Result<Self::Session, Self::Error>;

    /// Ends a session.
    fn close(&mut self, session: Self::Session) -> Result<(), Self::Error>;

    /// Writes `bytes` in one transaction.
    fn write_bytes(&mut self, session: &mut Self::Session, bytes: &[u8])
        -> Result<(), Self::Error>;

    /// Clocks `buffer` out and replaces it with the bytes clocked in.
    fn transfer(&mut self, session: &mut Self::Session, buffer: &mut [u8])
        -> Result<(), Self::Error>;

    /// Drives GPIO line `pin` to `level`.
    fn set_line(&mut self, pin: u8, level: PinState) -> Result<(), Self::Error>;
}

/// Errors of the embedded-hal backed transport.
#[derive(Debug, Error)]
pub enum SpiTransportError<S, P> {
    /// SPI transaction failed
    #[error("spi error: {0:?}")]
    Spi(S),
    /// Driving the reset line failed
    #[error("pin error: {0:?}")]
    Pin(P),
    /// The requested line is not wired to this transport
    #[error("line {0} is not wired to this transport")]
    UnknownLine(u8),
}

/// [`BusTransport`] over an embedded-hal SPI device and a reset line.
///
/// The SPI device owns chip select for regular transactions. The reset line
/// is a separate output, typically the same CSn net, that the controller
/// pulses before the reset strobe.
pub struct SpiTransport<SPI, RST> {
    spi: SPI,
    reset: RST,
    reset_line: u8,
}

impl<SPI, RST> SpiTransport<SPI, RST> {
    /// Wraps `spi`, with `reset` answering to line number `reset_line`.
    pub fn new(spi: SPI, reset: RST, reset_line: u8) -> Self {
        Self {
            spi,
            reset,
            reset_line,
        }
    }

    /// Releases the SPI device and reset pin.
    pub fn release(self) -> (SPI, RST) {
        (self.spi, self.reset)
    }
}

impl<SPI, RST> BusTransport for SpiTransport<SPI, RST>
where
    SPI: SpiDevice,
    RST: OutputPin,
{
    type Error = SpiTransportError<SPI::Error, RST::Error>;
    type Session = ();

    fn open(&mut self, channel: u8, bit_rate: u32) -> Result<Self::Session, Self::Error> {
        // Bus clock and chip select come from the SpiDevice configuration
        log::debug!("spi session on channel {channel} at {bit_rate} Hz");
        Ok(())
    }

    fn close(&mut self, _session: Self::Session) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write_bytes(
        &mut self,
        _session: &mut Self::Session,
        bytes: &[u8],
    ) -> Result<(), Self::Error> {
        self.spi.write(bytes).map_err(SpiTransportError::Spi)
    }

    fn transfer(
        &mut self,
        _session: &mut Self::Session,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.spi
            .transfer_in_place(buffer)
            .map_err(SpiTransportError::Spi)
    }

    fn set_line(&mut self, pin: u8, level: PinState) -> Result<(), Self::Error> {
        if pin != self.reset_line {
            return Err(SpiTransportError::UnknownLine(pin));
        }
        self.reset.set_state(level).map_err(SpiTransportError::Pin)
    }
}
