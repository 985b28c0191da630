//! CC1101 register access
//!
//! This module provides the bus-level interface to the chip. The
//! [`Device<B>`] struct owns a [`BusTransport`] together with its open
//! session and provides methods for:
//! - Reading and writing configuration registers, singly or in bursts
//! - Reading and writing typed `regiface` registers
//! - Issuing command strobes
//! - Reading status registers
//! - Moving bytes in and out of the FIFOs
//!
//! Every method builds one [`Frame`] and performs exactly one bus
//! transaction. Nothing is retried: a transport failure is returned as
//! [`Error::Bus`] with the transport's own error inside.
//!
//! # Example
//! ```no_run
//! use cc1101::{BusTransport, Device, Error, registers::{MdmCfg2, StatusRegister}};
//!
//! fn identify<B: BusTransport>(bus: B) -> Result<MdmCfg2, Error<B::Error>> {
//!     let mut device = Device::open(bus, 0, 500_000)?;
//!     if device.read_status(StatusRegister::Version)? == 0 {
//!         return Err(Error::DeviceNotResponding);
//!     }
//!     let modem: MdmCfg2 = device.read_register()?;
//!     device.close()?;
//!     Ok(modem)
//! }
//! ```

use core::convert::Infallible;

use embedded_hal::digital::PinState;
use regiface::{ByteArray, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::bus::BusTransport;
use crate::error::Error;
use crate::frame::Frame;
use crate::registers::{Config, StatusRegister, Strobe};

/// Register level interface to a CC1101.
///
/// Holds the bus and its open session for the lifetime of the value. The
/// session is released by [`close`](Device::close).
pub struct Device<B: BusTransport> {
    bus: B,
    session: B::Session,
}

impl<B: BusTransport> Device<B> {
    /// Opens a bus session and wraps it.
    ///
    /// # Arguments
    /// * `bus` - Transport to the chip
    /// * `channel` - Bus channel to open
    /// * `bit_rate` - Bus clock in Hz
    ///
    /// # Errors
    /// * `Error::Bus` - The transport refused to open the session
    pub fn open(mut bus: B, channel: u8, bit_rate: u32) -> Result<Self, Error<B::Error>> {
        let session = bus.open(channel, bit_rate).map_err(Error::Bus)?;
        log::debug!("opened bus channel {channel} at {bit_rate} Hz");
        Ok(Self { bus, session })
    }

    /// Closes the session and returns the transport.
    pub fn close(self) -> Result<B, Error<B::Error>> {
        let Self { mut bus, session } = self;
        bus.close(session).map_err(Error::Bus)?;
        log::debug!("closed bus session");
        Ok(bus)
    }

    /// Performs one framed transaction.
    ///
    /// Read frames are exchanged full-duplex and hold the reply afterwards,
    /// see [`Frame::reply`]. All other frames are written as is.
    pub fn execute(&mut self, frame: &mut Frame) -> Result<(), Error<B::Error>> {
        log::trace!(
            "header {:#04x}, {} byte(s)",
            frame.header(),
            frame.as_bytes().len()
        );

        if frame.is_read() {
            self.bus.transfer(&mut self.session, frame.as_mut_bytes())
        } else {
            self.bus.write_bytes(&mut self.session, frame.as_bytes())
        }
        .map_err(Error::Bus)
    }

    /// Reads a single byte from `address`.
    pub fn read_single(&mut self, address: u8) -> Result<u8, Error<B::Error>> {
        let mut frame = Frame::single_read(address);
        self.execute(&mut frame)?;
        Ok(frame.reply()[0])
    }

    /// Writes a single byte to `address`.
    pub fn write_single(&mut self, address: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.execute(&mut Frame::single_write(address, value))
    }

    /// Burst-reads `bytes.len()` bytes starting at `address`.
    pub fn read_burst(&mut self, address: u8, bytes: &mut [u8]) -> Result<(), Error<B::Error>> {
        let mut frame = Frame::burst_read(address, bytes.len());
        self.execute(&mut frame)?;
        bytes.copy_from_slice(frame.reply());
        Ok(())
    }

    /// Burst-writes `bytes` starting at `address`.
    pub fn write_burst(&mut self, address: u8, bytes: &[u8]) -> Result<(), Error<B::Error>> {
        self.execute(&mut Frame::burst_write(address, bytes))
    }

    /// Reads a configuration register.
    pub fn read_config(&mut self, register: Config) -> Result<u8, Error<B::Error>> {
        self.read_single(register.addr())
    }

    /// Writes a configuration register.
    pub fn write_config(&mut self, register: Config, value: u8) -> Result<(), Error<B::Error>> {
        self.write_single(register.addr(), value)
    }

    /// Issues a command strobe.
    pub fn strobe(&mut self, strobe: Strobe) -> Result<(), Error<B::Error>> {
        log::trace!("strobe {strobe:?}");
        self.execute(&mut Frame::strobe(strobe))
    }

    /// Reads the live value of a status register.
    pub fn read_status(&mut self, register: StatusRegister) -> Result<u8, Error<B::Error>> {
        let mut frame = Frame::status_read(register);
        self.execute(&mut frame)?;
        Ok(frame.reply()[0])
    }

    /// Drives GPIO line `pin` through the transport.
    pub fn set_line(&mut self, pin: u8, level: PinState) -> Result<(), Error<B::Error>> {
        self.bus.set_line(pin, level).map_err(Error::Bus)
    }

    /// Reads a typed register.
    ///
    /// Single-byte registers are read with a single access, wider register
    /// blocks (sync word, frequency word, PA table) with one burst.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing ReadableRegister with u8 ID
    pub fn read_register<R>(&mut self) -> Result<R, Error<B::Error>>
    where
        R: ReadableRegister<IdType = u8, Error = Infallible>,
    {
        let mut raw_value = R::Array::new();

        if raw_value.as_ref().len() == 1 {
            raw_value.as_mut()[0] = self.read_single(R::id())?;
        } else {
            self.read_burst(R::id(), raw_value.as_mut())?;
        }

        R::from_bytes(raw_value).map_err(|never| match never {})
    }

    /// Writes a typed register.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing WritableRegister with u8 ID
    ///
    /// # Arguments
    /// * `register` - The register value to write
    pub fn write_register<R>(&mut self, register: R) -> Result<(), Error<B::Error>>
    where
        R: WritableRegister<IdType = u8, Error = Infallible>,
    {
        let raw_value = match register.to_bytes() {
            Ok(raw_value) => raw_value,
            Err(never) => match never {},
        };

        match raw_value.as_ref() {
            [value] => self.write_single(R::id(), *value),
            bytes => self.write_burst(R::id(), bytes),
        }
    }
}
