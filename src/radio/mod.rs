//! Radio controller
//!
//! [`Radio`] composes the register layer with the field and unit codecs into
//! the operations an application uses:
//! - Session lifecycle: [`initialize`](Radio::initialize), [`close`](Radio::close),
//!   [`reset`](Radio::reset)
//! - Command strobes: calibrate, idle, RX, TX, FIFO flushes
//! - Typed configuration setters and getters (see the `config` submodule)
//! - Bounded transmit and receive loops, blocking and async (see `transfer`)
//! - Live status: RSSI, LQI, machine state, part number and version
//!
//! # Important Notes
//! - All configuration lives in the chip. The controller caches only the
//!   modulation format, which decides the PA table slot used for output power.
//! - Composite register updates are read-modify-write. The controller takes
//!   `&mut self` everywhere; sharing it between tasks needs an external lock.
//! - After a [`Error::TxTimeout`] or [`Error::ReceiveTimeout`] the FIFOs may
//!   still hold data. Call [`idle`](Radio::idle) and flush before reuse.

mod config;
mod transfer;

use embedded_hal::digital::PinState;

use crate::bus::BusTransport;
use crate::config::RadioConfig;
use crate::device::Device;
use crate::error::Error;
use crate::field::CompositeRegister;
use crate::packet::rssi_dbm;
use crate::registers::{MachineState, MdmCfg2, Modulation, StatusRegister, Strobe, UnknownValue};
use crate::units::Oscillator;

/// Controller for one CC1101.
///
/// The only chip state kept here is the modulation cache. The remaining
/// fields are constants copied from [`RadioConfig`] at initialization.
pub struct Radio<B: BusTransport> {
    device: Device<B>,
    modulation: Modulation,
    oscillator: Oscillator,
    reset_line: u8,
    poll_interval_us: u32,
    reset_hold_us: u32,
}

/// Maps an undefined field code to [`Error::InvalidRegisterValue`].
fn invalid<E>(register: &'static str) -> impl FnOnce(UnknownValue) -> Error<E> {
    move |UnknownValue(value)| Error::InvalidRegisterValue { register, value }
}

impl<B: BusTransport> Radio<B> {
    /// Opens a bus session and checks that a chip answers.
    ///
    /// # Errors
    /// * `Error::ParameterOutOfRange` - The configured oscillator frequency
    ///   is not usable. The bus is not opened.
    /// * `Error::Bus` - The session could not be opened or a transfer failed
    /// * `Error::DeviceNotResponding` - VERSION read back zero
    ///
    /// The session is closed again before any error after opening is returned.
    pub fn initialize(bus: B, config: &RadioConfig) -> Result<Self, Error<B::Error>> {
        let oscillator = config.oscillator()?;
        let mut device = Device::open(bus, config.spi_channel, config.bit_rate)?;

        match Self::identify(&mut device) {
            Ok(modulation) => Ok(Self {
                device,
                modulation,
                oscillator,
                reset_line: config.reset_line,
                poll_interval_us: config.poll_interval_us,
                reset_hold_us: config.reset_hold_us,
            }),
            Err(err) => {
                if let Err(close_err) = device.close() {
                    log::warn!("closing bus after failed identification: {close_err:?}");
                }
                Err(err)
            }
        }
    }

    fn identify(device: &mut Device<B>) -> Result<Modulation, Error<B::Error>> {
        let version = device.read_status(StatusRegister::Version)?;
        if version == 0 {
            log::warn!("VERSION read back zero");
            return Err(Error::DeviceNotResponding);
        }
        let part = device.read_status(StatusRegister::Partnum)?;
        log::debug!("found CC1101 part {part:#04x} version {version:#04x}");

        let modem: MdmCfg2 = device.read_register()?;
        Modulation::try_from(modem.field(MdmCfg2::MOD_FORMAT)).map_err(invalid(MdmCfg2::NAME))
    }

    /// Closes the bus session and returns the transport.
    pub fn close(self) -> Result<B, Error<B::Error>> {
        self.device.close()
    }

    /// Direct access to the register layer.
    pub fn device(&mut self) -> &mut Device<B> {
        &mut self.device
    }

    /// Reference oscillator used for unit conversions
    pub fn oscillator(&self) -> Oscillator {
        self.oscillator
    }

    /// Calibrates the frequency synthesizer.
    pub fn calibrate(&mut self) -> Result<(), Error<B::Error>> {
        self.device.strobe(Strobe::Scal)
    }

    /// Leaves RX/TX and turns off the frequency synthesizer.
    pub fn idle(&mut self) -> Result<(), Error<B::Error>> {
        self.device.strobe(Strobe::Sidle)
    }

    /// Enables RX.
    pub fn enter_rx(&mut self) -> Result<(), Error<B::Error>> {
        self.device.strobe(Strobe::Srx)
    }

    /// Enables TX.
    pub fn enter_tx(&mut self) -> Result<(), Error<B::Error>> {
        self.device.strobe(Strobe::Stx)
    }

    /// Flushes the RX FIFO. Only valid in IDLE or RXFIFO_OVERFLOW.
    pub fn flush_rx(&mut self) -> Result<(), Error<B::Error>> {
        self.device.strobe(Strobe::Sfrx)
    }

    /// Flushes the TX FIFO. Only valid in IDLE or TXFIFO_UNDERFLOW.
    pub fn flush_tx(&mut self) -> Result<(), Error<B::Error>> {
        self.device.strobe(Strobe::Sftx)
    }

    /// Pulses the reset line, then issues the reset strobe.
    ///
    /// The line is held low for the configured hold time. Register contents
    /// return to their power-on defaults, so the cached modulation is reset
    /// to 2-FSK as well.
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<B::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.device.set_line(self.reset_line, PinState::Low)?;
        delay.delay_us(self.reset_hold_us);
        self.device.set_line(self.reset_line, PinState::High)?;
        self.finish_reset()
    }

    /// Async version of [`reset`](Radio::reset).
    pub async fn reset_async<D>(&mut self, delay: &mut D) -> Result<(), Error<B::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.device.set_line(self.reset_line, PinState::Low)?;
        delay.delay_us(self.reset_hold_us).await;
        self.device.set_line(self.reset_line, PinState::High)?;
        self.finish_reset()
    }

    fn finish_reset(&mut self) -> Result<(), Error<B::Error>> {
        self.device.strobe(Strobe::Sres)?;
        self.modulation = Modulation::Fsk2;
        log::debug!("chip reset");
        Ok(())
    }

    /// Current received signal strength in dBm
    pub fn rssi(&mut self) -> Result<f32, Error<B::Error>> {
        Ok(rssi_dbm(self.device.read_status(StatusRegister::Rssi)?))
    }

    /// Link quality of the last received packet
    pub fn lqi(&mut self) -> Result<u8, Error<B::Error>> {
        Ok(self.device.read_status(StatusRegister::Lqi)? & 0x7F)
    }

    /// Chip part number
    pub fn part_number(&mut self) -> Result<u8, Error<B::Error>> {
        self.device.read_status(StatusRegister::Partnum)
    }

    /// Chip version number
    pub fn version(&mut self) -> Result<u8, Error<B::Error>> {
        self.device.read_status(StatusRegister::Version)
    }

    /// State of the main radio control state machine
    pub fn machine_state(&mut self) -> Result<MachineState, Error<B::Error>> {
        let raw = self.device.read_status(StatusRegister::Marcstate)?;
        MachineState::try_from(raw).map_err(invalid("MARCSTATE"))
    }
}
