#![no_std]
//! CC1101 Radio Driver
//!
//! This crate provides a type-safe interface for the Texas Instruments CC1101
//! sub-GHz radio transceiver. The CC1101 is a low cost, low power transceiver
//! for the 315, 433, 868 and 915 MHz ISM/SRD bands, controlled entirely
//! through a small SPI register file.
//!
//! # Features
//! - Frequency bands: 300-348 MHz, 387-464 MHz, 779-928 MHz
//! - Modulation support: 2-FSK, GFSK, 4-FSK, MSK, ASK/OOK
//! - Data rate: 0.6-500 kBaud (registers span roughly 25 Bd to 1.6 MBd)
//! - Output power: -30 to +10 dBm in eight steps
//! - 64-byte TX and RX FIFOs with hardware packet handling (sync word, CRC,
//!   address filtering, whitening, FEC)
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`bus`]: The [`BusTransport`] the driver talks through, plus an
//!   embedded-hal backed implementation
//!
//! - [`frame`]: Header byte encoding of single, burst, strobe and status
//!   transactions
//!
//! - [`device`]: Register level interface for hardware interaction
//!   - One framed bus transaction per call
//!   - Typed register access through `regiface`
//!
//! - [`registers`]: Register definitions for direct hardware access
//!   - Address catalog of configuration registers, strobes, status registers
//!     and the PA table / FIFO pointers
//!   - Composite registers with their canonical [`field`] tables
//!
//! - [`units`]: Mantissa/exponent conversions between physical units and
//!   register encodings
//!
//! - [`radio`]: The [`Radio`] controller with typed configuration and the
//!   bounded transmit/receive loops
//!
//! - [`packet`]: Received packets and their appended RSSI/LQI status
//!
//! # Usage
//! The main entry point is [`Radio::initialize`], which opens a bus session
//! and checks the chip answers. Configuration follows a simple sequence:
//!
//! 1. Initialize the [`Radio`] with a transport and a [`RadioConfig`]
//! 2. Reset the chip to its power-on defaults
//! 3. Set modulation before output power, the PA table slot depends on it
//! 4. Set frequency, data rate, deviation and bandwidth
//! 5. Configure packet handling
//! 6. Calibrate, then transmit or enter RX and receive
//!
//! # Important Notes
//! - The controller caches only the modulation format; every getter reads
//!   the chip
//! - Field setters are read-modify-write and not atomic
//! - Status registers are only reachable with the burst bit set
//! - Transmit and receive time out by counting poll delays, not wall time
//!
//! # Example
//! ```no_run
//! use core::time::Duration;
//! use embedded_hal::delay::DelayNs;
//! use cc1101::{BusTransport, Error, Modulation, Radio, RadioConfig};
//!
//! fn send<B: BusTransport, D: DelayNs>(bus: B, delay: &mut D) -> Result<B, Error<B::Error>> {
//!     let mut radio = Radio::initialize(bus, &RadioConfig::default())?;
//!     radio.reset(delay)?;
//!
//!     radio.set_modulation(Modulation::Gfsk)?;
//!     radio.set_power(4)?;
//!     radio.set_frequency(433_920_000)?;
//!     radio.set_data_rate(38_400)?;
//!     radio.calibrate()?;
//!
//!     radio.transmit(&[0x03, 0xAA, 0xBB, 0xCC], Duration::from_millis(100), delay)?;
//!     radio.close()
//! }
//! ```

extern crate alloc;

pub mod bus;
pub mod config;
pub mod device;
pub mod error;
pub mod field;
pub mod frame;
pub mod packet;
pub mod poll;
pub mod radio;
pub mod registers;
pub mod units;

pub use bus::{BusTransport, SpiTransport, SpiTransportError};
pub use config::RadioConfig;
pub use device::Device;
pub use error::{Error, FieldOutOfRange, ParameterOutOfRange};
pub use field::{CompositeRegister, Field};
pub use frame::Frame;
pub use packet::{PacketStatus, ReceivedPacket};
pub use radio::Radio;
pub use registers::*;
pub use units::{MantissaExponent, Oscillator};
