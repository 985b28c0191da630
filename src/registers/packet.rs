//! Packet handling registers
//!
//! This module contains registers for configuring packet handling features including:
//! - Preamble quality threshold and address filtering (PKTCTRL1)
//! - Data whitening, packet format, CRC and length mode (PKTCTRL0)
//! - Sync word detection (SYNC1/SYNC0)
//!
//! These registers define the framing the chip applies to the FIFO contents
//! on the air. Length and status byte handling in [`Radio::receive`] follows
//! the APPEND_STATUS setting read back from PKTCTRL1.
//!
//! [`Radio::receive`]: crate::Radio::receive

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use super::UnknownValue;
use crate::field::{composite_register, Field};

/// Packet automation control register (address: 0x07)
///
/// | Bits | Field          |
/// |------|----------------|
/// | 7:5  | PQT            |
/// | 4    | unused         |
/// | 3    | CRC_AUTOFLUSH  |
/// | 2    | APPEND_STATUS  |
/// | 1:0  | ADR_CHK        |
#[register(0x07u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PktCtrl1(pub u8);

impl PktCtrl1 {
    /// Preamble quality estimator threshold
    pub const PQT: Field = Field::new("PQT", 5, 3);
    /// Not used
    pub const UNUSED: Field = Field::new("PKTCTRL1[4]", 4, 1);
    /// Flush the RX FIFO automatically when the CRC is not OK
    pub const CRC_AUTOFLUSH: Field = Field::new("CRC_AUTOFLUSH", 3, 1);
    /// Append RSSI and LQI/CRC_OK status bytes to the payload
    pub const APPEND_STATUS: Field = Field::new("APPEND_STATUS", 2, 1);
    /// Address check configuration
    pub const ADR_CHK: Field = Field::new("ADR_CHK", 0, 2);
}

impl Default for PktCtrl1 {
    fn default() -> Self {
        Self(0x04)
    }
}

composite_register!(
    PktCtrl1,
    "PKTCTRL1",
    [PQT, UNUSED, CRC_AUTOFLUSH, APPEND_STATUS, ADR_CHK]
);

/// Packet automation control register (address: 0x08)
///
/// | Bits | Field          |
/// |------|----------------|
/// | 7    | unused         |
/// | 6    | WHITE_DATA     |
/// | 5:4  | PKT_FORMAT     |
/// | 3    | unused         |
/// | 2    | CRC_EN         |
/// | 1:0  | LENGTH_CONFIG  |
#[register(0x08u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PktCtrl0(pub u8);

impl PktCtrl0 {
    /// Not used
    pub const UNUSED_HIGH: Field = Field::new("PKTCTRL0[7]", 7, 1);
    /// Data whitening on TX and de-whitening on RX
    pub const WHITE_DATA: Field = Field::new("WHITE_DATA", 6, 1);
    /// Packet format of RX and TX data
    pub const PKT_FORMAT: Field = Field::new("PKT_FORMAT", 4, 2);
    /// Not used
    pub const UNUSED_LOW: Field = Field::new("PKTCTRL0[3]", 3, 1);
    /// CRC calculation in TX and CRC check in RX
    pub const CRC_EN: Field = Field::new("CRC_EN", 2, 1);
    /// Packet length configuration
    pub const LENGTH_CONFIG: Field = Field::new("LENGTH_CONFIG", 0, 2);
}

impl Default for PktCtrl0 {
    fn default() -> Self {
        Self(0x45)
    }
}

composite_register!(
    PktCtrl0,
    "PKTCTRL0",
    [UNUSED_HIGH, WHITE_DATA, PKT_FORMAT, UNUSED_LOW, CRC_EN, LENGTH_CONFIG]
);

/// Sync word register pair (address: 0x04 - 0x05)
///
/// Read and written as one burst starting at SYNC1, so the high byte comes
/// first on the bus.
#[register(0x04u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncWord {
    /// `[SYNC1, SYNC0]`
    pub value: [u8; 2],
}

impl Default for SyncWord {
    fn default() -> Self {
        Self {
            value: [0xD3, 0x91],
        }
    }
}

impl FromByteArray for SyncWord {
    type Error = core::convert::Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes })
    }
}

impl ToByteArray for SyncWord {
    type Error = core::convert::Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.value)
    }
}

/// Address check performed on received packets (PKTCTRL1.ADR_CHK)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressCheck {
    /// No address check
    Disabled = 0x0,
    /// Address check, no broadcast
    Address = 0x1,
    /// Address check and 0x00 broadcast
    AddressAndZeroBroadcast = 0x2,
    /// Address check and 0x00 and 0xFF broadcast
    AddressAndBothBroadcasts = 0x3,
}

impl TryFrom<u8> for AddressCheck {
    type Error = UnknownValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Self::Disabled),
            0x1 => Ok(Self::Address),
            0x2 => Ok(Self::AddressAndZeroBroadcast),
            0x3 => Ok(Self::AddressAndBothBroadcasts),
            invalid => Err(UnknownValue(invalid)),
        }
    }
}

/// Format of RX and TX data (PKTCTRL0.PKT_FORMAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketFormat {
    /// Normal mode, FIFOs for RX and TX
    Normal = 0x0,
    /// Synchronous serial mode on the GDO pins
    SynchronousSerial = 0x1,
    /// Random TX mode, sends random data using PN9 generator
    RandomTx = 0x2,
    /// Asynchronous serial mode on the GDO pins
    AsynchronousSerial = 0x3,
}

impl TryFrom<u8> for PacketFormat {
    type Error = UnknownValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Self::Normal),
            0x1 => Ok(Self::SynchronousSerial),
            0x2 => Ok(Self::RandomTx),
            0x3 => Ok(Self::AsynchronousSerial),
            invalid => Err(UnknownValue(invalid)),
        }
    }
}

/// Packet length mode (PKTCTRL0.LENGTH_CONFIG)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthConfig {
    /// Fixed length, configured in PKTLEN
    Fixed = 0x0,
    /// Variable length, set by the first byte after the sync word
    Variable = 0x1,
    /// Infinite packet length
    Infinite = 0x2,
}

impl TryFrom<u8> for LengthConfig {
    type Error = UnknownValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Self::Fixed),
            0x1 => Ok(Self::Variable),
            0x2 => Ok(Self::Infinite),
            invalid => Err(UnknownValue(invalid)),
        }
    }
}
