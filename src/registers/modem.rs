//! Modem configuration registers
//!
//! This module contains the composite modem registers:
//! - Receive filter bandwidth and data rate exponent (MDMCFG4)
//! - DC blocking filter, modulation format, Manchester coding and sync mode (MDMCFG2)
//! - FEC, preamble length and channel spacing exponent (MDMCFG1)
//! - Frequency deviation (DEVIATN)
//!
//! The mantissa halves of data rate and channel spacing live in the plain
//! MDMCFG3 and MDMCFG0 registers. See [`units`](crate::units) for the
//! formulas that tie the fields to physical quantities.

use regiface::{register, ReadableRegister, WritableRegister};

use super::UnknownValue;
use crate::field::{composite_register, Field};

/// Modem configuration register (address: 0x10)
///
/// | Bits | Field     |
/// |------|-----------|
/// | 7:6  | CHANBW_E  |
/// | 5:4  | CHANBW_M  |
/// | 3:0  | DRATE_E   |
#[register(0x10u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MdmCfg4(pub u8);

impl MdmCfg4 {
    /// Channel filter bandwidth exponent
    pub const CHANBW_E: Field = Field::new("CHANBW_E", 6, 2);
    /// Channel filter bandwidth mantissa
    pub const CHANBW_M: Field = Field::new("CHANBW_M", 4, 2);
    /// Data rate exponent
    pub const DRATE_E: Field = Field::new("DRATE_E", 0, 4);
}

impl Default for MdmCfg4 {
    fn default() -> Self {
        Self(0x8C)
    }
}

composite_register!(MdmCfg4, "MDMCFG4", [CHANBW_E, CHANBW_M, DRATE_E]);

/// Modem configuration register (address: 0x12)
///
/// | Bits | Field           |
/// |------|-----------------|
/// | 7    | DEM_DCFILT_OFF  |
/// | 6:4  | MOD_FORMAT      |
/// | 3    | MANCHESTER_EN   |
/// | 2:0  | SYNC_MODE       |
#[register(0x12u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MdmCfg2(pub u8);

impl MdmCfg2 {
    /// Disable the digital DC blocking filter before the demodulator
    pub const DEM_DCFILT_OFF: Field = Field::new("DEM_DCFILT_OFF", 7, 1);
    /// Modulation format of the radio signal
    pub const MOD_FORMAT: Field = Field::new("MOD_FORMAT", 4, 3);
    /// Manchester encoding and decoding
    pub const MANCHESTER_EN: Field = Field::new("MANCHESTER_EN", 3, 1);
    /// Sync word qualifier mode
    pub const SYNC_MODE: Field = Field::new("SYNC_MODE", 0, 3);
}

impl Default for MdmCfg2 {
    fn default() -> Self {
        Self(0x02)
    }
}

composite_register!(
    MdmCfg2,
    "MDMCFG2",
    [DEM_DCFILT_OFF, MOD_FORMAT, MANCHESTER_EN, SYNC_MODE]
);

/// Modem configuration register (address: 0x13)
///
/// | Bits | Field         |
/// |------|---------------|
/// | 7    | FEC_EN        |
/// | 6:4  | NUM_PREAMBLE  |
/// | 3:2  | unused        |
/// | 1:0  | CHANSPC_E     |
#[register(0x13u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MdmCfg1(pub u8);

impl MdmCfg1 {
    /// Forward error correction with interleaving
    pub const FEC_EN: Field = Field::new("FEC_EN", 7, 1);
    /// Minimum number of preamble bytes to transmit
    pub const NUM_PREAMBLE: Field = Field::new("NUM_PREAMBLE", 4, 3);
    /// Not used
    pub const UNUSED: Field = Field::new("MDMCFG1[3:2]", 2, 2);
    /// Channel spacing exponent
    pub const CHANSPC_E: Field = Field::new("CHANSPC_E", 0, 2);
}

impl Default for MdmCfg1 {
    fn default() -> Self {
        Self(0x22)
    }
}

composite_register!(MdmCfg1, "MDMCFG1", [FEC_EN, NUM_PREAMBLE, UNUSED, CHANSPC_E]);

/// Modem deviation setting register (address: 0x15)
///
/// | Bits | Field        |
/// |------|--------------|
/// | 7    | unused       |
/// | 6:4  | DEVIATION_E  |
/// | 3    | unused       |
/// | 2:0  | DEVIATION_M  |
#[register(0x15u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deviatn(pub u8);

impl Deviatn {
    /// Not used
    pub const UNUSED_HIGH: Field = Field::new("DEVIATN[7]", 7, 1);
    /// Deviation exponent
    pub const DEVIATION_E: Field = Field::new("DEVIATION_E", 4, 3);
    /// Not used
    pub const UNUSED_LOW: Field = Field::new("DEVIATN[3]", 3, 1);
    /// Deviation mantissa
    pub const DEVIATION_M: Field = Field::new("DEVIATION_M", 0, 3);
}

impl Default for Deviatn {
    fn default() -> Self {
        Self(0x47)
    }
}

composite_register!(
    Deviatn,
    "DEVIATN",
    [UNUSED_HIGH, DEVIATION_E, UNUSED_LOW, DEVIATION_M]
);

/// Modulation format (MDMCFG2.MOD_FORMAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modulation {
    /// 2-FSK
    Fsk2 = 0x0,
    /// Gaussian FSK
    Gfsk = 0x1,
    /// ASK / OOK
    AskOok = 0x3,
    /// 4-FSK
    Fsk4 = 0x4,
    /// Minimum shift keying, only above 26 kBaud
    Msk = 0x7,
}

impl Modulation {
    /// Whether the format keys the carrier amplitude rather than its frequency.
    ///
    /// Selects which PA table slot carries the output power.
    pub const fn is_amplitude_keyed(self) -> bool {
        matches!(self, Self::AskOok)
    }
}

impl TryFrom<u8> for Modulation {
    type Error = UnknownValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Self::Fsk2),
            0x1 => Ok(Self::Gfsk),
            0x3 => Ok(Self::AskOok),
            0x4 => Ok(Self::Fsk4),
            0x7 => Ok(Self::Msk),
            invalid => Err(UnknownValue(invalid)),
        }
    }
}

/// Sync word qualifier mode (MDMCFG2.SYNC_MODE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyncMode {
    /// No preamble/sync
    None = 0x0,
    /// 15 of 16 sync word bits detected
    Bits15Of16 = 0x1,
    /// 16 of 16 sync word bits detected
    Bits16Of16 = 0x2,
    /// 30 of 32 sync word bits detected
    Bits30Of32 = 0x3,
    /// No preamble/sync, carrier-sense above threshold
    CarrierSense = 0x4,
    /// 15 of 16 plus carrier-sense above threshold
    Bits15Of16CarrierSense = 0x5,
    /// 16 of 16 plus carrier-sense above threshold
    Bits16Of16CarrierSense = 0x6,
    /// 30 of 32 plus carrier-sense above threshold
    Bits30Of32CarrierSense = 0x7,
}

impl TryFrom<u8> for SyncMode {
    type Error = UnknownValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Self::None),
            0x1 => Ok(Self::Bits15Of16),
            0x2 => Ok(Self::Bits16Of16),
            0x3 => Ok(Self::Bits30Of32),
            0x4 => Ok(Self::CarrierSense),
            0x5 => Ok(Self::Bits15Of16CarrierSense),
            0x6 => Ok(Self::Bits16Of16CarrierSense),
            0x7 => Ok(Self::Bits30Of32CarrierSense),
            invalid => Err(UnknownValue(invalid)),
        }
    }
}

/// Minimum number of preamble bytes transmitted (MDMCFG1.NUM_PREAMBLE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PreambleLength {
    /// 2 bytes
    Bytes2 = 0x0,
    /// 3 bytes
    Bytes3 = 0x1,
    /// 4 bytes
    Bytes4 = 0x2,
    /// 6 bytes
    Bytes6 = 0x3,
    /// 8 bytes
    Bytes8 = 0x4,
    /// 12 bytes
    Bytes12 = 0x5,
    /// 16 bytes
    Bytes16 = 0x6,
    /// 24 bytes
    Bytes24 = 0x7,
}

impl PreambleLength {
    /// Number of preamble bytes
    pub const fn bytes(self) -> u8 {
        match self {
            Self::Bytes2 => 2,
            Self::Bytes3 => 3,
            Self::Bytes4 => 4,
            Self::Bytes6 => 6,
            Self::Bytes8 => 8,
            Self::Bytes12 => 12,
            Self::Bytes16 => 16,
            Self::Bytes24 => 24,
        }
    }
}

impl TryFrom<u8> for PreambleLength {
    type Error = UnknownValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Self::Bytes2),
            0x1 => Ok(Self::Bytes3),
            0x2 => Ok(Self::Bytes4),
            0x3 => Ok(Self::Bytes6),
            0x4 => Ok(Self::Bytes8),
            0x5 => Ok(Self::Bytes12),
            0x6 => Ok(Self::Bytes16),
            0x7 => Ok(Self::Bytes24),
            invalid => Err(UnknownValue(invalid)),
        }
    }
}
