//! RF-related registers
//!
//! This module contains registers related to RF configuration including:
//! - The 24-bit carrier frequency control word (FREQ2..FREQ0)
//! - Front end TX configuration (FREND0)
//! - The power amplifier table
//!
//! # Output power
//! Output power is selected by writing one of [`POWER_LEVELS`] into the PA
//! table. Amplitude keyed formats take the power from slot 0, frequency keyed
//! formats from slot 1; the other slot is always zero.

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use super::{Modulation, PA_TABLE_SIZE};
use crate::field::{composite_register, Field};

/// PA table settings for the eight selectable output power levels, weakest first.
///
/// Values are the 433 MHz recommendations: -30, -20, -15, -10, 0, 5, 7 and 10 dBm.
pub const POWER_LEVELS: [u8; 8] = [0x12, 0x0E, 0x1D, 0x34, 0x60, 0x84, 0xC8, 0xC0];

/// Frequency control word (address: 0x0D - 0x0F)
///
/// Read and written as one 3-byte burst starting at FREQ2, most significant
/// byte first.
#[register(0x0Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyWord {
    /// 24-bit control word
    pub value: u32,
}

impl Default for FrequencyWord {
    fn default() -> Self {
        Self { value: 0x1E_C4EC }
    }
}

impl FromByteArray for FrequencyWord {
    type Error = core::convert::Infallible;
    type Array = [u8; 3];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            value: u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]),
        })
    }
}

impl ToByteArray for FrequencyWord {
    type Error = core::convert::Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let [_, freq2, freq1, freq0] = self.value.to_be_bytes();
        Ok([freq2, freq1, freq0])
    }
}

/// Front end TX configuration register (address: 0x22)
///
/// | Bits | Field                 |
/// |------|-----------------------|
/// | 7:6  | unused                |
/// | 5:4  | LODIV_BUF_CURRENT_TX  |
/// | 3    | unused                |
/// | 2:0  | PA_POWER              |
#[register(0x22u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frend0(pub u8);

impl Frend0 {
    /// Not used
    pub const UNUSED_HIGH: Field = Field::new("FREND0[7:6]", 6, 2);
    /// Current in the TX LO buffer
    pub const LODIV_BUF_CURRENT_TX: Field = Field::new("LODIV_BUF_CURRENT_TX", 4, 2);
    /// Not used
    pub const UNUSED_LOW: Field = Field::new("FREND0[3]", 3, 1);
    /// Index of the highest PA table entry used
    pub const PA_POWER: Field = Field::new("PA_POWER", 0, 3);
}

impl Default for Frend0 {
    fn default() -> Self {
        Self(0x10)
    }
}

composite_register!(
    Frend0,
    "FREND0",
    [UNUSED_HIGH, LODIV_BUF_CURRENT_TX, UNUSED_LOW, PA_POWER]
);

/// Power amplifier table (address: 0x3E)
///
/// Always transferred as a full 8-entry burst.
#[register(0x3Eu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PaTable {
    /// Raw table entries
    pub entries: [u8; PA_TABLE_SIZE],
}

impl PaTable {
    /// Table slot carrying the output power for a modulation family.
    pub const fn active_slot(modulation: Modulation) -> usize {
        if modulation.is_amplitude_keyed() {
            0
        } else {
            1
        }
    }

    /// Builds a table with `setting` in the active slot of `modulation` and
    /// every other entry zero.
    pub fn with_setting(setting: u8, modulation: Modulation) -> Self {
        let mut entries = [0; PA_TABLE_SIZE];
        entries[Self::active_slot(modulation)] = setting;
        Self { entries }
    }

    /// The PA setting currently carried by the first two slots, if any.
    pub fn setting(&self) -> Option<u8> {
        match (self.entries[0], self.entries[1]) {
            (0, 0) => None,
            (0, setting) | (setting, _) => Some(setting),
        }
    }

    /// Index into [`POWER_LEVELS`] of the setting in `modulation`'s slot.
    pub fn level(&self, modulation: Modulation) -> Option<u8> {
        let setting = self.entries[Self::active_slot(modulation)];
        POWER_LEVELS
            .iter()
            .position(|&level| level == setting)
            .map(|index| index as u8)
    }
}

impl FromByteArray for PaTable {
    type Error = core::convert::Infallible;
    type Array = [u8; PA_TABLE_SIZE];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { entries: bytes })
    }
}

impl ToByteArray for PaTable {
    type Error = core::convert::Infallible;
    type Array = [u8; PA_TABLE_SIZE];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.entries)
    }
}
