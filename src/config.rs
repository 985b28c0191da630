//! Controller configuration
//!
//! Loading this from a file, and reloading it, is up to the host
//! application. With the `serde` feature the struct can be deserialized
//! directly; missing keys fall back to [`RadioConfig::default`].

use crate::error::ParameterOutOfRange;
use crate::units::Oscillator;

/// Settings the controller needs before it can talk to the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadioConfig {
    /// Bus channel passed to [`BusTransport::open`](crate::BusTransport::open)
    pub spi_channel: u8,
    /// Bus clock in Hz
    pub bit_rate: u32,
    /// GPIO line pulsed on reset
    pub reset_line: u8,
    /// Reference oscillator frequency in Hz
    pub oscillator_hz: u32,
    /// Delay between status polls while transmitting or receiving, in µs
    pub poll_interval_us: u32,
    /// How long the reset line is held low, in µs
    pub reset_hold_us: u32,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            spi_channel: 0,
            bit_rate: 500_000,
            reset_line: 8,
            oscillator_hz: Oscillator::CC1101_DEFAULT.hz(),
            poll_interval_us: 1_000,
            reset_hold_us: 20_000,
        }
    }
}

impl RadioConfig {
    /// The configured reference oscillator
    ///
    /// # Errors
    /// * `ParameterOutOfRange` - `oscillator_hz` is not a CC1101 crystal
    ///   frequency, see [`OSCILLATOR_RANGE`](crate::units::OSCILLATOR_RANGE)
    pub fn oscillator(&self) -> Result<Oscillator, ParameterOutOfRange> {
        Oscillator::new(self.oscillator_hz)
    }
}
