//! Conversions between physical quantities and register encodings
//!
//! The CC1101 derives every radio parameter from its reference oscillator.
//! With `f_xosc` the oscillator frequency:
//!
//! | Parameter         | Formula                                            | Registers                 |
//! |-------------------|----------------------------------------------------|---------------------------|
//! | Carrier frequency | `f_xosc / 2^16 * FREQ`                             | FREQ2..FREQ0              |
//! | Data rate         | `(256 + DRATE_M) * 2^DRATE_E * f_xosc / 2^28`      | MDMCFG3, MDMCFG4[3:0]     |
//! | RX bandwidth      | `f_xosc / (8 * (4 + CHANBW_M) * 2^CHANBW_E)`       | MDMCFG4[7:4]              |
//! | Deviation         | `f_xosc / 2^17 * (8 + DEVIATION_M) * 2^DEVIATION_E` | DEVIATN                  |
//! | Channel spacing   | `f_xosc / 2^18 * (256 + CHANSPC_M) * 2^CHANSPC_E`  | MDMCFG0, MDMCFG1[1:0]     |
//!
//! All arithmetic is integer: values are in Hz (or baud), encodings round to
//! the nearest representable step and decodings round to the nearest Hz.
//! Every encoder rejects inputs outside the range the registers can express
//! instead of clamping them.

use core::ops::RangeInclusive;

use crate::error::ParameterOutOfRange;

/// Frequency bands supported by the synthesizer, in Hz.
pub const FREQUENCY_BANDS: [RangeInclusive<u32>; 3] = [
    300_000_000..=348_000_000,
    387_000_000..=464_000_000,
    779_000_000..=928_000_000,
];

/// Crystal frequencies the CC1101 is specified for, in Hz.
pub const OSCILLATOR_RANGE: RangeInclusive<u32> = 26_000_000..=27_000_000;

/// Largest value of the 24-bit frequency control word
const FREQUENCY_WORD_MAX: u64 = 0xFF_FFFF;

/// A mantissa/exponent register pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MantissaExponent {
    /// Linear mantissa
    pub mantissa: u8,
    /// Power-of-two exponent
    pub exponent: u8,
}

impl MantissaExponent {
    /// Pairs a mantissa with an exponent.
    pub const fn new(mantissa: u8, exponent: u8) -> Self {
        Self { mantissa, exponent }
    }
}

/// Reference oscillator the chip derives its timing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct Oscillator {
    hz: u32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::CC1101_DEFAULT
    }
}

fn div_round(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}

fn div_ceil(numerator: u64, denominator: u64) -> u64 {
    numerator.div_ceil(denominator)
}

fn check(
    parameter: &'static str,
    value: u32,
    range: RangeInclusive<u32>,
) -> Result<(), ParameterOutOfRange> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ParameterOutOfRange {
            parameter,
            value: value as u64,
            min: *range.start() as u64,
            max: *range.end() as u64,
        })
    }
}

impl TryFrom<u32> for Oscillator {
    type Error = ParameterOutOfRange;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        Self::new(hz)
    }
}

impl From<Oscillator> for u32 {
    fn from(oscillator: Oscillator) -> Self {
        oscillator.hz
    }
}

impl Oscillator {
    /// The 26 MHz crystal used on most CC1101 modules
    pub const CC1101_DEFAULT: Self = Self { hz: 26_000_000 };

    /// An oscillator running at `hz`.
    ///
    /// # Errors
    /// * `ParameterOutOfRange` - `hz` is outside [`OSCILLATOR_RANGE`]
    pub fn new(hz: u32) -> Result<Self, ParameterOutOfRange> {
        check("oscillator", hz, OSCILLATOR_RANGE)?;
        Ok(Self { hz })
    }

    /// Oscillator frequency in Hz
    pub const fn hz(&self) -> u32 {
        self.hz
    }

    fn xosc(&self) -> u64 {
        self.hz as u64
    }

    /// Size of one frequency control word step in Hz, rounded.
    pub fn frequency_step(&self) -> u32 {
        div_round(self.xosc(), 1 << 16) as u32
    }

    /// Encodes a carrier frequency into the 24-bit FREQ control word.
    ///
    /// The frequency must lie in one of the [`FREQUENCY_BANDS`]. Outside
    /// them the error reports the overall 300 - 928 MHz span.
    pub fn encode_frequency(&self, hz: u32) -> Result<u32, ParameterOutOfRange> {
        let span = *FREQUENCY_BANDS[0].start()..=*FREQUENCY_BANDS[2].end();
        if !FREQUENCY_BANDS.iter().any(|band| band.contains(&hz)) {
            return Err(ParameterOutOfRange {
                parameter: "frequency",
                value: hz as u64,
                min: *span.start() as u64,
                max: *span.end() as u64,
            });
        }

        let word = div_round((hz as u64) << 16, self.xosc());
        if word > FREQUENCY_WORD_MAX {
            return Err(ParameterOutOfRange {
                parameter: "frequency",
                value: hz as u64,
                min: *span.start() as u64,
                max: (FREQUENCY_WORD_MAX * self.xosc()) >> 16,
            });
        }
        log::debug!("frequency {hz} Hz -> FREQ {word:#08x}");
        Ok(word as u32)
    }

    /// Carrier frequency in Hz of a FREQ control word.
    ///
    /// Words above the synthesizer bands decode past `u32::MAX` Hz.
    pub fn decode_frequency(&self, word: u32) -> u64 {
        div_round(u64::from(word) * self.xosc(), 1 << 16)
    }

    /// Data rates, in baud, expressible with `DRATE_E` in 0..=15.
    pub fn data_rate_range(&self) -> RangeInclusive<u32> {
        let min = div_ceil(256 * self.xosc(), 1 << 28);
        let max = (511 * self.xosc()) >> 13;
        min as u32..=max as u32
    }

    /// Encodes a data rate into `DRATE_M` / `DRATE_E`.
    ///
    /// Walks the exponent upward from zero and picks the first one whose
    /// mantissa fits in eight bits, so the result always uses the smallest
    /// exponent that can represent the rate.
    pub fn encode_data_rate(&self, baud: u32) -> Result<MantissaExponent, ParameterOutOfRange> {
        check("data rate", baud, self.data_rate_range())?;

        for exponent in 0..=15u8 {
            let scaled = div_round((baud as u64) << (28 - exponent), self.xosc());
            if scaled <= 511 {
                let encoded = MantissaExponent::new((scaled - 256) as u8, exponent);
                log::debug!("data rate {baud} Bd -> {encoded:?}");
                return Ok(encoded);
            }
        }

        let range = self.data_rate_range();
        Err(ParameterOutOfRange {
            parameter: "data rate",
            value: baud as u64,
            min: *range.start() as u64,
            max: *range.end() as u64,
        })
    }

    /// Data rate in baud of a `DRATE_M` / `DRATE_E` pair.
    pub fn decode_data_rate(&self, encoded: MantissaExponent) -> u32 {
        let steps = (256 + encoded.mantissa as u64) << encoded.exponent;
        div_round(steps * self.xosc(), 1 << 28) as u32
    }

    /// Receive filter bandwidths, in Hz, expressible with `CHANBW_M` / `CHANBW_E`.
    pub fn rx_bandwidth_range(&self) -> RangeInclusive<u32> {
        (self.xosc() / 448) as u32..=(self.xosc() / 32) as u32
    }

    /// Encodes a receive filter bandwidth into `CHANBW_M` / `CHANBW_E`.
    ///
    /// Two bounded passes starting from the narrowest filter: the first
    /// halves the target while it exceeds the widest filter of the current
    /// exponent, the second divides it by 1.25 while it exceeds the narrowest
    /// mantissa step.
    pub fn encode_rx_bandwidth(&self, hz: u32) -> Result<MantissaExponent, ParameterOutOfRange> {
        check("rx bandwidth", hz, self.rx_bandwidth_range())?;

        let mut remaining = hz as u64;
        let mut exponent = 3u8;
        for _ in 0..3 {
            if remaining * 256 <= self.xosc() {
                break;
            }
            remaining /= 2;
            exponent -= 1;
        }

        let mut mantissa = 3u8;
        for _ in 0..3 {
            if remaining * 448 <= self.xosc() {
                break;
            }
            remaining = remaining * 4 / 5;
            mantissa -= 1;
        }

        let encoded = MantissaExponent::new(mantissa, exponent);
        log::debug!("rx bandwidth {hz} Hz -> {encoded:?}");
        Ok(encoded)
    }

    /// Receive filter bandwidth in Hz of a `CHANBW_M` / `CHANBW_E` pair.
    pub fn decode_rx_bandwidth(&self, encoded: MantissaExponent) -> u32 {
        let divider = (8 * (4 + encoded.mantissa as u64)) << encoded.exponent;
        div_round(self.xosc(), divider) as u32
    }

    /// Frequency deviations, in Hz, expressible with `DEVIATION_M` / `DEVIATION_E`.
    pub fn deviation_range(&self) -> RangeInclusive<u32> {
        let min = div_ceil(8 * self.xosc(), 1 << 17);
        let max = ((15 << 7) * self.xosc()) >> 17;
        min as u32..=max as u32
    }

    /// Encodes a frequency deviation into `DEVIATION_M` / `DEVIATION_E`.
    ///
    /// Walks the deviation table in increasing order and returns the first
    /// entry that meets or exceeds the target.
    pub fn encode_deviation(&self, hz: u32) -> Result<MantissaExponent, ParameterOutOfRange> {
        check("deviation", hz, self.deviation_range())?;

        let target = (hz as u64) << 17;
        for exponent in 0..=7u8 {
            for mantissa in 0..=7u8 {
                if ((8 + mantissa as u64) << exponent) * self.xosc() >= target {
                    let encoded = MantissaExponent::new(mantissa, exponent);
                    log::debug!("deviation {hz} Hz -> {encoded:?}");
                    return Ok(encoded);
                }
            }
        }

        let range = self.deviation_range();
        Err(ParameterOutOfRange {
            parameter: "deviation",
            value: hz as u64,
            min: *range.start() as u64,
            max: *range.end() as u64,
        })
    }

    /// Frequency deviation in Hz of a `DEVIATION_M` / `DEVIATION_E` pair.
    pub fn decode_deviation(&self, encoded: MantissaExponent) -> u32 {
        let steps = (8 + encoded.mantissa as u64) << encoded.exponent;
        div_round(steps * self.xosc(), 1 << 17) as u32
    }

    /// Channel spacings, in Hz, expressible with `CHANSPC_M` / `CHANSPC_E`.
    pub fn channel_spacing_range(&self) -> RangeInclusive<u32> {
        let min = div_ceil(256 * self.xosc(), 1 << 18);
        let max = (511 * 8 * self.xosc()) >> 18;
        min as u32..=max as u32
    }

    /// Encodes a channel spacing into `CHANSPC_M` / `CHANSPC_E`, smallest
    /// exponent first.
    pub fn encode_channel_spacing(
        &self,
        hz: u32,
    ) -> Result<MantissaExponent, ParameterOutOfRange> {
        check("channel spacing", hz, self.channel_spacing_range())?;

        for exponent in 0..=3u8 {
            let scaled = div_round((hz as u64) << (18 - exponent), self.xosc());
            if scaled <= 511 {
                let encoded = MantissaExponent::new((scaled - 256) as u8, exponent);
                log::debug!("channel spacing {hz} Hz -> {encoded:?}");
                return Ok(encoded);
            }
        }

        let range = self.channel_spacing_range();
        Err(ParameterOutOfRange {
            parameter: "channel spacing",
            value: hz as u64,
            min: *range.start() as u64,
            max: *range.end() as u64,
        })
    }

    /// Channel spacing in Hz of a `CHANSPC_M` / `CHANSPC_E` pair.
    pub fn decode_channel_spacing(&self, encoded: MantissaExponent) -> u32 {
        let steps = (256 + encoded.mantissa as u64) << encoded.exponent;
        div_round(steps * self.xosc(), 1 << 18) as u32
    }
}
