//! Typed configuration setters and getters.
//!
//! Composite registers are updated read-modify-write through their field
//! tables. Physical parameters go through the [`Oscillator`] encoders, and
//! are validated before anything is written.
//!
//! [`Oscillator`]: crate::units::Oscillator

use core::convert::Infallible;

use regiface::{ReadableRegister, WritableRegister};

use super::{invalid, Radio};
use crate::bus::BusTransport;
use crate::error::{Error, FieldOutOfRange, ParameterOutOfRange};
use crate::field::{CompositeRegister, Field};
use crate::registers::{
    AddressCheck, Config, Deviatn, FrequencyWord, Frend0, LengthConfig, MdmCfg1, MdmCfg2,
    MdmCfg4, Modulation, PaTable, PacketFormat, PktCtrl0, PktCtrl1, PreambleLength, SyncMode,
    SyncWord, POWER_LEVELS,
};
use crate::units::MantissaExponent;

/// GDOx_CFG: serial clock, synchronous to the data in serial mode
const GDO_SERIAL_CLOCK: u8 = 0x0B;
/// GDOx_CFG: asserts on sync word, deasserts at end of packet
const GDO_SYNC_WORD: u8 = 0x06;
/// GDOx_CFG: serial data output for asynchronous serial mode
const GDO_SERIAL_DATA: u8 = 0x0D;

const PACKET_MODE_RATE: MantissaExponent = MantissaExponent::new(0xF8, 11);
const SERIAL_MODE_RATE: MantissaExponent = MantissaExponent::new(0x93, 7);

impl<B: BusTransport> Radio<B> {
    /// Read-modify-write of one composite register.
    fn update<R>(
        &mut self,
        change: impl FnOnce(R) -> Result<R, FieldOutOfRange>,
    ) -> Result<(), Error<B::Error>>
    where
        R: CompositeRegister
            + ReadableRegister<IdType = u8, Error = Infallible>
            + WritableRegister<IdType = u8, Error = Infallible>,
    {
        let current: R = self.device.read_register()?;
        let updated = change(current)?;
        self.device.write_register(updated)
    }

    fn set_flag<R>(&mut self, field: Field, enabled: bool) -> Result<(), Error<B::Error>>
    where
        R: CompositeRegister
            + ReadableRegister<IdType = u8, Error = Infallible>
            + WritableRegister<IdType = u8, Error = Infallible>,
    {
        self.update(|reg: R| Ok(reg.with_flag(field, enabled)))
    }

    fn read_field<R>(&mut self, field: Field) -> Result<u8, Error<B::Error>>
    where
        R: CompositeRegister + ReadableRegister<IdType = u8, Error = Infallible>,
    {
        let reg: R = self.device.read_register()?;
        Ok(reg.field(field))
    }

    /// Sets the modulation format.
    ///
    /// Also rewrites FREND0 with PA_POWER 1 for ASK/OOK and 0 otherwise, and
    /// moves an already programmed output power into the PA table slot of
    /// the new modulation family.
    pub fn set_modulation(&mut self, modulation: Modulation) -> Result<(), Error<B::Error>> {
        self.update(|reg: MdmCfg2| reg.with(MdmCfg2::MOD_FORMAT, modulation as u8))?;
        log::debug!("modulation {:?} -> {modulation:?}", self.modulation);
        self.modulation = modulation;

        let pa_power = modulation.is_amplitude_keyed() as u8;
        let frend0 = Frend0::default().with(Frend0::PA_POWER, pa_power)?;
        self.device.write_register(frend0)?;

        let table: PaTable = self.device.read_register()?;
        if let Some(setting) = table.setting() {
            self.device
                .write_register(PaTable::with_setting(setting, modulation))?;
        }
        Ok(())
    }

    /// Reads the modulation format back from the chip.
    pub fn modulation(&mut self) -> Result<Modulation, Error<B::Error>> {
        let raw = self.read_field::<MdmCfg2>(MdmCfg2::MOD_FORMAT)?;
        let modulation = Modulation::try_from(raw).map_err(invalid(MdmCfg2::NAME))?;
        self.modulation = modulation;
        Ok(modulation)
    }

    /// Selects one of the eight output power levels, weakest first.
    ///
    /// The setting goes into the PA table slot of the current modulation
    /// family; the other slot is zeroed.
    pub fn set_power(&mut self, level: u8) -> Result<(), Error<B::Error>> {
        let setting = POWER_LEVELS
            .get(level as usize)
            .copied()
            .ok_or(ParameterOutOfRange {
                parameter: "power level",
                value: level as u64,
                min: 0,
                max: POWER_LEVELS.len() as u64 - 1,
            })?;

        self.device
            .write_register(PaTable::with_setting(setting, self.modulation))
    }

    /// Output power level, or `None` if the PA table holds no known level
    /// in the slot of the current modulation.
    pub fn power(&mut self) -> Result<Option<u8>, Error<B::Error>> {
        let table: PaTable = self.device.read_register()?;
        Ok(table.level(self.modulation))
    }

    /// Sets the base carrier frequency in Hz.
    pub fn set_frequency(&mut self, hz: u32) -> Result<(), Error<B::Error>> {
        let value = self.oscillator.encode_frequency(hz)?;
        self.device.write_register(FrequencyWord { value })
    }

    /// Base carrier frequency in Hz
    ///
    /// Wider than [`set_frequency`](Radio::set_frequency) accepts, since the
    /// FREQ registers can hold words above the synthesizer bands.
    pub fn frequency(&mut self) -> Result<u64, Error<B::Error>> {
        let word: FrequencyWord = self.device.read_register()?;
        Ok(self.oscillator.decode_frequency(word.value))
    }

    /// Sets the 16-bit sync word, high byte first.
    pub fn set_sync_word(&mut self, value: [u8; 2]) -> Result<(), Error<B::Error>> {
        self.device.write_register(SyncWord { value })
    }

    /// The 16-bit sync word, high byte first
    pub fn sync_word(&mut self) -> Result<[u8; 2], Error<B::Error>> {
        let word: SyncWord = self.device.read_register()?;
        Ok(word.value)
    }

    /// Sets the device address used for packet filtering.
    pub fn set_address(&mut self, address: u8) -> Result<(), Error<B::Error>> {
        self.device.write_config(Config::Addr, address)
    }

    /// Device address used for packet filtering
    pub fn address(&mut self) -> Result<u8, Error<B::Error>> {
        self.device.read_config(Config::Addr)
    }

    /// Sets the preamble quality estimator threshold (0 - 7).
    pub fn set_preamble_quality_threshold(&mut self, threshold: u8) -> Result<(), Error<B::Error>> {
        self.update(|reg: PktCtrl1| reg.with(PktCtrl1::PQT, threshold))
    }

    /// Preamble quality estimator threshold
    pub fn preamble_quality_threshold(&mut self) -> Result<u8, Error<B::Error>> {
        self.read_field::<PktCtrl1>(PktCtrl1::PQT)
    }

    /// Enables flushing the RX FIFO when a packet fails its CRC.
    pub fn set_crc_autoflush(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_flag::<PktCtrl1>(PktCtrl1::CRC_AUTOFLUSH, enabled)
    }

    /// Whether the RX FIFO is flushed on CRC failure
    pub fn crc_autoflush(&mut self) -> Result<bool, Error<B::Error>> {
        Ok(self.read_field::<PktCtrl1>(PktCtrl1::CRC_AUTOFLUSH)? == 1)
    }

    /// Enables appending RSSI and LQI/CRC status bytes to received packets.
    pub fn set_append_status(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_flag::<PktCtrl1>(PktCtrl1::APPEND_STATUS, enabled)
    }

    /// Whether status bytes are appended to received packets
    pub fn append_status(&mut self) -> Result<bool, Error<B::Error>> {
        Ok(self.read_field::<PktCtrl1>(PktCtrl1::APPEND_STATUS)? == 1)
    }

    /// Sets the address check performed on received packets.
    pub fn set_address_check(&mut self, check: AddressCheck) -> Result<(), Error<B::Error>> {
        self.update(|reg: PktCtrl1| reg.with(PktCtrl1::ADR_CHK, check as u8))
    }

    /// Address check performed on received packets
    pub fn address_check(&mut self) -> Result<AddressCheck, Error<B::Error>> {
        let raw = self.read_field::<PktCtrl1>(PktCtrl1::ADR_CHK)?;
        AddressCheck::try_from(raw).map_err(invalid(PktCtrl1::NAME))
    }

    /// Enables data whitening.
    pub fn set_data_whitening(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_flag::<PktCtrl0>(PktCtrl0::WHITE_DATA, enabled)
    }

    /// Whether data whitening is enabled
    pub fn data_whitening(&mut self) -> Result<bool, Error<B::Error>> {
        Ok(self.read_field::<PktCtrl0>(PktCtrl0::WHITE_DATA)? == 1)
    }

    /// Sets the packet format.
    pub fn set_packet_format(&mut self, format: PacketFormat) -> Result<(), Error<B::Error>> {
        self.update(|reg: PktCtrl0| reg.with(PktCtrl0::PKT_FORMAT, format as u8))
    }

    /// Packet format
    pub fn packet_format(&mut self) -> Result<PacketFormat, Error<B::Error>> {
        let raw = self.read_field::<PktCtrl0>(PktCtrl0::PKT_FORMAT)?;
        PacketFormat::try_from(raw).map_err(invalid(PktCtrl0::NAME))
    }

    /// Enables CRC calculation in TX and checking in RX.
    pub fn set_crc(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_flag::<PktCtrl0>(PktCtrl0::CRC_EN, enabled)
    }

    /// Whether CRC is enabled
    pub fn crc(&mut self) -> Result<bool, Error<B::Error>> {
        Ok(self.read_field::<PktCtrl0>(PktCtrl0::CRC_EN)? == 1)
    }

    /// Sets the packet length mode.
    pub fn set_length_config(&mut self, config: LengthConfig) -> Result<(), Error<B::Error>> {
        self.update(|reg: PktCtrl0| reg.with(PktCtrl0::LENGTH_CONFIG, config as u8))
    }

    /// Packet length mode
    pub fn length_config(&mut self) -> Result<LengthConfig, Error<B::Error>> {
        let raw = self.read_field::<PktCtrl0>(PktCtrl0::LENGTH_CONFIG)?;
        LengthConfig::try_from(raw).map_err(invalid(PktCtrl0::NAME))
    }

    /// Sets the packet length in fixed length mode, or the maximum length in
    /// variable length mode.
    pub fn set_packet_length(&mut self, length: u8) -> Result<(), Error<B::Error>> {
        self.device.write_config(Config::Pktlen, length)
    }

    /// Packet length
    pub fn packet_length(&mut self) -> Result<u8, Error<B::Error>> {
        self.device.read_config(Config::Pktlen)
    }

    /// Enables the digital DC blocking filter.
    pub fn set_dc_filter(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_flag::<MdmCfg2>(MdmCfg2::DEM_DCFILT_OFF, !enabled)
    }

    /// Whether the digital DC blocking filter is enabled
    pub fn dc_filter(&mut self) -> Result<bool, Error<B::Error>> {
        Ok(self.read_field::<MdmCfg2>(MdmCfg2::DEM_DCFILT_OFF)? == 0)
    }

    /// Enables Manchester coding.
    pub fn set_manchester(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_flag::<MdmCfg2>(MdmCfg2::MANCHESTER_EN, enabled)
    }

    /// Whether Manchester coding is enabled
    pub fn manchester(&mut self) -> Result<bool, Error<B::Error>> {
        Ok(self.read_field::<MdmCfg2>(MdmCfg2::MANCHESTER_EN)? == 1)
    }

    /// Sets the sync word qualifier mode.
    pub fn set_sync_mode(&mut self, mode: SyncMode) -> Result<(), Error<B::Error>> {
        self.update(|reg: MdmCfg2| reg.with(MdmCfg2::SYNC_MODE, mode as u8))
    }

    /// Sync word qualifier mode
    pub fn sync_mode(&mut self) -> Result<SyncMode, Error<B::Error>> {
        let raw = self.read_field::<MdmCfg2>(MdmCfg2::SYNC_MODE)?;
        SyncMode::try_from(raw).map_err(invalid(MdmCfg2::NAME))
    }

    /// Enables forward error correction.
    pub fn set_fec(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.set_flag::<MdmCfg1>(MdmCfg1::FEC_EN, enabled)
    }

    /// Whether forward error correction is enabled
    pub fn fec(&mut self) -> Result<bool, Error<B::Error>> {
        Ok(self.read_field::<MdmCfg1>(MdmCfg1::FEC_EN)? == 1)
    }

    /// Sets the minimum number of preamble bytes transmitted.
    pub fn set_preamble_length(&mut self, length: PreambleLength) -> Result<(), Error<B::Error>> {
        self.update(|reg: MdmCfg1| reg.with(MdmCfg1::NUM_PREAMBLE, length as u8))
    }

    /// Minimum number of preamble bytes transmitted
    pub fn preamble_length(&mut self) -> Result<PreambleLength, Error<B::Error>> {
        let raw = self.read_field::<MdmCfg1>(MdmCfg1::NUM_PREAMBLE)?;
        PreambleLength::try_from(raw).map_err(invalid(MdmCfg1::NAME))
    }

    /// Sets the channel number, multiplied by the channel spacing and added
    /// to the base frequency.
    pub fn set_channel(&mut self, channel: u8) -> Result<(), Error<B::Error>> {
        self.device.write_config(Config::Channr, channel)
    }

    /// Channel number
    pub fn channel(&mut self) -> Result<u8, Error<B::Error>> {
        self.device.read_config(Config::Channr)
    }

    /// Sets the channel spacing in Hz. Writes MDMCFG1.CHANSPC_E and MDMCFG0.
    pub fn set_channel_spacing(&mut self, hz: u32) -> Result<(), Error<B::Error>> {
        let encoded = self.oscillator.encode_channel_spacing(hz)?;
        self.update(|reg: MdmCfg1| reg.with(MdmCfg1::CHANSPC_E, encoded.exponent))?;
        self.device.write_config(Config::Mdmcfg0, encoded.mantissa)
    }

    /// Channel spacing in Hz
    pub fn channel_spacing(&mut self) -> Result<u32, Error<B::Error>> {
        let exponent = self.read_field::<MdmCfg1>(MdmCfg1::CHANSPC_E)?;
        let mantissa = self.device.read_config(Config::Mdmcfg0)?;
        Ok(self
            .oscillator
            .decode_channel_spacing(MantissaExponent::new(mantissa, exponent)))
    }

    /// Sets the receive filter bandwidth in Hz.
    pub fn set_rx_bandwidth(&mut self, hz: u32) -> Result<(), Error<B::Error>> {
        let encoded = self.oscillator.encode_rx_bandwidth(hz)?;
        self.update(|reg: MdmCfg4| {
            reg.with(MdmCfg4::CHANBW_E, encoded.exponent)?
                .with(MdmCfg4::CHANBW_M, encoded.mantissa)
        })
    }

    /// Receive filter bandwidth in Hz
    pub fn rx_bandwidth(&mut self) -> Result<u32, Error<B::Error>> {
        let reg: MdmCfg4 = self.device.read_register()?;
        let encoded = MantissaExponent::new(
            reg.field(MdmCfg4::CHANBW_M),
            reg.field(MdmCfg4::CHANBW_E),
        );
        Ok(self.oscillator.decode_rx_bandwidth(encoded))
    }

    /// Sets the data rate in baud. Writes MDMCFG4.DRATE_E and MDMCFG3.
    pub fn set_data_rate(&mut self, baud: u32) -> Result<(), Error<B::Error>> {
        let encoded = self.oscillator.encode_data_rate(baud)?;
        self.update(|reg: MdmCfg4| reg.with(MdmCfg4::DRATE_E, encoded.exponent))?;
        self.device.write_config(Config::Mdmcfg3, encoded.mantissa)
    }

    /// Data rate in baud
    pub fn data_rate(&mut self) -> Result<u32, Error<B::Error>> {
        let exponent = self.read_field::<MdmCfg4>(MdmCfg4::DRATE_E)?;
        let mantissa = self.device.read_config(Config::Mdmcfg3)?;
        Ok(self
            .oscillator
            .decode_data_rate(MantissaExponent::new(mantissa, exponent)))
    }

    /// Switches between buffered packet mode and asynchronous serial mode.
    ///
    /// Packet mode routes the serial clock to GDO2 and sync word detection
    /// to GDO0, sends variable length packets with CRC, and runs at about
    /// 100 kBaud. Serial mode routes the data output to both pins with an
    /// infinite length asynchronous format at about 5 kBaud. The receive
    /// bandwidth is kept; data whitening is turned off in both modes.
    pub fn set_packet_mode(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        let (gdo2, gdo0, format, length, crc, rate) = if enabled {
            (
                GDO_SERIAL_CLOCK,
                GDO_SYNC_WORD,
                PacketFormat::Normal,
                LengthConfig::Variable,
                true,
                PACKET_MODE_RATE,
            )
        } else {
            (
                GDO_SERIAL_DATA,
                GDO_SERIAL_DATA,
                PacketFormat::AsynchronousSerial,
                LengthConfig::Infinite,
                false,
                SERIAL_MODE_RATE,
            )
        };

        self.device.write_config(Config::Iocfg2, gdo2)?;
        self.device.write_config(Config::Iocfg0, gdo0)?;
        let pktctrl0 = PktCtrl0::from_bits(0)
            .with(PktCtrl0::PKT_FORMAT, format as u8)?
            .with_flag(PktCtrl0::CRC_EN, crc)
            .with(PktCtrl0::LENGTH_CONFIG, length as u8)?;
        self.device.write_register(pktctrl0)?;
        self.device.write_config(Config::Mdmcfg3, rate.mantissa)?;
        self.update(|reg: MdmCfg4| reg.with(MdmCfg4::DRATE_E, rate.exponent))?;

        log::debug!("packet mode {enabled}");
        Ok(())
    }

    /// Sets the frequency deviation in Hz.
    pub fn set_deviation(&mut self, hz: u32) -> Result<(), Error<B::Error>> {
        let encoded = self.oscillator.encode_deviation(hz)?;
        let reg = Deviatn::from_bits(0)
            .with(Deviatn::DEVIATION_E, encoded.exponent)?
            .with(Deviatn::DEVIATION_M, encoded.mantissa)?;
        self.device.write_register(reg)
    }

    /// Frequency deviation in Hz
    pub fn deviation(&mut self) -> Result<u32, Error<B::Error>> {
        let reg: Deviatn = self.device.read_register()?;
        let encoded = MantissaExponent::new(
            reg.field(Deviatn::DEVIATION_M),
            reg.field(Deviatn::DEVIATION_E),
        );
        Ok(self.oscillator.decode_deviation(encoded))
    }
}
