//! Configuration surface of the radio controller against a simulated chip.

mod common;

use cc1101::{
    AddressCheck, Error, LengthConfig, MachineState, Modulation, PacketFormat, PreambleLength,
    Radio, RadioConfig, SyncMode, POWER_LEVELS,
};
use common::{chip, BusFault, Monitor, RecordingDelay, SimulatedChip, VERSION};
use embedded_hal::digital::PinState;

const PKTCTRL1: u8 = 0x07;
const PKTCTRL0: u8 = 0x08;
const MDMCFG4: u8 = 0x10;
const MDMCFG3: u8 = 0x11;
const MDMCFG2: u8 = 0x12;
const MDMCFG1: u8 = 0x13;
const MDMCFG0: u8 = 0x14;
const DEVIATN: u8 = 0x15;
const FREND0: u8 = 0x22;

fn radio() -> (Radio<SimulatedChip>, Monitor) {
    let (bus, monitor) = chip();
    let radio = Radio::initialize(bus, &RadioConfig::default()).unwrap();
    monitor.take_frames();
    (radio, monitor)
}

#[test]
fn initialize_opens_session_and_checks_version() {
    let (bus, monitor) = chip();
    let config = RadioConfig {
        spi_channel: 1,
        bit_rate: 250_000,
        ..RadioConfig::default()
    };
    let mut radio = Radio::initialize(bus, &config).unwrap();

    assert_eq!(monitor.state().opened, Some((1, 250_000)));
    assert_eq!(monitor.take_headers()[0], 0xF1);
    assert_eq!(radio.version().unwrap(), VERSION);
    assert_eq!(radio.part_number().unwrap(), 0x00);
}

#[test]
fn zero_version_means_no_device() {
    let (bus, monitor) = chip();
    monitor.state().version = 0x00;

    let result = Radio::initialize(bus, &RadioConfig::default());
    assert!(matches!(result, Err(Error::DeviceNotResponding)));
    assert!(monitor.state().closed);
}

#[test]
fn bus_failure_is_propagated() {
    let (mut radio, monitor) = radio();
    monitor.state().fail = true;

    assert!(matches!(radio.channel(), Err(Error::Bus(BusFault))));
    assert!(matches!(radio.calibrate(), Err(Error::Bus(BusFault))));
}

#[test]
fn unusable_oscillator_is_rejected_before_opening() {
    let (bus, monitor) = chip();
    let config = RadioConfig {
        oscillator_hz: 0,
        ..RadioConfig::default()
    };

    let result = Radio::initialize(bus, &config);

    assert!(matches!(
        result,
        Err(Error::ParameterOutOfRange(ref err)) if err.parameter == "oscillator"
    ));
    assert_eq!(monitor.state().opened, None);
    assert!(monitor.take_frames().is_empty());
}

#[test]
fn close_returns_transport() {
    let (radio, monitor) = radio();
    let _bus = radio.close().unwrap();
    assert!(monitor.state().closed);
}

#[test]
fn reset_pulses_line_then_strobes() {
    let (mut radio, monitor) = radio();
    monitor.set_config(MDMCFG2, 0x32);
    let mut delay = RecordingDelay::default();

    radio.reset(&mut delay).unwrap();

    assert_eq!(
        monitor.state().lines,
        vec![(8, PinState::Low), (8, PinState::High)]
    );
    assert_eq!(delay.total_us(), 20_000);
    assert_eq!(monitor.take_frames(), vec![vec![0x30]]);
    assert_eq!(monitor.config(MDMCFG2), 0x02);
}

#[test]
fn strobes_are_bare_opcodes() {
    let (mut radio, monitor) = radio();
    radio.calibrate().unwrap();
    radio.idle().unwrap();
    radio.enter_rx().unwrap();
    radio.enter_tx().unwrap();
    radio.flush_rx().unwrap();
    radio.flush_tx().unwrap();

    assert_eq!(
        monitor.take_frames(),
        vec![
            vec![0x33],
            vec![0x36],
            vec![0x34],
            vec![0x35],
            vec![0x3A],
            vec![0x3B]
        ]
    );
}

#[test]
fn modulation_round_trips_and_programs_front_end() {
    let (mut radio, monitor) = radio();

    radio.set_modulation(Modulation::AskOok).unwrap();
    assert_eq!(monitor.config(MDMCFG2) & 0x70, 0x30);
    assert_eq!(monitor.config(FREND0), 0x11);
    assert_eq!(radio.modulation().unwrap(), Modulation::AskOok);

    radio.set_modulation(Modulation::Gfsk).unwrap();
    assert_eq!(monitor.config(FREND0), 0x10);
    assert_eq!(radio.modulation().unwrap(), Modulation::Gfsk);
    // sync mode and Manchester bits untouched
    assert_eq!(monitor.config(MDMCFG2) & 0x8F, 0x02);
}

#[test]
fn reserved_modulation_code_is_reported() {
    let (mut radio, monitor) = radio();
    monitor.set_config(MDMCFG2, 0x22);

    assert!(matches!(
        radio.modulation(),
        Err(Error::InvalidRegisterValue {
            register: "MDMCFG2",
            value: 2
        })
    ));
}

#[test]
fn power_uses_one_slot_per_family() {
    let (mut radio, monitor) = radio();

    for modulation in [
        Modulation::AskOok,
        Modulation::Fsk2,
        Modulation::Gfsk,
        Modulation::Fsk4,
        Modulation::Msk,
    ] {
        radio.set_modulation(modulation).unwrap();
        for level in 0..8u8 {
            radio.set_power(level).unwrap();

            let table = monitor.state().pa_table;
            if modulation == Modulation::AskOok {
                assert_eq!(table[0], POWER_LEVELS[level as usize]);
                assert_eq!(table[1], 0);
            } else {
                assert_eq!(table[0], 0);
                assert_eq!(table[1], POWER_LEVELS[level as usize]);
            }
            assert_eq!(radio.power().unwrap(), Some(level));
        }
    }
}

#[test]
fn power_table_is_one_burst() {
    let (mut radio, monitor) = radio();
    radio.set_power(7).unwrap();

    assert_eq!(
        monitor.take_frames(),
        vec![vec![0x7E, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]]
    );
}

#[test]
fn power_level_out_of_range_writes_nothing() {
    let (mut radio, monitor) = radio();
    assert!(matches!(
        radio.set_power(8),
        Err(Error::ParameterOutOfRange(_))
    ));
    assert!(monitor.take_frames().is_empty());
}

#[test]
fn modulation_change_moves_power_to_new_slot() {
    let (mut radio, monitor) = radio();
    radio.set_modulation(Modulation::Gfsk).unwrap();
    radio.set_power(5).unwrap();

    radio.set_modulation(Modulation::AskOok).unwrap();
    let table = monitor.state().pa_table;
    assert_eq!(table[0], POWER_LEVELS[5]);
    assert_eq!(table[1], 0);
    assert_eq!(radio.power().unwrap(), Some(5));
}

#[test]
fn failed_modulation_change_still_tracks_written_format() {
    let (mut radio, monitor) = radio();
    monitor.state().fail_after = Some(2);

    assert!(matches!(
        radio.set_modulation(Modulation::AskOok),
        Err(Error::Bus(BusFault))
    ));
    assert_eq!(monitor.config(MDMCFG2) >> 4 & 0x07, Modulation::AskOok as u8);

    monitor.state().fail_after = None;
    radio.set_power(7).unwrap();
    let table = monitor.state().pa_table;
    assert_eq!(table[0], POWER_LEVELS[7]);
    assert_eq!(table[1], 0);
}

#[test]
fn frequency_round_trips() {
    let (mut radio, monitor) = radio();
    radio.set_frequency(433_920_000).unwrap();

    assert_eq!(monitor.take_frames(), vec![vec![0x4D, 0x10, 0xB0, 0x71]]);
    let hz = radio.frequency().unwrap();
    assert!(hz.abs_diff(433_920_000) <= u64::from(radio.oscillator().frequency_step()));
}

#[test]
fn frequency_above_bands_reads_back_unwrapped() {
    let (mut radio, monitor) = radio();
    for address in 0x0D..=0x0F {
        monitor.set_config(address, 0xFF);
    }

    assert_eq!(radio.frequency().unwrap(), 6_655_999_603);
}

#[test]
fn frequency_out_of_band_is_rejected() {
    let (mut radio, monitor) = radio();
    assert!(matches!(
        radio.set_frequency(500_000_000),
        Err(Error::ParameterOutOfRange(_))
    ));
    assert!(monitor.take_frames().is_empty());
}

#[test]
fn sync_word_address_channel_and_length() {
    let (mut radio, monitor) = radio();

    assert_eq!(radio.sync_word().unwrap(), [0xD3, 0x91]);
    radio.set_sync_word([0x12, 0x34]).unwrap();
    assert_eq!(radio.sync_word().unwrap(), [0x12, 0x34]);

    radio.set_address(0x42).unwrap();
    assert_eq!(radio.address().unwrap(), 0x42);

    radio.set_channel(17).unwrap();
    assert_eq!(radio.channel().unwrap(), 17);

    radio.set_packet_length(61).unwrap();
    assert_eq!(radio.packet_length().unwrap(), 61);

    assert_eq!(monitor.config(0x04), 0x12);
    assert_eq!(monitor.config(0x05), 0x34);
}

#[test]
fn packet_control_one_fields_are_isolated() {
    let (mut radio, monitor) = radio();
    monitor.set_config(PKTCTRL1, 0x00);

    radio.set_preamble_quality_threshold(5).unwrap();
    radio.set_crc_autoflush(true).unwrap();
    radio.set_append_status(true).unwrap();
    radio.set_address_check(AddressCheck::AddressAndBothBroadcasts).unwrap();
    assert_eq!(monitor.config(PKTCTRL1), 0b1010_1111);

    radio.set_append_status(false).unwrap();
    assert_eq!(monitor.config(PKTCTRL1), 0b1010_1011);

    assert_eq!(radio.preamble_quality_threshold().unwrap(), 5);
    assert!(radio.crc_autoflush().unwrap());
    assert!(!radio.append_status().unwrap());
    assert_eq!(
        radio.address_check().unwrap(),
        AddressCheck::AddressAndBothBroadcasts
    );
}

#[test]
fn preamble_threshold_too_wide_is_rejected() {
    let (mut radio, monitor) = radio();
    assert!(matches!(
        radio.set_preamble_quality_threshold(8),
        Err(Error::FieldOutOfRange(_))
    ));
    assert_eq!(monitor.config(PKTCTRL1), 0x04);
}

#[test]
fn packet_control_zero_fields_are_isolated() {
    let (mut radio, monitor) = radio();

    radio.set_data_whitening(false).unwrap();
    assert_eq!(monitor.config(PKTCTRL0), 0x05);
    radio.set_packet_format(PacketFormat::AsynchronousSerial).unwrap();
    radio.set_crc(false).unwrap();
    radio.set_length_config(LengthConfig::Infinite).unwrap();
    assert_eq!(monitor.config(PKTCTRL0), 0x32);

    assert!(!radio.data_whitening().unwrap());
    assert_eq!(
        radio.packet_format().unwrap(),
        PacketFormat::AsynchronousSerial
    );
    assert!(!radio.crc().unwrap());
    assert_eq!(radio.length_config().unwrap(), LengthConfig::Infinite);
    // PKTCTRL1 is a different register
    assert_eq!(monitor.config(PKTCTRL1), 0x04);
}

#[test]
fn reserved_length_config_is_reported() {
    let (mut radio, monitor) = radio();
    monitor.set_config(PKTCTRL0, 0x47);
    assert!(matches!(
        radio.length_config(),
        Err(Error::InvalidRegisterValue { value: 3, .. })
    ));
}

#[test]
fn modem_config_two_fields_are_isolated() {
    let (mut radio, monitor) = radio();

    assert!(radio.dc_filter().unwrap());
    radio.set_dc_filter(false).unwrap();
    assert_eq!(monitor.config(MDMCFG2), 0x82);
    assert!(!radio.dc_filter().unwrap());

    radio.set_manchester(true).unwrap();
    radio.set_sync_mode(SyncMode::Bits30Of32CarrierSense).unwrap();
    assert_eq!(monitor.config(MDMCFG2), 0x8F);
    assert!(radio.manchester().unwrap());
    assert_eq!(
        radio.sync_mode().unwrap(),
        SyncMode::Bits30Of32CarrierSense
    );
}

#[test]
fn modem_config_one_fields_are_isolated() {
    let (mut radio, monitor) = radio();

    radio.set_fec(true).unwrap();
    radio.set_preamble_length(PreambleLength::Bytes8).unwrap();
    assert_eq!(monitor.config(MDMCFG1), 0xC2);
    assert!(radio.fec().unwrap());
    assert_eq!(radio.preamble_length().unwrap(), PreambleLength::Bytes8);

    radio.set_channel_spacing(200_000).unwrap();
    assert_eq!(monitor.config(MDMCFG1), 0xC2);
    assert_eq!(monitor.config(MDMCFG0), 248);
    assert_eq!(radio.channel_spacing().unwrap(), 199_951);
}

#[test]
fn data_rate_and_bandwidth_share_modem_config_four() {
    let (mut radio, monitor) = radio();

    radio.set_data_rate(38_400).unwrap();
    assert_eq!(monitor.config(MDMCFG4), 0x8A);
    assert_eq!(monitor.config(MDMCFG3), 131);

    radio.set_rx_bandwidth(200_000).unwrap();
    assert_eq!(monitor.config(MDMCFG4), 0x8A);
    radio.set_rx_bandwidth(812_500).unwrap();
    assert_eq!(monitor.config(MDMCFG4), 0x0A);

    assert_eq!(radio.data_rate().unwrap(), 38_383);
    assert_eq!(radio.rx_bandwidth().unwrap(), 812_500);
}

#[test]
fn data_rate_writes_shared_then_mantissa_register() {
    let (mut radio, monitor) = radio();
    radio.set_data_rate(1_200).unwrap();

    assert_eq!(
        monitor.take_frames(),
        vec![vec![0x90, 0x00], vec![0x10, 0x85], vec![0x11, 131]]
    );
}

#[test]
fn deviation_round_trips() {
    let (mut radio, monitor) = radio();
    radio.set_deviation(20_000).unwrap();

    assert_eq!(monitor.config(DEVIATN), 0x35);
    assert_eq!(radio.deviation().unwrap(), 20_630);
    assert!(matches!(
        radio.set_deviation(1_000_000),
        Err(Error::ParameterOutOfRange(_))
    ));
}

#[test]
fn packet_mode_switch_writes_presets_and_keeps_bandwidth() {
    let (mut radio, monitor) = radio();
    monitor.set_config(MDMCFG4, 0x5C);

    radio.set_packet_mode(true).unwrap();
    assert_eq!(
        monitor.take_frames(),
        vec![
            vec![0x00, 0x0B],
            vec![0x02, 0x06],
            vec![0x08, 0x05],
            vec![0x11, 0xF8],
            vec![0x90, 0x00],
            vec![0x10, 0x5B],
        ]
    );
    assert_eq!(radio.packet_format().unwrap(), PacketFormat::Normal);
    assert_eq!(radio.length_config().unwrap(), LengthConfig::Variable);
    assert!(radio.crc().unwrap());

    radio.set_packet_mode(false).unwrap();
    assert_eq!(monitor.config(0x00), 0x0D);
    assert_eq!(monitor.config(0x02), 0x0D);
    assert_eq!(monitor.config(PKTCTRL0), 0x32);
    assert_eq!(monitor.config(MDMCFG3), 0x93);
    assert_eq!(monitor.config(MDMCFG4), 0x57);
    assert_eq!(radio.data_rate().unwrap(), 4_996);
}

#[test]
fn live_status_reads() {
    let (mut radio, monitor) = radio();
    monitor.state().marcstate.push_back(0x0D);

    assert_eq!(radio.rssi().unwrap(), -34.0);
    assert_eq!(radio.lqi().unwrap(), 0x1E);
    assert_eq!(radio.machine_state().unwrap(), MachineState::Rx);
    assert_eq!(monitor.take_headers(), vec![0xF4, 0xF3, 0xF5]);
}
