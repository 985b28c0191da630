//! Simulated CC1101 for integration tests
//!
//! `SimulatedChip` implements `BusTransport` on top of an in-memory register
//! file. It decodes header bytes the way the chip does, keeps separate TX and
//! RX FIFOs behind the shared FIFO address, and records every frame clocked
//! out so tests can assert on the exact bus traffic.
//!
//! MARCSTATE and RXBYTES reads can be scripted; once a script runs dry the
//! chip reports IDLE and the real RX FIFO fill level.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use cc1101::BusTransport;
use embedded_hal::digital::PinState;

pub const VERSION: u8 = 0x14;

/// Power-on values of the configuration registers 0x00..=0x2E.
const RESET_CONFIG: [u8; 0x2F] = [
    0x29, 0x2E, 0x3F, 0x07, 0xD3, 0x91, 0xFF, 0x04, // 0x00
    0x45, 0x00, 0x00, 0x0F, 0x00, 0x1E, 0xC4, 0xEC, // 0x08
    0x8C, 0x22, 0x02, 0x22, 0xF8, 0x47, 0x07, 0x30, // 0x10
    0x04, 0x36, 0x6C, 0x03, 0x40, 0x91, 0x87, 0x6B, // 0x18
    0xF8, 0x56, 0x10, 0xA9, 0x0A, 0x20, 0x0D, 0x41, // 0x20
    0x00, 0x59, 0x7F, 0x3F, 0x88, 0x31, 0x0B, // 0x28
];

const RESET_PA_TABLE: [u8; 8] = [0xC6, 0, 0, 0, 0, 0, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

#[derive(Debug, PartialEq, Eq)]
pub struct Session(pub u32);

#[derive(Debug)]
pub struct ChipState {
    pub config: [u8; 0x2F],
    pub pa_table: [u8; 8],
    pub tx_fifo: Vec<u8>,
    pub rx_fifo: VecDeque<u8>,
    pub version: u8,
    pub part_number: u8,
    pub rssi: u8,
    pub lqi: u8,
    pub marcstate: VecDeque<u8>,
    pub rxbytes: VecDeque<u8>,
    pub frames: Vec<Vec<u8>>,
    pub lines: Vec<(u8, PinState)>,
    pub opened: Option<(u8, u32)>,
    pub closed: bool,
    pub fail: bool,
    /// Transfers left before every further one fails
    pub fail_after: Option<usize>,
}

impl ChipState {
    fn new() -> Self {
        Self {
            config: RESET_CONFIG,
            pa_table: RESET_PA_TABLE,
            tx_fifo: Vec::new(),
            rx_fifo: VecDeque::new(),
            version: VERSION,
            part_number: 0x00,
            rssi: 0x50,
            lqi: 0x9E,
            marcstate: VecDeque::new(),
            rxbytes: VecDeque::new(),
            frames: Vec::new(),
            lines: Vec::new(),
            opened: None,
            closed: false,
            fail: false,
            fail_after: None,
        }
    }

    fn faulted(&mut self) -> bool {
        if self.fail {
            return true;
        }
        match self.fail_after.as_mut() {
            Some(0) => true,
            Some(left) => {
                *left -= 1;
                false
            }
            None => false,
        }
    }

    fn strobe(&mut self, opcode: u8) {
        match opcode {
            0x30 => {
                self.config = RESET_CONFIG;
                self.pa_table = RESET_PA_TABLE;
                self.tx_fifo.clear();
                self.rx_fifo.clear();
            }
            0x3A => self.rx_fifo.clear(),
            0x3B => self.tx_fifo.clear(),
            _ => {}
        }
    }

    fn status(&mut self, address: u8) -> u8 {
        match address {
            0x30 => self.part_number,
            0x31 => self.version,
            0x33 => self.lqi,
            0x34 => self.rssi,
            0x35 => self.marcstate.pop_front().unwrap_or(0x01),
            0x3A => self.tx_fifo.len() as u8,
            0x3B => self
                .rxbytes
                .pop_front()
                .unwrap_or(self.rx_fifo.len() as u8),
            _ => 0,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        let header = bytes[0];
        let address = header & 0x3F;
        let data = &bytes[1..];

        match address {
            0x30..=0x3D if data.is_empty() => self.strobe(address),
            0x3F => self.tx_fifo.extend_from_slice(data),
            0x3E => {
                for (entry, value) in self.pa_table.iter_mut().zip(data) {
                    *entry = *value;
                }
            }
            _ => {
                for (offset, value) in data.iter().enumerate() {
                    self.config[address as usize + offset] = *value;
                }
            }
        }
    }

    fn read(&mut self, buffer: &mut [u8]) {
        let header = buffer[0];
        let address = header & 0x3F;
        let burst = header & 0x40 != 0;

        for (offset, byte) in buffer[1..].iter_mut().enumerate() {
            *byte = match address {
                0x30..=0x3D if burst => self.status(address),
                0x3F => self.rx_fifo.pop_front().unwrap_or(0),
                0x3E => self.pa_table[offset],
                _ => self.config[address as usize + offset],
            };
        }
        buffer[0] = 0x0F;
    }
}

/// Bus end of the simulation, handed to the radio.
pub struct SimulatedChip {
    state: Arc<Mutex<ChipState>>,
}

/// Test end of the simulation.
#[derive(Clone)]
pub struct Monitor {
    state: Arc<Mutex<ChipState>>,
}

impl Monitor {
    pub fn state(&self) -> MutexGuard<'_, ChipState> {
        self.state.lock().unwrap()
    }

    pub fn config(&self, address: u8) -> u8 {
        self.state().config[address as usize]
    }

    pub fn set_config(&self, address: u8, value: u8) {
        self.state().config[address as usize] = value;
    }

    /// Frames recorded so far, oldest first. Clears the log.
    pub fn take_frames(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.state().frames)
    }

    /// Header bytes of the recorded frames. Clears the log.
    pub fn take_headers(&self) -> Vec<u8> {
        self.take_frames().into_iter().map(|frame| frame[0]).collect()
    }
}

pub fn chip() -> (SimulatedChip, Monitor) {
    let state = Arc::new(Mutex::new(ChipState::new()));
    (
        SimulatedChip {
            state: Arc::clone(&state),
        },
        Monitor { state },
    )
}

impl BusTransport for SimulatedChip {
    type Error = BusFault;
    type Session = Session;

    fn open(&mut self, channel: u8, bit_rate: u32) -> Result<Session, BusFault> {
        self.state.lock().unwrap().opened = Some((channel, bit_rate));
        Ok(Session(7))
    }

    fn close(&mut self, session: Session) -> Result<(), BusFault> {
        assert_eq!(session, Session(7));
        self.state.lock().unwrap().closed = true;
        Ok(())
    }

    fn write_bytes(&mut self, session: &mut Session, bytes: &[u8]) -> Result<(), BusFault> {
        assert_eq!(*session, Session(7));
        let mut state = self.state.lock().unwrap();
        if state.faulted() {
            return Err(BusFault);
        }
        state.frames.push(bytes.to_vec());
        state.write(bytes);
        Ok(())
    }

    fn transfer(&mut self, session: &mut Session, buffer: &mut [u8]) -> Result<(), BusFault> {
        assert_eq!(*session, Session(7));
        let mut state = self.state.lock().unwrap();
        if state.faulted() {
            return Err(BusFault);
        }
        state.frames.push(buffer.to_vec());
        state.read(buffer);
        Ok(())
    }

    fn set_line(&mut self, pin: u8, level: PinState) -> Result<(), BusFault> {
        self.state.lock().unwrap().lines.push((pin, level));
        Ok(())
    }
}

/// Delay that only records what it was asked to sleep, in nanoseconds.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits_ns: Vec<u64>,
}

impl RecordingDelay {
    pub fn total_us(&self) -> u64 {
        self.waits_ns.iter().sum::<u64>() / 1_000
    }
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_ns.push(us as u64 * 1_000);
    }
}

impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns as u64);
    }

    async fn delay_us(&mut self, us: u32) {
        self.waits_ns.push(us as u64 * 1_000);
    }
}
