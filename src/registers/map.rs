//! Register catalog
//!
//! Address constants for everything reachable over the CC1101 SPI interface:
//! - Configuration registers (0x00 - 0x2E), read/write
//! - Command strobes (0x30 - 0x3D), written as a bare header byte
//! - Status registers (0x30 - 0x3D), read-only, only reachable with the burst bit set
//! - The PA table (0x3E) and the shared TX/RX FIFO (0x3F)
//!
//! Strobes and status registers share an address range. The chip tells them
//! apart by the access flags of the header byte, see [`frame`](crate::frame).

/// Configuration register addresses.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Config {
    /// GDO2 output pin configuration
    Iocfg2 = 0x00,
    /// GDO1 output pin configuration
    Iocfg1 = 0x01,
    /// GDO0 output pin configuration
    Iocfg0 = 0x02,
    /// RX FIFO and TX FIFO thresholds
    Fifothr = 0x03,
    /// Sync word, high byte
    Sync1 = 0x04,
    /// Sync word, low byte
    Sync0 = 0x05,
    /// Packet length
    Pktlen = 0x06,
    /// Packet automation control
    Pktctrl1 = 0x07,
    /// Packet automation control
    Pktctrl0 = 0x08,
    /// Device address
    Addr = 0x09,
    /// Channel number
    Channr = 0x0A,
    /// Frequency synthesizer control
    Fsctrl1 = 0x0B,
    /// Frequency synthesizer control
    Fsctrl0 = 0x0C,
    /// Frequency control word, high byte
    Freq2 = 0x0D,
    /// Frequency control word, middle byte
    Freq1 = 0x0E,
    /// Frequency control word, low byte
    Freq0 = 0x0F,
    /// Modem configuration
    Mdmcfg4 = 0x10,
    /// Modem configuration
    Mdmcfg3 = 0x11,
    /// Modem configuration
    Mdmcfg2 = 0x12,
    /// Modem configuration
    Mdmcfg1 = 0x13,
    /// Modem configuration
    Mdmcfg0 = 0x14,
    /// Modem deviation setting
    Deviatn = 0x15,
    /// Main radio control state machine configuration
    Mcsm2 = 0x16,
    /// Main radio control state machine configuration
    Mcsm1 = 0x17,
    /// Main radio control state machine configuration
    Mcsm0 = 0x18,
    /// Frequency offset compensation configuration
    Foccfg = 0x19,
    /// Bit synchronization configuration
    Bscfg = 0x1A,
    /// AGC control
    Agcctrl2 = 0x1B,
    /// AGC control
    Agcctrl1 = 0x1C,
    /// AGC control
    Agcctrl0 = 0x1D,
    /// High byte event 0 timeout
    Worevt1 = 0x1E,
    /// Low byte event 0 timeout
    Worevt0 = 0x1F,
    /// Wake on radio control
    Worctrl = 0x20,
    /// Front end RX configuration
    Frend1 = 0x21,
    /// Front end TX configuration
    Frend0 = 0x22,
    /// Frequency synthesizer calibration
    Fscal3 = 0x23,
    /// Frequency synthesizer calibration
    Fscal2 = 0x24,
    /// Frequency synthesizer calibration
    Fscal1 = 0x25,
    /// Frequency synthesizer calibration
    Fscal0 = 0x26,
    /// RC oscillator configuration
    Rcctrl1 = 0x27,
    /// RC oscillator configuration
    Rcctrl0 = 0x28,
    /// Frequency synthesizer calibration control
    Fstest = 0x29,
    /// Production test
    Ptest = 0x2A,
    /// AGC test
    Agctest = 0x2B,
    /// Various test settings
    Test2 = 0x2C,
    /// Various test settings
    Test1 = 0x2D,
    /// Various test settings
    Test0 = 0x2E,
}

/// Command strobe opcodes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strobe {
    /// Reset chip
    Sres = 0x30,
    /// Enable and calibrate frequency synthesizer
    Sfstxon = 0x31,
    /// Turn off crystal oscillator
    Sxoff = 0x32,
    /// Calibrate frequency synthesizer and turn it off
    Scal = 0x33,
    /// Enable RX
    Srx = 0x34,
    /// Enable TX
    Stx = 0x35,
    /// Exit RX/TX, turn off frequency synthesizer
    Sidle = 0x36,
    /// Start automatic RX polling sequence (wake-on-radio)
    Swor = 0x38,
    /// Enter power down mode when CSn goes high
    Spwd = 0x39,
    /// Flush the RX FIFO buffer
    Sfrx = 0x3A,
    /// Flush the TX FIFO buffer
    Sftx = 0x3B,
    /// Reset real time clock to Event1 value
    Sworrst = 0x3C,
    /// No operation, returns the chip status byte
    Snop = 0x3D,
}

/// Read-only status register addresses.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusRegister {
    /// Chip part number
    Partnum = 0x30,
    /// Current version number
    Version = 0x31,
    /// Frequency offset estimate
    Freqest = 0x32,
    /// Demodulator estimate for link quality
    Lqi = 0x33,
    /// Received signal strength indication
    Rssi = 0x34,
    /// Control state machine state
    Marcstate = 0x35,
    /// High byte of WOR timer
    Wortime1 = 0x36,
    /// Low byte of WOR timer
    Wortime0 = 0x37,
    /// Current GDOx status and packet status
    Pktstatus = 0x38,
    /// Current setting from PLL calibration module
    VcoVcDac = 0x39,
    /// Underflow flag and number of bytes in the TX FIFO
    Txbytes = 0x3A,
    /// Overflow flag and number of bytes in the RX FIFO
    Rxbytes = 0x3B,
    /// Last RC oscillator calibration result
    Rcctrl1Status = 0x3C,
    /// Last RC oscillator calibration result
    Rcctrl0Status = 0x3D,
}

/// Multi-byte pointers above the strobe range.
///
/// The TX and RX FIFOs live behind the same address; a write reaches the TX
/// FIFO and a read drains the RX FIFO.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pointer {
    /// 8-entry power amplifier table
    PaTable = 0x3E,
    /// TX FIFO on write, RX FIFO on read
    Fifo = 0x3F,
}

/// Depth of each of the TX and RX FIFOs in bytes.
pub const FIFO_SIZE: usize = 64;

/// Number of entries in the PA table.
pub const PA_TABLE_SIZE: usize = 8;

impl Config {
    /// Header address of this register
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl Strobe {
    /// Opcode byte of this strobe
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl StatusRegister {
    /// Header address of this register
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl Pointer {
    /// Header address of this pointer
    pub const fn addr(self) -> u8 {
        self as u8
    }
}
