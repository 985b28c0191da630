//! Status register contents
//!
//! Decoders for the read-only status registers polled by the transmit and
//! receive loops:
//! - MARCSTATE, the main radio control state machine state
//! - RXBYTES / TXBYTES, FIFO fill level plus overflow/underflow flag
//!
//! Both are read with the burst flag set, see [`Frame::status_read`].
//!
//! [`Frame::status_read`]: crate::frame::Frame::status_read

use bitflags::bitflags;

use super::UnknownValue;

/// Main radio control state machine state (MARCSTATE[4:0])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MachineState {
    /// SLEEP
    Sleep = 0x00,
    /// IDLE
    Idle = 0x01,
    /// XOFF
    Xoff = 0x02,
    /// VCOON_MC
    VcoOnManualCal = 0x03,
    /// REGON_MC
    RegOnManualCal = 0x04,
    /// MANCAL
    ManualCal = 0x05,
    /// VCOON
    VcoOn = 0x06,
    /// REGON
    RegOn = 0x07,
    /// STARTCAL
    StartCal = 0x08,
    /// BWBOOST
    BandwidthBoost = 0x09,
    /// FS_LOCK
    FsLock = 0x0A,
    /// IFADCON
    IfAdcOn = 0x0B,
    /// ENDCAL
    EndCal = 0x0C,
    /// RX
    Rx = 0x0D,
    /// RX_END
    RxEnd = 0x0E,
    /// RX_RST
    RxRst = 0x0F,
    /// TXRX_SWITCH
    TxRxSwitch = 0x10,
    /// RXFIFO_OVERFLOW
    RxFifoOverflow = 0x11,
    /// FSTXON
    FsTxOn = 0x12,
    /// TX
    Tx = 0x13,
    /// TX_END
    TxEnd = 0x14,
    /// RXTX_SWITCH
    RxTxSwitch = 0x15,
    /// TXFIFO_UNDERFLOW
    TxFifoUnderflow = 0x16,
}

impl MachineState {
    /// Mask of the state bits within MARCSTATE
    pub const MASK: u8 = 0x1F;
}

impl TryFrom<u8> for MachineState {
    type Error = UnknownValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value & Self::MASK {
            0x00 => Self::Sleep,
            0x01 => Self::Idle,
            0x02 => Self::Xoff,
            0x03 => Self::VcoOnManualCal,
            0x04 => Self::RegOnManualCal,
            0x05 => Self::ManualCal,
            0x06 => Self::VcoOn,
            0x07 => Self::RegOn,
            0x08 => Self::StartCal,
            0x09 => Self::BandwidthBoost,
            0x0A => Self::FsLock,
            0x0B => Self::IfAdcOn,
            0x0C => Self::EndCal,
            0x0D => Self::Rx,
            0x0E => Self::RxEnd,
            0x0F => Self::RxRst,
            0x10 => Self::TxRxSwitch,
            0x11 => Self::RxFifoOverflow,
            0x12 => Self::FsTxOn,
            0x13 => Self::Tx,
            0x14 => Self::TxEnd,
            0x15 => Self::RxTxSwitch,
            0x16 => Self::TxFifoUnderflow,
            invalid => return Err(UnknownValue(invalid)),
        })
    }
}

bitflags! {
    /// RXBYTES / TXBYTES status register layout
    ///
    /// The low seven bits hold the number of bytes in the FIFO; bit 7 flags
    /// an RX overflow or TX underflow.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FifoBytes: u8 {
        /// RX FIFO overflow / TX FIFO underflow
        const OVERFLOW = 1 << 7;
        /// Number of bytes in the FIFO
        const COUNT = 0x7F;
    }
}

impl FifoBytes {
    /// Number of bytes in the FIFO
    pub const fn count(self) -> u8 {
        self.bits() & Self::COUNT.bits()
    }

    /// Whether the FIFO overflowed (RX) or underflowed (TX)
    pub const fn overflowed(self) -> bool {
        self.contains(Self::OVERFLOW)
    }
}
