//! Bus framing of register operations
//!
//! Every CC1101 SPI transaction starts with a header byte: six address bits
//! plus two access flags.
//!
//! | R/W (bit 7) | Burst (bit 6) | Meaning                                   |
//! |-------------|---------------|-------------------------------------------|
//! | 0           | 0             | single write (or strobe, 0x30 - 0x3D)     |
//! | 0           | 1             | burst write                               |
//! | 1           | 0             | single read                               |
//! | 1           | 1             | burst read (or status register, 0x30 - 0x3D) |
//!
//! A [`Frame`] holds the bytes to clock out. Read frames are padded with
//! dummy bytes and transferred full-duplex in place, after which
//! [`Frame::reply`] yields the register contents that followed the header.

use alloc::vec;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::registers::{StatusRegister, Strobe};

/// Mask of the address bits in a header byte
pub const ADDRESS_MASK: u8 = 0x3F;

bitflags! {
    /// Access flags carried in the top two bits of a header byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Access: u8 {
        /// Read when set, write when clear
        const READ = 0x80;
        /// Burst access
        const BURST = 0x40;
    }
}

/// Builds a header byte from an address and access flags.
pub const fn header(address: u8, access: Access) -> u8 {
    (address & ADDRESS_MASK) | access.bits()
}

/// Byte sequence of one bus transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
    reply_len: usize,
}

impl Frame {
    /// Writes `value` to a single register.
    pub fn single_write(address: u8, value: u8) -> Self {
        Self {
            bytes: vec![header(address, Access::empty()), value],
            reply_len: 0,
        }
    }

    /// Writes `values` to consecutive registers, or into the FIFO / PA table.
    pub fn burst_write(address: u8, values: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(values.len() + 1);
        bytes.push(header(address, Access::BURST));
        bytes.extend_from_slice(values);
        Self {
            bytes,
            reply_len: 0,
        }
    }

    /// Reads a single register.
    pub fn single_read(address: u8) -> Self {
        Self {
            bytes: vec![header(address, Access::READ), 0],
            reply_len: 1,
        }
    }

    /// Reads `len` consecutive registers, or drains `len` bytes of the FIFO.
    pub fn burst_read(address: u8, len: usize) -> Self {
        let mut bytes = vec![0; len + 1];
        bytes[0] = header(address, Access::READ | Access::BURST);
        Self {
            bytes,
            reply_len: len,
        }
    }

    /// Issues a command strobe.
    pub fn strobe(strobe: Strobe) -> Self {
        Self {
            bytes: vec![strobe.addr()],
            reply_len: 0,
        }
    }

    /// Reads a status register. Status registers are only reachable with the
    /// burst flag set; without it the same address is a strobe.
    pub fn status_read(register: StatusRegister) -> Self {
        Self {
            bytes: vec![header(register.addr(), Access::READ | Access::BURST), 0],
            reply_len: 1,
        }
    }

    /// The header byte
    pub fn header(&self) -> u8 {
        self.bytes[0]
    }

    /// Whether the frame expects reply bytes and must be transferred full-duplex.
    pub fn is_read(&self) -> bool {
        self.header() & Access::READ.bits() != 0
    }

    /// Number of reply bytes following the header
    pub fn reply_len(&self) -> usize {
        self.reply_len
    }

    /// Bytes to clock out
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Buffer for an in-place full-duplex transfer
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Reply bytes after an in-place transfer, header excluded.
    pub fn reply(&self) -> &[u8] {
        &self.bytes[1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{Config, Pointer};

    #[test]
    fn single_write_leaves_address_unmodified() {
        let frame = Frame::single_write(Config::Pktlen.addr(), 0x3D);
        assert_eq!(frame.as_bytes(), &[0x06, 0x3D]);
        assert_eq!(frame.reply_len(), 0);
        assert!(!frame.is_read());
    }

    #[test]
    fn burst_write_sets_burst_flag() {
        let frame = Frame::burst_write(Pointer::Fifo.addr(), &[0x01, 0x02, 0x03]);
        assert_eq!(frame.as_bytes(), &[0x7F, 0x01, 0x02, 0x03]);
        assert!(!frame.is_read());
    }

    #[test]
    fn reads_pad_for_reply() {
        let single = Frame::single_read(Config::Mdmcfg2.addr());
        assert_eq!(single.as_bytes(), &[0x92, 0x00]);
        assert_eq!(single.reply_len(), 1);

        let burst = Frame::burst_read(Config::Freq2.addr(), 3);
        assert_eq!(burst.as_bytes(), &[0xCD, 0x00, 0x00, 0x00]);
        assert_eq!(burst.reply_len(), 3);
        assert!(burst.is_read());
    }

    #[test]
    fn strobe_is_bare_opcode() {
        assert_eq!(Frame::strobe(Strobe::Sftx).as_bytes(), &[0x3B]);
        assert_eq!(Frame::strobe(Strobe::Sres).as_bytes(), &[0x30]);
    }

    #[test]
    fn status_read_uses_burst_flag() {
        let frame = Frame::status_read(StatusRegister::Marcstate);
        assert_eq!(frame.as_bytes(), &[0xF5, 0x00]);
        assert_eq!(Frame::status_read(StatusRegister::Version).header(), 0xF1);
    }

    #[test]
    fn fifo_direction_is_carried_by_the_read_flag() {
        assert_eq!(Frame::burst_write(Pointer::Fifo.addr(), &[0]).header(), 0x7F);
        assert_eq!(Frame::single_read(Pointer::Fifo.addr()).header(), 0xBF);
        assert_eq!(Frame::burst_read(Pointer::Fifo.addr(), 1).header(), 0xFF);
    }

    #[test]
    fn reply_skips_header() {
        let mut frame = Frame::burst_read(Config::Sync1.addr(), 2);
        frame.as_mut_bytes().copy_from_slice(&[0x0F, 0xD3, 0x91]);
        assert_eq!(frame.reply(), &[0xD3, 0x91]);
    }
}
