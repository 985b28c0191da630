//! Received packets
//!
//! With PKTCTRL1.APPEND_STATUS set the chip appends two bytes to every
//! packet in the RX FIFO:
//!
//! ```text
//! [length][payload ...][RSSI][LQI | CRC_OK << 7]
//! ```
//!
//! The length byte excludes the two status bytes. Without APPEND_STATUS only
//! `[length][payload ...]` is present, and no status is reported.

use alloc::vec::Vec;

/// Signal quality bytes appended to a received packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketStatus {
    /// Raw RSSI byte, signed half-dB steps
    pub rssi_raw: u8,
    /// CRC_OK in bit 7, LQI in bits 6:0
    pub status: u8,
}

/// Converts a raw RSSI byte to dBm.
///
/// The byte is a two's complement value in half-dB steps with a fixed
/// 74 dB offset.
pub fn rssi_dbm(raw: u8) -> f32 {
    f32::from(raw as i8) / 2.0 - 74.0
}

impl PacketStatus {
    /// Decodes the two trailing status bytes.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            rssi_raw: bytes[0],
            status: bytes[1],
        }
    }

    /// Received signal strength in dBm
    pub fn rssi_dbm(&self) -> f32 {
        rssi_dbm(self.rssi_raw)
    }

    /// Link quality indicator, lower is better
    pub const fn lqi(&self) -> u8 {
        self.status & 0x7F
    }

    /// Whether the packet passed the CRC check
    pub const fn crc_ok(&self) -> bool {
        self.status >> 7 == 1
    }
}

/// A packet drained from the RX FIFO.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReceivedPacket {
    length: u8,
    payload: Vec<u8>,
    status: Option<PacketStatus>,
}

impl ReceivedPacket {
    /// Splits the bytes read after the length prefix into payload and status.
    ///
    /// `body` holds `length` payload bytes, followed by the two status bytes
    /// when `status_appended` is set. Missing bytes are not synthesized: a
    /// short body yields a short payload and no status.
    pub fn from_fifo(length: u8, mut body: Vec<u8>, status_appended: bool) -> Self {
        let status = if status_appended && body.len() >= length as usize + 2 {
            let rssi_raw = body[length as usize];
            let status = body[length as usize + 1];
            Some(PacketStatus { rssi_raw, status })
        } else {
            None
        };
        body.truncate(length as usize);

        Self {
            length,
            payload: body,
            status,
        }
    }

    /// Length prefix as read from the FIFO
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Packet payload, length prefix and status bytes excluded
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes the packet, returning the payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Appended status bytes, present only when APPEND_STATUS was enabled
    pub fn status(&self) -> Option<PacketStatus> {
        self.status
    }

    /// Whether status bytes were appended to this packet
    pub fn status_appended(&self) -> bool {
        self.status.is_some()
    }
}
