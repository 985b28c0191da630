//! Error types
//!
//! The pure codecs ([`field`](crate::field), [`units`](crate::units)) report
//! their own small error structs so they stay independent of any bus. The
//! controller lifts them into [`Error`], which additionally carries the
//! transport error type of the bus it drives.

use thiserror::Error;

/// A physical parameter fell outside the range documented for the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{parameter} {value} outside supported range {min}..={max}")]
pub struct ParameterOutOfRange {
    /// Name of the rejected parameter
    pub parameter: &'static str,
    /// The rejected value, in the parameter's unit
    pub value: u64,
    /// Smallest accepted value
    pub min: u64,
    /// Largest accepted value
    pub max: u64,
}

/// A value is too wide for the bit field it was packed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value {value} does not fit the {width}-bit field {field}")]
pub struct FieldOutOfRange {
    /// Datasheet name of the field
    pub field: &'static str,
    /// The rejected value
    pub value: u8,
    /// Width of the field in bits
    pub width: u8,
}

/// Errors reported by the radio controller.
///
/// `E` is the error type of the underlying [`BusTransport`](crate::BusTransport).
#[derive(Debug, Error)]
pub enum Error<E> {
    /// Setter input outside the documented physical range. Nothing was written.
    #[error(transparent)]
    ParameterOutOfRange(#[from] ParameterOutOfRange),

    /// Bit-field value too wide for its allocated width. Nothing was written.
    #[error(transparent)]
    FieldOutOfRange(#[from] FieldOutOfRange),

    /// The bus transport failed; the inner error is passed through unchanged.
    #[error("bus transfer failed: {0:?}")]
    Bus(E),

    /// The VERSION status register read back zero at initialization.
    #[error("device not responding")]
    DeviceNotResponding,

    /// The chip did not return to IDLE before the transmit deadline.
    #[error("timed out waiting for transmission to complete")]
    TxTimeout,

    /// No bytes arrived in the RX FIFO before the receive deadline.
    #[error("timed out waiting for a packet")]
    ReceiveTimeout,

    /// A register field holds a code with no meaning for its typed value.
    #[error("register {register} holds undefined value {value:#04x}")]
    InvalidRegisterValue {
        /// Datasheet name of the register
        register: &'static str,
        /// The raw field value read back
        value: u8,
    },

    /// The payload does not fit the TX FIFO.
    #[error("payload of {len} bytes exceeds the 64 byte TX FIFO")]
    PayloadTooLarge {
        /// Length of the rejected payload
        len: usize,
    },
}
