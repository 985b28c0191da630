//! Bit-field codec for composite configuration registers
//!
//! Several CC1101 configuration registers pack independent settings into a
//! single byte. Each setting is described by a [`Field`]: a named bit range
//! `{offset, width}` inside the byte. Every composite register exposes its
//! canonical field table through [`CompositeRegister::FIELDS`]; the fields of
//! one table never overlap and together cover all eight bits, unused bits
//! included.
//!
//! # Shared-register hazard
//! Updating a single field is a read-modify-write of the whole register. Two
//! unsynchronized updates of fields in the same register race, and the loser's
//! change is lost. Callers sharing a radio must serialize access.

use crate::error::FieldOutOfRange;

/// A named bit range within an 8-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Datasheet name of the field
    pub name: &'static str,
    /// Position of the least significant bit
    pub offset: u8,
    /// Number of bits
    pub width: u8,
}

impl Field {
    /// Declares a field of `width` bits starting at bit `offset`.
    pub const fn new(name: &'static str, offset: u8, width: u8) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    /// Largest value the field can hold
    pub const fn max(&self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    /// Mask of the field's bits within the register
    pub const fn mask(&self) -> u8 {
        self.max() << self.offset
    }

    /// Replaces this field within `current`, leaving every other bit untouched.
    ///
    /// # Errors
    /// [`FieldOutOfRange`] if `value` needs more than `width` bits. The value
    /// is never truncated.
    pub fn pack(&self, current: u8, value: u8) -> Result<u8, FieldOutOfRange> {
        if value > self.max() {
            return Err(FieldOutOfRange {
                field: self.name,
                value,
                width: self.width,
            });
        }
        Ok((current & !self.mask()) | (value << self.offset))
    }

    /// Extracts this field from a raw register value.
    pub const fn unpack(&self, raw: u8) -> u8 {
        (raw & self.mask()) >> self.offset
    }
}

/// An 8-bit configuration register made of several [`Field`]s.
pub trait CompositeRegister: Copy {
    /// Datasheet name of the register
    const NAME: &'static str;

    /// Canonical field table, most significant field first
    const FIELDS: &'static [Field];

    /// Wraps a raw register value
    fn from_bits(bits: u8) -> Self;

    /// Raw register value
    fn bits(self) -> u8;

    /// Current value of one field.
    fn field(self, field: Field) -> u8 {
        debug_assert!(Self::FIELDS.contains(&field));
        field.unpack(self.bits())
    }

    /// Returns a copy with one field replaced.
    fn with(self, field: Field, value: u8) -> Result<Self, FieldOutOfRange> {
        debug_assert!(Self::FIELDS.contains(&field));
        field.pack(self.bits(), value).map(Self::from_bits)
    }

    /// Returns a copy with a single-bit field set or cleared.
    fn with_flag(self, field: Field, enabled: bool) -> Self {
        debug_assert_eq!(field.width, 1);
        Self::from_bits(
            field
                .pack(self.bits(), enabled as u8)
                .unwrap_or_else(|_| self.bits()),
        )
    }
}

/// Implements the byte conversions and [`CompositeRegister`] for a
/// single-byte newtype register.
macro_rules! composite_register {
    ($reg:ident, $name:literal, [$($field:ident),+ $(,)?]) => {
        impl $crate::field::CompositeRegister for $reg {
            const NAME: &'static str = $name;
            const FIELDS: &'static [$crate::field::Field] = &[$(Self::$field),+];

            fn from_bits(bits: u8) -> Self {
                Self(bits)
            }

            fn bits(self) -> u8 {
                self.0
            }
        }

        impl regiface::FromByteArray for $reg {
            type Error = core::convert::Infallible;
            type Array = [u8; 1];

            fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
                Ok(Self(bytes[0]))
            }
        }

        impl regiface::ToByteArray for $reg {
            type Error = core::convert::Infallible;
            type Array = [u8; 1];

            fn to_bytes(self) -> Result<Self::Array, Self::Error> {
                Ok([self.0])
            }
        }
    };
}

pub(crate) use composite_register;
