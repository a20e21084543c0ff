/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A bit cursor over a fixed-capacity integer.
//!
//! A [`BitBuf`] holds at most [`BitBuf::CAPACITY`] bits. Its *textual view*
//! is the binary representation of the underlying integer padded to
//! [`len`](BitBuf::len) digits: the first digit is the *head*, the last one
//! the *tail*. With [`BitOrder::M2L`] fixed-width fields are read from the
//! head and appended at the tail; with [`BitOrder::L2M`] they are read from
//! the tail and prepended at the head. Thus, in both orders, the first
//! field written is the first field read back.

use crate::codes::DecodeError;
use crate::traits::BitOrder;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// A bit cursor backed by a `u128`.
///
/// Bits beyond [`len`](BitBuf::len) are always zero, so two buffers with the
/// same textual view compare equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct BitBuf {
    bits: u128,
    len: usize,
}

#[inline(always)]
const fn mask(n_bits: usize) -> u128 {
    if n_bits >= 128 {
        u128::MAX
    } else {
        (1 << n_bits) - 1
    }
}

impl BitBuf {
    /// The maximum number of bits a buffer can hold.
    pub const CAPACITY: usize = u128::BITS as usize;

    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self { bits: 0, len: 0 }
    }

    /// Create a buffer whose textual view is the `len`-digit binary
    /// representation of `bits`.
    ///
    /// # Panics
    ///
    /// If `len` exceeds [`BitBuf::CAPACITY`] or `bits` does not fit in `len`
    /// bits.
    pub fn from_bits(bits: u128, len: usize) -> Self {
        assert!(len <= Self::CAPACITY, "len = {} > {}", len, Self::CAPACITY);
        assert!(
            bits & !mask(len) == 0,
            "bits {:#b} do not fit in {} bits",
            bits,
            len
        );
        Self { bits, len }
    }

    /// The number of bits in the buffer.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The buffer content as an integer, head bit most significant.
    #[must_use]
    #[inline(always)]
    pub const fn bits(&self) -> u128 {
        self.bits
    }

    /// Consume `n_bits` bits and return their value.
    ///
    /// The bits are taken from the head for [`BitOrder::M2L`] and from the
    /// tail for [`BitOrder::L2M`]. If fewer than `n_bits` bits are available
    /// the buffer is left untouched and [`DecodeError::Incomplete`] is
    /// returned.
    #[inline]
    pub fn read_fixed(&mut self, n_bits: usize, order: BitOrder) -> Result<u128, DecodeError> {
        if n_bits > self.len {
            return Err(DecodeError::Incomplete);
        }
        if n_bits == 0 {
            return Ok(0);
        }
        let rest = self.len - n_bits;
        let value = match order {
            BitOrder::M2L => {
                let value = self.bits >> rest;
                self.bits &= mask(rest);
                value
            }
            BitOrder::L2M => {
                let value = self.bits & mask(n_bits);
                self.bits = if n_bits == Self::CAPACITY {
                    0
                } else {
                    self.bits >> n_bits
                };
                value
            }
        };
        self.len = rest;
        Ok(value)
    }

    /// Add the `n_bits`-bit representation of `value`.
    ///
    /// The field is appended at the tail for [`BitOrder::M2L`] and
    /// prepended at the head for [`BitOrder::L2M`].
    ///
    /// # Panics
    ///
    /// If the buffer would exceed [`BitBuf::CAPACITY`] bits. In test mode,
    /// also if `value` does not fit in `n_bits` bits.
    #[inline]
    pub fn write_fixed(&mut self, value: u128, n_bits: usize, order: BitOrder) {
        assert!(
            self.len + n_bits <= Self::CAPACITY,
            "cannot write {} bits in a buffer holding {} bits",
            n_bits,
            self.len
        );
        debug_assert!(value & !mask(n_bits) == 0, "{} does not fit in {} bits", value, n_bits);
        if n_bits == 0 {
            return;
        }
        match order {
            BitOrder::M2L => {
                self.bits = if n_bits == Self::CAPACITY {
                    value
                } else {
                    (self.bits << n_bits) | value
                };
            }
            BitOrder::L2M => {
                // len < CAPACITY, as n_bits > 0
                self.bits |= value << self.len;
            }
        }
        self.len += n_bits;
    }
}

impl core::fmt::Display for BitBuf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for i in (0..self.len).rev() {
            f.write_str(if (self.bits >> i) & 1 == 0 { "0" } else { "1" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Error type for parsing a [`BitBuf`] from a string of binary digits.
pub enum BitBufParseError {
    InvalidDigit { pos: usize },
    TooLong { len: usize },
}

impl core::error::Error for BitBufParseError {}
impl core::fmt::Display for BitBufParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitBufParseError::InvalidDigit { pos } => {
                write!(f, "Invalid binary digit at position {}", pos)
            }
            BitBufParseError::TooLong { len } => write!(
                f,
                "{} digits do not fit in a buffer of {} bits",
                len,
                BitBuf::CAPACITY
            ),
        }
    }
}

impl core::str::FromStr for BitBuf {
    type Err = BitBufParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > Self::CAPACITY {
            return Err(BitBufParseError::TooLong { len: s.len() });
        }
        let mut bits = 0_u128;
        for (pos, c) in s.bytes().enumerate() {
            bits <<= 1;
            match c {
                b'0' => {}
                b'1' => bits |= 1,
                _ => return Err(BitBufParseError::InvalidDigit { pos }),
            }
        }
        Ok(Self {
            bits,
            len: s.len(),
        })
    }
}
