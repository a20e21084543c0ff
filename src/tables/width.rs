/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::TableError;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The unsigned integer types a table column can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    U128,
}

impl UintWidth {
    /// All widths, from the narrowest.
    pub const ALL: [UintWidth; 5] = [
        UintWidth::U8,
        UintWidth::U16,
        UintWidth::U32,
        UintWidth::U64,
        UintWidth::U128,
    ];

    /// The number of bits of the type.
    pub const fn bits(self) -> usize {
        match self {
            UintWidth::U8 => 8,
            UintWidth::U16 => 16,
            UintWidth::U32 => 32,
            UintWidth::U64 => 64,
            UintWidth::U128 => 128,
        }
    }

    /// The largest value representable by the type.
    pub const fn max_value(self) -> u128 {
        match self {
            UintWidth::U128 => u128::MAX,
            _ => (1 << self.bits()) - 1,
        }
    }

    /// The Rust name of the type.
    pub const fn type_name(self) -> &'static str {
        match self {
            UintWidth::U8 => "u8",
            UintWidth::U16 => "u16",
            UintWidth::U32 => "u32",
            UintWidth::U64 => "u64",
            UintWidth::U128 => "u128",
        }
    }

    /// Return the narrowest type with at least `n_bits` bits.
    pub fn for_bits(n_bits: usize) -> Result<Self, TableError> {
        Self::ALL
            .into_iter()
            .find(|width| width.bits() >= n_bits)
            .ok_or(TableError::NoWidthFits { bits: n_bits })
    }

    /// Return the narrowest type that can hold `max`.
    pub fn for_value(max: u128) -> Self {
        // a u128 always fits
        Self::for_bits(bit_len(max)).unwrap_or(UintWidth::U128)
    }
}

impl core::fmt::Display for UintWidth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Return `⌈log₂(n + 1)⌉`, the number of bits of the binary representation
/// of `n`.
#[inline(always)]
pub(crate) fn bit_len(n: u128) -> usize {
    (u128::BITS - n.leading_zeros()) as usize
}

/// Return `⌈log₂ n⌉`, or zero if `n` is zero.
#[inline(always)]
pub(crate) fn ceil_log2(n: u128) -> usize {
    if n <= 1 { 0 } else { bit_len(n - 1) }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_for_bits() {
        assert_eq!(UintWidth::for_bits(0), Ok(UintWidth::U8));
        assert_eq!(UintWidth::for_bits(8), Ok(UintWidth::U8));
        assert_eq!(UintWidth::for_bits(9), Ok(UintWidth::U16));
        assert_eq!(UintWidth::for_bits(33), Ok(UintWidth::U64));
        assert_eq!(UintWidth::for_bits(128), Ok(UintWidth::U128));
        assert_eq!(
            UintWidth::for_bits(129),
            Err(TableError::NoWidthFits { bits: 129 })
        );
    }

    #[test]
    fn test_for_value() {
        assert_eq!(UintWidth::for_value(0), UintWidth::U8);
        assert_eq!(UintWidth::for_value(255), UintWidth::U8);
        assert_eq!(UintWidth::for_value(256), UintWidth::U16);
        assert_eq!(UintWidth::for_value(u64::MAX as u128), UintWidth::U64);
        assert_eq!(UintWidth::for_value(u128::MAX), UintWidth::U128);
        for width in UintWidth::ALL {
            assert_eq!(UintWidth::for_value(width.max_value()), width);
        }
    }

    #[test]
    fn test_logs() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(24), 5);
        assert_eq!(ceil_log2(256), 8);
        assert_eq!(ceil_log2(257), 9);
        assert_eq!(bit_len(256), 9);
    }
}
