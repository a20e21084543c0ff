/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Bit orders for packing codewords.
//!
//! Every code in this crate is implemented once and parameterized by a
//! [`BitOrder`] value: the two orders run the same algorithm and differ only
//! in which end of a [`BitBuf`](crate::impls::BitBuf) fields are read from
//! and written to. The order never changes the value a codeword decodes to.

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The order in which bits are packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    /// Most significant bit first: fields are read from the head of the
    /// buffer and written at its tail (big endian).
    M2L,
    /// Least significant bit first: fields are read from the tail of the
    /// buffer and written at its head (little endian).
    L2M,
}

/// Alias for [`BitOrder::M2L`]
pub const BE: BitOrder = BitOrder::M2L;

/// Alias for [`BitOrder::L2M`]
pub const LE: BitOrder = BitOrder::L2M;

impl BitOrder {
    /// Both orders, in the order tables are built and emitted.
    pub const ALL: [BitOrder; 2] = [BitOrder::M2L, BitOrder::L2M];

    /// The suffix used for per-order table names (`READ_M2L`, `WRITE_L2M`, …).
    pub const fn suffix(self) -> &'static str {
        match self {
            BitOrder::M2L => "M2L",
            BitOrder::L2M => "L2M",
        }
    }
}

impl core::fmt::Display for BitOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.suffix())
    }
}
