/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Pre-computed tables for decoding, encoding and skipping codes.

A decoding table for a code is indexed by all possible windows of
[`read_bits`](TableConfig::read_bits) bits: if the window contains a complete
codeword, the entry contains the decoded value and the length of the
codeword; otherwise, the length is the sentinel
[`missing_value_len`](CodeTables::missing_value_len), and the caller must fall
back to the functions in [`codes`](crate::codes). Encoding and length tables
are indexed by values in `[0 . . write_max_val]`.

Tables are built by [`compile`] from a [`TableConfig`], and can be persisted
by an [`Emitter`]: [`RustSourceEmitter`] writes them as Rust constants with the
narrowest integer types chosen by [`UintWidth`].

Reasonable choices are provided by [`TableConfig::default_tables`]; larger
windows resolve more codewords with a single lookup, at the price of
exponentially larger tables.

*/

use crate::codes::{DecodeError, EncodeError};
use crate::dispatch::Codes;

mod width;
pub use width::*;

mod params;
pub use params::*;

mod compiler;
pub use compiler::*;

mod emit;
pub use emit::*;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Error type for table generation.
///
/// All variants denote a misconfigured compilation: no partial table is
/// ever returned.
pub enum TableError {
    /// The decoding window is wider than [`TableConfig::MAX_READ_BITS`].
    ReadBitsTooLarge { read_bits: usize, max: usize },
    /// A code parameter yields a degenerate domain.
    DegenerateParameter { code: Codes, reason: &'static str },
    /// No supported integer type has enough bits.
    NoWidthFits { bits: usize },
    /// A value in the encoding domain cannot be encoded.
    Encode { value: u64, error: EncodeError },
    /// A decoding window produced an error other than an incomplete codeword.
    Decode { window: u64, error: DecodeError },
}

impl core::error::Error for TableError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            TableError::Encode { error, .. } => Some(error),
            TableError::Decode { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::ReadBitsTooLarge { read_bits, max } => write!(
                f,
                "Decoding windows of {} bits are not supported (max {})",
                read_bits, max
            ),
            TableError::DegenerateParameter { code, reason } => {
                write!(f, "Degenerate parameter for {}: {}", code, reason)
            }
            TableError::NoWidthFits { bits } => {
                write!(f, "No unsigned integer type has {} bits", bits)
            }
            TableError::Encode { value, error } => {
                write!(f, "Cannot encode {}: {}", value, error)
            }
            TableError::Decode { window, error } => {
                write!(f, "Cannot decode window {:#b}: {}", window, error)
            }
        }
    }
}
