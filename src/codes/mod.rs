/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Instantaneous codes.

Codewords are uniformely indexed from 0 for all codes. For example, the
first few words of [unary](unary), [γ](gamma), and [δ](delta) codes in
[`M2L`](crate::traits::BitOrder::M2L) order are:

| Arg |  unary   |    γ    |     δ    |
|-----|---------:|--------:|---------:|
| 0   |        1 |       1 |        1 |
| 1   |       01 |     010 |     0100 |
| 2   |      001 |     011 |     0101 |
| 3   |     0001 |   00100 |    01100 |
| 4   |    00001 |   00101 |    01101 |
| 5   |   000001 |   00110 |    01110 |
| 6   |  0000001 |   00111 |    01111 |
| 7   | 00000001 | 0001000 | 00100000 |

Each code comes with three functions:

- `len_*` returns the length in bits of the codeword of a value;
- `encode_*` returns the codeword of a value as a [`BitBuf`];
- `decode_*` consumes a codeword from a [`BitBuf`], returning a [`Decoded`]
  or [`DecodeError::Incomplete`] if the buffer does not contain a whole
  codeword. Decoding is transactional: on error the buffer is untouched.

The lower-level `write_*` and `read_*` functions append and consume
codewords in place, and can be used to concatenate several codewords in
the same buffer.

*/

use crate::impls::BitBuf;

pub mod unary;
pub use unary::{decode_unary, encode_unary, len_unary, read_unary, write_unary};

pub mod gamma;
pub use gamma::{decode_gamma, encode_gamma, len_gamma, read_gamma, write_gamma};

pub mod delta;
pub use delta::{decode_delta, encode_delta, len_delta, read_delta, write_delta};

pub mod minimal_binary;
pub use minimal_binary::{
    decode_minimal_binary, encode_minimal_binary, len_minimal_binary, read_minimal_binary,
    write_minimal_binary,
};

pub mod zeta;
pub use zeta::{decode_zeta, encode_zeta, len_zeta, read_zeta, write_zeta};

/// A successfully decoded codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded value.
    pub value: u64,
    /// The length in bits of the codeword.
    pub bits_consumed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Error type for decoding.
///
/// Both variants are recoverable: the caller can supply more bits, or
/// treat the condition as the end of the stream.
pub enum DecodeError {
    /// The available bits do not contain a complete codeword.
    Incomplete,
    /// The codeword represents a value that does not fit in a `u64`.
    Overflow,
}

impl core::error::Error for DecodeError {}
impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::Incomplete => write!(f, "Not enough bits for a complete codeword"),
            DecodeError::Overflow => write!(f, "The decoded value does not fit in 64 bits"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Error type for encoding.
pub enum EncodeError {
    /// The codeword is longer than the capacity of a [`BitBuf`].
    CodewordTooLong { len: usize, capacity: usize },
    /// The value is outside the domain `[0, max)` of a bounded code.
    ValueOutOfRange { value: u64, max: u64 },
}

impl core::error::Error for EncodeError {}
impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::CodewordTooLong { len, capacity } => write!(
                f,
                "A codeword of {} bits does not fit in a buffer of {} bits",
                len, capacity
            ),
            EncodeError::ValueOutOfRange { value, max } => {
                write!(f, "Value {} is out of range [0, {})", value, max)
            }
        }
    }
}

/// Run `read` on a copy of `buf`, committing the copy only on success.
#[inline(always)]
pub(crate) fn decode_with(
    buf: &mut BitBuf,
    read: impl FnOnce(&mut BitBuf) -> Result<u64, DecodeError>,
) -> Result<Decoded, DecodeError> {
    let mut probe = *buf;
    let value = read(&mut probe)?;
    let bits_consumed = buf.len() - probe.len();
    *buf = probe;
    Ok(Decoded {
        value,
        bits_consumed,
    })
}

/// Write a codeword of known length `len` in a fresh buffer.
#[inline(always)]
pub(crate) fn encode_with(len: usize, write: impl FnOnce(&mut BitBuf)) -> Result<BitBuf, EncodeError> {
    if len > BitBuf::CAPACITY {
        return Err(EncodeError::CodewordTooLong {
            len,
            capacity: BitBuf::CAPACITY,
        });
    }
    let mut buf = BitBuf::new();
    write(&mut buf);
    debug_assert_eq!(buf.len(), len);
    Ok(buf)
}

#[inline(always)]
pub(crate) fn to_value(value: u128) -> Result<u64, DecodeError> {
    u64::try_from(value).map_err(|_| DecodeError::Overflow)
}
