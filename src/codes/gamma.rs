/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Elias γ code.
//!
//! The γ code of a natural number `n` is the concatenation of the unary code of
//! `⌊log₂(n + 1)⌋` and the binary representation of `n + 1` with the most
//! significant bit removed.

use super::*;
use crate::traits::BitOrder;

/// Return the length of the γ code for `n`.
#[must_use]
#[inline]
pub fn len_gamma(n: u64) -> usize {
    let number_of_bits_to_write = (n as u128 + 1).ilog2();
    2 * number_of_bits_to_write as usize + 1
}

/// Append the γ code of `n` to `buf`.
///
/// # Panics
///
/// If the codeword does not fit in the buffer.
#[inline]
pub fn write_gamma(buf: &mut BitBuf, n: u64, order: BitOrder) {
    let n = n as u128 + 1;
    let number_of_bits_to_write = n.ilog2();
    write_unary(buf, number_of_bits_to_write as u64, order);
    buf.write_fixed(
        n ^ (1 << number_of_bits_to_write),
        number_of_bits_to_write as usize,
        order,
    );
}

/// Consume a γ code from `buf`.
#[inline]
pub fn read_gamma(buf: &mut BitBuf, order: BitOrder) -> Result<u64, DecodeError> {
    let len = read_unary(buf, order)?;
    if len == 0 {
        return Ok(0);
    }
    let s = buf.read_fixed(len as usize, order)?;
    to_value(s + (1 << len) - 1)
}

/// Return the γ codeword of `n`.
pub fn encode_gamma(n: u64, order: BitOrder) -> Result<BitBuf, EncodeError> {
    encode_with(len_gamma(n), |buf| write_gamma(buf, n, order))
}

/// Decode a γ codeword from the start of `buf`.
pub fn decode_gamma(buf: &mut BitBuf, order: BitOrder) -> Result<Decoded, DecodeError> {
    decode_with(buf, |buf| read_gamma(buf, order))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bits() {
        for (n, m2l, l2m) in [
            (0, "1", "1"),
            (1, "010", "010"),
            (2, "011", "110"),
            (3, "00100", "00100"),
            (4, "00101", "01100"),
            (5, "00110", "10100"),
        ] {
            assert_eq!(encode_gamma(n, BitOrder::M2L).unwrap().to_string(), m2l);
            assert_eq!(encode_gamma(n, BitOrder::L2M).unwrap().to_string(), l2m);
            assert_eq!(len_gamma(n), m2l.len());
        }
    }

    #[test]
    fn test_extremes() {
        assert_eq!(len_gamma(u64::MAX), 129);
        assert!(encode_gamma(u64::MAX, BitOrder::M2L).is_err());
        for order in BitOrder::ALL {
            let mut buf = encode_gamma(u64::MAX - 1, order).unwrap();
            assert_eq!(buf.len(), 127);
            assert_eq!(
                decode_gamma(&mut buf, order),
                Ok(Decoded {
                    value: u64::MAX - 1,
                    bits_consumed: 127
                })
            );
        }
    }

    #[test]
    fn test_truncated() {
        for order in BitOrder::ALL {
            let codeword = encode_gamma(100, order).unwrap();
            for len in 0..codeword.len() {
                // keep the first `len` bits written
                let mut buf = match order {
                    BitOrder::M2L => BitBuf::from_bits(codeword.bits() >> (codeword.len() - len), len),
                    BitOrder::L2M => BitBuf::from_bits(codeword.bits() & ((1 << len) - 1), len),
                };
                assert_eq!(decode_gamma(&mut buf, order), Err(DecodeError::Incomplete));
            }
        }
    }
}
