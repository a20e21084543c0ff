/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Unary code.
//!
//! The unary code of `n` is a sequence of `n` zeros followed by a one. The
//! whole codeword is handled as a single fixed-width field, so in
//! [`L2M`](BitOrder::L2M) order the terminating one ends up at the head of
//! the field.

use super::*;
use crate::traits::BitOrder;

/// Return the length of the unary code for `n`.
#[must_use]
#[inline(always)]
pub fn len_unary(n: u64) -> usize {
    (n as usize).saturating_add(1)
}

/// Append the unary code of `n` to `buf`.
///
/// # Panics
///
/// If the codeword does not fit in the buffer.
#[inline]
pub fn write_unary(buf: &mut BitBuf, n: u64, order: BitOrder) {
    let len = len_unary(n);
    assert!(len <= BitBuf::CAPACITY, "unary code of {} is too long", n);
    match order {
        BitOrder::M2L => buf.write_fixed(1, len, order),
        BitOrder::L2M => buf.write_fixed(1 << n, len, order),
    }
}

/// Consume a unary code from `buf`.
#[inline]
pub fn read_unary(buf: &mut BitBuf, order: BitOrder) -> Result<u64, DecodeError> {
    if buf.bits() == 0 {
        return Err(DecodeError::Incomplete);
    }
    let zeros = match order {
        BitOrder::M2L => buf.len() - (u128::BITS - buf.bits().leading_zeros()) as usize,
        BitOrder::L2M => buf.bits().trailing_zeros() as usize,
    };
    buf.read_fixed(zeros + 1, order)?;
    Ok(zeros as u64)
}

/// Return the unary codeword of `n`.
pub fn encode_unary(n: u64, order: BitOrder) -> Result<BitBuf, EncodeError> {
    encode_with(len_unary(n), |buf| write_unary(buf, n, order))
}

/// Decode a unary codeword from the start of `buf`.
pub fn decode_unary(buf: &mut BitBuf, order: BitOrder) -> Result<Decoded, DecodeError> {
    decode_with(buf, |buf| read_unary(buf, order))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bits() {
        for (n, m2l, l2m) in [(0, "1", "1"), (1, "01", "10"), (2, "001", "100"), (3, "0001", "1000")] {
            assert_eq!(encode_unary(n, BitOrder::M2L).unwrap().to_string(), m2l);
            assert_eq!(encode_unary(n, BitOrder::L2M).unwrap().to_string(), l2m);
        }
        assert_eq!(len_unary(3), 4);
    }

    #[test]
    fn test_missing_terminator() {
        for order in BitOrder::ALL {
            let mut buf: BitBuf = "0000".parse().unwrap();
            assert_eq!(decode_unary(&mut buf, order), Err(DecodeError::Incomplete));
            assert_eq!(buf.len(), 4);
            assert_eq!(
                decode_unary(&mut BitBuf::new(), order),
                Err(DecodeError::Incomplete)
            );
        }
    }

    #[test]
    fn test_remainder() {
        let mut buf: BitBuf = "0011010".parse().unwrap();
        assert_eq!(
            decode_unary(&mut buf, BitOrder::M2L),
            Ok(Decoded {
                value: 2,
                bits_consumed: 3
            })
        );
        assert_eq!(buf.to_string(), "1010");

        let mut buf: BitBuf = "0011010".parse().unwrap();
        assert_eq!(
            decode_unary(&mut buf, BitOrder::L2M),
            Ok(Decoded {
                value: 1,
                bits_consumed: 2
            })
        );
        assert_eq!(buf.to_string(), "00110");
    }

    #[test]
    fn test_too_long() {
        assert!(encode_unary(127, BitOrder::M2L).is_ok());
        assert_eq!(
            encode_unary(128, BitOrder::L2M),
            Err(EncodeError::CodewordTooLong {
                len: 129,
                capacity: 128
            })
        );
    }
}
