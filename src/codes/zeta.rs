/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Boldi–Vigna ζ codes.
//!
//! ζ codes are a generalization of [γ](super::gamma) codes with a parameter
//! `k ≥ 1`. Natural numbers are divided in buckets `[2^(hk) - 1, 2^((h+1)k) - 1)`:
//! the ζ code of `n` is the [unary](super::unary) code of the bucket index
//! `h` followed by the [minimal binary](super::minimal_binary) code of the
//! offset of `n` in its bucket.
//!
//! For `k = 1` the bucket bounds are powers of two and ζ₁ coincides with γ.
//!
//! The parameter must be in the range `1..=64`, and it must be known to
//! decode.

use super::minimal_binary::{len_wide, read_wide, write_wide};
use super::*;
use crate::traits::BitOrder;

/// The largest supported value of the parameter `k`.
pub const MAX_K: usize = 64;

#[inline(always)]
fn ensure_k(k: usize) {
    assert!((1..=MAX_K).contains(&k), "k = {}", k);
}

/// Return the bucket index of `n + 1`, the lower bucket bound and the
/// bucket size.
#[inline(always)]
fn bucket(n: u128, k: usize) -> (usize, u128, u128) {
    let h = n.ilog2() as usize / k;
    let l = 1 << (h * k);
    // the upper bound of the last bucket for k = 64 is 2^128
    let u = 1_u128.checked_shl(((h + 1) * k) as u32).unwrap_or(0);
    (h, l, u.wrapping_sub(l))
}

/// Return the length of the ζ code with parameter `k` for `n`.
///
/// # Panics
///
/// If `k` is not in the range `1..=64`.
#[must_use]
#[inline]
pub fn len_zeta(n: u64, k: usize) -> usize {
    ensure_k(k);
    let n = n as u128 + 1;
    let (h, l, size) = bucket(n, k);
    len_unary(h as u64) + len_wide(n - l, size)
}

/// Append the ζ code with parameter `k` of `n` to `buf`.
///
/// # Panics
///
/// If `k` is not in the range `1..=64`, or if the codeword does not fit in
/// the buffer.
#[inline]
pub fn write_zeta(buf: &mut BitBuf, n: u64, k: usize, order: BitOrder) {
    ensure_k(k);
    let n = n as u128 + 1;
    let (h, l, size) = bucket(n, k);
    write_unary(buf, h as u64, order);
    write_wide(buf, n - l, size, order);
}

/// Consume a ζ code with parameter `k` from `buf`.
///
/// # Panics
///
/// If `k` is not in the range `1..=64`.
#[inline]
pub fn read_zeta(buf: &mut BitBuf, k: usize, order: BitOrder) -> Result<u64, DecodeError> {
    ensure_k(k);
    let h = read_unary(buf, order)? as usize;
    // A bucket this wide has offsets longer than any buffer
    if (h + 1) * k >= BitBuf::CAPACITY {
        return Err(DecodeError::Incomplete);
    }
    let u = 1_u128 << ((h + 1) * k);
    let l = 1_u128 << (h * k);
    let r = read_wide(buf, u - l, order)?;
    to_value(l + r - 1)
}

/// Return the ζ codeword with parameter `k` of `n`.
///
/// # Panics
///
/// If `k` is not in the range `1..=64`.
pub fn encode_zeta(n: u64, k: usize, order: BitOrder) -> Result<BitBuf, EncodeError> {
    encode_with(len_zeta(n, k), |buf| write_zeta(buf, n, k, order))
}

/// Decode a ζ codeword with parameter `k` from the start of `buf`.
///
/// # Panics
///
/// If `k` is not in the range `1..=64`.
pub fn decode_zeta(buf: &mut BitBuf, k: usize, order: BitOrder) -> Result<Decoded, DecodeError> {
    decode_with(buf, |buf| read_zeta(buf, k, order))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bits() {
        for (n, m2l, l2m) in [
            (0, "100", "001"),
            (1, "1010", "0011"),
            (2, "1011", "1011"),
            (3, "1100", "0101"),
            (4, "1101", "1101"),
            (5, "1110", "0111"),
            (6, "1111", "1111"),
            (7, "0100000", "0000010"),
            (8, "0100001", "0000110"),
        ] {
            assert_eq!(encode_zeta(n, 3, BitOrder::M2L).unwrap().to_string(), m2l);
            assert_eq!(encode_zeta(n, 3, BitOrder::L2M).unwrap().to_string(), l2m);
            assert_eq!(len_zeta(n, 3), m2l.len());
        }
    }

    #[test]
    fn test_zeta1_is_gamma() {
        for order in BitOrder::ALL {
            for n in (0..1024).chain([u64::MAX - 1]) {
                assert_eq!(encode_zeta(n, 1, order), encode_gamma(n, order));
            }
        }
    }

    #[test]
    fn test_roundtrip() {
        for k in 1..=MAX_K {
            for order in BitOrder::ALL {
                for n in (0..64).map(|i| (1 << i) - 1).chain(0..256).chain([u64::MAX - 1, u64::MAX]) {
                    let Ok(mut buf) = encode_zeta(n, k, order) else {
                        // the codeword is longer than a buffer
                        assert!(len_zeta(n, k) > BitBuf::CAPACITY);
                        continue;
                    };
                    assert_eq!(buf.len(), len_zeta(n, k));
                    assert_eq!(
                        decode_zeta(&mut buf, k, order).map(|d| d.value),
                        Ok(n),
                        "for value: {} with k {}",
                        n,
                        k
                    );
                    assert!(buf.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_wide_bucket() {
        let mut buf: BitBuf = "0001".parse().unwrap();
        assert_eq!(decode_zeta(&mut buf, 64, BitOrder::M2L), Err(DecodeError::Incomplete));
        assert_eq!(buf.len(), 4);
    }
}
