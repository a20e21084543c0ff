/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Enumeration of all available codes, with associated length, encoding and
//! decoding methods.

use crate::codes::*;
use crate::impls::BitBuf;
use crate::traits::BitOrder;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

#[derive(Debug, Clone, Copy, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[non_exhaustive]
/// An enum whose variants represent all the available codes.
///
/// This enum is kept in sync with implementations in the
/// [`codes`](crate::codes) module.
///
/// Both [`Display`](core::fmt::Display) and [`FromStr`](core::str::FromStr) are
/// implemented for this enum in a dual way, which makes it possible to store a
/// code as a string in a configuration file, and then parse it back.
pub enum Codes {
    Unary,
    Gamma,
    Delta,
    Zeta { k: usize },
    MinimalBinary { max: u64 },
}

/// γ and ζ₁ produce the same codewords, so we implement [`PartialEq`] to
/// make them interchangeable: `Codes::Gamma == Codes::Zeta { k: 1 }`.
impl PartialEq for Codes {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Gamma | Self::Zeta { k: 1 }, Self::Gamma | Self::Zeta { k: 1 }) => true,
            (Self::Unary, Self::Unary) => true,
            (Self::Delta, Self::Delta) => true,
            (Self::Zeta { k }, Self::Zeta { k: k2 }) => k == k2,
            (Self::MinimalBinary { max }, Self::MinimalBinary { max: max2 }) => max == max2,
            _ => false,
        }
    }
}

impl Codes {
    /// Return the length of the codeword of `value`.
    #[must_use]
    #[inline]
    pub fn len(&self, value: u64) -> usize {
        match self {
            Codes::Unary => len_unary(value),
            Codes::Gamma | Codes::Zeta { k: 1 } => len_gamma(value),
            Codes::Delta => len_delta(value),
            Codes::Zeta { k } => len_zeta(value, *k),
            Codes::MinimalBinary { max } => len_minimal_binary(value, *max),
        }
    }

    /// Append the codeword of `value` to `buf`.
    ///
    /// # Panics
    ///
    /// If the codeword does not fit in the buffer, or under the conditions
    /// of the underlying `write_*` function.
    #[inline]
    pub fn write(&self, buf: &mut BitBuf, value: u64, order: BitOrder) {
        match self {
            Codes::Unary => write_unary(buf, value, order),
            Codes::Gamma | Codes::Zeta { k: 1 } => write_gamma(buf, value, order),
            Codes::Delta => write_delta(buf, value, order),
            Codes::Zeta { k } => write_zeta(buf, value, *k, order),
            Codes::MinimalBinary { max } => write_minimal_binary(buf, value, *max, order),
        }
    }

    /// Consume a codeword from `buf`.
    #[inline]
    pub fn read(&self, buf: &mut BitBuf, order: BitOrder) -> Result<u64, DecodeError> {
        match self {
            Codes::Unary => read_unary(buf, order),
            Codes::Gamma | Codes::Zeta { k: 1 } => read_gamma(buf, order),
            Codes::Delta => read_delta(buf, order),
            Codes::Zeta { k } => read_zeta(buf, *k, order),
            Codes::MinimalBinary { max } => read_minimal_binary(buf, *max, order),
        }
    }

    /// Return the codeword of `value`.
    pub fn encode(&self, value: u64, order: BitOrder) -> Result<BitBuf, EncodeError> {
        match self {
            Codes::Unary => encode_unary(value, order),
            Codes::Gamma | Codes::Zeta { k: 1 } => encode_gamma(value, order),
            Codes::Delta => encode_delta(value, order),
            Codes::Zeta { k } => encode_zeta(value, *k, order),
            Codes::MinimalBinary { max } => encode_minimal_binary(value, *max, order),
        }
    }

    /// Decode a codeword from the start of `buf`.
    ///
    /// On error the buffer is left untouched.
    pub fn decode(&self, buf: &mut BitBuf, order: BitOrder) -> Result<Decoded, DecodeError> {
        match self {
            Codes::Unary => decode_unary(buf, order),
            Codes::Gamma | Codes::Zeta { k: 1 } => decode_gamma(buf, order),
            Codes::Delta => decode_delta(buf, order),
            Codes::Zeta { k } => decode_zeta(buf, *k, order),
            Codes::MinimalBinary { max } => decode_minimal_binary(buf, *max, order),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Error type for parsing a code from a string.
pub enum CodeError {
    ParseError(core::num::ParseIntError),
    UnknownCode([u8; 32]),
}
impl core::error::Error for CodeError {}
impl core::fmt::Display for CodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            CodeError::ParseError(e) => write!(f, "Parse error: {}", e),
            CodeError::UnknownCode(s) => {
                write!(f, "Unknown code: ")?;
                for c in s {
                    if *c == 0 {
                        break;
                    }
                    write!(f, "{}", *c as char)?;
                }
                Ok(())
            }
        }
    }
}

impl From<core::num::ParseIntError> for CodeError {
    fn from(e: core::num::ParseIntError) -> Self {
        CodeError::ParseError(e)
    }
}

impl core::fmt::Display for Codes {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Codes::Unary => write!(f, "Unary"),
            Codes::Gamma => write!(f, "Gamma"),
            Codes::Delta => write!(f, "Delta"),
            Codes::Zeta { k } => write!(f, "Zeta({})", k),
            Codes::MinimalBinary { max } => write!(f, "MinimalBinary({})", max),
        }
    }
}

/// Copy the offending string in a fixed-size, zero-padded buffer, so that
/// parsing does not need allocation.
fn array_format_error(s: &str) -> [u8; 32] {
    let mut error_buffer = [0u8; 32];
    let len = s.len().min(error_buffer.len());
    error_buffer[..len].copy_from_slice(&s.as_bytes()[..len]);
    error_buffer
}

impl core::str::FromStr for Codes {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unary" => Ok(Codes::Unary),
            "Gamma" => Ok(Codes::Gamma),
            "Delta" => Ok(Codes::Delta),
            _ => {
                let unknown = || CodeError::UnknownCode(array_format_error(s));
                let (name, rest) = s.split_once('(').ok_or_else(unknown)?;
                let param = rest.strip_suffix(')').ok_or_else(unknown)?;
                match name {
                    "Zeta" => Ok(Codes::Zeta { k: param.parse()? }),
                    "MinimalBinary" => Ok(Codes::MinimalBinary { max: param.parse()? }),
                    _ => Err(unknown()),
                }
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Codes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Codes {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodesVisitor;

        impl serde::de::Visitor<'_> for CodesVisitor {
            type Value = Codes;

            fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, "a code name such as \"Gamma\" or \"Zeta(3)\"")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Codes, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CodesVisitor)
    }
}
